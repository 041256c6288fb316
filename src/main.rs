//webcode/src/main.rs
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use webcode::kernel::services::adapters::{
    ensure_settings_file, load_settings, AppMessage, AsyncRuntime, HttpAssistantClient,
};
use webcode::kernel::services::ports::Settings;
use webcode::kernel::{Action, ChatSender, Store, WorkbenchState};
use webcode::models::{TreeNodeKind, VfsPath};

mod logging;

const USAGE: &str =
    "usage: webcode [PATH] [--chat MESSAGE] [--context FILE] [--sync] [--status] [--watch]";

#[derive(Debug, Default)]
struct CliArgs {
    path: Option<String>,
    chat: Option<String>,
    context: Option<String>,
    sync: bool,
    status: bool,
    /// Keep polling `/status` after the one-shot work is done.
    watch: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut out = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--chat" => out.chat = Some(args.next().ok_or("--chat needs a message")?),
            "--context" => out.context = Some(args.next().ok_or("--context needs a path")?),
            "--sync" => out.sync = true,
            "--status" => out.status = true,
            "--watch" => out.watch = true,
            flag if flag.starts_with("--") => return Err(format!("unknown flag: {}", flag)),
            _ if out.path.is_none() => out.path = Some(arg),
            _ => return Err(format!("unexpected argument: {}", arg)),
        }
    }
    Ok(out)
}

#[derive(Debug)]
struct StartupPaths {
    /// Directory to import; `None` keeps the starter project.
    root: Option<PathBuf>,
    open_file: Option<VfsPath>,
}

fn resolve_startup_paths(cwd: &Path, arg: Option<&str>) -> io::Result<StartupPaths> {
    let Some(arg) = arg else {
        return Ok(StartupPaths {
            root: None,
            open_file: None,
        });
    };

    let path = cwd.join(arg);
    let meta = std::fs::metadata(&path)?;
    if meta.is_dir() {
        return Ok(StartupPaths {
            root: Some(path),
            open_file: None,
        });
    }

    let parent = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf());
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "file name is not UTF-8"))?;
    Ok(StartupPaths {
        root: Some(parent),
        open_file: Some(VfsPath::root().join(name)),
    })
}

fn load_or_default_settings() -> Settings {
    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "cannot create settings file");
    }
    load_settings().unwrap_or_default()
}

struct App {
    store: Store,
    runtime: AsyncRuntime,
    rx: mpsc::Receiver<AppMessage>,
    in_flight: usize,
}

impl App {
    fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.in_flight += 1;
            self.runtime.run_effect(effect);
        }
        result.state_changed
    }

    /// Applies async results until no effect is outstanding.
    fn settle(&mut self) -> bool {
        let mut changed = false;
        while self.in_flight > 0 {
            let Ok(msg) = self.rx.recv() else {
                break;
            };
            self.in_flight -= 1;
            changed |= self.dispatch(Action::from(msg));
        }
        changed
    }

    /// One `/status` round trip. True when the shown status changed.
    fn poll_status_once(&mut self) -> bool {
        let changed = self.dispatch(Action::PollStatus);
        self.settle() || changed
    }

    fn watch_status(&mut self, interval: Duration, out: &mut impl Write) -> io::Result<()> {
        tracing::info!(interval_secs = interval.as_secs(), "watching assistant status");
        loop {
            if self.poll_status_once() {
                match &self.store.state().assistant_status {
                    Some(status) => writeln!(
                        out,
                        "assistant: {} ({} tokens)",
                        status.status, status.total_tokens
                    )?,
                    None => writeln!(out, "assistant: offline")?,
                }
                out.flush()?;
            }
            std::thread::sleep(interval);
        }
    }
}

fn print_workbench(state: &WorkbenchState, out: &mut impl Write) -> io::Result<()> {
    for row in state.explorer_rows() {
        let marker = if row.selected { '>' } else { ' ' };
        let suffix = if row.kind == TreeNodeKind::Folder { "/" } else { "" };
        writeln!(
            out,
            "{}{}{}{}",
            marker,
            "  ".repeat(row.depth as usize),
            row.name,
            suffix
        )?;
    }

    if !state.open_tabs().is_empty() {
        let tabs: Vec<String> = state.open_tabs().iter().map(|p| p.to_string()).collect();
        writeln!(out, "\ntabs: {}", tabs.join(" | "))?;
    }
    if let (Some(active), Some(lang)) = (state.active(), state.active_language()) {
        writeln!(out, "active: {} [{}]", active, lang.label())?;
    }
    if let Some(status) = &state.assistant_status {
        writeln!(
            out,
            "assistant: {} ({} tokens)",
            status.status, status.total_tokens
        )?;
    }

    for msg in state.transcript() {
        let who = match msg.sender {
            ChatSender::User => "you",
            ChatSender::Assistant => "assistant",
            ChatSender::System => "system",
            ChatSender::Metric => "metric",
        };
        writeln!(out, "[{}] {}", who, msg.text)?;
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let logging = logging::init();
    let settings = load_or_default_settings();
    let startup = resolve_startup_paths(&std::env::current_dir()?, args.path.as_deref())?;

    let state = if settings.starter_project {
        WorkbenchState::with_starter_project()
    } else {
        WorkbenchState::default()
    };
    let client = HttpAssistantClient::new(&settings.assistant).map_err(io::Error::other)?;
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx, client, settings.import.clone())?;
    let mut app = App {
        store: Store::new(state),
        runtime,
        rx,
        in_flight: 0,
    };

    tracing::info!(
        endpoint = %settings.assistant.endpoint,
        root = ?startup.root,
        "webcode starting"
    );

    if let Some(root) = startup.root {
        app.dispatch(Action::ImportDirectory(root));
        app.settle();
    }
    if let Some(file) = startup.open_file {
        app.dispatch(Action::OpenFile(file));
    }
    if let Some(context) = args.context.as_deref() {
        app.dispatch(Action::SetContextFile(Some(VfsPath::parse(context))));
    }
    if args.status {
        app.dispatch(Action::PollStatus);
    }
    if let Some(message) = args.chat {
        app.dispatch(Action::SubmitChat(message));
    }
    if args.sync {
        app.dispatch(Action::RequestSync);
    }
    app.settle();

    let mut stdout = io::stdout().lock();
    print_workbench(app.store.state(), &mut stdout)?;
    if args.watch {
        stdout.flush()?;
        app.watch_status(settings.assistant.status_poll_interval(), &mut stdout)?;
    }
    if let Some(guard) = &logging {
        tracing::debug!(log_dir = %guard.log_dir().display(), "session finished");
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/cli_startup_paths.rs"]
mod tests;
