use crate::models::VfsPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LanguageId {
    Html,
    Css,
    JavaScript,
    TypeScript,
    Json,
    Markdown,
    Rust,
    Python,
    PlainText,
}

impl LanguageId {
    pub fn from_path(path: &VfsPath) -> Self {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("html" | "htm") => Self::Html,
            Some("css") => Self::Css,
            Some("js" | "mjs" | "cjs") => Self::JavaScript,
            Some("ts" | "mts" | "cts") => Self::TypeScript,
            Some("json") => Self::Json,
            Some("md" | "markdown") => Self::Markdown,
            Some("rs") => Self::Rust,
            Some("py" | "pyi") => Self::Python,
            _ => Self::PlainText,
        }
    }

    /// Editor mode identifier.
    pub fn language_id(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Rust => "rust",
            Self::Python => "python",
            Self::PlainText => "plaintext",
        }
    }

    /// Status bar label.
    pub fn label(self) -> String {
        self.language_id().to_ascii_uppercase()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/language.rs"]
mod tests;
