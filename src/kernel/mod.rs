//! Headless application core (state/action/effect).

pub mod action;
pub mod effect;
pub mod language;
pub mod services;
pub mod state;
pub mod store;

pub use action::Action;
pub use effect::Effect;
pub use language::LanguageId;
pub use state::{ChatMessage, ChatSender, WorkbenchError, WorkbenchState, INDEX_PAGE};
pub use store::{DispatchResult, Store};
