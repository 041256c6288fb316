//! Async runtime adapter: executes kernel effects and sends results back as messages.

mod message;
mod runtime;

pub use message::AppMessage;
pub use runtime::AsyncRuntime;
