mod environment;
mod notifier;

pub use environment::{Environment, ProcessEnvironment};
pub use notifier::{NoopNotifier, Notifier};
