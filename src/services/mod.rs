pub mod notifier;
pub mod orchestrator;

pub use notifier::{LogNotifier, Notifier};
pub use orchestrator::RequestService;
