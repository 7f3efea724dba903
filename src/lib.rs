pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::DomainError;
pub use services::{LogNotifier, Notifier, RequestService};
