pub mod cli;
pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod models;
pub mod output;
pub mod repository;
pub mod store;
pub mod view;

pub use controller::{Controller, Intent, Notifier, Outcome};
pub use error::{ErrorCode, TasklistError};
pub use repository::Repository;
