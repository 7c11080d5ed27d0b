//! itemdesk - Serverless item CRUD handler backed by a single DynamoDB table

pub mod config;
pub mod error;
pub mod types;
pub mod route;

pub mod store;
pub mod handler;
pub mod lambda;
pub mod api;

pub use config::Config;
pub use error::{Error, Result};
pub use handler::{ItemHandler, Outcome};
pub use route::Route;
pub use types::*;
