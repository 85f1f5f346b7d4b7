pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod translate;
pub mod upstream;
pub mod validate;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use logging::SharedLogger;
pub use server::{build_router, AppState};
