//! Video service ingress: upload, list, and signed-URL download.
//!
//! This crate holds no signing secret of its own — bearer tokens are
//! validated by calling out to the credential service (see
//! [`token_client`]).

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod token_client;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
