//! vidup API library
//!
//! HTTP handlers, identity middleware and application setup for the video upload
//! feature.

mod api_doc;
mod handlers;
mod middleware;
mod telemetry;
mod utils;

pub mod auth;
pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use telemetry::init_telemetry;
