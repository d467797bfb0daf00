//! HTTP gateway for tinylink.
//!
//! Exposes the submission and redirect entry points over axum. The gateway
//! is the outermost layer: it validates incoming URLs, calls into the
//! shortener and redirector, and maps their errors onto status codes.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod validate;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
