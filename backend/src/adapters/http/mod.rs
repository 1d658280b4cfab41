//! HTTP adapters - REST API under `/api/v1`.
//!
//! Each area has its own dto / handlers / routes module; `router` stitches
//! them together with the cross-cutting layers.

pub mod account;
pub mod admin;
pub mod cookie;
mod error;
pub mod middleware;
mod router;
mod state;
pub mod subscription;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_router, RouterSettings};
pub use state::{AppState, WebSettings};
