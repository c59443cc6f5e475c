//! Form server HTTP surface.
//!
//! Serves the single-page form at `/` and the JSON API it drives under
//! `/api/`. The router is composable: `form_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod page;
pub mod router;
pub mod server;
pub mod types;

pub use router::form_router;
pub use server::{start_form_server, FormServer, ServerInfo};
pub use types::ApiContext;
