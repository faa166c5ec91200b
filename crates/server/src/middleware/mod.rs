//! HTTP middleware stack for the server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span, status and latency)
//! 3. Request ID (propagate or generate, recorded on the span)
//! 4. CORS (configured front-end origin)

pub mod auth;
pub mod request_id;

pub use auth::RequireAdmin;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
