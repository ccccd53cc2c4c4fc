//! Presentation Layer
//!
//! The request-scoped session context, form handlers, middleware, and
//! the router that wires them together.

pub mod context;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use context::SessionCtx;
pub use handlers::AuthAppState;
pub use middleware::{attach_session, require_auth, SessionMiddlewareState};
pub use router::{auth_router, auth_router_generic};
