//! HTTP Basic authentication.

mod middleware;

pub use middleware::AuthUser;
