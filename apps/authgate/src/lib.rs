#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod state;
pub mod web;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use adapters::users_memory::InMemoryUserStore;
pub use auth::claims::Claims;
pub use auth::context::AuthContext;
pub use auth::jwt::{TokenCodec, TokenError};
pub use config::app::Config;
pub use error::AppError;
pub use extractors::current_user::CurrentUser;
pub use middleware::access_guard::AccessGuard;
pub use middleware::authenticate::Authenticate;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use repos::users::{CredentialError, User, UserId, UserStore};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
