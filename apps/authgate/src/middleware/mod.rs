pub mod access_guard;
pub mod authenticate;
pub mod request_trace;
pub mod structured_logger;
pub mod trace_span;

pub use access_guard::AccessGuard;
pub use authenticate::Authenticate;
pub use request_trace::{RequestTrace, TraceId};
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
