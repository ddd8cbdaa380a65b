pub mod pii;
pub mod telemetry;
