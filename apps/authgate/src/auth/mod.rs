pub mod claims;
pub mod context;
pub mod jwt;

pub use claims::Claims;
pub use context::AuthContext;
pub use jwt::{TokenCodec, TokenError};
