//! Authentication adapters.
//!
//! - `jwt` - HS256 session tokens (`SessionValidator` + `TokenIssuer`)
//! - `argon2_hasher` - Argon2id `PasswordHasher`
//! - `mock` - Token table for tests

mod argon2_hasher;
mod jwt;
mod mock;

pub use argon2_hasher::{Argon2Params, Argon2PasswordHasher};
pub use jwt::JwtSessionManager;
pub use mock::MockSessionValidator;
