//! Shared crypto primitives for Nova board services.
//!
//! - `jwt`: HS256 session tokens signed with an injected secret
//! - `password`: Argon2id password hashing and verification
pub mod jwt;
pub mod password;

pub use jwt::{Claims, IssuedToken, TokenAuthority, TokenError, TOKEN_TTL_MINUTES};
pub use password::{hash_password, verify_password, PasswordError};
