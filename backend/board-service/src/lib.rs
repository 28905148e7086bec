/// Board Service Library
///
/// A small multi-user board: account registration, stateless session
/// tokens, and a shared in-memory collection of posts with nested comments.
///
/// # Modules
///
/// - `credentials`: Username to password-hash store
/// - `store`: Posts and comments behind a single reader/writer lock
/// - `middleware`: Access gate resolving the caller from a session token
/// - `handlers`: HTTP request handlers and route table
/// - `models`: Data structures for posts, comments and request bodies
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Observability and metrics collection
pub mod config;
pub mod credentials;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod store;

pub use config::Config;
pub use error::{AppError, Result};

use credentials::CredentialStore;
use crypto_core::TokenAuthority;
use store::ContentStore;

/// Process-wide state shared by every worker. The two stores are locked
/// independently; no operation holds both.
#[derive(Debug)]
pub struct AppState {
    pub credentials: CredentialStore,
    pub content: ContentStore,
    pub tokens: TokenAuthority,
    /// Whether the session cookie carries the `Secure` attribute
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(tokens: TokenAuthority) -> Self {
        Self {
            credentials: CredentialStore::new(),
            content: ContentStore::new(),
            tokens,
            cookie_secure: false,
        }
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }
}
