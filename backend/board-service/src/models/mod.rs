/// Data models for board-service
///
/// This module defines structures for:
/// - Post: a titled entry with its ordered comment thread
/// - Comment: an immutable reply appended to a post
/// - Request/response bodies for the HTTP surface
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post and its embedded comments, as stored and as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<Comment>,
}

/// A comment; `id` is unique within its parent post only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// A registered account. The hash is a PHC string and never leaves the
/// credential store.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    pub password_hash: String,
}

/// Request body for `/signup` and `/signin`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Request body for creating a post. Author, id and timestamp are assigned
/// by the server; any such fields sent by the client are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// Request body for creating a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

/// Response body for a successful sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
