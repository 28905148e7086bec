//! In-memory content store.
//!
//! All posts and the post-id counter sit behind a single reader/writer lock.
//! Readers share it; `create_post` and `add_comment` take it exclusively for
//! their whole read-modify-write, so id allocation and insertion are one
//! critical section. No lock is ever held across I/O or an `.await`.

use crate::error::{AppError, Result};
use crate::models::{Comment, Post};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug)]
struct Board {
    posts: HashMap<u64, Post>,
    next_id: u64,
}

#[derive(Debug)]
pub struct ContentStore {
    inner: RwLock<Board>,
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Board {
                posts: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Allocate the next post id and insert a post with no comments.
    pub fn create_post(&self, author: &str, title: &str, content: &str) -> Post {
        let mut board = self.inner.write();

        let id = board.next_id;
        board.next_id += 1;

        let post = Post {
            id,
            title: title.to_string(),
            content: content.to_string(),
            author: author.to_string(),
            created_at: Utc::now(),
            comments: Vec::new(),
        };
        board.posts.insert(id, post.clone());

        post
    }

    /// Snapshot of every post. Order is unspecified.
    pub fn list_posts(&self) -> Vec<Post> {
        self.inner.read().posts.values().cloned().collect()
    }

    pub fn get_post(&self, post_id: u64) -> Option<Post> {
        self.inner.read().posts.get(&post_id).cloned()
    }

    /// Append a comment to `post_id`.
    ///
    /// The comment id is `len(comments) + 1`, which stays unique only because
    /// comments are never removed.
    pub fn add_comment(&self, post_id: u64, author: &str, content: &str) -> Result<Comment> {
        let mut board = self.inner.write();

        let post = board
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;

        let comment = Comment {
            id: post.comments.len() as u64 + 1,
            content: content.to_string(),
            author: author.to_string(),
            created_at: Utc::now(),
        };
        post.comments.push(comment.clone());

        Ok(comment)
    }

    pub fn len(&self) -> usize {
        self.inner.read().posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_first_post_gets_id_one() {
        let store = ContentStore::new();
        let post = store.create_post("alice", "Hello", "World");

        assert_eq!(post.id, 1);
        assert_eq!(post.author, "alice");
        assert_eq!(post.title, "Hello");
        assert!(post.comments.is_empty());
        assert_eq!(store.get_post(1), Some(post));
    }

    #[test]
    fn test_post_ids_increase_by_one() {
        let store = ContentStore::new();
        let ids: Vec<u64> = (0..5)
            .map(|i| store.create_post("alice", &format!("t{i}"), "c").id)
            .collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_list_posts_returns_snapshot() {
        let store = ContentStore::new();
        store.create_post("alice", "a", "a");
        let snapshot = store.list_posts();

        store.create_post("bob", "b", "b");
        store.add_comment(1, "bob", "late").unwrap();

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot[0].comments.is_empty());
        assert_eq!(store.list_posts().len(), 2);
    }

    #[test]
    fn test_comment_ids_are_scoped_per_post() {
        let store = ContentStore::new();
        let first = store.create_post("alice", "one", "1");
        let second = store.create_post("alice", "two", "2");

        assert_eq!(store.add_comment(first.id, "bob", "a").unwrap().id, 1);
        assert_eq!(store.add_comment(first.id, "bob", "b").unwrap().id, 2);
        assert_eq!(store.add_comment(first.id, "carol", "c").unwrap().id, 3);
        assert_eq!(store.add_comment(second.id, "bob", "x").unwrap().id, 1);
        assert_eq!(store.add_comment(second.id, "bob", "y").unwrap().id, 2);

        let first = store.get_post(first.id).unwrap();
        let ids: Vec<u64> = first.comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(first.comments[2].author, "carol");
    }

    #[test]
    fn test_comment_on_missing_post_is_not_found() {
        let store = ContentStore::new();
        store.create_post("alice", "t", "c");

        let result = store.add_comment(42, "alice", "hello?");
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(store.get_post(1).unwrap().comments.is_empty());
    }

    #[test]
    fn test_concurrent_creates_yield_contiguous_ids() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 50;

        let store = ContentStore::new();
        let mut ids = Vec::new();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|t| {
                    let store = &store;
                    s.spawn(move || {
                        (0..PER_THREAD)
                            .map(|i| store.create_post(&format!("user{t}"), &format!("{i}"), "").id)
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            for handle in handles {
                ids.extend(handle.join().unwrap());
            }
        });

        let total = (THREADS * PER_THREAD) as u64;
        let unique: HashSet<u64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len(), "duplicate post ids handed out");
        assert_eq!(unique, (1..=total).collect::<HashSet<u64>>());
    }

    #[test]
    fn test_concurrent_comments_on_one_post_are_sequential() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 25;

        let store = ContentStore::new();
        let post_id = store.create_post("alice", "busy", "thread").id;

        std::thread::scope(|s| {
            for t in 0..THREADS {
                let store = &store;
                s.spawn(move || {
                    for _ in 0..PER_THREAD {
                        store.add_comment(post_id, &format!("user{t}"), "hi").unwrap();
                    }
                });
            }
        });

        let post = store.get_post(post_id).unwrap();
        let ids: Vec<u64> = post.comments.iter().map(|c| c.id).collect();
        let expected: Vec<u64> = (1..=(THREADS * PER_THREAD) as u64).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_readers_never_observe_torn_state() {
        const READERS: usize = 4;
        const WRITES: usize = 200;

        let store = ContentStore::new();
        let done = AtomicBool::new(false);

        std::thread::scope(|s| {
            for _ in 0..READERS {
                let store = &store;
                let done = &done;
                s.spawn(move || {
                    while !done.load(Ordering::Acquire) {
                        let posts = store.list_posts();

                        // Post ids in any snapshot are exactly 1..=n
                        let mut ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
                        ids.sort_unstable();
                        let expected: Vec<u64> = (1..=ids.len() as u64).collect();
                        assert_eq!(ids, expected);

                        // Each comment sequence is complete and in order
                        for post in &posts {
                            for (idx, comment) in post.comments.iter().enumerate() {
                                assert_eq!(comment.id, idx as u64 + 1);
                                assert_eq!(comment.author, "writer");
                            }
                        }
                    }
                });
            }

            let store = &store;
            let done = &done;
            s.spawn(move || {
                for i in 0..WRITES {
                    let post = store.create_post("writer", &format!("{i}"), "");
                    store.add_comment(post.id, "writer", "first").unwrap();
                    if post.id > 1 {
                        store.add_comment(post.id - 1, "writer", "again").unwrap();
                    }
                }
                done.store(true, Ordering::Release);
            });
        });

        assert_eq!(store.len(), WRITES);
    }
}
