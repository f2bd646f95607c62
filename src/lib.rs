//! Reactive local user roster: a SQLite-backed record table behind a
//! single-writer async repository with a live "all records" query.
//!
//! # Examples
//!
//! Direct store usage with [`store::sqlite::SqliteStore`]:
//! ```
//! use roster::{record::UserRecord, store::{RecordStore, sqlite::SqliteStore}};
//!
//! let mut store = SqliteStore::open_in_memory().expect("open");
//! store
//!     .upsert(&UserRecord::new("1", "Ann", "a@x.com", "CS"))
//!     .expect("upsert");
//! let all = store.all().expect("all");
//! assert_eq!(all.len(), 1);
//! assert_eq!(all[0].name, "Ann");
//! ```
//!
//! Repository usage with the live query:
//! ```no_run
//! use roster::{
//!     record::UserRecord,
//!     repo::handle::{RepositoryConfig, spawn_repository},
//!     store::sqlite::SqliteStore,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = SqliteStore::open("roster.db").expect("open sqlite");
//! let repo = spawn_repository(Box::new(store), RepositoryConfig::default())
//!     .expect("spawn repository");
//! let mut live = repo.observe_all();
//! repo.insert(UserRecord::new("1", "Ann", "a@x.com", "CS"))
//!     .await
//!     .expect("insert");
//! live.changed().await.expect("notification");
//! assert_eq!(live.borrow().len(), 1);
//! repo.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Gesture-to-repository bridge and display snapshot.
pub mod controller;
/// Edit-screen boundary contract types.
pub mod edit;
/// Record value types and snapshot alias.
pub mod record;
/// Single-writer async repository handle.
pub mod repo;
/// Persistence seam and SQLite store.
pub mod store;
