//! # EventEye Registry
//!
//! The verification registry: an append-only mapping from
//! [`VerificationToken`](eventeye_core::VerificationToken) to
//! [`VerificationRecord`](eventeye_core::VerificationRecord).
//!
//! ## Key Types
//!
//! - [`Registry`] - The async trait the issuer and verifier depend on
//! - [`MemoryRegistry`] - Lock-striped in-memory registry
//! - [`SqliteRegistry`] - SQLite-backed registry for records that must persist
//!
//! ## Usage
//!
//! ```rust,no_run
//! use eventeye_core::{Event, Participant, VerificationRecord, VerificationToken};
//! use eventeye_registry::{MemoryRegistry, Registry};
//!
//! async fn example() {
//!     let registry = MemoryRegistry::new();
//!     let event = Event::new("Hackathon 2025", "2025-10-10", "EventEye");
//!     let record = VerificationRecord::new(&Participant::new("Jane Doe", "jane@x.com"), &event, 0);
//!
//!     let token = VerificationToken::generate();
//!     registry.register(&token, &record).await.unwrap();
//!     assert!(registry.lookup(&token).await.unwrap().is_some());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Insert-once**: registering an existing token is a `DuplicateToken` error
//! - **No updates or deletes**: a registered token stays registered
//! - **Misses are normal**: an unknown token looks up as `None`

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{RegistryError, Result};
pub use memory::{MemoryRegistry, DEFAULT_SHARDS};
pub use sqlite::SqliteRegistry;
pub use traits::Registry;
