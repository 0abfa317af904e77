//! # Storage Layer
//!
//! One [`EntityStore`] per entity kind, all backed by flat JSON documents
//! (one file per collection, each holding a JSON array of records).
//!
//! The layer splits in two:
//!
//! - [`document`]: raw file round-tripping. Creates a missing file as an
//!   empty array, saves via a temporary sibling path plus rename so a
//!   failed write never truncates the previous contents. No locking here;
//!   callers serialize access.
//!
//! - [`entity`]: the generic store. Loads the collection once at open,
//!   allocates monotonically increasing ids, and applies every mutation
//!   under a per-store mutex with an immediate write-through persist.
//!
//! There is no caching layer and no write-behind: after any mutating
//! operation returns `Ok`, memory and disk agree.

pub mod document;
pub mod entity;

pub use entity::EntityStore;
