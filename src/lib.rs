//! # Bookhaven Architecture
//!
//! Bookhaven is a **UI-agnostic catalog backend**: six JSON-file-backed
//! entity collections (activities, authors, books, genres, users, sale
//! records) plus a sales-statistics engine. There is no HTTP layer in
//! this crate; a server wires its routes against [`api::Catalog`] and
//! owns serialization, status codes, and CORS itself.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Catalog facade: one handle bundling all stores + stats   │
//! │  - Password validation, outward user views                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Statistics Engine (stats.rs)                               │
//! │  - Stateless aggregation over store snapshots               │
//! │  - Unrestricted and date-bounded variants of each query     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - EntityStore<R>: mutex-guarded, write-through collection  │
//! │  - document: JSON array files, create-if-missing, atomic    │
//! │    replace on save                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Invariants
//!
//! - Ids are store-assigned, unique per collection, and monotonically
//!   increasing; a deleted id is never reused.
//! - After any mutating store operation returns `Ok`, the in-memory
//!   collection and its backing file agree (write-through, no
//!   write-behind).
//! - Reads return fully-formed snapshots; a concurrent mutation is
//!   observed entirely or not at all, never torn.
//!
//! ## Module Overview
//!
//! - [`api`]: the [`api::Catalog`] facade — entry point for clients
//! - [`stats`]: sales aggregation queries
//! - [`store`]: the generic entity store and JSON document I/O
//! - [`model`]: entity records and derived statistics rows
//! - [`config`]: data directory and collection file configuration
//! - [`error`]: error types

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod stats;
pub mod store;
