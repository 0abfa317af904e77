//! # Catalog Facade
//!
//! [`Catalog`] is the single entry point an HTTP layer (or any other
//! client) wires against: it opens the six entity stores from one
//! [`CatalogConfig`], builds the stats engine on top of the book and
//! sale stores, and adds the two operations that do not belong to a
//! single store (password validation, public user views).
//!
//! The facade owns no business logic of its own; per-entity CRUD lives
//! on the stores and aggregation in [`crate::stats`].

use crate::config::CatalogConfig;
use crate::error::Result;
use crate::model::{Activity, Author, Book, Genre, PublicUser, SaleHistory, User};
use crate::stats::StatsEngine;
use crate::store::EntityStore;
use std::sync::Arc;
use tracing::debug;

pub struct Catalog {
    activities: EntityStore<Activity>,
    authors: EntityStore<Author>,
    books: Arc<EntityStore<Book>>,
    genres: EntityStore<Genre>,
    users: EntityStore<User>,
    sales: Arc<EntityStore<SaleHistory>>,
    stats: StatsEngine,
}

impl Catalog {
    /// Open every collection under the configured data directory,
    /// creating missing files as empty collections.
    pub fn open(config: &CatalogConfig) -> Result<Self> {
        let activities = EntityStore::open(config.activities_path())?;
        let authors = EntityStore::open(config.authors_path())?;
        let books = Arc::new(EntityStore::open(config.books_path())?);
        let genres = EntityStore::open(config.genres_path())?;
        let users = EntityStore::open(config.users_path())?;
        let sales = Arc::new(EntityStore::open(config.sale_histories_path())?);
        let stats = StatsEngine::new(Arc::clone(&books), Arc::clone(&sales));

        debug!(data_dir = %config.data_dir.display(), "catalog opened");
        Ok(Self {
            activities,
            authors,
            books,
            genres,
            users,
            sales,
            stats,
        })
    }

    pub fn activities(&self) -> &EntityStore<Activity> {
        &self.activities
    }

    pub fn authors(&self) -> &EntityStore<Author> {
        &self.authors
    }

    pub fn books(&self) -> &EntityStore<Book> {
        &self.books
    }

    pub fn genres(&self) -> &EntityStore<Genre> {
        &self.genres
    }

    pub fn users(&self) -> &EntityStore<User> {
        &self.users
    }

    pub fn sales(&self) -> &EntityStore<SaleHistory> {
        &self.sales
    }

    pub fn stats(&self) -> &StatsEngine {
        &self.stats
    }

    /// Plaintext password check. Returns `false` both for an unknown
    /// user id and for a wrong password; callers cannot tell the two
    /// apart through this operation alone.
    pub fn validate_password(&self, id: u32, candidate: &str) -> bool {
        match self.users.get(id) {
            Some(user) => user.password == candidate,
            None => false,
        }
    }

    /// All users in their outward shape (no passwords).
    pub fn public_users(&self) -> Vec<PublicUser> {
        self.users.list().iter().map(User::to_public).collect()
    }

    /// One user in their outward shape, if present.
    pub fn public_user(&self, id: u32) -> Option<PublicUser> {
        self.users.get(id).map(|u| u.to_public())
    }
}
