use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contract every persisted record fulfils: an integer identifier that the
/// owning store assigns and rewrites at will. Callers never pick ids.
pub trait Record {
    fn id(&self) -> u32;
    fn set_id(&mut self, id: u32);
}

macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(impl Record for $ty {
            fn id(&self) -> u32 {
                self.id
            }

            fn set_id(&mut self, id: u32) {
                self.id = id;
            }
        })+
    };
}

/// A task assigned to a user, e.g. "restock shelf B".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub id: u32,
    pub description: String,
    pub responsible_id: u32,
    pub due_date: DateTime<Utc>,
}

impl Activity {
    pub fn new(description: String, responsible_id: u32, due_date: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            description,
            responsible_id,
            due_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: u32,
    pub name: String,
}

impl Author {
    pub fn new(name: String) -> Self {
        Self { id: 0, name }
    }
}

/// A staff account. The password is stored in the backing file but must
/// never reach an outward-facing serialization; see [`User::to_public`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub username: String,
    pub password: String,
    pub department: String,
    #[serde(default)]
    pub status: u32,
}

impl User {
    pub fn new(name: String, password: String, username: String, department: String) -> Self {
        Self {
            id: 0,
            name,
            username,
            password,
            department,
            status: 0,
        }
    }

    /// Outward view of this user, with the password dropped.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
            department: self.department.clone(),
            status: self.status,
        }
    }
}

/// What an HTTP layer is allowed to serialize for a user: everything
/// except the password.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUser {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub department: String,
    pub status: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: u32,
    pub name: String,
}

impl Genre {
    pub fn new(name: String) -> Self {
        Self { id: 0, name }
    }
}

/// A catalog entry. Author and genres are denormalized strings, not
/// foreign keys into the author/genre collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    pub author: String,
    pub publication_date: DateTime<Utc>,
    pub description: String,
    pub genres: Vec<String>,
    pub pages: u32,
    pub value: f64,
}

/// One sale transaction. `books` holds value copies of the catalog
/// entries as they looked at sale time, not references into the Book
/// store; statistics read titles and authors off these snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleHistory {
    #[serde(default)]
    pub id: u32,
    /// Calendar date of the sale, `yyyy-MM-dd`.
    pub sale_date: String,
    pub total_value: f64,
    #[serde(default)]
    pub books: Vec<Book>,
}

impl SaleHistory {
    pub fn new(sale_date: String, total_value: f64) -> Self {
        Self {
            id: 0,
            sale_date,
            total_value,
            books: Vec::new(),
        }
    }

    pub fn add_book(&mut self, book: Book) {
        self.books.push(book);
    }
}

impl_record!(Activity, Author, User, Genre, Book, SaleHistory);

/// Copies sold per author name, derived from sale snapshots. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorSales {
    pub author: String,
    pub quantity: u64,
}

/// Copies sold per title, derived from sale snapshots. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestSellingBook {
    pub title: String,
    pub count: u64,
}
