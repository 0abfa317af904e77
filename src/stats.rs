//! # Statistics Engine
//!
//! Sales aggregates derived from the Book and SaleHistory stores. The
//! engine is stateless: every query reads fresh `list()` snapshots, so a
//! query concurrent with a mutation sees either the pre- or the
//! post-mutation collection, never a mix.
//!
//! All counting works off the book snapshots embedded in each sale, not
//! the live Book store, and books are identified by their title string.
//! Two catalog entries sharing a title count as one title, and a renamed
//! book no longer matches its historical sales; that fragility is
//! inherited behavior and deliberately kept.
//!
//! Each aggregate comes in two forms: unrestricted (infallible, ignores
//! dates entirely) and `_between(start, end)` with inclusive `yyyy-MM-dd`
//! bounds. Bounded queries validate their bounds up front and also fail
//! on any stored sale whose own date does not parse; a malformed stored
//! date is surfaced, never skipped.

use crate::error::{CatalogError, Result};
use crate::model::{AuthorSales, BestSellingBook, Book, SaleHistory};
use crate::store::EntityStore;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(input: &str) -> Result<NaiveDate> {
    if input.is_empty() {
        return Err(CatalogError::InvalidDate(
            "date must not be empty".to_string(),
        ));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| CatalogError::InvalidDate(format!("not a yyyy-MM-dd date: {input}")))
}

fn parse_bounds(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate)> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start > end {
        return Err(CatalogError::InvalidDate(format!(
            "start date {start} is after end date {end}"
        )));
    }
    Ok((start, end))
}

pub struct StatsEngine {
    books: Arc<EntityStore<Book>>,
    sales: Arc<EntityStore<SaleHistory>>,
}

impl StatsEngine {
    pub fn new(books: Arc<EntityStore<Book>>, sales: Arc<EntityStore<SaleHistory>>) -> Self {
        Self { books, sales }
    }

    /// Copies sold per author name, over the whole sale history.
    /// One embedded book snapshot counts as one copy. Order is arbitrary.
    pub fn author_sales(&self) -> Vec<AuthorSales> {
        author_sales_of(&self.sales.list())
    }

    pub fn author_sales_between(&self, start: &str, end: &str) -> Result<Vec<AuthorSales>> {
        Ok(author_sales_of(&self.sales_between(start, end)?))
    }

    /// Sum of `total_value` across all sales.
    pub fn total_revenue(&self) -> f64 {
        total_revenue_of(&self.sales.list())
    }

    pub fn total_revenue_between(&self, start: &str, end: &str) -> Result<f64> {
        Ok(total_revenue_of(&self.sales_between(start, end)?))
    }

    /// Total copies sold: the number of embedded book snapshots across
    /// all sales, not the number of sale records.
    pub fn total_book_count(&self) -> u64 {
        total_book_count_of(&self.sales.list())
    }

    pub fn total_book_count_between(&self, start: &str, end: &str) -> Result<u64> {
        Ok(total_book_count_of(&self.sales_between(start, end)?))
    }

    /// Copies sold per title, sorted by count descending. Ties land in
    /// arbitrary order.
    pub fn best_selling_books(&self) -> Vec<BestSellingBook> {
        best_selling_books_of(&self.sales.list())
    }

    pub fn best_selling_books_between(&self, start: &str, end: &str) -> Result<Vec<BestSellingBook>> {
        Ok(best_selling_books_of(&self.sales_between(start, end)?))
    }

    /// How many titles in the Book store never show up in any sale.
    pub fn never_sold_book_count(&self) -> u64 {
        never_sold_count_of(&self.books.list(), &self.sales.list())
    }

    pub fn never_sold_book_count_between(&self, start: &str, end: &str) -> Result<u64> {
        Ok(never_sold_count_of(
            &self.books.list(),
            &self.sales_between(start, end)?,
        ))
    }

    // Bound validation happens before any sale is looked at, so reversed
    // bounds fail even with an empty history.
    fn sales_between(&self, start: &str, end: &str) -> Result<Vec<SaleHistory>> {
        let (start, end) = parse_bounds(start, end)?;
        let mut in_scope = Vec::new();
        for sale in self.sales.list() {
            let sale_date = parse_date(&sale.sale_date)?;
            if sale_date >= start && sale_date <= end {
                in_scope.push(sale);
            }
        }
        Ok(in_scope)
    }
}

fn author_sales_of(sales: &[SaleHistory]) -> Vec<AuthorSales> {
    let mut per_author: HashMap<&str, u64> = HashMap::new();
    for sale in sales {
        for book in &sale.books {
            *per_author.entry(book.author.as_str()).or_insert(0) += 1;
        }
    }
    per_author
        .into_iter()
        .map(|(author, quantity)| AuthorSales {
            author: author.to_string(),
            quantity,
        })
        .collect()
}

fn total_revenue_of(sales: &[SaleHistory]) -> f64 {
    sales.iter().map(|sale| sale.total_value).sum()
}

fn total_book_count_of(sales: &[SaleHistory]) -> u64 {
    sales.iter().map(|sale| sale.books.len() as u64).sum()
}

fn best_selling_books_of(sales: &[SaleHistory]) -> Vec<BestSellingBook> {
    let mut per_title: HashMap<&str, u64> = HashMap::new();
    for sale in sales {
        for book in &sale.books {
            *per_title.entry(book.title.as_str()).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<BestSellingBook> = per_title
        .into_iter()
        .map(|(title, count)| BestSellingBook {
            title: title.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

fn never_sold_count_of(books: &[Book], sales: &[SaleHistory]) -> u64 {
    let sold_titles: HashSet<&str> = sales
        .iter()
        .flat_map(|sale| sale.books.iter())
        .map(|book| book.title.as_str())
        .collect();
    books
        .iter()
        .filter(|book| !sold_titles.contains(book.title.as_str()))
        .count() as u64
}
