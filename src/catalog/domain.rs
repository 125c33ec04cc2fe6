pub mod service;

use async_trait::async_trait;
use crate::books::dto::{BookDetails, BookDto};
use crate::core::library::{LibraryResult, Page, PageRequest};

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn get_all_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn get_book_by_id(&self, id: i64) -> LibraryResult<Option<BookDto>>;
    // fails with DuplicateKey when the id is taken, leaving the stored book untouched
    async fn save_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn update_book(&self, id: i64, details: &BookDetails) -> LibraryResult<Option<BookDto>>;
    async fn delete_book(&self, id: i64) -> LibraryResult<bool>;
    async fn get_books_paginated_and_sorted(&self, req: &PageRequest) -> LibraryResult<Page<BookDto>>;
}
