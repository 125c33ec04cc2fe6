use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::books::domain::{sort_books, BookField};
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, Page, PageRequest};
use crate::core::repository::Repository;

// MemoryBookRepository keeps books in process, ordered by id. Every write holds the lock
// across its existence check, so conditional writes are atomic like their DynamoDB versions.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    books: RwLock<BTreeMap<i64, BookEntity>>,
}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self {
            books: RwLock::new(BTreeMap::new()),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut books = self.books.write().await;
        if books.contains_key(&entity.book_id) {
            return Err(LibraryError::duplicate_key(
                format!("book {} already exists", entity.book_id).as_str()));
        }
        let stored = entity.created();
        books.insert(stored.book_id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut books = self.books.write().await;
        let stored = books.get(&entity.book_id).ok_or_else(|| LibraryError::not_found(
            format!("book not found for {}", entity.book_id).as_str()))?;
        if stored.version != entity.version {
            return Err(LibraryError::unavailable(
                format!("book {} was modified concurrently, expected version {} but found {}",
                        entity.book_id, entity.version, stored.version).as_str(),
                Some("ConditionalCheckFailed".to_string()), true));
        }
        let written = entity.updated(stored);
        books.insert(written.book_id, written.clone());
        Ok(written)
    }

    async fn get(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        Ok(self.books.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> LibraryResult<bool> {
        Ok(self.books.write().await.remove(&id).is_some())
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.books.read().await.values().cloned().collect())
    }

    async fn find_page(&self, req: &PageRequest) -> LibraryResult<Page<BookEntity>> {
        req.validate()?;
        let field = req.sort_by.parse::<BookField>()?;
        let mut records = self.find_all().await?;
        let total = records.len();
        sort_books(&mut records, field, req.direction);
        let content = records.into_iter()
            .skip(req.offset())
            .take(req.size as usize)
            .collect();
        Ok(Page::new(req, content, total))
    }
}

impl BookRepository for MemoryBookRepository {}
