use std::sync::Arc;
use async_trait::async_trait;
use tracing::{error, info, warn};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDetails, BookDto};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::{Configuration, UpdateMode};
use crate::core::library::{LibraryError, LibraryResult, Page, PageRequest};
use crate::core::repository::Repository;

pub(crate) struct CatalogServiceImpl {
    book_repository: Arc<dyn BookRepository>,
    update_mode: UpdateMode,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Arc<dyn BookRepository>) -> Self {
        Self {
            book_repository,
            update_mode: config.update_mode,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn get_all_books(&self) -> LibraryResult<Vec<BookDto>> {
        let res = self.book_repository.find_all().await.map_err(log_store_error)?;
        Ok(res.iter().map(BookDto::from).collect())
    }

    async fn get_book_by_id(&self, id: i64) -> LibraryResult<Option<BookDto>> {
        let res = self.book_repository.get(id).await.map_err(log_store_error)?;
        Ok(res.as_ref().map(BookDto::from))
    }

    async fn save_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        // a single conditional create, so concurrent saves of one id cannot both win
        match self.book_repository.create(&BookEntity::from(book)).await {
            Ok(stored) => {
                info!(book_id = stored.book_id, title = stored.title(), "book added");
                Ok(BookDto::from(&stored))
            }
            Err(LibraryError::DuplicateKey { .. }) => {
                warn!(book_id = book.id, "duplicate book id rejected");
                Err(LibraryError::duplicate_key(
                    format!("Book with ID {} already exists. Please choose a different ID.", book.id).as_str()))
            }
            Err(err) => Err(log_store_error(err)),
        }
    }

    async fn update_book(&self, id: i64, details: &BookDetails) -> LibraryResult<Option<BookDto>> {
        let mut attempt = 1;
        loop {
            let stored = match self.book_repository.get(id).await.map_err(log_store_error)? {
                Some(stored) => stored,
                None => {
                    warn!(book_id = id, "update of missing book rejected");
                    return Ok(None);
                }
            };
            let next = details.apply(&stored, self.update_mode)?;
            match self.book_repository.update(&next).await {
                Ok(written) => {
                    info!(book_id = id, version = written.version, mode = %self.update_mode, attempt, "book updated");
                    return Ok(Some(BookDto::from(&written)));
                }
                Err(LibraryError::NotFound { .. }) => {
                    warn!(book_id = id, "book removed before update");
                    return Ok(None);
                }
                // a concurrent writer won; re-read so the last write wins
                Err(err) if is_version_conflict(&err) && attempt < MAX_UPDATE_ATTEMPTS => {
                    warn!(book_id = id, version = stored.version, attempt, "book changed during update, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(log_store_error(err)),
            }
        }
    }

    async fn delete_book(&self, id: i64) -> LibraryResult<bool> {
        let deleted = self.book_repository.delete(id).await.map_err(log_store_error)?;
        if deleted {
            info!(book_id = id, "book deleted");
        } else {
            warn!(book_id = id, "delete of missing book rejected");
        }
        Ok(deleted)
    }

    async fn get_books_paginated_and_sorted(&self, req: &PageRequest) -> LibraryResult<Page<BookDto>> {
        info!(page = req.page, size = req.size, sort_by = req.sort_by.as_str(), direction = %req.direction, "paging books");
        let page = self.book_repository.find_page(req).await.map_err(|err| match err {
            LibraryError::Validation { .. } => err,
            _ => log_store_error(err),
        })?;
        Ok(page.map(|b| BookDto::from(&b)))
    }
}

const MAX_UPDATE_ATTEMPTS: usize = 5;

fn is_version_conflict(err: &LibraryError) -> bool {
    matches!(err, LibraryError::CurrentlyUnavailable { reason_code: Some(reason), .. } if reason == "ConditionalCheckFailed")
}

fn log_store_error(err: LibraryError) -> LibraryError {
    error!(error = %err, retryable = err.retryable(), "book store failure");
    err
}
