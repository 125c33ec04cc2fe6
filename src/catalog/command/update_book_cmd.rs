use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::{BookDetails, BookDto};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateBookCommandRequest {
    pub book_id: i64,
    pub details: BookDetails,
}

impl UpdateBookCommandRequest {
    pub fn new(book_id: i64, details: BookDetails) -> Self {
        Self {
            book_id,
            details,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }

    pub fn message(&self) -> String {
        format!("Book updated successfully: {}", self.book)
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        match self.catalog_service.update_book(req.book_id, &req.details).await? {
            Some(book) => Ok(UpdateBookCommandResponse::new(book)),
            None => Err(CommandError::not_found(
                format!("No book found with ID: {}. Kindly add it first.", req.book_id).as_str())),
        }
    }
}
