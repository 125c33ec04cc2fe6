use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct RemoveBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl RemoveBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveBookCommandRequest {
    pub(crate) book_id: i64,
}

impl RemoveBookCommandRequest {
    pub fn new(book_id: i64) -> Self {
        Self {
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveBookCommandResponse {
    pub book_id: i64,
}

impl RemoveBookCommandResponse {
    pub fn new(book_id: i64) -> Self {
        Self {
            book_id,
        }
    }

    pub fn message(&self) -> String {
        format!("Book with ID {} deleted successfully.", self.book_id)
    }
}

#[async_trait]
impl Command<RemoveBookCommandRequest, RemoveBookCommandResponse> for RemoveBookCommand {
    async fn execute(&self, req: RemoveBookCommandRequest) -> Result<RemoveBookCommandResponse, CommandError> {
        if self.catalog_service.delete_book(req.book_id).await? {
            Ok(RemoveBookCommandResponse::new(req.book_id))
        } else {
            Err(CommandError::not_found(
                format!("No book found with ID {} so nothing to delete.", req.book_id).as_str()))
        }
    }
}
