use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::{Page, PageRequest, SortDirection, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY};

pub(crate) struct PageBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl PageBooksCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// query string of /books/paginated; every parameter is optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageBooksCommandRequest {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

impl PageBooksCommandRequest {
    pub fn new(page: i64, size: i64, sort_by: &str, direction: &str) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            sort_by: Some(sort_by.to_string()),
            direction: Some(direction.to_string()),
        }
    }

    pub fn build_page_request(&self) -> Result<PageRequest, CommandError> {
        let direction = match self.direction.as_deref() {
            Some(direction) => direction.parse::<SortDirection>()?,
            None => SortDirection::Asc,
        };
        Ok(PageRequest::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            self.sort_by.as_deref().unwrap_or(DEFAULT_SORT_BY),
            direction))
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct PageBooksCommandResponse {
    pub page: Page<BookDto>,
}

impl PageBooksCommandResponse {
    pub fn new(page: Page<BookDto>) -> Self {
        Self {
            page,
        }
    }
}

#[async_trait]
impl Command<PageBooksCommandRequest, PageBooksCommandResponse> for PageBooksCommand {
    async fn execute(&self, req: PageBooksCommandRequest) -> Result<PageBooksCommandResponse, CommandError> {
        let page_req = req.build_page_request()?;
        self.catalog_service.get_books_paginated_and_sorted(&page_req).await
            .map_err(CommandError::from).map(PageBooksCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::books::dto::BookDto;
    use crate::catalog::command::page_books_cmd::{PageBooksCommand, PageBooksCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::{PageRequest, SortDirection};

    #[tokio::test]
    async fn test_should_default_page_parameters() {
        let req = PageBooksCommandRequest::default().build_page_request().expect("should build request");
        assert_eq!(PageRequest::new(0, 5, "title", SortDirection::Asc), req);

        let req: PageBooksCommandRequest = serde_json::from_value(serde_json::json!({"sortBy": "author", "direction": "DESC"}))
            .expect("should decode query");
        let req = req.build_page_request().expect("should build request");
        assert_eq!(PageRequest::new(0, 5, "author", SortDirection::Desc), req);
    }

    #[tokio::test]
    async fn test_should_run_page_books() {
        let svc = factory::create_catalog_service(&Configuration::new("test")).await;
        for i in 0..12 {
            let _ = svc.save_book(&BookDto::new(i, format!("book_{:02}", i).as_str())).await.expect("should add book");
        }
        let cmd = PageBooksCommand::new(svc);

        let res = cmd.execute(PageBooksCommandRequest::default()).await.expect("should page books");
        assert_eq!(5, res.page.content.len());
        assert_eq!("book_00", res.page.content[0].title.as_str());
        assert_eq!(3, res.page.total_pages);

        let res = cmd.execute(PageBooksCommandRequest::new(5, 5, "title", "asc")).await.expect("should page books");
        assert!(res.page.empty);
    }

    #[tokio::test]
    async fn test_should_reject_bad_direction_and_sort() {
        let svc = factory::create_catalog_service(&Configuration::new("test")).await;
        let cmd = PageBooksCommand::new(svc);

        let res = cmd.execute(PageBooksCommandRequest::new(0, 5, "title", "up")).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
        let res = cmd.execute(PageBooksCommandRequest::new(0, 5, "color", "asc")).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
    }
}
