use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;
use crate::books::dto::BookDetails;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::page_books_cmd::{PageBooksCommand, PageBooksCommandRequest, PageBooksCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::catalog::openapi::openapi_document;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

pub(crate) async fn list_books(
    State(state): State<AppState>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    let res = ListBooksCommand::new(state.catalog_service).execute(ListBooksCommandRequest::default()).await?;
    Ok(Json(res))
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<String, ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(res.message())
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<i64>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let req = GetBookCommandRequest { book_id };
    let res = GetBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    json: Json<Value>) -> Result<String, ServerError> {
    let details: BookDetails = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let req = UpdateBookCommandRequest::new(book_id, details);
    let res = UpdateBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(res.message())
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>) -> Result<String, ServerError> {
    let req = RemoveBookCommandRequest { book_id };
    let res = RemoveBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(res.message())
}

pub(crate) async fn page_books(
    State(state): State<AppState>,
    Query(req): Query<PageBooksCommandRequest>) -> Result<Json<PageBooksCommandResponse>, ServerError> {
    let res = PageBooksCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn api_docs(State(state): State<AppState>) -> Json<Value> {
    Json(openapi_document(&state.config))
}

#[cfg(test)]
mod tests {
    use axum::extract::{Path, Query, State};
    use axum::http::StatusCode;
    use axum::response::Json;
    use serde_json::json;
    use crate::catalog::command::page_books_cmd::PageBooksCommandRequest;
    use crate::catalog::controller::{add_book, api_docs, find_book_by_id, list_books, page_books, remove_book, update_book};
    use crate::catalog::factory;
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;

    async fn build_state() -> AppState {
        let config = Configuration::new("test");
        let svc = factory::create_catalog_service(&config).await;
        AppState::new(config, svc)
    }

    #[tokio::test]
    async fn test_should_serve_book_lifecycle() {
        let state = build_state().await;

        let body = add_book(State(state.clone()), Json(json!({"id": 1, "title": "A", "author": "X"})))
            .await.expect("should add book");
        assert!(body.starts_with("Book added successfully: "));

        let Json(book) = find_book_by_id(State(state.clone()), Path(1)).await.expect("should get book");
        let json = serde_json::to_value(&book).expect("should encode book");
        assert_eq!("A", json["title"]);
        assert_eq!(1, json["id"]);

        let body = update_book(State(state.clone()), Path(1), Json(json!({"title": "B"})))
            .await.expect("should update book");
        assert!(body.starts_with("Book updated successfully: "));

        let body = remove_book(State(state.clone()), Path(1)).await.expect("should remove book");
        assert_eq!("Book with ID 1 deleted successfully.", body.as_str());

        let (status, body) = find_book_by_id(State(state), Path(1)).await.expect_err("should be gone");
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("Book with ID 1 is not found. Please verify the book ID.", body.as_str());
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_with_bad_request() {
        let state = build_state().await;

        let _ = add_book(State(state.clone()), Json(json!({"id": 1, "title": "A"}))).await.expect("should add book");
        let (status, body) = add_book(State(state.clone()), Json(json!({"id": 1, "title": "C"})))
            .await.expect_err("should reject duplicate");
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("Book with ID 1 already exists. Please choose a different ID.", body.as_str());

        let Json(all) = list_books(State(state)).await.expect("should list books");
        assert_eq!(1, all.books.len());
        assert_eq!("A", all.books[0].title.as_str());
    }

    #[tokio::test]
    async fn test_should_reject_malformed_book() {
        let state = build_state().await;
        let (status, _) = add_book(State(state), Json(json!({"title": "no id"})))
            .await.expect_err("should reject body");
        assert_eq!(StatusCode::BAD_REQUEST, status);
    }

    #[tokio::test]
    async fn test_should_report_missing_book_as_not_found() {
        let state = build_state().await;

        let (status, body) = update_book(State(state.clone()), Path(7), Json(json!({"title": "B"})))
            .await.expect_err("should not update");
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("No book found with ID: 7. Kindly add it first.", body.as_str());

        let (status, body) = remove_book(State(state.clone()), Path(7)).await.expect_err("should not delete");
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("No book found with ID 7 so nothing to delete.", body.as_str());

        let Json(all) = list_books(State(state)).await.expect("should list books");
        assert!(all.books.is_empty());
    }

    #[tokio::test]
    async fn test_should_serve_pages() {
        let state = build_state().await;
        for i in 0..12 {
            let _ = add_book(State(state.clone()), Json(json!({"id": i, "title": format!("title_{:02}", i)})))
                .await.expect("should add book");
        }

        let Json(res) = page_books(State(state.clone()), Query(PageBooksCommandRequest::default()))
            .await.expect("should page books");
        let json = serde_json::to_value(&res).expect("should encode page");
        assert_eq!(5, json["content"].as_array().map(|a| a.len()).unwrap_or_default());
        assert_eq!(12, json["totalElements"]);
        assert_eq!(3, json["totalPages"]);
        assert_eq!(false, json["last"]);

        let (status, _) = page_books(State(state), Query(PageBooksCommandRequest::new(0, 5, "color", "asc")))
            .await.expect_err("should reject sort field");
        assert_eq!(StatusCode::BAD_REQUEST, status);
    }

    #[tokio::test]
    async fn test_should_serve_empty_last_page_for_max_page_index() {
        let state = build_state().await;
        let _ = add_book(State(state.clone()), Json(json!({"id": 1, "title": "A"}))).await.expect("should add book");

        let Json(res) = page_books(State(state), Query(PageBooksCommandRequest::new(i64::MAX, 5, "title", "asc")))
            .await.expect("should page books");
        let json = serde_json::to_value(&res).expect("should encode page");
        assert_eq!(true, json["empty"]);
        assert_eq!(true, json["last"]);
        assert_eq!(1, json["totalElements"]);
    }

    #[tokio::test]
    async fn test_should_serve_api_docs() {
        let state = build_state().await;
        let Json(doc) = api_docs(State(state)).await;
        assert_eq!("3.0.1", doc["openapi"]);
        assert!(doc["paths"]["/books/paginated"]["get"].is_object());
    }
}
