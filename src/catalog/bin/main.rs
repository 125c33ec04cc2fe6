include!("../../lib.rs");
use axum::{
    routing::get,
    Router,
};
use lambda_http::{run, Error};
use tracing::info;
use crate::catalog::controller::{add_book, api_docs, find_book_by_id, list_books, page_books, remove_book, update_book};
use crate::catalog::factory::create_catalog_service;
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::utils::logs::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/images-test.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let config = Configuration::from_env()?;
    if config.is_dev_mode() {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
    }
    info!(branch = config.branch_id.as_str(), store = %config.store, update_mode = %config.update_mode, "starting books service");

    let catalog_service = create_catalog_service(&config).await;
    let state = AppState::new(config, catalog_service);

    let app = Router::new()
        .route("/books", get(list_books).post(add_book))
        .route("/books/paginated", get(page_books))
        .route("/books/:id",
               get(find_book_by_id).put(update_book).delete(remove_book))
        .route("/api-docs", get(api_docs))
        .with_state(state);

    run(app).await
}
