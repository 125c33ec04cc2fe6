use std::sync::Arc;
use axum::http::StatusCode;
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) catalog_service: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(config: Configuration, catalog_service: Arc<dyn CatalogService>) -> AppState {
        AppState {
            config,
            catalog_service,
        }
    }
}

pub(crate) type ServerError = (StatusCode, String);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, format!("{}", err))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Database { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            CommandError::DuplicateKey { .. } => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            CommandError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            CommandError::Runtime { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            CommandError::Serialization { .. } => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            CommandError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            CommandError::Other { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}
