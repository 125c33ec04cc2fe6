use std::env;
use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> i64;
    fn version(&self) -> i64;
}

// UpdateMode decides what happens to fields omitted from an update payload
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum UpdateMode {
    // omitted optional fields are cleared and title is mandatory
    Replace,
    // omitted fields keep their stored values
    Merge,
}

impl UpdateMode {
    pub fn parse(s: &str) -> LibraryResult<UpdateMode> {
        match s.to_ascii_lowercase().as_str() {
            "replace" => Ok(UpdateMode::Replace),
            "merge" => Ok(UpdateMode::Merge),
            other => Err(LibraryError::validation(
                format!("unknown update mode {}", other).as_str(), None)),
        }
    }
}

impl Display for UpdateMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            UpdateMode::Replace => write!(f, "replace"),
            UpdateMode::Merge => write!(f, "merge"),
        }
    }
}

pub const API_TITLE: &str = "This is Mubashir's Book Management API";
pub const API_VERSION: &str = "version is Mubashir 😂";
pub const API_DESCRIPTION: &str = "this contains all API documentation for managing books in the wipro system";

// Configuration abstracts config options for the book service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub store: RepositoryStore,
    pub table_name: String,
    pub update_mode: UpdateMode,
    pub dynamodb_endpoint: String,
    pub api_title: String,
    pub api_version: String,
    pub api_description: String,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            store: RepositoryStore::InMemory,
            table_name: "books".to_string(),
            update_mode: UpdateMode::Replace,
            dynamodb_endpoint: "http://localhost:8000".to_string(),
            api_title: API_TITLE.to_string(),
            api_version: API_VERSION.to_string(),
            api_description: API_DESCRIPTION.to_string(),
        }
    }

    pub fn with_store(mut self, store: RepositoryStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    // reads BOOKS_* variables, falling back to the defaults of `new`
    pub fn from_env() -> LibraryResult<Self> {
        let mut config = Configuration::new(
            env::var("BOOKS_ENV").unwrap_or_else(|_| "dev".to_string()).as_str());
        if let Ok(store) = env::var("BOOKS_STORE") {
            config.store = RepositoryStore::parse(store.as_str())?;
        }
        if let Ok(table_name) = env::var("BOOKS_TABLE") {
            config.table_name = table_name;
        }
        if let Ok(mode) = env::var("BOOKS_UPDATE_MODE") {
            config.update_mode = UpdateMode::parse(mode.as_str())?;
        }
        if let Ok(endpoint) = env::var("BOOKS_DYNAMODB_ENDPOINT") {
            config.dynamodb_endpoint = endpoint;
        }
        Ok(config.with_api_info(
            env::var("BOOKS_API_TITLE").ok(),
            env::var("BOOKS_API_VERSION").ok(),
            env::var("BOOKS_API_DESCRIPTION").ok()))
    }

    // replaces the published API metadata, keeping the defaults for anything unset
    pub fn with_api_info(mut self, title: Option<String>, version: Option<String>, description: Option<String>) -> Self {
        if let Some(title) = title {
            self.api_title = title;
        }
        if let Some(version) = version {
            self.api_version = version;
        }
        if let Some(description) = description {
            self.api_description = description;
        }
        self
    }

    pub fn is_dev_mode(&self) -> bool {
        self.store != RepositoryStore::DynamoDB
    }
}
