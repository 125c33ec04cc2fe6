use std::fmt;
use std::fmt::{Display, Formatter};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult, Page, PageRequest};

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity, failing with DuplicateKey if the id is already stored
    async fn create(&self, entity: &Entity) -> LibraryResult<Entity>;

    // updates an existing entity whose version still matches
    async fn update(&self, entity: &Entity) -> LibraryResult<Entity>;

    // get an entity
    async fn get(&self, id: i64) -> LibraryResult<Option<Entity>>;

    // delete an entity, returns true if it existed
    async fn delete(&self, id: i64) -> LibraryResult<bool>;

    // all entities in store order
    async fn find_all(&self) -> LibraryResult<Vec<Entity>>;

    // one sorted page
    async fn find_page(&self, req: &PageRequest) -> LibraryResult<Page<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory,
}

impl RepositoryStore {
    pub fn parse(s: &str) -> LibraryResult<RepositoryStore> {
        match s.to_ascii_lowercase().as_str() {
            "dynamodb" => Ok(RepositoryStore::DynamoDB),
            "local-dynamodb" | "local" => Ok(RepositoryStore::LocalDynamoDB),
            "memory" | "in-memory" => Ok(RepositoryStore::InMemory),
            other => Err(LibraryError::validation(
                format!("unknown repository store {}", other).as_str(), None)),
        }
    }
}

impl Display for RepositoryStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RepositoryStore::DynamoDB => write!(f, "dynamodb"),
            RepositoryStore::LocalDynamoDB => write!(f, "local-dynamodb"),
            RepositoryStore::InMemory => write!(f, "memory"),
        }
    }
}
