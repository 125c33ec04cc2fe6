use std::sync::Arc;
use tracing::warn;
use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_book_repository(config: &Configuration) -> Arc<dyn BookRepository> {
    match config.store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(config).await;
            Arc::new(DDBBookRepository::new(client, config.table_name.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(config).await;
            if let Err(err) = create_table(&client, config.table_name.as_str(), "book_id").await {
                warn!(table = config.table_name.as_str(), error = %err, "could not create books table");
            }
            Arc::new(DDBBookRepository::new(client, config.table_name.as_str()))
        }
        RepositoryStore::InMemory => {
            Arc::new(MemoryBookRepository::new())
        }
    }
}
