use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::Utc;
use tracing::warn;

use crate::books::domain::{sort_books, BookField};
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, Page, PageRequest};
use crate::core::repository::Repository;
use crate::utils::ddb::{opt_number, opt_string, parse_date_attribute, parse_item, parse_number_attribute, parse_optional_number_attribute, parse_string_attribute, string_date, ConditionalCheck};

const SCAN_PAGE_SIZE: i32 = 500;

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    // DynamoDB has no ordering across partitions, so listings read every scan page.
    async fn scan_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut records = vec![];
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let res = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(true)
                .set_exclusive_start_key(exclusive_start_key)
                .limit(SCAN_PAGE_SIZE)
                .send()
                .await.map_err(LibraryError::from)?;
            if let Some(items) = res.items() {
                records.extend(items.iter().map(map_to_book));
            }
            exclusive_start_key = res.last_evaluated_key().cloned();
            if exclusive_start_key.is_none() {
                return Ok(records);
            }
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        let stored = entity.created();
        let val = serde_json::to_value(&stored)?;
        match self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(book_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await {
            Ok(_) => Ok(stored),
            Err(err) if err.is_conditional_check_failed() => {
                Err(LibraryError::duplicate_key(format!("book {} already exists", entity.book_id).as_str()))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        let res = self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::N(entity.book_id.to_string()))
            .update_expression("SET version = :version, title = :title, author = :author, isbn = :isbn, published_year = :published_year, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":title", AttributeValue::S(entity.title.to_string()))
            .expression_attribute_values(":author", opt_string(entity.author.as_deref()))
            .expression_attribute_values(":isbn", opt_string(entity.isbn.as_deref()))
            .expression_attribute_values(":published_year", opt_number(entity.published_year))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(book_id) AND version = :old_version")
            .return_values(ReturnValue::AllNew)
            .send()
            .await;
        match res {
            Ok(out) => {
                match out.attributes() {
                    Some(map) => Ok(map_to_book(map)),
                    None => Err(LibraryError::database(
                        format!("no attributes returned when updating book {}", entity.book_id).as_str(), None, false)),
                }
            }
            Err(err) if err.is_conditional_check_failed() => {
                // either removed or written by someone else since it was read
                match self.get(entity.book_id).await? {
                    None => Err(LibraryError::not_found(format!("book not found for {}", entity.book_id).as_str())),
                    Some(stored) => {
                        warn!(book_id = entity.book_id, expected = entity.version, found = stored.version, "stale book version");
                        Err(LibraryError::unavailable(
                            format!("book {} was modified concurrently, expected version {} but found {}",
                                    entity.book_id, entity.version, stored.version).as_str(),
                            Some("ConditionalCheckFailed".to_string()), true))
                    }
                }
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn get(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .get_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::N(id.to_string()))
            .consistent_read(true)
            .send()
            .await.map_err(LibraryError::from).map(|res| res.item().map(map_to_book))
    }

    async fn delete(&self, id: i64) -> LibraryResult<bool> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("book_id", AttributeValue::N(id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await.map_err(LibraryError::from).map(|res| res.attributes().is_some())
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        self.scan_all().await
    }

    async fn find_page(&self, req: &PageRequest) -> LibraryResult<Page<BookEntity>> {
        req.validate()?;
        let field = req.sort_by.parse::<BookField>()?;
        let mut records = self.scan_all().await?;
        let total = records.len();
        sort_books(&mut records, field, req.direction);
        let content = records.into_iter()
            .skip(req.offset())
            .take(req.size as usize)
            .collect();
        Ok(Page::new(req, content, total))
    }
}

impl BookRepository for DDBBookRepository {}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        book_id: parse_number_attribute("book_id", map),
        version: parse_number_attribute("version", map),
        title: parse_string_attribute("title", map).unwrap_or(String::from("")),
        author: parse_string_attribute("author", map),
        isbn: parse_string_attribute("isbn", map),
        published_year: parse_optional_number_attribute("published_year", map).and_then(|y| i32::try_from(y).ok()),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use aws_sdk_dynamodb::types::AttributeValue;
    use lazy_static::lazy_static;

    use crate::books::domain::model::BookEntity;
    use crate::books::repository::ddb_book_repository::{map_to_book, DDBBookRepository};
    use crate::core::domain::Configuration;
    use crate::core::library::{LibraryError, PageRequest, SortDirection};
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let config = Configuration::new("test").with_store(RepositoryStore::LocalDynamoDB);
                let client = build_db_client(&config).await;
                let _ = delete_table(&client, "books_test").await;
                let _ = create_table(&client, "books_test", "book_id").await;
                client
            });
    }

    #[tokio::test]
    async fn test_should_map_item_to_book() {
        let map = HashMap::from([
            ("book_id".to_string(), AttributeValue::N("12".to_string())),
            ("version".to_string(), AttributeValue::N("3".to_string())),
            ("title".to_string(), AttributeValue::S("Dune".to_string())),
            ("author".to_string(), AttributeValue::Null(true)),
            ("published_year".to_string(), AttributeValue::N("1965".to_string())),
            ("created_at".to_string(), AttributeValue::S("2022-09-24T04:40:35.726029+00:00".to_string())),
        ]);
        let book = map_to_book(&map);
        assert_eq!(12, book.book_id);
        assert_eq!(3, book.version);
        assert_eq!("Dune", book.title.as_str());
        assert_eq!(None, book.author);
        assert_eq!(Some(1965), book.published_year);
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on localhost:8000"]
    async fn test_should_create_get_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books_test");
        let book = BookEntity::new(1001, "test book");
        let _ = books_repo.create(&book).await.expect("should create book");

        let loaded = books_repo.get(1001).await.expect("should return book").expect("should exist");
        assert_eq!(book.title, loaded.title);

        let res = books_repo.create(&book).await;
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on localhost:8000"]
    async fn test_should_accept_existing_table() {
        let client = CLIENT.get().await.clone();
        create_table(&client, "books_test", "book_id").await.expect("existing table should be accepted");
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on localhost:8000"]
    async fn test_should_create_update_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books_test");
        let mut book = books_repo.create(&BookEntity::new(1002, "test book")).await.expect("should create book");
        book.title = "new title".to_string();
        book.author = Some("someone".to_string());
        let updated = books_repo.update(&book).await.expect("should update book");
        assert_eq!(1, updated.version);

        let loaded = books_repo.get(1002).await.expect("should return book").expect("should exist");
        assert_eq!("new title", loaded.title.as_str());
        assert_eq!(Some("someone".to_string()), loaded.author);

        let res = books_repo.update(&BookEntity::new(1999, "ghost")).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on localhost:8000"]
    async fn test_should_create_page_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books_test");
        for i in 0..12 {
            let _ = books_repo.create(&BookEntity::new(2000 + i, format!("paged_{:02}", i).as_str()))
                .await.expect("should create book");
        }
        let page = books_repo.find_page(&PageRequest::new(0, 5, "id", SortDirection::Desc))
            .await.expect("should return page");
        assert_eq!(5, page.content.len());
        assert!(page.total_elements >= 12);
        assert_eq!(2011, page.content[0].book_id);
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on localhost:8000"]
    async fn test_should_create_delete_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books_test");
        let _ = books_repo.create(&BookEntity::new(1003, "test book")).await.expect("should create book");

        assert!(books_repo.delete(1003).await.expect("should delete book"));
        assert!(!books_repo.delete(1003).await.expect("should delete book"));
        assert_eq!(None, books_repo.get(1003).await.expect("should query"));
    }
}
