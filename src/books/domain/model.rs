use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookEntity is the persisted form of a book, keyed by the caller supplied book_id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookEntity {
    pub book_id: i64,
    pub version: i64,
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(book_id: i64, title: &str) -> Self {
        Self {
            book_id,
            version: 0,
            title: title.to_string(),
            author: None,
            isbn: None,
            published_year: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // stamped copy as written by a store on insert
    pub fn created(&self) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            version: 0,
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    // stamped copy as written by a store on update; created_at is kept from the stored record
    pub fn updated(&self, stored: &BookEntity) -> Self {
        Self {
            version: stored.version + 1,
            created_at: stored.created_at,
            updated_at: Utc::now().naive_utc(),
            ..self.clone()
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.book_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Book for BookEntity {
    fn title(&self) -> &str {
        self.title.as_str()
    }
}
