use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::{Identifiable, UpdateMode};
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::date::opt_serializer;

// BookDto is a data transfer object for Catalog service. Store metadata is optional on input
// and always filled in on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookDto {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub published_year: Option<i32>,
    #[serde(default)]
    pub version: i64,
    #[serde(default, with = "opt_serializer")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "opt_serializer")]
    pub updated_at: Option<NaiveDateTime>,
}

impl BookDto {
    pub fn new(id: i64, title: &str) -> BookDto {
        BookDto {
            id,
            title: title.to_string(),
            author: None,
            isbn: None,
            published_year: None,
            version: 0,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_author(mut self, author: &str) -> BookDto {
        self.author = Some(author.to_string());
        self
    }

    pub fn with_isbn(mut self, isbn: &str) -> BookDto {
        self.isbn = Some(isbn.to_string());
        self
    }

    pub fn with_published_year(mut self, year: i32) -> BookDto {
        self.published_year = Some(year);
        self
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> i64 {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Book for BookDto {
    fn title(&self) -> &str {
        self.title.as_str()
    }
}

impl Display for BookDto {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Book(id={}, title={}, author={}, isbn={}, publishedYear={})",
               self.id,
               self.title,
               self.author.as_deref().unwrap_or("null"),
               self.isbn.as_deref().unwrap_or("null"),
               self.published_year.map(|y| y.to_string()).unwrap_or_else(|| "null".to_string()))
    }
}

// BookDetails is the body of an update; the identity comes from the path and any id here is ignored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookDetails {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub published_year: Option<i32>,
}

impl BookDetails {
    pub fn titled(title: &str) -> Self {
        BookDetails {
            title: Some(title.to_string()),
            ..BookDetails::default()
        }
    }

    // apply builds the next value of a stored book, keeping its identity and version
    pub fn apply(&self, stored: &BookEntity, mode: UpdateMode) -> LibraryResult<BookEntity> {
        match mode {
            UpdateMode::Replace => {
                let title = self.title.clone().ok_or_else(|| LibraryError::validation(
                    format!("title is required to update book with ID {}", stored.book_id).as_str(), None))?;
                Ok(BookEntity {
                    title,
                    author: self.author.clone(),
                    isbn: self.isbn.clone(),
                    published_year: self.published_year,
                    ..stored.clone()
                })
            }
            UpdateMode::Merge => {
                Ok(BookEntity {
                    title: self.title.clone().unwrap_or_else(|| stored.title.clone()),
                    author: self.author.clone().or_else(|| stored.author.clone()),
                    isbn: self.isbn.clone().or_else(|| stored.isbn.clone()),
                    published_year: self.published_year.or(stored.published_year),
                    ..stored.clone()
                })
            }
        }
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.book_id,
            title: other.title.to_string(),
            author: other.author.clone(),
            isbn: other.isbn.clone(),
            published_year: other.published_year,
            version: other.version,
            created_at: Some(other.created_at),
            updated_at: Some(other.updated_at),
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            book_id: other.id,
            version: other.version,
            title: other.title.to_string(),
            author: other.author.clone(),
            isbn: other.isbn.clone(),
            published_year: other.published_year,
            created_at: other.created_at.unwrap_or(now),
            updated_at: other.updated_at.unwrap_or(now),
        }
    }
}
