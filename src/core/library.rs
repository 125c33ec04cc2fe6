use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // This is a retry-able error, which indicates that a conditional write lost against a
    // concurrent writer (e.g. the stored version moved on since the record was read).
    // The caller can re-read the record and retry with or without a backoff.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                LibraryError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                LibraryError::validation(
                    format!("rejected request error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                LibraryError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            LibraryError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, .. } => {
                write!(f, "{}", message)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for Repository .
pub type LibraryResult<T> = Result<T, LibraryError>;

pub const DEFAULT_PAGE: i64 = 0;
pub const DEFAULT_PAGE_SIZE: i64 = 5;
pub const DEFAULT_SORT_BY: &str = "title";

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

impl FromStr for SortDirection {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(LibraryError::validation(
                format!("invalid sort direction '{}', expected 'asc' or 'desc'", s).as_str(), None))
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

// PageRequest describes an offset page over a sorted collection. The page index and size
// are kept signed so that the store, not the transport, decides what is out of range.
#[derive(Debug, PartialEq, Clone)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort_by: String,
    pub direction: SortDirection,
}

impl PageRequest {
    pub fn new(page: i64, size: i64, sort_by: &str, direction: SortDirection) -> Self {
        PageRequest {
            page,
            size,
            sort_by: sort_by.to_string(),
            direction,
        }
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if self.page < 0 {
            return Err(LibraryError::validation(
                format!("page index must not be less than zero, got {}", self.page).as_str(), None));
        }
        if self.size < 1 {
            return Err(LibraryError::validation(
                format!("page size must not be less than one, got {}", self.size).as_str(), None));
        }
        Ok(())
    }

    // Offset of the first record, saturating so that absurd page indexes yield an empty page.
    pub fn offset(&self) -> usize {
        usize::try_from(self.page.saturating_mul(self.size)).unwrap_or(usize::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, SortDirection::Asc)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: String,
    pub direction: SortDirection,
}

// It defines abstraction for a page of sorted records with total-count metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    // list of records
    pub content: Vec<T>,
    // zero-based page index
    pub number: i64,
    // requested page size
    pub size: i64,
    pub total_elements: usize,
    pub total_pages: usize,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
    pub sort: SortOrder,
}

impl<T> Page<T> {
    pub fn new(req: &PageRequest, content: Vec<T>, total_elements: usize) -> Self {
        let size = req.size.max(1) as usize;
        let total_pages = (total_elements + size - 1) / size;
        let number_of_elements = content.len();
        Page {
            number: req.page,
            size: req.size,
            total_elements,
            total_pages,
            number_of_elements,
            first: req.page == 0,
            last: req.page.saturating_add(1) >= total_pages as i64,
            empty: content.is_empty(),
            sort: SortOrder { property: req.sort_by.to_string(), direction: req.direction },
            content,
        }
    }

    pub fn has_next(&self) -> bool {
        !self.last
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
            sort: self.sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{LibraryError, Page, PageRequest, SortDirection};

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(LibraryError::database("test", None, false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_duplicate_key_error() {
        assert!(matches!(LibraryError::duplicate_key("test"), LibraryError::DuplicateKey{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_unavailable_error() {
        assert!(matches!(LibraryError::unavailable("test", None, false), LibraryError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_validation_error() {
        assert!(matches!(LibraryError::validation("test", None), LibraryError::Validation{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(LibraryError::database_or_unavailable("test", None, true), LibraryError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("404".to_string()), false), LibraryError::NotFound{ message: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("400".to_string()), false), LibraryError::Validation{ message: _, reason_code: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("500".to_string()), false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", None, false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert_eq!(false, LibraryError::database("test", None, false).retryable());
        assert_eq!(false, LibraryError::duplicate_key("test").retryable());
        assert_eq!(false, LibraryError::not_found("test").retryable());
        assert_eq!(false, LibraryError::unavailable("test", None, false).retryable());
        assert_eq!(true, LibraryError::unavailable("test", None, true).retryable());
        assert_eq!(false, LibraryError::validation("test", None).retryable());
        assert_eq!(false, LibraryError::serialization("test").retryable());
        assert_eq!(false, LibraryError::runtime("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_parse_sort_direction() {
        assert_eq!(SortDirection::Asc, "asc".parse::<SortDirection>().expect("asc"));
        assert_eq!(SortDirection::Desc, "DESC".parse::<SortDirection>().expect("desc"));
        assert!(matches!("sideways".parse::<SortDirection>(), Err(LibraryError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_should_default_page_request() {
        let req = PageRequest::default();
        assert_eq!(0, req.page);
        assert_eq!(5, req.size);
        assert_eq!("title", req.sort_by.as_str());
        assert_eq!(SortDirection::Asc, req.direction);
    }

    #[tokio::test]
    async fn test_should_reject_out_of_range_page_request() {
        assert!(PageRequest::new(-1, 5, "title", SortDirection::Asc).validate().is_err());
        assert!(PageRequest::new(0, 0, "title", SortDirection::Asc).validate().is_err());
        assert!(PageRequest::new(3, 1, "title", SortDirection::Asc).validate().is_ok());
    }

    #[tokio::test]
    async fn test_should_build_page_metadata() {
        let req = PageRequest::new(0, 5, "title", SortDirection::Asc);
        let page = Page::new(&req, vec![1, 2, 3, 4, 5], 12);
        assert_eq!(3, page.total_pages);
        assert_eq!(5, page.number_of_elements);
        assert!(page.first);
        assert!(!page.last);
        assert!(page.has_next());

        let req = PageRequest::new(2, 5, "title", SortDirection::Asc);
        let page = Page::new(&req, vec![11, 12], 12);
        assert!(page.last);
        assert!(!page.has_next());

        let req = PageRequest::new(7, 5, "title", SortDirection::Asc);
        let page: Page<i32> = Page::new(&req, vec![], 12);
        assert!(page.empty);
        assert!(page.last);
    }

    #[tokio::test]
    async fn test_should_build_last_page_for_max_page_index() {
        let req = PageRequest::new(i64::MAX, 5, "title", SortDirection::Asc);
        assert!(req.validate().is_ok());
        let page: Page<i32> = Page::new(&req, vec![], 1);
        assert_eq!(i64::MAX, page.number);
        assert!(page.empty);
        assert!(page.last);
        assert!(!page.has_next());
    }

    #[tokio::test]
    async fn test_should_serialize_page_in_camel_case() {
        let req = PageRequest::default();
        let page = Page::new(&req, vec!["a"], 1).map(|s| s.to_uppercase());
        let json = serde_json::to_value(&page).expect("should serialize page");
        assert_eq!(1, json["totalElements"]);
        assert_eq!(1, json["numberOfElements"]);
        assert_eq!("A", json["content"][0]);
        assert_eq!("asc", json["sort"]["direction"]);
    }
}
