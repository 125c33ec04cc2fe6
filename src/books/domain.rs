use std::cmp::Ordering;
use std::str::FromStr;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, SortDirection};

pub mod model;

pub(crate) trait Book: Identifiable {
    fn title(&self) -> &str;
}

// BookField names the attributes a page of books can be ordered by
#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) enum BookField {
    Id,
    Title,
    Author,
    Isbn,
    PublishedYear,
    Version,
    CreatedAt,
    UpdatedAt,
}

impl FromStr for BookField {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" | "book_id" => Ok(BookField::Id),
            "title" => Ok(BookField::Title),
            "author" => Ok(BookField::Author),
            "isbn" => Ok(BookField::Isbn),
            "publishedYear" | "published_year" => Ok(BookField::PublishedYear),
            "version" => Ok(BookField::Version),
            "createdAt" | "created_at" => Ok(BookField::CreatedAt),
            "updatedAt" | "updated_at" => Ok(BookField::UpdatedAt),
            _ => Err(LibraryError::validation(
                format!("No property '{}' found for type 'Book'", s).as_str(), None)),
        }
    }
}

impl BookField {
    // None sorts before Some, so books without the attribute lead an ascending page
    pub(crate) fn compare(&self, a: &BookEntity, b: &BookEntity) -> Ordering {
        match self {
            BookField::Id => a.book_id.cmp(&b.book_id),
            BookField::Title => a.title.cmp(&b.title),
            BookField::Author => a.author.cmp(&b.author),
            BookField::Isbn => a.isbn.cmp(&b.isbn),
            BookField::PublishedYear => a.published_year.cmp(&b.published_year),
            BookField::Version => a.version.cmp(&b.version),
            BookField::CreatedAt => a.created_at.cmp(&b.created_at),
            BookField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

// sort_books orders by field then by id so that pages are stable across calls
pub(crate) fn sort_books(books: &mut [BookEntity], field: BookField, direction: SortDirection) {
    books.sort_by(|a, b| {
        let ord = field.compare(a, b).then_with(|| a.book_id.cmp(&b.book_id));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}
