//! Paging and sorting for directory listings.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::DomainError;

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when the caller does not pass one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(DomainError::Validation {
                message: format!("direction must be 'asc' or 'desc', got '{}'", s),
            }),
        }
    }
}

/// Columns a user listing may be ordered by
///
/// Only these values reach an `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortField {
    #[default]
    Id,
    Email,
    CreatedAt,
}

impl UserSortField {
    pub fn column(&self) -> &'static str {
        match self {
            UserSortField::Id => "id",
            UserSortField::Email => "email",
            UserSortField::CreatedAt => "created_at",
        }
    }
}

impl FromStr for UserSortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(UserSortField::Id),
            "email" => Ok(UserSortField::Email),
            "createdAt" | "created_at" => Ok(UserSortField::CreatedAt),
            _ => Err(DomainError::Validation {
                message: format!("sortBy must be one of id, email, createdAt, got '{}'", s),
            }),
        }
    }
}

impl fmt::Display for UserSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Zero-based page request over the user directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort_by: UserSortField,
    pub direction: SortDirection,
}

impl PageRequest {
    /// Build a request, rejecting sizes outside `1..=MAX_PAGE_SIZE`
    pub fn new(
        page: u32,
        size: u32,
        sort_by: UserSortField,
        direction: SortDirection,
    ) -> Result<Self, DomainError> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(DomainError::Validation {
                message: format!("size must be between 1 and {}", MAX_PAGE_SIZE),
            });
        }

        Ok(Self {
            page,
            size,
            sort_by,
            direction,
        })
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_by: UserSortField::default(),
            direction: SortDirection::default(),
        }
    }
}

/// One page of results plus the totals needed to walk the rest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size);
        let total_pages = u32::try_from(total_elements.div_ceil(size)).unwrap_or(u32::MAX);

        Self {
            content,
            page_number: request.page,
            page_size: request.size,
            total_elements,
            total_pages,
            last: u64::from(request.page) + 1 >= u64::from(total_pages),
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last: self.last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: u32, size: u32) -> PageRequest {
        PageRequest::new(page, size, UserSortField::Id, SortDirection::Asc).unwrap()
    }

    #[test]
    fn test_page_request_rejects_bad_sizes() {
        let zero = PageRequest::new(0, 0, UserSortField::Id, SortDirection::Asc);
        let huge = PageRequest::new(0, MAX_PAGE_SIZE + 1, UserSortField::Id, SortDirection::Asc);

        assert!(matches!(zero, Err(DomainError::Validation { .. })));
        assert!(matches!(huge, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(request(0, 10).offset(), 0);
        assert_eq!(request(3, 25).offset(), 75);
    }

    #[test]
    fn test_page_totals() {
        let page = Page::new(vec![1, 2, 3], &request(0, 3), 7);
        assert_eq!(page.total_pages, 3);
        assert!(!page.last);

        let tail = Page::new(vec![7], &request(2, 3), 7);
        assert!(tail.last);

        let empty: Page<i32> = Page::new(vec![], &request(0, 10), 0);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.last);
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!("createdAt".parse::<UserSortField>().unwrap(), UserSortField::CreatedAt);
        assert!("password_hash".parse::<UserSortField>().is_err());
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_page_map_keeps_totals() {
        let page = Page::new(vec![1, 2], &request(0, 2), 5).map(|n| n * 10);

        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
    }
}
