//! Query parameters for the user directory routes

use serde::Deserialize;

use gk_core::domain::value_objects::page::{PageRequest, DEFAULT_PAGE_SIZE};
use gk_core::errors::DomainError;

/// `?page=&size=&sortBy=&direction=` for GET /api/v1/users
#[derive(Debug, Clone, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_sort_by", rename = "sortBy")]
    pub sort_by: String,
    #[serde(default = "default_direction")]
    pub direction: String,
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    "id".to_string()
}

fn default_direction() -> String {
    "asc".to_string()
}

impl TryFrom<ListUsersQuery> for PageRequest {
    type Error = DomainError;

    fn try_from(query: ListUsersQuery) -> Result<Self, Self::Error> {
        PageRequest::new(
            query.page,
            query.size,
            query.sort_by.parse()?,
            query.direction.parse()?,
        )
    }
}
