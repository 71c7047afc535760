//! Response envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

use cinedesk_core::types::PageResponse;

/// `{ success, data?, datas?, message?, pagination? }`.
///
/// Single records go in `data`; lists go in `datas` together with
/// `pagination`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful.
    pub success: bool,
    /// Single record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// One page of records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datas: Option<Vec<T>>,
    /// Human-readable outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Page metadata for `datas`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Page metadata in the shape the admin tables read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response carrying one record.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            datas: None,
            message: None,
            pagination: None,
        }
    }

    /// Creates a successful response carrying one page of records.
    pub fn page(page: PageResponse<T>) -> Self {
        let pagination = Pagination {
            page: page.page,
            limit: page.page_size,
            total: page.total_items,
            total_pages: page.total_pages,
        };
        Self {
            success: true,
            data: None,
            datas: Some(page.items),
            message: None,
            pagination: Some(pagination),
        }
    }

    /// Attach a message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// A bare acknowledgement.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            datas: None,
            message: Some(message.into()),
            pagination: None,
        }
    }
}
