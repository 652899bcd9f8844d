//! Offset pagination primitives for listing endpoints.
//!
//! Listing endpoints accept `?page=<n>&limit=<m>` query parameters. This crate
//! turns the raw parameters into a validated [`PageRequest`] that adapters can
//! translate into a `skip`/`limit` pair without re-checking bounds.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageParams, PageRequest};
//!
//! let params = PageParams { page: Some(2), limit: Some(5) };
//! let request = PageRequest::try_from(params).expect("valid page");
//! assert_eq!(request.offset(), 10);
//! assert_eq!(request.limit(), 5);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page index used when the caller omits `page`.
pub const DEFAULT_PAGE: u64 = 0;
/// Page size used when the caller omits `limit`.
pub const DEFAULT_LIMIT: u64 = 10;
/// Largest page size a caller may request.
pub const MAX_LIMIT: u64 = 100;

/// Errors raised while validating pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The page size is zero or larger than [`MAX_LIMIT`].
    #[error("limit must be between 1 and {max}, got {value}")]
    LimitOutOfRange {
        /// Rejected page size.
        value: u64,
        /// Largest accepted page size.
        max: u64,
    },
    /// `page * limit` does not fit in a `u64`.
    #[error("page {page} with limit {limit} overflows the offset")]
    OffsetOverflow {
        /// Requested page index.
        page: u64,
        /// Requested page size.
        limit: u64,
    },
}

/// Raw query parameters as received from the transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Zero-based page index.
    pub page: Option<u64>,
    /// Number of items per page.
    pub limit: Option<u64>,
}

/// Validated page window.
///
/// ## Invariants
/// - `1 <= limit <= MAX_LIMIT`.
/// - `page * limit` fits in a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
    offset: u64,
}

impl PageRequest {
    /// Build a page window, validating the limit and offset.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when the limit is out of range or the
    /// offset overflows.
    pub const fn new(page: u64, limit: u64) -> Result<Self, PageRequestError> {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PageRequestError::LimitOutOfRange {
                value: limit,
                max: MAX_LIMIT,
            });
        }
        let Some(offset) = page.checked_mul(limit) else {
            return Err(PageRequestError::OffsetOverflow { page, limit });
        };
        Ok(Self {
            page,
            limit,
            offset,
        })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of items to skip before the page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_PAGE * DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<PageParams> for PageRequest {
    type Error = PageRequestError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        Self::new(
            params.page.unwrap_or(DEFAULT_PAGE),
            params.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for page window validation.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_parameters_use_defaults() {
        let request = PageRequest::try_from(PageParams::default()).expect("defaults are valid");
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.page(), DEFAULT_PAGE);
        assert_eq!(request.limit(), DEFAULT_LIMIT);
        assert_eq!(request.offset(), 0);
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 10)]
    #[case(3, 7, 21)]
    #[case(0, MAX_LIMIT, 0)]
    fn offset_is_page_times_limit(#[case] page: u64, #[case] limit: u64, #[case] offset: u64) {
        let request = PageRequest::new(page, limit).expect("valid window");
        assert_eq!(request.offset(), offset);
    }

    #[rstest]
    #[case(0)]
    #[case(MAX_LIMIT + 1)]
    fn out_of_range_limits_are_rejected(#[case] limit: u64) {
        let err = PageRequest::new(0, limit).expect_err("limit must be rejected");
        assert_eq!(
            err,
            PageRequestError::LimitOutOfRange {
                value: limit,
                max: MAX_LIMIT
            }
        );
    }

    #[rstest]
    fn overflowing_offset_is_rejected() {
        let err = PageRequest::new(u64::MAX, 2).expect_err("offset overflows");
        assert!(matches!(err, PageRequestError::OffsetOverflow { .. }));
    }

    #[rstest]
    fn params_deserialise_from_query_shaped_json() {
        let params: PageParams =
            serde_json::from_str(r#"{"page":2}"#).expect("partial params parse");
        let request = PageRequest::try_from(params).expect("valid window");
        assert_eq!(request.offset(), 20);
    }
}
