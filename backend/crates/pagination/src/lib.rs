//! Offset pagination primitives shared by gateway endpoints and adapters.
//!
//! A [`PageRequest`] names a zero-based page index and a page size. A
//! [`Page`] is the envelope returned by remote services: one slice of items
//! plus the total count needed to derive pagination controls.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::default();
//! assert_eq!(request.page(), 0);
//! assert_eq!(request.page_size(), 15);
//!
//! let page = Page::new(vec!["a", "b"], request, 32);
//! assert_eq!(page.total_pages(), 3);
//! assert!(page.is_first());
//! assert!(!page.is_last());
//! ```

use serde::{Deserialize, Serialize};

/// Page index used when the caller omits one.
pub const DEFAULT_PAGE: u32 = 0;
/// Page size used when the caller omits one.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Errors raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// A page must hold at least one item.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Zero-based slice request sent to a paginated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a request for exactly `page` and `page_size`.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPageSize`] when `page_size` is zero.
    pub fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        Ok(Self { page, page_size })
    }

    /// Build a request, falling back to the defaults only for omitted values.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPageSize`] when an explicit page size
    /// of zero is supplied.
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::from_optional(Some(3), None).expect("valid request");
    /// assert_eq!((request.page(), request.page_size()), (3, 15));
    /// ```
    pub fn from_optional(
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Self, PageRequestError> {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    /// Zero-based page index.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Request for the page before this one, if any.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        self.page.checked_sub(1).map(|page| Self {
            page,
            page_size: self.page_size,
        })
    }

    /// Request for the page after this one.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.page.checked_add(1).map(|page| Self {
            page,
            page_size: self.page_size,
        })
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One slice of a paginated sequence together with its total size.
///
/// Serialises as `{ "items": [...], "page": 0, "pageSize": 15, "count": 42 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in this slice.
    pub items: Vec<T>,
    /// Zero-based index of this slice.
    pub page: u32,
    /// Requested slice size.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub count: u64,
}

impl<T> Page<T> {
    /// Build a page for `request` holding `items` out of `count` total.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, count: u64) -> Self {
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            count,
        }
    }

    /// The request that produced this page.
    ///
    /// A zero `page_size` decoded from a remote payload is reported as one.
    #[must_use]
    pub fn request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            page_size: self.page_size.max(1),
        }
    }

    /// Number of pages needed to cover `count` items.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.count.div_ceil(u64::from(self.page_size.max(1)))
    }

    /// Whether this is the first page.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    /// Whether no page follows this one.
    #[must_use]
    pub fn is_last(&self) -> bool {
        u64::from(self.page) + 1 >= self.total_pages()
    }
}
