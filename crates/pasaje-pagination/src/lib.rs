//! # Pasaje Pagination
//!
//! Pagination for client-side tables.
//!
//! - [`paginate`] / [`Page`]: slice a processed row list into one page
//! - [`page_range`] / [`PageItem`]: the page buttons a pagination control shows
//!
//! ## Example
//!
//! ```
//! use pasaje_pagination::{page_range, paginate, PageItem};
//!
//! let rows: Vec<u32> = (1..=95).collect();
//! let page = paginate(rows, 4, 10).unwrap();
//! assert_eq!(page.object_list.first(), Some(&31));
//!
//! let controls = page_range(page.number, page.num_pages, 5);
//! assert_eq!(controls.last(), Some(&PageItem::Page(10)));
//! ```

#![warn(missing_docs)]

pub mod page;
pub mod page_range;

pub use page::{Page, paginate};
pub use page_range::{PageItem, page_range};
