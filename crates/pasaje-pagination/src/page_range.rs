//! Page-range calculation for pagination controls
//!
//! Produces the sequence of page buttons a pagination control renders: a window
//! of pages centred on the current page, with the first and last page always
//! reachable and ellipsis markers for the gaps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a rendered pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageItem {
	/// A clickable page number (1-indexed)
	Page(usize),
	/// Gap between page 1 and the window
	EllipsisStart,
	/// Gap between the window and the last page
	EllipsisEnd,
}

impl PageItem {
	/// Returns the page number, or `None` for ellipsis markers
	pub fn number(&self) -> Option<usize> {
		match self {
			Self::Page(n) => Some(*n),
			Self::EllipsisStart | Self::EllipsisEnd => None,
		}
	}

	/// Returns true for either ellipsis marker
	pub fn is_ellipsis(&self) -> bool {
		self.number().is_none()
	}
}

impl fmt::Display for PageItem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Page(n) => write!(f, "{n}"),
			Self::EllipsisStart | Self::EllipsisEnd => f.write_str("…"),
		}
	}
}

/// Computes the visible page sequence.
///
/// When `total_pages <= max_visible` every page is listed. Otherwise a window of
/// `max_visible` pages is centred on `current_page`, shifted so it never runs
/// past either end, and page 1 / `total_pages` are added with an ellipsis
/// whenever they are not adjacent to the window.
///
/// `current_page` is clamped into `[1, total_pages]` and a `max_visible` of 0
/// is treated as 1. Zero pages produce an empty sequence.
///
/// # Examples
///
/// ```
/// use pasaje_pagination::{page_range, PageItem};
///
/// let items = page_range(10, 20, 5);
/// assert_eq!(
///     items,
///     vec![
///         PageItem::Page(1),
///         PageItem::EllipsisStart,
///         PageItem::Page(8),
///         PageItem::Page(9),
///         PageItem::Page(10),
///         PageItem::Page(11),
///         PageItem::Page(12),
///         PageItem::EllipsisEnd,
///         PageItem::Page(20),
///     ]
/// );
///
/// let short = page_range(2, 3, 5);
/// assert_eq!(short, vec![PageItem::Page(1), PageItem::Page(2), PageItem::Page(3)]);
/// ```
pub fn page_range(current_page: usize, total_pages: usize, max_visible: usize) -> Vec<PageItem> {
	let max_visible = max_visible.max(1);
	if total_pages <= max_visible {
		return (1..=total_pages).map(PageItem::Page).collect();
	}

	let current = current_page.clamp(1, total_pages);
	let half = max_visible / 2;
	let mut start = current.saturating_sub(half).max(1);
	let mut end = start + max_visible - 1;
	if end > total_pages {
		end = total_pages;
		start = total_pages - max_visible + 1;
	}

	let mut items = Vec::with_capacity(max_visible + 4);
	if start > 1 {
		items.push(PageItem::Page(1));
		if start > 2 {
			items.push(PageItem::EllipsisStart);
		}
	}
	items.extend((start..=end).map(PageItem::Page));
	if end < total_pages {
		if end < total_pages - 1 {
			items.push(PageItem::EllipsisEnd);
		}
		items.push(PageItem::Page(total_pages));
	}
	items
}
