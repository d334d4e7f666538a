//! Page slices

use pasaje_core::{Result, TableError};

/// Represents a single page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
	/// Items in this page
	pub object_list: Vec<T>,
	/// Current page number (1-indexed)
	pub number: usize,
	/// Total number of pages
	pub num_pages: usize,
	/// Total number of items across all pages
	pub count: usize,
	/// Items per page
	pub page_size: usize,
}

impl<T> Page<T> {
	/// Returns the 1-based index of the first item on this page, or 0 if empty
	///
	/// # Examples
	///
	/// ```
	/// use pasaje_pagination::paginate;
	///
	/// let page = paginate(vec!["a"; 15], 2, 5).unwrap();
	/// assert_eq!(page.start_index(), 6);
	/// assert_eq!(page.end_index(), 10);
	/// ```
	pub fn start_index(&self) -> usize {
		if self.object_list.is_empty() {
			0
		} else {
			(self.number - 1) * self.page_size + 1
		}
	}

	/// Returns the 1-based index of the last item on this page, or 0 if empty
	pub fn end_index(&self) -> usize {
		if self.object_list.is_empty() {
			0
		} else {
			self.start_index() + self.object_list.len() - 1
		}
	}

	/// Returns true if there is a next page
	pub fn has_next(&self) -> bool {
		self.number < self.num_pages
	}

	/// Returns true if there is a previous page
	pub fn has_previous(&self) -> bool {
		self.number > 1
	}

	/// Returns the number of items in this page
	pub fn len(&self) -> usize {
		self.object_list.len()
	}

	/// Returns true if this page contains no items
	pub fn is_empty(&self) -> bool {
		self.object_list.is_empty()
	}
}

impl<T> IntoIterator for Page<T> {
	type Item = T;
	type IntoIter = std::vec::IntoIter<T>;

	fn into_iter(self) -> Self::IntoIter {
		self.object_list.into_iter()
	}
}

impl<'a, T> IntoIterator for &'a Page<T> {
	type Item = &'a T;
	type IntoIter = std::slice::Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.object_list.iter()
	}
}

/// Slices `items` into the requested page.
///
/// The page number is not clamped: asking for a page beyond the last one
/// yields an empty page, and correcting the current page is left to the
/// caller that owns it.
///
/// # Errors
///
/// Returns [`TableError::InvalidPage`] for page 0 and
/// [`TableError::InvalidPageSize`] for a page size of 0.
///
/// # Examples
///
/// ```
/// use pasaje_pagination::paginate;
///
/// let page = paginate((1..=7).collect::<Vec<_>>(), 2, 3).unwrap();
/// assert_eq!(page.object_list, vec![4, 5, 6]);
/// assert_eq!(page.num_pages, 3);
/// assert!(page.has_next());
///
/// let past_end = paginate((1..=7).collect::<Vec<_>>(), 9, 3).unwrap();
/// assert!(past_end.is_empty());
/// ```
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Result<Page<T>> {
	if page == 0 {
		return Err(TableError::InvalidPage(page));
	}
	if per_page == 0 {
		return Err(TableError::InvalidPageSize(per_page));
	}

	let count = items.len();
	let num_pages = count.div_ceil(per_page);
	let start = (page - 1).saturating_mul(per_page);
	let object_list: Vec<T> = items.into_iter().skip(start).take(per_page).collect();

	Ok(Page {
		object_list,
		number: page,
		num_pages,
		count,
		page_size: per_page,
	})
}
