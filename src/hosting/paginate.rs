use std::future::Future;

use super::{Error, Result};

/// The number of items requested per page
pub const PAGE_SIZE: usize = 100;

/// The most pages a single listing may span
pub const MAX_PAGES: u32 = 50;

/// Collect a page-numbered listing by requesting pages `1, 2, ...` one after another.
///
/// The listing ends at the first page holding fewer than [`PAGE_SIZE`] items. If page
/// [`MAX_PAGES`] is still full, this fails with [`Error::PaginationOverrun`] instead of requesting
/// more.
pub async fn paginate<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut results = Vec::new();
    for page in 1..=MAX_PAGES {
        let items = fetch_page(page).await?;
        let num_items = items.len();
        results.extend(items);
        if num_items < PAGE_SIZE {
            return Ok(results);
        }
    }
    Err(Error::PaginationOverrun { max_pages: MAX_PAGES })
}
