use common::text::slice_fields;
use common::{AppError, Result};
use serde_json::Value;

use crate::models::Page;

/// Splits an already fully fetched list into consecutive pages of at most
/// `page_size` items, handing each whole chunk to `project` before wrapping it.
///
/// An empty list still yields exactly one page with no nodes.
pub fn paginate<T, U, F>(items: Vec<T>, page_size: usize, mut project: F) -> Result<Vec<Page<U>>>
where
    F: FnMut(Vec<T>) -> Vec<U>,
{
    if page_size == 0 {
        return Err(AppError::invalid("page size must be greater than zero"));
    }

    if items.is_empty() {
        return Ok(vec![Page { nodes: Vec::new() }]);
    }

    let mut pages = Vec::with_capacity(items.len().div_ceil(page_size));
    let mut remaining = items.into_iter().peekable();
    while remaining.peek().is_some() {
        let chunk: Vec<T> = remaining.by_ref().take(page_size).collect();
        pages.push(Page {
            nodes: project(chunk),
        });
    }
    Ok(pages)
}

/// Chunk projection used for comment feeds: keeps `created_at` only.
pub fn project_created_at(chunk: Vec<Value>) -> Vec<Value> {
    chunk
        .iter()
        .map(|comment| slice_fields(comment, &["created_at"]))
        .collect()
}
