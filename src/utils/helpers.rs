//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the
//! application: pagination math and parsing of comma-separated query lists.

use std::str::FromStr;

use crate::utils::errors::{EwmError, Result};

/// Pagination parameters as they arrive on the query string
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub from: i64,
    pub size: i64,
}

impl Pagination {
    /// Validate `from >= 0` and `size > 0`
    pub fn new(from: i64, size: i64) -> Result<Self> {
        if from < 0 {
            return Err(EwmError::InvalidInput(format!(
                "'from' must not be negative, got {from}"
            )));
        }
        if size <= 0 {
            return Err(EwmError::InvalidInput(format!(
                "'size' must be positive, got {size}"
            )));
        }
        Ok(Self { from, size })
    }

    /// Offset of the page containing `from`: page = floor(from / size),
    /// offset = page * size. Offsets snap to page boundaries.
    pub fn offset(&self) -> i64 {
        (self.from / self.size) * self.size
    }

    pub fn limit(&self) -> i64 {
        self.size
    }
}

/// Parse a comma-separated query parameter into a list of values.
///
/// Returns an empty list for `None`; an unparsable element is a bad request.
pub fn parse_comma_list<T>(raw: Option<&str>) -> Result<Vec<T>>
where
    T: FromStr,
{
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<T>()
                .map_err(|_| EwmError::InvalidInput(format!("Failed to parse list element '{part}'")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_pagination_offset_snaps_to_page_boundary() {
        let page = Pagination::new(0, 10).unwrap();
        assert_eq!(page.offset(), 0);

        let page = Pagination::new(7, 10).unwrap();
        assert_eq!(page.offset(), 0);

        let page = Pagination::new(10, 10).unwrap();
        assert_eq!(page.offset(), 10);

        let page = Pagination::new(25, 10).unwrap();
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn test_pagination_rejects_invalid_bounds() {
        assert_matches!(Pagination::new(-1, 10), Err(EwmError::InvalidInput(_)));
        assert_matches!(Pagination::new(0, 0), Err(EwmError::InvalidInput(_)));
        assert_matches!(Pagination::new(0, -5), Err(EwmError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_comma_list_of_ids() {
        let ids: Vec<i64> = parse_comma_list(Some("1,2, 3")).unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_comma_list_absent_is_empty() {
        let ids: Vec<i64> = parse_comma_list(None).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_parse_comma_list_rejects_garbage() {
        let result: Result<Vec<i64>> = parse_comma_list(Some("1,two,3"));
        assert_matches!(result, Err(EwmError::InvalidInput(_)));
    }
}
