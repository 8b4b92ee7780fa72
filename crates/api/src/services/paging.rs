//! One-based page arithmetic shared by every listing endpoint.

use super::error::ServiceError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Turn a one-based `(page, per_page)` pair into a `(limit, offset)` window.
///
/// Both values must be at least 1. Pages past the end of the data are not
/// an error; they simply come back empty.
pub fn page_window(page: i64, per_page: i64) -> Result<(i64, i64), ServiceError> {
    if page < 1 || per_page < 1 {
        return Err(ServiceError::InvalidPagination);
    }
    Ok((per_page, (page - 1) * per_page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert!(matches!(page_window(1, 10), Ok((10, 0))));
    }

    #[test]
    fn later_pages_advance_the_offset() {
        assert!(matches!(page_window(3, 25), Ok((25, 50))));
    }

    #[test]
    fn zero_and_negative_values_are_rejected() {
        assert!(matches!(
            page_window(0, 10),
            Err(ServiceError::InvalidPagination)
        ));
        assert!(matches!(
            page_window(1, 0),
            Err(ServiceError::InvalidPagination)
        ));
        assert!(matches!(
            page_window(-2, 10),
            Err(ServiceError::InvalidPagination)
        ));
        assert!(matches!(
            page_window(1, -5),
            Err(ServiceError::InvalidPagination)
        ));
    }
}
