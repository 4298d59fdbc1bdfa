use crate::error::ApiError;

/// Row window for one page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub limit: u64,
    pub skip: u64,
    pub total_pages: u64,
}

impl PageWindow {
    /// `page` and `limit` are 1-based and at least 1; zero is bumped to 1.
    pub fn compute(page: u64, limit: u64, total_count: u64) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        Self {
            page,
            limit,
            skip: (page - 1).saturating_mul(limit),
            total_pages: total_count.div_ceil(limit),
        }
    }

    /// True when the page lies past the last row, so no store read is needed
    pub fn is_empty(&self) -> bool {
        self.page > self.total_pages
    }
}

/// Parse an optional `page`/`limit` query value.
///
/// Absent or blank falls back to `default`; anything that is not a positive
/// integer is rejected.
pub fn parse_positive(name: &str, raw: Option<&str>, default: u64) -> Result<u64, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => match value.parse::<u64>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(ApiError::bad_request(format!("'{}' must be a positive integer", name))),
        },
    }
}
