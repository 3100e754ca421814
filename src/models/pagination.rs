//! Pagination primitives shared by the activity list endpoints.

use serde::{de, Deserialize, Deserializer, Serialize};

/// Pagination query parameters: `?page=&limit=`.
///
/// Blank values (`?limit=&page=`) count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub limit: Option<i64>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid number `{value}`: {e}"))),
    }
}

impl Pagination {
    /// Default items per page.
    const DEFAULT_LIMIT: i64 = 20;

    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.current_page() - 1).saturating_mul(self.limit())
    }

    pub fn current_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Pagination block returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub pages: i64,
}

impl PageInfo {
    pub fn new(total: i64, pagination: &Pagination) -> Self {
        let limit = pagination.limit();
        Self {
            total,
            page: pagination.current_page(),
            limit,
            pages: if total > 0 { (total - 1) / limit + 1 } else { 0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use axum::http::Uri;

    use super::*;

    #[test]
    fn pagination_defaults() {
        let p = Pagination::default();
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn pagination_honors_large_limit() {
        assert_eq!(Pagination::new(1, 500).limit(), 500);
        assert_eq!(Pagination::new(1, i64::MAX).limit(), i64::MAX);
        assert_eq!(Pagination::new(1, 0).limit(), 1);
        assert_eq!(Pagination::new(1, -5).limit(), 1);
    }

    #[test]
    fn pagination_offset_calculation() {
        assert_eq!(Pagination::new(3, 10).offset(), 20);
        assert_eq!(Pagination::new(0, 10).offset(), 0);
        assert_eq!(Pagination::new(-2, 10).current_page(), 1);
    }

    #[test]
    fn page_info_rounds_pages_up() {
        let info = PageInfo::new(25, &Pagination::new(1, 10));
        assert_eq!(info.pages, 3);
        assert_eq!(info.total, 25);
        assert_eq!(info.page, 1);
        assert_eq!(info.limit, 10);

        assert_eq!(PageInfo::new(20, &Pagination::new(1, 10)).pages, 2);
        assert_eq!(PageInfo::new(0, &Pagination::default()).pages, 0);
        assert_eq!(PageInfo::new(250, &Pagination::new(1, 150)).pages, 2);
        assert_eq!(PageInfo::new(3, &Pagination::new(1, i64::MAX)).pages, 1);
    }

    #[test]
    fn blank_query_values_fall_back_to_defaults() {
        let parse = |uri: &'static str| {
            Query::<Pagination>::try_from_uri(&Uri::from_static(uri)).map(|Query(p)| p)
        };

        let p = parse("/feed?limit=&page=").unwrap();
        assert_eq!(p.limit(), 20);
        assert_eq!(p.current_page(), 1);

        let p = parse("/feed?limit=150&page=2").unwrap();
        assert_eq!(p.limit(), 150);
        assert_eq!(p.current_page(), 2);

        assert!(parse("/feed?limit=lots").is_err());
    }
}
