// Page/sort query parameters shared by search routes

use crate::api::errors::ApiError;

/// Searchable collection; decides page size and default sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageResource {
    FeedUrls,
    Podcasts,
}

impl PageResource {
    fn page_size(self) -> i64 {
        match self {
            PageResource::FeedUrls => 20,
            PageResource::Podcasts => 20,
        }
    }

    fn default_sort(self) -> Option<&'static str> {
        match self {
            PageResource::FeedUrls => None,
            PageResource::Podcasts => Some("top-past-week"),
        }
    }
}

/// Offset/limit derived from `page` plus the requested sort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub skip: i64,
    pub take: i64,
    pub sort: Option<String>,
}

impl PageOptions {
    /// Resolves raw `page` and `sort` params for a resource
    ///
    /// `page` defaults to 1 and must be at least 1; pages whose offset
    /// overflows `i64` are rejected.
    pub fn parse(
        page: Option<i64>,
        sort: Option<String>,
        resource: PageResource,
    ) -> Result<Self, ApiError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(ApiError::bad_request(
                "\"page\" must be greater than or equal to 1",
            ));
        }

        let take = resource.page_size();
        let skip = (page - 1)
            .checked_mul(take)
            .ok_or_else(|| ApiError::bad_request("\"page\" is too large"))?;

        Ok(Self {
            skip,
            take,
            sort: sort.or_else(|| resource.default_sort().map(str::to_string)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_by_default() {
        let options = PageOptions::parse(None, None, PageResource::FeedUrls).unwrap();

        assert_eq!(options, PageOptions { skip: 0, take: 20, sort: None });
    }

    #[test]
    fn later_pages_skip_ahead() {
        let options = PageOptions::parse(Some(3), None, PageResource::Podcasts).unwrap();

        assert_eq!(options.skip, 40);
        assert_eq!(options.take, 20);
        assert_eq!(options.sort.as_deref(), Some("top-past-week"));
    }

    #[test]
    fn explicit_sort_wins() {
        let options =
            PageOptions::parse(None, Some("alphabetical".to_string()), PageResource::Podcasts)
                .unwrap();

        assert_eq!(options.sort.as_deref(), Some("alphabetical"));
    }

    #[test]
    fn page_zero_rejected() {
        assert!(PageOptions::parse(Some(0), None, PageResource::Podcasts).is_err());
    }

    #[test]
    fn huge_page_rejected() {
        let err = PageOptions::parse(Some(i64::MAX), None, PageResource::FeedUrls).unwrap_err();

        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "\"page\" is too large");
    }

    #[test]
    fn last_representable_page_accepted() {
        let page = i64::MAX / 20 + 1;
        let options = PageOptions::parse(Some(page), None, PageResource::Podcasts).unwrap();

        assert_eq!(options.skip, (page - 1) * 20);
    }
}
