use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Request header clients set to `on` to opt in to explicit content
pub const NSFW_MODE_HEADER: &str = "nsfwmode";

/// Whether explicit (NSFW) results may be included
pub struct IncludeNsfw(pub bool);

#[async_trait]
impl<S> FromRequestParts<S> for IncludeNsfw
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let include = parts
            .headers
            .get(NSFW_MODE_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("on"));

        Ok(IncludeNsfw(include))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> bool {
        let mut builder = Request::builder().uri("/podcast");
        if let Some(value) = header {
            builder = builder.header(NSFW_MODE_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();

        let IncludeNsfw(include) = IncludeNsfw::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        include
    }

    #[tokio::test]
    async fn on_enables_nsfw() {
        assert!(extract(Some("on")).await);
        assert!(extract(Some("ON")).await);
    }

    #[tokio::test]
    async fn anything_else_disables_nsfw() {
        assert!(!extract(None).await);
        assert!(!extract(Some("off")).await);
        assert!(!extract(Some("true")).await);
    }
}
