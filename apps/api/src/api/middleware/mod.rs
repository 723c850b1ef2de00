// Request shaping: authentication, pagination, query parsing, rate limits

pub mod auth;
pub mod authenticate;
pub mod membership;
pub mod nsfw;
pub mod pagination;
pub mod query;
pub mod rate_limit;

pub use auth::{JwtAuth, OptionalJwtAuth};
pub use membership::ActiveMember;
pub use nsfw::IncludeNsfw;
pub use pagination::{PageOptions, PageResource};
pub use query::{Delimited, ValidatedJson, ValidatedQuery};
pub use rate_limit::RouteRateLimiter;
