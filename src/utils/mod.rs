pub mod http;
pub mod rate_limiter;

pub use http::{HttpClient, HttpResponse};
pub use rate_limiter::RateLimiter;
