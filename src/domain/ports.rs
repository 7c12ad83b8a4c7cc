use crate::utils::error::Result;
use async_trait::async_trait;

/// The HTTP transport the scraper drives. Implementations persist a cookie
/// jar for the lifetime of the client; only the cookie *count* is ever
/// observable, never cookie contents.
///
/// Form fields are passed explicitly per call. The original transport kept
/// an ambient staged-field bag that leaked values across requests; this
/// contract deliberately rules that out.
#[async_trait]
pub trait SessionClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<String>;

    /// POST `fields` form-encoded and return the response body.
    async fn post_form(&self, url: &str, fields: &[(&str, String)]) -> Result<String>;

    /// Number of distinct cookies the server has set on this session.
    fn cookie_count(&self) -> usize;
}
