pub mod auth;
pub mod catalog;
pub mod discovery;
pub mod extract;
pub mod participation;
pub mod scraper;

pub use self::catalog::EventCatalog;
pub use self::scraper::Scraper;
