pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::http::HttpSessionClient;
pub use crate::config::endpoints::Endpoints;
pub use crate::config::CliConfig;
pub use crate::core::{EventCatalog, Scraper};
pub use crate::domain::model::{
    Event, EventKey, ParticipationStatus, User, UserParticipation, SECTION_ORDER,
};
pub use crate::domain::ports::SessionClient;
pub use crate::utils::error::{Result, ScrapeError};
