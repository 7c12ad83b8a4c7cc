use crate::config::endpoints::Endpoints;
use crate::core::catalog::EventCatalog;
use crate::domain::ports::SessionClient;

pub const DEFAULT_MAX_PAGINATION_ROUNDS: u64 = 50;

/// Session-scoped scraper state. Holds the one shared transport and the
/// catalog of everything discovered so far; the login, discovery and
/// participation operations live in their own modules as impl blocks.
pub struct Scraper<C: SessionClient> {
    pub(crate) client: C,
    pub(crate) endpoints: Endpoints,
    pub(crate) max_pagination_rounds: u64,
    pub(crate) authenticated: bool,
    pub(crate) display_name: Option<String>,
    pub(crate) catalog: EventCatalog,
}

impl<C: SessionClient> Scraper<C> {
    pub fn new(client: C, endpoints: Endpoints) -> Self {
        Self {
            client,
            endpoints,
            max_pagination_rounds: DEFAULT_MAX_PAGINATION_ROUNDS,
            authenticated: false,
            display_name: None,
            catalog: EventCatalog::new(),
        }
    }

    pub fn with_max_pagination_rounds(mut self, rounds: u64) -> Self {
        self.max_pagination_rounds = rounds;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The logged-in user's display name, known after the first successful
    /// discovery run.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }
}
