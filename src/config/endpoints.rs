use crate::utils::error::{Result, ScrapeError};
use url::Url;

/// The handful of spielerplus paths the scraper talks to, resolved against
/// the configured base URL once at startup.
#[derive(Debug, Clone)]
pub struct Endpoints {
    login: Url,
    events: Url,
    events_page: Url,
    participation: Url,
    participation_form: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| ScrapeError::config(format!("invalid base URL '{base_url}': {e}")))?;
        let join = |path: &str| {
            base.join(path)
                .map_err(|e| ScrapeError::config(format!("cannot resolve '{path}': {e}")))
        };
        Ok(Self {
            login: join("en/site/login")?,
            events: join("events")?,
            events_page: join("events/ajaxgetevents")?,
            participation: join("events/ajaxgetparticipation")?,
            participation_form: join("events/ajax-participation-form")?,
        })
    }

    /// Login form page; GET to prime cookies, POST to submit credentials.
    pub fn login(&self) -> &str {
        self.login.as_str()
    }

    /// Server-rendered events listing.
    pub fn events(&self) -> &str {
        self.events.as_str()
    }

    /// Pagination endpoint; POST `{offset}` for the next listing fragment.
    pub fn events_page(&self) -> &str {
        self.events_page.as_str()
    }

    /// Participation modal for one event; POST `{eventid, eventtype}`.
    pub fn participation(&self) -> &str {
        self.participation.as_str()
    }

    /// Attendance submission endpoint.
    pub fn participation_form(&self) -> &str {
        self.participation_form.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_against_default_base() {
        let ep = Endpoints::new("https://www.spielerplus.de/").unwrap();
        assert_eq!(ep.login(), "https://www.spielerplus.de/en/site/login");
        assert_eq!(ep.events(), "https://www.spielerplus.de/events");
        assert_eq!(
            ep.events_page(),
            "https://www.spielerplus.de/events/ajaxgetevents"
        );
        assert_eq!(
            ep.participation_form(),
            "https://www.spielerplus.de/events/ajax-participation-form"
        );
    }

    #[test]
    fn rejects_garbage_base() {
        assert!(Endpoints::new("not a url").is_err());
    }
}
