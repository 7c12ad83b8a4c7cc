use crate::core::extract;
use crate::core::scraper::Scraper;
use crate::domain::model::{Envelope, EventKey};
use crate::domain::ports::SessionClient;
use crate::utils::error::{Result, ScrapeError};

/// The listing page ships with this many events already rendered, so
/// pagination starts past them.
const INITIAL_OFFSET: i64 = 5;

impl<C: SessionClient> Scraper<C> {
    /// Discover all current and upcoming events and fully populate the
    /// catalog. Re-invokable: merges are idempotent, and events collected
    /// before a mid-run failure are kept.
    pub async fn discover_all(&mut self) -> Result<()> {
        if !self.authenticated {
            return Err(ScrapeError::NotAuthenticated);
        }

        let page = self.client.get(self.endpoints.events()).await?;

        // Later steps identify the caller's own roster row by this name, so
        // its absence poisons the whole run.
        let name = extract::find_display_name(&page)
            .ok_or_else(|| ScrapeError::extraction("own display name on events page"))?;
        tracing::debug!("logged in as '{name}'");
        self.display_name = Some(name);

        self.collect_page(&page).await?;

        let mut offset = INITIAL_OFFSET;
        let mut rounds = 0u64;
        loop {
            if rounds >= self.max_pagination_rounds {
                tracing::warn!(
                    "pagination cap of {} rounds reached; stopping with {} events",
                    self.max_pagination_rounds,
                    self.catalog.len()
                );
                break;
            }
            rounds += 1;

            let body = self
                .client
                .post_form(self.endpoints.events_page(), &[("offset", offset.to_string())])
                .await?;
            let envelope: Envelope = serde_json::from_str(&body)?;

            // An exhausted listing answers with count -1 (or no count).
            if envelope.count < 1 {
                break;
            }

            self.collect_page(&envelope.html).await?;
            offset += envelope.count;
        }

        tracing::info!("discovered {} events", self.catalog.len());
        Ok(())
    }

    /// Merge every panel on one page or fragment; fetch and apply the detail
    /// of each event not seen before.
    async fn collect_page(&mut self, html: &str) -> Result<()> {
        for stub in extract::scan_listing(html) {
            let key = stub.key.clone();
            if self.catalog.insert_stub(stub) {
                let detail_html = self.fetch_detail(&key).await?;
                let detail = extract::parse_detail(&detail_html)?;
                self.catalog.apply_detail(&key, detail);
            }
        }
        Ok(())
    }

    /// Fetch the participation modal for one event and unwrap its envelope.
    async fn fetch_detail(&self, key: &EventKey) -> Result<String> {
        let body = self
            .client
            .post_form(
                self.endpoints.participation(),
                &[
                    ("eventid", key.id.clone()),
                    ("eventtype", key.event_type.clone()),
                ],
            )
            .await?;
        let envelope: Envelope = serde_json::from_str(&body)?;
        Ok(envelope.html)
    }
}
