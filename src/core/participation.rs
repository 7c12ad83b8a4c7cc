use crate::core::scraper::Scraper;
use crate::domain::model::{EventKey, ParticipationStatus};
use crate::domain::ports::SessionClient;
use crate::utils::error::{Result, ScrapeError};

impl<C: SessionClient> Scraper<C> {
    /// Accept the invitation for one event on behalf of the logged-in user.
    ///
    /// On a successful call the local roster entry is optimistically flipped
    /// to `Going` without re-fetching server state; no other entry is
    /// touched.
    pub async fn join(&mut self, key: &EventKey) -> Result<()> {
        if !self.authenticated {
            return Err(ScrapeError::NotAuthenticated);
        }
        let name = self
            .display_name
            .clone()
            .ok_or_else(|| ScrapeError::extraction("own display name; run discovery first"))?;

        let event = self
            .catalog
            .get(key)
            .ok_or_else(|| ScrapeError::extraction(format!("event {key:?} not in catalog")))?;

        // Without our own roster row there is no user id to submit.
        let user_id = event
            .participations
            .iter()
            .find(|p| p.user.name == name)
            .map(|p| p.user.id.clone())
            .ok_or_else(|| {
                ScrapeError::extraction(format!("own roster row in event '{}'", event.name))
            })?;

        self.client
            .post_form(
                self.endpoints.participation_form(),
                &[
                    ("Participation[participation]", "1".to_string()),
                    ("Participation[reason]", String::new()),
                    ("Participation[type]", key.event_type.clone()),
                    ("Participation[typeid]", key.id.clone()),
                    ("Participation[user_id]", user_id),
                ],
            )
            .await?;

        if let Some(event) = self.catalog.get_mut(key) {
            if let Some(own) = event
                .participations
                .iter_mut()
                .find(|p| p.user.name == name)
            {
                own.status = ParticipationStatus::Going;
            }
        }
        tracing::debug!("accepted event {key:?}");
        Ok(())
    }
}
