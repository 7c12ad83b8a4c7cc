use crate::core::scraper::Scraper;
use crate::domain::ports::SessionClient;
use crate::utils::error::Result;

/// Cookies the site sets before any login (consent, CSRF, session shell).
/// A successful login grows the jar beyond this baseline; that growth is the
/// only success signal the server gives us.
const UNAUTHENTICATED_COOKIES: usize = 4;

impl<C: SessionClient> Scraper<C> {
    /// Log in with the given credentials. `Ok(false)` means the server
    /// rejected them; only transport failures are errors. Safe to call
    /// repeatedly with fresh credentials; retrying is the caller's call.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        let url = self.endpoints.login();

        // Visit the form first so the baseline cookies exist.
        self.client.get(url).await?;

        self.client
            .post_form(
                url,
                &[
                    ("LoginForm[email]", email.to_string()),
                    ("LoginForm[password]", password.to_string()),
                ],
            )
            .await?;

        let jar_size = self.client.cookie_count();
        let success = jar_size > UNAUTHENTICATED_COOKIES;
        tracing::debug!("login attempt: {jar_size} cookies, success={success}");
        if success {
            self.authenticated = true;
        }
        Ok(success)
    }
}
