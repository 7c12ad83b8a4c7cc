use crate::domain::ports::SessionClient;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::SET_COOKIE;
use reqwest::{redirect, Client, Response};
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) spielerplus-scraper/0.1";

/// Cookie-persisting HTTP client. reqwest's jar handles replay; we
/// additionally record the distinct cookie names the server has set,
/// because login success is only observable as jar growth.
pub struct HttpSessionClient {
    client: Client,
    cookie_names: Mutex<HashSet<String>>,
}

impl HttpSessionClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        // Redirects are never followed: the scraper only consumes pages it
        // requested directly, and a successful login answers with a 302
        // whose Set-Cookie headers must reach record_cookies.
        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            cookie_names: Mutex::new(HashSet::new()),
        })
    }

    fn record_cookies(&self, response: &Response) {
        let Ok(mut names) = self.cookie_names.lock() else {
            return;
        };
        for value in response.headers().get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            // `name=value; Path=/; ...` -> `name`
            if let Some(name) = raw.split(';').next().and_then(|kv| kv.split('=').next()) {
                let name = name.trim();
                if !name.is_empty() {
                    names.insert(name.to_string());
                }
            }
        }
    }
}

#[async_trait]
impl SessionClient for HttpSessionClient {
    async fn get(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        self.record_cookies(&response);
        tracing::debug!("GET {url} -> {}", response.status());
        Ok(response.text().await?)
    }

    async fn post_form(&self, url: &str, fields: &[(&str, String)]) -> Result<String> {
        tracing::debug!("POST {url} ({} fields)", fields.len());
        let response = self.client.post(url).form(fields).send().await?;
        self.record_cookies(&response);
        tracing::debug!("POST {url} -> {}", response.status());
        Ok(response.text().await?)
    }

    fn cookie_count(&self) -> usize {
        self.cookie_names.lock().map(|names| names.len()).unwrap_or(0)
    }
}
