//! Client for the remote speakers service.
//!
//! The service pages its listing, so a full pull is two requests: one probe
//! to learn the total record count, then one page sized to that count.

use reqwest::Client;
use tracing::{debug, info};

use crate::errors::FetchError;
use crate::models::{SpeakerPage, SpeakerRecord};

pub struct SpeakerFetcher {
    client: Client,
    base_url: String,
}

impl SpeakerFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Pull every speaker record the service knows about.
    pub async fn fetch_all(&self) -> Result<Vec<SpeakerRecord>, FetchError> {
        let url = self.speakers_url();

        let probe = self.get_page(&url, None).await?;
        info!("speakers service reports {} records", probe.count);

        let page = self.get_page(&url, Some((probe.count, 0))).await?;
        debug!("received {} of {} records", page.results.len(), page.count);

        Ok(page.results.into_iter().map(SpeakerRecord::from).collect())
    }

    async fn get_page(
        &self,
        url: &str,
        window: Option<(u64, u64)>,
    ) -> Result<SpeakerPage, FetchError> {
        let mut request = self.client.get(url);
        if let Some((limit, offset)) = window {
            request = request.query(&[("limit", limit), ("offset", offset)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status { status });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn speakers_url(&self) -> String {
        format!(
            "{}/conference/speakers",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speakers_url_tolerates_trailing_slash() {
        let fetcher = SpeakerFetcher::new("http://localhost:8088/");
        assert_eq!(
            fetcher.speakers_url(),
            "http://localhost:8088/conference/speakers"
        );
    }
}
