// client.rs
use crate::config::Config;
use crate::errors::{Result, SuggestionError};
use crate::remote::models::{SuggestionLocations, SuggestionsResponse, VerificationRequest};
use crate::remote::{Action, VerificationService};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

/// Blocking HTTP client for the `/suggestion` routes of the eviction backend.
pub struct VerificationClient {
    client: Client,
    base: Url,
}

impl VerificationClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| SuggestionError::Config(format!("cannot build http client: {e}")))?;

        Ok(Self {
            client,
            base: config.backend_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| SuggestionError::Config(format!("cannot build {path} url: {e}")))
    }

    /// Turns a non-2xx answer into `Network`, keeping the body for context.
    fn check_status(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().unwrap_or_else(|_| "(no body)".to_string());
        Err(SuggestionError::Network(format!("backend HTTP {status}: {text}")))
    }

    fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let text = resp
            .text()
            .map_err(|e| SuggestionError::Network(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| SuggestionError::MalformedResponse(e.to_string()))
    }
}

impl VerificationService for VerificationClient {
    fn fetch_all(&self) -> Result<SuggestionsResponse> {
        let url = self.endpoint("suggestion/")?;
        debug!(%url, "fetching suggestions");

        let resp = self.client.get(url).send()?;
        let body: SuggestionsResponse = Self::read_json(Self::check_status(resp)?)?;

        info!(
            groups = body.suggestions.len(),
            archived = body.archived_suggestions.len(),
            total = body.num_suggestions,
            "suggestions fetched"
        );
        Ok(body)
    }

    fn submit(&self, action: Action, cares_id: i64, case_id: &str) -> Result<()> {
        let url = self.endpoint(&format!("suggestion/{}", action.as_str()))?;
        let body = VerificationRequest {
            cares_id,
            case_id: case_id.to_string(),
        };

        let result = self
            .client
            .post(url)
            .json(&body)
            .send()
            .map_err(SuggestionError::from)
            .and_then(Self::check_status);

        match result {
            Ok(_) => {
                info!(%action, cares_id, case_id, "verification acknowledged");
                Ok(())
            }
            Err(e) => {
                warn!(%action, cares_id, case_id, error = %e, "verification failed");
                Err(e)
            }
        }
    }

    fn locations(&self, cares_id: i64, case_id: &str) -> Result<SuggestionLocations> {
        let mut url = self.endpoint("suggestion/map")?;
        url.query_pairs_mut()
            .append_pair("caresId", &cares_id.to_string())
            .append_pair("caseID", case_id);

        let resp = self.client.get(url).send()?;
        Self::read_json(Self::check_status(resp)?)
    }
}
