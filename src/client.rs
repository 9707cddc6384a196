use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};

use crate::config::Config;
use crate::data_models::{RawPage, SearchPage, SearchParams};
use crate::error::ProbeError;

/// Thin client for the vacancy search endpoint.
#[derive(Debug, Clone)]
pub struct VacancyClient {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    user_agent: String,
}

impl VacancyClient {
    pub fn new(base_url: &str, path: &str, access_token: &str, user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            access_token: access_token.to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.base_url,
            &config.path,
            &config.access_token,
            &config.user_agent,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends the request and returns status and body without judging either.
    pub async fn fetch_raw(&self, params: &SearchParams) -> Result<RawPage, ProbeError> {
        let request = self
            .client
            .get(&self.endpoint)
            .query(&params.to_query())
            .bearer_auth(&self.access_token)
            .header(USER_AGENT, &self.user_agent)
            .header(CONTENT_TYPE, "application/json")
            .build()?;
        log::debug!("GET {}", request.url());

        let res = self.client.execute(request).await?;
        let status = res.status();
        let body = res.text().await?;
        Ok(RawPage { status, body })
    }

    /// Fetches one page and requires HTTP 200 with a well-formed body.
    pub async fn fetch(&self, params: &SearchParams) -> Result<(SearchPage, String), ProbeError> {
        let raw = self.fetch_raw(params).await?;
        if raw.status != StatusCode::OK {
            log::error!(
                "status {} for {:?}, body: {}",
                raw.status,
                params,
                raw.body
            );
            return Err(ProbeError::Status {
                page: params.page,
                status: raw.status,
            });
        }
        let page = serde_json::from_str(&raw.body).map_err(|source| ProbeError::Decode {
            page: params.page,
            source,
        })?;
        Ok((page, raw.body))
    }

    /// The "found anything" contract: HTTP 200 and `found > 0`.
    pub async fn ensure_found(&self, params: &SearchParams) -> Result<SearchPage, ProbeError> {
        let (page, _) = self.fetch(params).await?;
        if page.found == 0 {
            return Err(ProbeError::NothingFound {
                query: params.text.clone().unwrap_or_default(),
            });
        }
        Ok(page)
    }
}

#[test]
fn test_endpoint_joins_base_and_path() {
    let client = VacancyClient::new("https://api.hh.ru/", "/vacancies", "", "");
    assert_eq!(client.endpoint(), "https://api.hh.ru/vacancies");

    let client = VacancyClient::new("http://127.0.0.1:8080", "vacancies", "t", "probe");
    assert_eq!(client.endpoint(), "http://127.0.0.1:8080/vacancies");
}
