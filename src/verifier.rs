use crate::client::VacancyClient;
use crate::config::{Config, DEFAULT_MAX_PAGES, DEFAULT_PER_PAGE};
use crate::data_models::{SearchPage, SearchParams, VerificationReport};
use crate::error::{ProbeError, ValidationError};

/// Walks the first pages of a search result and validates each one.
///
/// Only `min(pages, max_pages)` pages are fetched, so with a cap this is a
/// sample of the result set and not a full check.
#[derive(Debug, Clone)]
pub struct PageVerifier {
    client: VacancyClient,
    per_page: u32,
    max_pages: u32,
}

/// How many pages a verification walks. `max_pages == 0` means no cap.
pub fn pages_to_check(total_pages: u32, max_pages: u32) -> u32 {
    if max_pages > 0 {
        total_pages.min(max_pages)
    } else {
        total_pages
    }
}

impl PageVerifier {
    pub fn new(client: VacancyClient) -> Self {
        Self {
            client,
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(VacancyClient::from_config(config))
            .per_page(config.per_page)
            .max_pages(config.max_pages)
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn client(&self) -> &VacancyClient {
        &self.client
    }

    /// First request of a verification: no `page` parameter, must find something.
    pub async fn discover(&self, query: &str) -> Result<SearchPage, ProbeError> {
        let params = SearchParams::text(query).per_page(self.per_page);
        let first = self.client.ensure_found(&params).await?;
        log::info!(
            "query {:?}: found {} vacancies on {} pages",
            query,
            first.found,
            first.pages
        );
        Ok(first)
    }

    /// Runs `validator` on every page up to the cap, stopping at the first failure.
    pub async fn verify<F>(
        &self,
        query: &str,
        mut validator: F,
    ) -> Result<VerificationReport, ProbeError>
    where
        F: FnMut(&SearchPage) -> Result<(), ValidationError>,
    {
        let first = self.discover(query).await?;
        let to_check = pages_to_check(first.pages, self.max_pages);
        let capped = to_check < first.pages;
        if capped {
            log::warn!(
                "query {:?}: checking only {} of {} pages, the rest is not verified",
                query,
                to_check,
                first.pages
            );
        }

        let mut items_checked = 0;
        for page_idx in 0..to_check {
            let params = SearchParams::text(query)
                .per_page(self.per_page)
                .page(page_idx);
            let (page, body) = self.client.fetch(&params).await?;

            if let Err(e) = validator(&page) {
                log::error!(
                    "query {:?}: page {} failed validation: {}\nresponse: {}",
                    query,
                    page_idx,
                    e,
                    body
                );
                return Err(ProbeError::Validation {
                    page: page_idx,
                    message: e.message,
                    body,
                });
            }
            items_checked += page.items.len();
            log::debug!(
                "query {:?}: page {}/{} ok ({} items)",
                query,
                page_idx + 1,
                to_check,
                page.items.len()
            );
        }

        Ok(VerificationReport {
            query: query.to_string(),
            per_page: self.per_page,
            found: first.found,
            total_pages: first.pages,
            pages_checked: to_check,
            items_checked,
            capped,
        })
    }
}

#[test]
fn test_pages_to_check() {
    assert_eq!(pages_to_check(200, 50), 50);
    assert_eq!(pages_to_check(20, 50), 20);
    assert_eq!(pages_to_check(50, 50), 50);
    assert_eq!(pages_to_check(3, 0), 3);
    assert_eq!(pages_to_check(0, 50), 0);
    assert_eq!(pages_to_check(0, 0), 0);
}
