use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters of one search request. `None` fields are left out of the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub text: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl SearchParams {
    pub fn text(text: impl Into<String>) -> Self {
        SearchParams {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(3);
        if let Some(text) = &self.text {
            query.push(("text", text.clone()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page", per_page.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        query
    }
}

/// One page of the vacancy search response. Items are kept as raw JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub found: u64,
    pub pages: u32,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub items: Vec<Value>,
}

/// Status and untouched body of a response, before any contract checks.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub status: reqwest::StatusCode,
    pub body: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub query: String,
    pub per_page: u32,
    pub found: u64,
    pub total_pages: u32,
    pub pages_checked: u32,
    pub items_checked: usize,
    /// Set when the page cap stopped the walk before the last page.
    pub capped: bool,
}

#[test]
fn test_search_params_to_query() {
    assert!(SearchParams::default().to_query().is_empty());

    let params = SearchParams::text("foo").per_page(100).page(3);
    assert_eq!(
        params.to_query(),
        vec![
            ("text", "foo".to_string()),
            ("per_page", "100".to_string()),
            ("page", "3".to_string()),
        ]
    );

    // Empty text is still a parameter, it is not the same as no text at all.
    assert_eq!(SearchParams::text("").to_query(), vec![("text", String::new())]);
}

#[test]
fn test_search_page_ignores_unknown_fields() {
    let json = r#"{
        "found": 2,
        "pages": 1,
        "page": 0,
        "per_page": 20,
        "clusters": null,
        "arguments": null,
        "items": [{"id": "1", "name": "QA"}, {"id": "2", "name": "Dev"}]
    }"#;
    let page: SearchPage = serde_json::from_str(json).unwrap();
    assert_eq!(page.found, 2);
    assert_eq!(page.pages, 1);
    assert_eq!(page.items.len(), 2);

    let bare: SearchPage = serde_json::from_str(r#"{"found": 0, "pages": 0}"#).unwrap();
    assert!(bare.items.is_empty());
    assert_eq!(bare.page, None);
}
