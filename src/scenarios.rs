use anyhow::{Context, Result};

use crate::data_models::{SearchParams, VerificationReport};
use crate::query;
use crate::validators::{every_item_contains, no_item_contains};
use crate::verifier::PageVerifier;

const TESTER: &str = "Тестировщик";
const TESTER_JUNIOR: &str = "Тестировщик Junior";
const JUNIOR: &str = "Junior";
const GEO: &str = "Гео";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Single request, HTTP 200 and `found > 0`.
    FoundAny,
    /// Every item on every sampled page contains the needle.
    EveryItemContains(&'static str),
    /// No item on any sampled page contains the needle.
    NoItemContains(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    /// `None` sends the request with no parameters at all.
    pub query: Option<String>,
    pub check: Check,
}

#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub query: Option<String>,
    pub found: u64,
    /// Present for the paged checks.
    pub report: Option<VerificationReport>,
}

impl Scenario {
    fn new(name: &'static str, query: Option<String>, check: Check) -> Self {
        Self { name, query, check }
    }

    pub fn all() -> Vec<Scenario> {
        use Check::*;
        vec![
            Scenario::new("empty-request", None, FoundAny),
            Scenario::new("empty-text", Some(String::new()), FoundAny),
            Scenario::new("regular-text", Some("тестировщик".into()), FoundAny),
            Scenario::new(
                "regular-text-with-quotation",
                Some(query::phrase("тестировщик junior")),
                FoundAny,
            ),
            Scenario::new("empty-text-with-quotation", Some(query::phrase("")), FoundAny),
            Scenario::new(
                "word-with-exclamation",
                Some(query::exact(TESTER)),
                EveryItemContains(TESTER),
            ),
            Scenario::new(
                "sentence-with-exclamation",
                Some(query::exact_phrase(TESTER_JUNIOR)),
                EveryItemContains(TESTER_JUNIOR),
            ),
            Scenario::new("only-exclamation", Some(query::exact("")), FoundAny),
            Scenario::new(
                "exclamation-with-empty-quote",
                Some(query::exact_phrase("")),
                FoundAny,
            ),
            Scenario::new(
                "word-exclusion",
                Some(query::excluding(TESTER, JUNIOR)),
                NoItemContains(JUNIOR),
            ),
            Scenario::new(
                "word-with-asterisk",
                Some(query::wildcard(GEO)),
                EveryItemContains(GEO),
            ),
        ]
    }

    pub fn by_name(name: &str) -> Option<Scenario> {
        Self::all().into_iter().find(|s| s.name == name)
    }

    pub fn display_query(&self) -> String {
        match &self.query {
            Some(q) => format!("{q:?}"),
            None => "<no parameters>".to_string(),
        }
    }

    pub async fn run(&self, verifier: &PageVerifier) -> Result<ScenarioOutcome> {
        log::info!("running scenario {} ({})", self.name, self.display_query());
        let text = self.query.clone().unwrap_or_default();

        let (found, report) = match self.check {
            Check::FoundAny => {
                let params = match &self.query {
                    Some(q) => SearchParams::text(q.as_str()),
                    None => SearchParams::default(),
                };
                let page = verifier
                    .client()
                    .ensure_found(&params)
                    .await
                    .with_context(|| format!("scenario {} failed", self.name))?;
                (page.found, None)
            }
            Check::EveryItemContains(needle) => {
                let report = verifier
                    .verify(&text, every_item_contains(needle))
                    .await
                    .with_context(|| format!("scenario {} failed", self.name))?;
                (report.found, Some(report))
            }
            Check::NoItemContains(needle) => {
                let report = verifier
                    .verify(&text, no_item_contains(needle))
                    .await
                    .with_context(|| format!("scenario {} failed", self.name))?;
                (report.found, Some(report))
            }
        };

        Ok(ScenarioOutcome {
            name: self.name,
            query: self.query.clone(),
            found,
            report,
        })
    }
}

/// Runs every scenario, carrying on past failures so all results are reported.
pub async fn run_all(
    verifier: &PageVerifier,
    scenarios: &[Scenario],
) -> Vec<(&'static str, Result<ScenarioOutcome>)> {
    let mut results = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let result = scenario.run(verifier).await;
        if let Err(e) = &result {
            log::error!("{:#}", e);
        }
        results.push((scenario.name, result));
    }
    results
}

#[test]
fn test_scenario_catalogue() {
    let all = Scenario::all();
    assert_eq!(all.len(), 11);

    let mut names: Vec<_> = all.iter().map(|s| s.name).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), all.len(), "scenario names must be unique");

    let exclusion = Scenario::by_name("word-exclusion").unwrap();
    assert_eq!(exclusion.query.as_deref(), Some("Тестировщик not !Junior"));
    assert_eq!(exclusion.check, Check::NoItemContains("Junior"));

    let sentence = Scenario::by_name("sentence-with-exclamation").unwrap();
    assert_eq!(sentence.query.as_deref(), Some("!\"Тестировщик Junior\""));

    assert_eq!(Scenario::by_name("empty-request").unwrap().query, None);
    assert!(Scenario::by_name("nope").is_none());
}
