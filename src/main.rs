use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};

use vacancy_probe::config::Config;
use vacancy_probe::scenarios::{Scenario, run_all};
use vacancy_probe::validators::{every_item_contains, found_any, no_item_contains};
use vacancy_probe::verifier::PageVerifier;

#[derive(Parser)]
#[command(name = "vacancy-probe", about = "Checks text search semantics of the vacancy search API")]
struct Cli {
    /// Log every request
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in scenarios
    List,
    /// Run built-in scenarios (all of them when no names are given)
    Run {
        names: Vec<String>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Walk the pages of an arbitrary query, optionally checking item contents
    Verify {
        #[arg(short, long)]
        query: String,
        /// Every item must contain this text
        #[arg(long, conflicts_with = "excludes")]
        contains: Option<String>,
        /// No item may contain this text
        #[arg(long)]
        excludes: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
}

#[derive(Args)]
struct Paging {
    #[arg(long)]
    per_page: Option<u32>,
    /// 0 checks every page
    #[arg(long)]
    max_pages: Option<u32>,
}

impl Paging {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(per_page) = self.per_page {
            config.per_page = per_page;
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // fmt's default tracing-log bridge picks up the library's log::* records
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(true)
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    match cli.command {
        Command::List => {
            for scenario in Scenario::all() {
                println!("{:<32} {}", scenario.name, scenario.display_query());
            }
        }
        Command::Run { names, paging } => {
            let scenarios = if names.is_empty() {
                Scenario::all()
            } else {
                names
                    .iter()
                    .map(|name| {
                        Scenario::by_name(name).with_context(|| format!("unknown scenario {name}"))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?
            };
            let verifier = PageVerifier::from_config(&paging.apply(config));

            let results = run_all(&verifier, &scenarios).await;
            let mut failed = 0;
            for (name, result) in &results {
                match result {
                    Ok(outcome) => match &outcome.report {
                        Some(report) => println!(
                            "PASS {name}: found {}, checked {}/{} pages{}",
                            outcome.found,
                            report.pages_checked,
                            report.total_pages,
                            if report.capped { " (sampled)" } else { "" }
                        ),
                        None => println!("PASS {name}: found {}", outcome.found),
                    },
                    Err(e) => {
                        failed += 1;
                        println!("FAIL {name}: {:#}", e);
                    }
                }
            }
            if failed > 0 {
                bail!("{failed} of {} scenarios failed", results.len());
            }
        }
        Command::Verify {
            query,
            contains,
            excludes,
            paging,
        } => {
            let verifier = PageVerifier::from_config(&paging.apply(config));
            let report = match (contains, excludes) {
                (Some(needle), _) => verifier.verify(&query, every_item_contains(needle)).await?,
                (None, Some(needle)) => verifier.verify(&query, no_item_contains(needle)).await?,
                (None, None) => verifier.verify(&query, found_any()).await?,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
