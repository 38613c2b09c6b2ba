use crate::prelude::{eprintln, println, *};
use bookmeta_core::config::{ProviderKind, ProvidersConfig};
use bookmeta_core::query::{MatchMode, SearchRequest};
use bookmeta_core::record::BookRecord;
use colored::Colorize;
use serde::Serialize;
use std::time::Instant;

use crate::limiter::LimitMode;
use crate::providers::{Provider, SearchOutcome};

/// Options for searching books by title
#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Search Google Books for similar titles:
  bookmeta search \"The Lord of the Rings\"

  # Exact title match, up to 10 results:
  bookmeta search \"Dune\" --exact --max-results 10

  # Search Open Library for French editions:
  bookmeta search \"Le Petit Prince\" --provider openlibrary --lang fr

  # JSON output:
  bookmeta search \"Dune\" --json

NOTES:
  - Open Library ignores --exact
  - Open Library only filters by language when --lang is en (the default)
  - Each provider allows 60 calls per minute; searches wait for a free slot
    unless --no-wait is given")]
pub struct SearchOptions {
    /// Book title to search for
    pub title: String,

    /// Provider to query (google, openlibrary)
    #[arg(short, long, env = "BOOKMETA_PROVIDER", default_value = "google")]
    pub provider: ProviderKind,

    /// Restrict the search to exact title matches
    #[arg(long)]
    pub exact: bool,

    /// Maximum number of results to return (1-40)
    #[arg(short = 'n', long, default_value = "5")]
    pub max_results: usize,

    /// Language code to restrict results to
    #[arg(short, long, default_value = "en")]
    pub lang: String,

    /// Fail instead of waiting when the provider's rate limit is reached
    #[arg(long)]
    pub no_wait: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchOptions {
    fn match_mode(&self) -> MatchMode {
        if self.exact {
            MatchMode::Exact
        } else {
            MatchMode::Similar
        }
    }

    fn limit_mode(&self) -> LimitMode {
        if self.no_wait {
            LimitMode::FailFast
        } else {
            LimitMode::Block
        }
    }
}

/// Search results as printed with `--json`
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub provider: ProviderKind,
    pub query: String,
    pub match_mode: MatchMode,
    pub results: Vec<BookRecord>,
}

pub async fn run(
    options: SearchOptions,
    config: &ProvidersConfig,
    global: crate::Global,
) -> Result<()> {
    let start_time = Instant::now();

    let request = SearchRequest::new(
        options.title.clone(),
        options.match_mode(),
        options.max_results,
        options.lang.clone(),
    )?;
    let provider = Provider::new(options.provider, config, options.limit_mode())?;

    if global.verbose {
        eprintln!(
            "Searching {} ({}) for {:?}...",
            provider.kind().display_name(),
            config.get(provider.kind()).base_url,
            request.query()
        );
    }

    let outcome = provider.search(&request).await;

    let records = match outcome {
        SearchOutcome::Found(records) => records,
        SearchOutcome::Empty(reason) => {
            if global.verbose {
                eprintln!("{}: {}", "Reason".yellow(), reason);
            }
            return Err(eyre!("No results found for {:?}", request.query()));
        }
    };

    if options.json {
        let output = SearchOutput {
            provider: provider.kind(),
            query: request.query().to_string(),
            match_mode: request.match_mode(),
            results: records,
        };
        println!("{}", format_search_json(&output)?);
    } else {
        println!("\n{}\n", "SEARCH RESULTS".bright_cyan().bold());
        format_records_table(&records).printstd();
        println!();
        println!("{}", format_summary(records.len(), start_time.elapsed().as_secs_f64()));
    }

    Ok(())
}

fn format_search_json(output: &SearchOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_records_table(records: &[BookRecord]) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "Title".bold().cyan(),
        "Authors".bold().green(),
        "Published".bold().yellow(),
        "Publisher".bold().blue(),
        "Pages".bold().magenta(),
        "Preview Link".bold().red()
    ]);

    for record in records {
        table.add_row(prettytable::row![
            record.title(),
            record.authors().join("\n"),
            record.published_date(),
            record.publisher(),
            record.page_count(),
            record.preview_link()
        ]);
    }

    table
}

fn format_summary(count: usize, elapsed_secs: f64) -> String {
    let noun = if count == 1 { "book" } else { "books" };
    format!(
        "Found {} {} matching the criteria in {:.2} seconds",
        count.to_string().bright_cyan().bold(),
        noun,
        elapsed_secs
    )
}
