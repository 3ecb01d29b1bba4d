use super::common::{ColorMode, LogLevel, init_logging};
use super::config::Config;
use super::{Host, ProgressReporter};
use crate::Result;
use crate::crawl::{CancelSignal, Crawler, Entry, ExhaustionPolicy, Progress};
use crate::ranking::rank;
use crate::reports::{generate_json, generate_tsv};
use crate::search::{DEFAULT_API_URL, GitHubSearch};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Parser;
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

const LOG_TARGET: &str = "     crawl";

#[derive(Parser, Debug)]
pub struct CrawlArgs {
    /// Number of modules to collect (default from configuration, 100)
    #[arg(long, short = 'n', value_name = "N")]
    pub count: Option<usize>,

    /// Log progress at info level
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LogLevel,

    /// Path to configuration file (default is `corpus.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub API
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// What to do when a query runs out of pages before enough modules were collected
    #[arg(long, value_name = "POLICY")]
    pub exhaustion_policy: Option<ExhaustionPolicy>,

    /// Only consider repositories with at least this many stars
    #[arg(long, value_name = "N")]
    pub min_stars: Option<u64>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Write the TSV report to a file instead of to standard output
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub output: Option<Utf8PathBuf>,

    /// Also write the report to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,
}

impl CrawlArgs {
    /// Load the configuration file and apply command-line overrides
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(Utf8Path::new("."), self.config.as_ref())?;

        if let Some(count) = self.count {
            config.target_count = count;
        }

        if let Some(policy) = self.exhaustion_policy {
            config.exhaustion_policy = policy;
        }

        if let Some(min_stars) = self.min_stars {
            config.min_stars = Some(min_stars);
        }

        config.validate()?;
        Ok(config)
    }
}

pub async fn process_crawl<H: Host>(host: &mut H, args: &CrawlArgs) -> Result<()> {
    match crawl_and_report(host, args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let message = e.to_string();
            let first_line = message.lines().next().unwrap_or_default();
            let _ = writeln!(host.error(), "❌ Crawl failed: {first_line}");
            host.exit(1);
            Err(e)
        }
    }
}

async fn crawl_and_report<H: Host>(host: &mut H, args: &CrawlArgs) -> Result<()> {
    let log_level = args.log_level.with_verbose(args.verbose);
    init_logging(log_level);

    let config = args.resolve_config()?;
    let now = Utc::now();
    let options = config.crawl_options(now)?;
    let query = config.search_query(now)?;

    let client = GitHubSearch::new(args.github_token.as_deref(), &args.api_url)?;

    let progress: Arc<dyn Progress> = Arc::new(ProgressReporter::new(progress_delay(log_level), args.color.use_colors()));

    let cancel = CancelSignal::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let crawler = Crawler::new(client, options)
        .with_progress(progress)
        .with_cancel(cancel);

    let result = crawler.crawl(&query).await;
    ctrl_c.abort();

    let entries = rank(result?.entries);
    write_reports(host, args, &entries)
}

/// How long the crawl runs before the progress bar appears
fn progress_delay(log_level: LogLevel) -> Duration {
    // info and chattier levels log every page, which would interleave with the bar
    if log_level <= LogLevel::Warn {
        Duration::from_millis(300)
    } else {
        Duration::MAX
    }
}

fn write_reports<H: Host>(host: &mut H, args: &CrawlArgs, entries: &[Entry]) -> Result<()> {
    if let Some(path) = &args.output {
        let file = File::create(path).into_app_err_with(|| format!("creating report file '{path}'"))?;
        generate_tsv(entries, file).map_err(|e| e.enrich_with(|| format!("writing report file '{path}'")))?;
        log::info!(target: LOG_TARGET, "Wrote {} modules to '{path}'", entries.len());
    } else {
        generate_tsv(entries, host.output())?;
    }

    if let Some(path) = &args.json {
        let file = File::create(path).into_app_err_with(|| format!("creating JSON report file '{path}'"))?;
        let mut writer = BufWriter::new(file);
        generate_json(entries, &mut writer).map_err(|e| e.enrich_with(|| format!("writing JSON report file '{path}'")))?;
        writer.flush().into_app_err_with(|| format!("writing JSON report file '{path}'"))?;
        log::info!(target: LOG_TARGET, "Wrote {} modules to '{path}'", entries.len());
    }

    Ok(())
}
