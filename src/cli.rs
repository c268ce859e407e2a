//! Command-line front end: one search, printed as text or HTML.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use jcat_core::config::{Config, SourceKind};
use jcat_core::query::InitialState;
use jcat_core::{Catalog, DatasetId, SortSpec};
use jcat_sources::ConfiguredSource;
use jcat_view::{html, text, Card, Detail, Session, Status};

#[derive(Debug, Parser)]
#[command(name = "jcat", about = "jcat: browse SCI, EI and A&HCI journal snapshots")]
pub struct Cli {
    /// TOML file layered over the built-in defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read snapshots from this directory.
    #[arg(long, conflicts_with = "base_url")]
    pub data_dir: Option<PathBuf>,

    /// Fetch snapshots from this http:// base URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Startup state as a query string, e.g. `db=EI&q=fuel`.
    #[arg(long)]
    pub init: Option<String>,

    /// Dataset to search: SCI, EI or AHCI. Overrides `--init`.
    #[arg(long)]
    pub db: Option<DatasetId>,

    /// Free-text query. Overrides `--init`.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Filter chip as `key=label`, e.g. `impact=3-5` or `top=是`. Repeatable.
    #[arg(short, long = "filter", value_name = "KEY=LABEL")]
    pub filters: Vec<String>,

    /// Sort spec as `label|up` or `label|down`, e.g. `影响指数|down`.
    #[arg(long)]
    pub sort: Option<String>,

    /// 1-based page; out-of-range values are clamped.
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Show the detail view of the n-th record on the page (1-based).
    #[arg(long, value_name = "N")]
    pub detail: Option<usize>,

    /// Emit HTML fragments instead of plain text.
    #[arg(long)]
    pub html: bool,

    /// Write debug logs to /tmp/jcat-debug.log (tail -f to inspect).
    #[arg(long)]
    pub debug: bool,
}

/// Rendered output of one invocation.
#[derive(Debug)]
pub struct Report {
    pub output: String,
    /// `false` when the dataset could not be loaded.
    pub ok: bool,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load(self.config.as_deref())
            .with_context(|| format!("loading configuration {:?}", self.config))?;
        if let Some(dir) = &self.data_dir {
            config.source.kind = SourceKind::Dir;
            config.source.data_dir = dir.clone();
        }
        if let Some(url) = &self.base_url {
            config.source.kind = SourceKind::Http;
            config.source.base_url = url.clone();
        }
        Ok(config)
    }

    /// Build the browse session the flags describe.
    pub fn session(&self) -> anyhow::Result<Session> {
        let initial = self
            .init
            .as_deref()
            .map(InitialState::from_query_string)
            .unwrap_or_default();
        let mut session = Session::from_initial(&initial);
        if let Some(db) = self.db {
            session.switch_dataset(db);
        }
        if let Some(q) = &self.query {
            session.set_text(q);
        }
        for filter in &self.filters {
            let (key, label) = filter
                .split_once('=')
                .with_context(|| format!("filter {filter:?} is not KEY=LABEL"))?;
            session.set_filter(key.trim(), label)?;
        }
        if let Some(sort) = &self.sort {
            session.set_sort(SortSpec::parse(sort)?);
        }
        session.go_to(self.page);
        Ok(session)
    }
}

pub async fn run(cli: &Cli) -> anyhow::Result<Report> {
    let config = cli.load_config()?;
    let mut session = cli.session()?;
    let image_base = config.view.image_base.clone();
    let catalog = Catalog::new(ConfiguredSource::from_config(&config));

    let (ticket, query) = session.begin();
    tracing::info!(dataset = %query.dataset, text = %query.text, page = query.page, "searching");
    let result = catalog.search(&query).await;
    session.complete(ticket, &result);
    let status = Status::from_result(&result);

    let page = match result {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(error = %e, "dataset unavailable");
            let output = if cli.html {
                html::page(&status, &[])
            } else {
                text::page(&status, &[], 1)
            };
            return Ok(Report { output, ok: false });
        }
    };

    if let Some(n) = cli.detail {
        let Some(record) = n.checked_sub(1).and_then(|i| page.items.get(i)) else {
            bail!("no record {n} on page {} ({} shown)", page.page, page.items.len());
        };
        let detail = Detail::from_record(record, &image_base);
        let output = if cli.html {
            html::detail(&detail)
        } else {
            text::detail(&detail)
        };
        return Ok(Report { output, ok: true });
    }

    let cards: Vec<Card> = jcat_view::cards(&page, &image_base);
    let output = if cli.html {
        html::page(&status, &cards)
    } else {
        text::page(&status, &cards, jcat_view::first_number(&page))
    };
    Ok(Report { output, ok: true })
}
