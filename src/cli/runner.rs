//! CLI runner - executes commands

use crate::api::{Issues, List, ListOptions, Projects};
use crate::cli::commands::{Cli, Commands, OutputFormat, ScanMode};
use crate::config::ClientSettings;
use crate::error::{Result, ResultExt};
use crate::http::HttpClient;
use crate::types::SortOrder;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing items to stdout
    pub async fn run(&self) -> Result<()> {
        let mut out = io::stdout();
        self.run_to(&mut out).await
    }

    /// Run the CLI command, writing items to `out`
    pub async fn run_to<W: Write + Send>(&self, out: &mut W) -> Result<()> {
        let settings = self.settings()?;
        let client = HttpClient::with_config(settings.client_config()?)
            .context("Failed to build HTTP client")?;
        debug!(base_url = %settings.base_url, "client ready");

        let mut options = ListOptions::new();
        if let Some(per_page) = settings.per_page {
            options = options.per_page(per_page);
        }

        match &self.cli.command {
            Commands::Projects {
                keyset,
                membership,
                owned,
                search,
                order_by,
                sort,
                limit,
            } => {
                let options = project_options(options, *keyset, search, order_by, *sort);
                let projects = Projects::new(client);
                let list = if *owned {
                    projects.list_owned(&options)
                } else if *membership {
                    projects.list_membership(&options)
                } else {
                    projects.list(&options)
                };
                self.drain(&list, *limit, out).await
            }
            Commands::Issues {
                project,
                state,
                limit,
            } => {
                let list = Issues::new(client).list_in_state(project, *state, &options);
                self.drain(&list, *limit, out).await
            }
        }
    }

    /// Resolve settings: file (or defaults), then CLI/env overrides
    fn settings(&self) -> Result<ClientSettings> {
        let mut settings = match &self.cli.config {
            Some(path) => ClientSettings::from_file(path)?,
            None => ClientSettings::default(),
        };
        if let Some(url) = &self.cli.base_url {
            settings = settings.with_base_url(url);
        }
        if let Some(per_page) = self.cli.per_page {
            settings = settings.with_per_page(per_page);
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Consume a listing with the selected idiom
    async fn drain<T, W>(&self, list: &List<T>, limit: Option<usize>, out: &mut W) -> Result<()>
    where
        T: DeserializeOwned + Serialize + Send + 'static,
        W: Write + Send,
    {
        let limit = limit.unwrap_or(usize::MAX);
        let mut count = 0usize;

        match self.cli.mode {
            ScanMode::Scan => {
                let (stream, outcome) = list.scan();
                let mut stream = stream.take(limit);
                while let Some(item) = stream.next().await {
                    self.emit(out, &item)?;
                    count += 1;
                }
                drop(stream);
                outcome.err()?;
            }
            ScanMode::Paired => {
                let mut stream = list.scan2().take(limit);
                while let Some(item) = stream.next().await {
                    self.emit(out, &item?)?;
                    count += 1;
                }
            }
            ScanMode::Collect => {
                let items = list.collect().await?;
                for item in items.iter().take(limit) {
                    self.emit(out, item)?;
                    count += 1;
                }
            }
        }

        info!(path = list.path(), count, mode = ?self.cli.mode, "listing complete");
        Ok(())
    }

    /// Output one item
    fn emit<T: Serialize, W: Write>(&self, out: &mut W, item: &T) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(item)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(item)?,
        };
        writeln!(out, "{line}")?;
        Ok(())
    }
}

fn project_options(
    mut options: ListOptions,
    keyset: bool,
    search: &Option<String>,
    order_by: &Option<String>,
    sort: Option<SortOrder>,
) -> ListOptions {
    if keyset {
        options = options.keyset();
    }
    if let Some(field) = order_by {
        options = options.order_by(field);
    }
    if let Some(sort) = sort {
        options = options.sort(sort);
    }
    if let Some(term) = search {
        options = options.param("search", term);
    }
    options
}
