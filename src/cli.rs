// Command-line interface.
// Flags shared with the dashboard plus one-shot subcommands that print to stdout.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::activity::{self, Level};
use crate::api::{Item, Repo, RepoClient, RepoName, parse_items};
use crate::demo;
use crate::error::{Result, TldrError};
use crate::search::{DEFAULT_FIELDS, SearchQuery};

#[derive(Debug, Parser)]
#[command(name = "tldr", version, about = "What happened in your GitHub repos, at a glance")]
pub struct Cli {
    /// Base URL of the tldr API server.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Path to config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Tracing filter, e.g. `debug` or `tldr=trace`.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Use built-in sample data instead of the API.
    #[arg(long)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print repos with per-item activity levels.
    List,
    /// Start tracking a repository.
    Add {
        /// Repository as owner/name.
        name: String,
    },
    /// Stop tracking a repository.
    Delete { id: String },
    /// Track pull requests or issues on a repository.
    Track {
        id: String,
        /// Items such as pr:12 or issue:7.
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Print the proxied JSON for a repository.
    Proxy {
        /// Repository as owner/name.
        name: String,
    },
    /// Print items whose fields contain the text.
    Search {
        text: String,
        /// Field to search; repeatable. Defaults to title, by and labels.
        #[arg(long = "field", value_name = "FIELD")]
        fields: Vec<String>,
    },
}

/// Data source for one-shot commands.
pub enum Backend {
    Api(Arc<RepoClient>),
    Demo,
}

impl Backend {
    async fn repos(&self) -> Result<Vec<Repo>> {
        match self {
            Backend::Api(client) => client.list_repos().await,
            Backend::Demo => Ok(demo::sample_repos(Utc::now())),
        }
    }

    fn client(&self) -> Result<&RepoClient> {
        match self {
            Backend::Api(client) => Ok(client.as_ref()),
            Backend::Demo => Err(TldrError::Other(
                "demo data is read-only, drop --demo to talk to the API".to_string(),
            )),
        }
    }
}

/// Run a subcommand to completion.
pub async fn execute(command: Command, backend: &Backend) -> Result<()> {
    match command {
        Command::List => {
            let repos = backend.repos().await?;
            for repo in &repos {
                print_repo(repo);
            }
        }
        Command::Add { name } => {
            let repo: RepoName = name.parse()?;
            backend.client()?.add_repo(&repo.to_string()).await?;
            println!("Added {}", repo);
        }
        Command::Delete { id } => {
            backend.client()?.delete_repo(&id).await?;
            println!("Deleted {}", id);
        }
        Command::Track { id, items } => {
            let items = parse_items(&items.join(" "))?;
            backend.client()?.track_items(&id, &items).await?;
            for item in &items {
                println!("Tracking {} #{} on {}", item.kind, item.nr, id);
            }
        }
        Command::Proxy { name } => {
            let repo: RepoName = name.parse()?;
            debug!(path = %repo.to_url(), "proxying");
            let value = backend.client()?.proxy(&repo.to_string()).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Search { text, fields } => {
            let fields: Vec<&str> = if fields.is_empty() {
                DEFAULT_FIELDS.to_vec()
            } else {
                fields.iter().map(String::as_str).collect()
            };
            let query = SearchQuery::new(&text, &fields)
                .map_err(|e| TldrError::Other(format!("invalid search '{}': {}", text, e)))?;

            let repos = backend.repos().await?;
            for (repo, item) in search(&repos, &query) {
                println!("{:<24} {}", repo.title, describe(item));
            }
        }
    }
    Ok(())
}

/// Items across all repos matching `query`, paired with their repo.
pub fn search<'a>(repos: &'a [Repo], query: &SearchQuery) -> Vec<(&'a Repo, &'a Item)> {
    repos
        .iter()
        .flat_map(|repo| {
            let items: Vec<&Item> = repo
                .activity
                .issues
                .iter()
                .chain(repo.activity.prs.iter())
                .collect();
            query
                .apply(&items)
                .into_iter()
                .map(move |item| (repo, *item))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn level_of(item: &Item) -> Level {
    item.last_updated
        .as_deref()
        .and_then(activity::parse_timestamp)
        .map_or(Level::None, activity::classify)
}

fn describe(item: &Item) -> String {
    let mut line = format!("[{:<6}] {} (by {})", level_of(item), item.title, item.by);
    if !item.labels.is_empty() {
        line.push_str(&format!(" [{}]", item.labels.join(", ")));
    }
    line
}

fn print_repo(repo: &Repo) {
    println!("{}", repo.title);
    if let Some(commit) = &repo.last_commit {
        println!(
            "  last commit on {} {} by {}: {}",
            commit.branch, commit.on, commit.by, commit.comment
        );
    }
    if !repo.any_activity() {
        println!("  no tracked items");
        return;
    }
    for item in &repo.activity.prs {
        println!("  pr    {}", describe(item));
    }
    for item in &repo.activity.issues {
        println!("  issue {}", describe(item));
    }
}
