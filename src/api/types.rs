// Wire types for the tldr JSON API.
// Repositories, their last commit, and the tracked pull requests and issues.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TldrError;

/// Snapshot of the most recent commit on a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastCommit {
    pub branch: String,
    /// Already formatted for display by the server ("14min ago").
    pub on: String,
    pub by: String,
    #[serde(default)]
    pub sha1: String,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitsOnMaster {
    pub commits: u32,
}

/// A pull request or issue shown in a repository's activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub link: String,
    pub title: String,
    pub by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub master: CommitsOnMaster,
    #[serde(default)]
    pub prs: Vec<Item>,
    #[serde(default)]
    pub issues: Vec<Item>,
}

/// A tracked repository as returned by `GET /api/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(rename = "lastCommit", default)]
    pub last_commit: Option<LastCommit>,
    #[serde(default)]
    pub activity: Activity,
}

impl Repo {
    /// Identifier used in API paths: the numeric id when the server
    /// supplied one, the title otherwise.
    pub fn api_id(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => self.title.clone(),
        }
    }

    pub fn any_activity(&self) -> bool {
        !self.activity.issues.is_empty() || !self.activity.prs.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    #[serde(rename = "pr")]
    Pr,
    #[serde(rename = "issue")]
    Issue,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Pr => write!(f, "pr"),
            ItemKind::Issue => write!(f, "issue"),
        }
    }
}

/// A request to start tracking a single PR or issue, e.g. `pr:12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemToTrack {
    pub kind: ItemKind,
    pub nr: u32,
}

impl FromStr for ItemToTrack {
    type Err = TldrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TldrError::InvalidItem(s.to_string());
        let (kind, nr) = s.trim().split_once(':').ok_or_else(invalid)?;
        let kind = match kind.to_lowercase().as_str() {
            "pr" => ItemKind::Pr,
            "issue" => ItemKind::Issue,
            _ => return Err(invalid()),
        };
        let nr = nr.trim().parse().map_err(|_| invalid())?;
        Ok(Self { kind, nr })
    }
}

/// Parse a whitespace separated list like `pr:1 issue:7`.
pub fn parse_items(input: &str) -> Result<Vec<ItemToTrack>, TldrError> {
    input.split_whitespace().map(str::parse).collect()
}

/// A repository name of the form `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoName {
    pub owner: String,
    pub name: String,
}

impl RepoName {
    /// Path-safe form: the slash would otherwise split the URL segment.
    pub fn to_url(&self) -> String {
        format!("{}---{}", self.owner, self.name)
    }
}

impl FromStr for RepoName {
    type Err = TldrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(TldrError::InvalidRepoName(t.to_string())),
        }
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
