// tldr API endpoint functions.
// Typed operations on /api/repos; failures are reported and returned.

use reqwest::Method;
use tracing::info;

use crate::error::Result;

use super::client::{Ack, RepoClient, Transport};
use super::types::{ItemToTrack, Repo};

#[derive(serde::Serialize)]
struct AddRepoRequest<'a> {
    name: &'a str,
}

/// Path segment for a repo identifier. The owner/name slash of a title
/// would split the segment.
fn path_id(id: &str) -> String {
    id.replacen('/', "---", 1)
}

impl<T: Transport> RepoClient<T> {
    /// Get every tracked repository.
    pub async fn list_repos(&self) -> Result<Vec<Repo>> {
        let result = self
            .request::<Vec<Repo>, ()>(Method::GET, "/api/repos", None)
            .await;
        self.reported(result, |e| format!("Could not load repos: {}", e))
    }

    /// Start tracking a repository by name (`owner/name`).
    pub async fn add_repo(&self, name: &str) -> Result<Ack> {
        info!(name, "adding repo");
        let result = self
            .request(Method::POST, "/api/repos", Some(&AddRepoRequest { name }))
            .await;
        self.reported(result, |_| format!("Could not add repo {}", name))
    }

    /// Stop tracking a repository.
    pub async fn delete_repo(&self, id: &str) -> Result<Ack> {
        info!(id, "deleting repo");
        let path = format!("/api/repos/{}", path_id(id));
        let result = self.request::<Ack, ()>(Method::DELETE, &path, None).await;
        self.reported(result, |e| format!("Unable to delete repo {}: {}", id, e))
    }

    /// Track individual pull requests and issues on a repository.
    pub async fn track_items(&self, id: &str, items: &[ItemToTrack]) -> Result<Ack> {
        info!(id, count = items.len(), "tracking items");
        let path = format!("/api/repos/{}/tracked", path_id(id));
        let result = self.request(Method::POST, &path, Some(items)).await;
        self.reported(result, |e| {
            format!("Unable to add items to repo {}: {}", id, e)
        })
    }

    /// Fetch live data for a repository through the server-side proxy.
    pub async fn proxy(&self, name: &str) -> Result<serde_json::Value> {
        let path = format!("/api/repos/{}/proxy", path_id(name));
        let result = self
            .request::<Ack, ()>(Method::GET, &path, None)
            .await
            .map(|ack| ack.0);
        self.reported(result, |_| format!("Could not proxy to repo {}", name))
    }
}
