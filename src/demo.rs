// Built-in sample data.
// Lets the dashboard run without an API server (`--demo`).

use chrono::{DateTime, Duration, Utc};

use crate::api::{Activity, CommitsOnMaster, Item, LastCommit, Repo};

fn item(title: &str, by: &str, updated: DateTime<Utc>, labels: &[&str]) -> Item {
    Item {
        link: "#".to_string(),
        title: title.to_string(),
        by: by.to_string(),
        last_updated: Some(updated.to_rfc3339()),
        labels: labels.iter().map(|l| l.to_string()).collect(),
    }
}

fn commit(on: &str, by: &str, sha1: &str, comment: &str) -> Option<LastCommit> {
    Some(LastCommit {
        branch: "master".to_string(),
        on: on.to_string(),
        by: by.to_string(),
        sha1: sha1.to_string(),
        comment: comment.to_string(),
    })
}

/// Sample repositories with item timestamps spread around `now`.
pub fn sample_repos(now: DateTime<Utc>) -> Vec<Repo> {
    let days = |n: i64| now - Duration::days(n);

    vec![
        Repo {
            id: Some(1),
            title: "felipesere/advisor".to_string(),
            last_commit: commit("14min ago", "felipesere", "a11dfa26e15f4", "Add new questions"),
            activity: Activity {
                master: CommitsOnMaster { commits: 8 },
                prs: vec![
                    item("Add new JSON backend for questions", "cgockel", days(1), &["backend"]),
                    item("Use FSUnit for testing", "fsere", days(9), &["testing"]),
                    item("Introduce external advisors", "cfereday", days(21), &[]),
                ],
                issues: vec![
                    item("Crashes using non-ASCII characters", "ukutaht", days(2), &["bug"]),
                    item("Needs more questions about leadership", "ndyer", days(12), &[]),
                    item("Pictures are to slow on mobile", "molliestephenson", days(40), &["performance"]),
                ],
            },
        },
        Repo {
            id: Some(2),
            title: "async-rs/async-std".to_string(),
            last_commit: commit("2 hours ago", "yoshwyut", "850b8ae9d06df", "Merge pull request #344"),
            activity: Activity {
                master: CommitsOnMaster { commits: 34 },
                prs: vec![
                    item("Implement DoubleEndedStream", "felipesere", days(3), &["enhancement"]),
                    item("Make channels faster", "stjepang", days(16), &["performance"]),
                ],
                issues: vec![
                    item("Better support for byte ordered reads and writes?", "yoshwyut", days(5), &["question"]),
                    item("Make errors more verbose", "zkat", days(25), &["enhancement"]),
                ],
            },
        },
        Repo {
            id: Some(3),
            title: "http-rs/tide".to_string(),
            last_commit: commit("6 days ago", "stadder", "850b8ae9d06df", "Merge pull request #13"),
            activity: Activity {
                master: CommitsOnMaster { commits: 0 },
                prs: vec![item("Refactor API", "someone", days(6), &[])],
                issues: Vec::new(),
            },
        },
    ]
}
