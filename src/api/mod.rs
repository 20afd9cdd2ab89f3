// tldr API module.
// Client, endpoints and wire types for the repository activity API.

pub mod client;
pub mod endpoints;
#[cfg(test)]
pub mod testing;
pub mod types;

pub use client::RepoClient;
pub use types::*;
