// Cache module for local filesystem state.
// Keeps the last fetched repository list for instant startup.

pub mod paths;
pub mod store;

pub use store::{load_repos, save_repos};
