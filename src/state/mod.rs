// State management module.
// Tab selection and dashboard state, independent of rendering.

pub mod dashboard;
pub mod tabs;

pub use dashboard::{DashboardState, InputMode, LoadingState, RepoView};
pub use tabs::Tab;
