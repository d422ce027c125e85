//! Shared types for the shopping cart workspace.

mod types;

pub use types::CartId;
