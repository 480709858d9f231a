//! Content adapters. Implement ContentPort.
//!
//! Built-in mock content for demos, JSON fixtures for custom scenarios.

pub mod json_content;
pub mod mock_content;

pub use json_content::{ContentFixture, JsonContent};
pub use mock_content::MockContent;
