//! Domain errors. Used by ports and use cases.
//!
//! The simulation core itself never fails; adapters map infrastructure
//! errors (fixture files, terminal) into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Content source error: {0}")]
    Content(String),

    #[error("UI error: {0}")]
    Ui(String),
}
