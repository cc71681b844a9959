//! CSV persistence: the field codec, the per-entity stores, and the
//! whole-file rewrite every mutation goes through.

pub mod codec;
pub mod gateway;
pub mod record;
pub mod store;

use std::path::PathBuf;

pub use record::{CsvRecord, RowError, DATE_FORMAT, DEFAULT_PASSWORD};
pub use store::{EntityStore, GroupedStore};

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("{kind} {id} already exists")]
    Duplicate { kind: &'static str, id: String },
}
