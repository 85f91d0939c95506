//! `invoice-recon`: Two-ledger invoice reconciliation engine.
//!
//! Pure engine crate: receives normalized invoice records for ledgers A and B,
//! returns ordered outcomes (exact pairs, fuzzy pairs, unmatched rows).
//! The CSV loader in [`load`] is a convenience for callers with canonical files.

pub mod aggregate;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod key;
pub mod load;
pub mod matcher;
pub mod model;
pub mod similarity;
pub mod summary;

pub use config::{DuplicatePolicy, MatchingConfig, ReconConfig};
pub use engine::{reconcile, run};
pub use error::ReconError;
pub use model::{
    Confidence, Field, InvoiceRecord, LabelStyle, ReconInput, ReconOutcome, ReconResult, Remark,
    Side,
};
