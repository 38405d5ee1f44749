//! Data models shared across the pipeline.

pub mod config;
pub mod record;

pub use config::{CardexConfig, ExtractionConfig, NormalizeConfig, OrgAlias};
pub use record::{
    CardRecord, DocumentKind, ExtractedRecord, ExtractionOutcome, NationalIdRecord, VoterIdRecord,
};
