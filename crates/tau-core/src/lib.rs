//! Foundational input-normalization helpers shared across Tau crates.
//!
//! Provides strict variant decoders over untyped `serde_json::Value` status
//! payloads, the enabled/configured account gate, and the match-metadata
//! suffix used by channel diagnostics.

pub mod account_gate;
pub mod match_metadata;
pub mod status_record;

pub use account_gate::{resolve_enabled_configured_account_id, GatedAccountStatus};
pub use match_metadata::{append_match_metadata, GroupMatchMetadata};
pub use status_record::{
    as_finite_number, as_record, as_strict_bool, as_string, is_record, read_field,
};
