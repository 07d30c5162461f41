//! Storage formats for service layer
//!
//! The roster is persisted as plain text, one pipe-delimited record per line.

pub mod record_codec;
