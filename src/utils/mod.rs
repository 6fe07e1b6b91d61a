//! Utility functions for request-URI handling and text normalization.
//!
//! - [`uri`] - Request URI parsing and canonical reassembly
//! - [`transliterate`] - Folding non-ASCII text to ASCII for URL segments

pub mod transliterate;
pub mod uri;
