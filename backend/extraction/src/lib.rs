//! Text understanding for uploaded identity-document images.
//!
//! Turns a vision-provider response into a flat token list and the
//! token list into a PAN/Aadhar classification.

pub mod classifier;
pub mod text_fields;

pub use classifier::classify;
pub use text_fields::{collect_fields, collect_text_fields};
