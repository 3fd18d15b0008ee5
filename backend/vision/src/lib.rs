//! OCR/vision provider client.
//!
//! Sends an uploaded image (raw bytes or a URL the provider fetches
//! itself) to the configured OCR endpoint and flattens the nested
//! response into the token list the classifier consumes.

mod client;

pub use client::{OcrClient, OcrConfig, TokenSource, DEFAULT_OCR_ENDPOINT};
