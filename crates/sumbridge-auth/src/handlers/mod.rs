//! Credential handlers

pub mod apikey;

pub use apikey::{ApiKeyBackend, ApiKeyHandler, ApiKeyInfo};
