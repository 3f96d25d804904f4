//! `taskdeck` task service library.
//!
//! Exposes the REST task service for use in tests and embedding.
//! The service translates HTTP verbs into [`store::TaskStore`] operations
//! and owns input validation and response shaping.

pub mod config;
pub mod error;
pub mod service;
pub mod store;
