//! Canonical data model for extension-point resolution.
//!
//! # Responsibility
//! - Define extension-point declarations, resolved configuration artifacts
//!   and scenario-matching value objects.
//! - Keep model types free of registration and resolution logic.

pub mod config;
pub mod extension;
pub mod template;
