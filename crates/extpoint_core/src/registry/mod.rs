//! Spec registry layer.
//!
//! # Responsibility
//! - Hold canonical, code-indexed collections of registered abilities,
//!   businesses, products and realizations.
//! - Keep registration bookkeeping separate from priority resolution.

pub mod spec;
pub mod template_registry;
