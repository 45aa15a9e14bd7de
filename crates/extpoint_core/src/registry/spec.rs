//! Registered spec records.
//!
//! # Responsibility
//! - Define the canonical records built from discovery descriptors at
//!   registration time.
//!
//! # Invariants
//! - Spec records are immutable after registration.
//! - A realization's `extension_codes` is derived once, from its live
//!   extension instance's declaration table.

use crate::model::extension::BusinessExt;
use crate::model::template::BusinessTemplate;
use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// One registered capability unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilitySpec {
    pub code: String,
    pub name: String,
    pub description: String,
}

/// One registered business scenario template.
#[derive(Debug, Clone)]
pub struct BusinessSpec {
    pub code: String,
    pub name: String,
    pub description: String,
    /// Lower value = higher precedence.
    pub priority: i32,
    /// Realizations whose code pattern matched this business at
    /// registration time.
    pub realizations: Vec<RealizationSpec>,
}

impl BusinessSpec {
    /// Produces the live value object for one matching request.
    pub fn new_instance(&self) -> BusinessTemplate {
        BusinessTemplate {
            code: self.code.clone(),
            name: self.name.clone(),
            priority: self.priority,
        }
    }
}

/// One registered default-tier product template.
#[derive(Debug, Clone)]
pub struct ProductSpec {
    pub code: String,
    pub name: String,
    pub description: String,
    /// Lower value = higher precedence.
    pub priority: i32,
    /// Realizations whose code pattern matched this product at
    /// registration time.
    pub realizations: Vec<RealizationSpec>,
}

/// One registered extension realization binding.
#[derive(Clone)]
pub struct RealizationSpec {
    /// Code pattern this binding applies to.
    pub code: String,
    /// Optional scenario qualifier.
    pub scenario: Option<String>,
    /// Implementation type identity.
    pub ext_class: String,
    /// Live, invocable extension instance.
    pub business_ext: Arc<dyn BusinessExt>,
    /// Extension codes reachable through the instance's declaration table.
    pub extension_codes: BTreeSet<String>,
}

impl RealizationSpec {
    /// Returns whether this realization declares one extension code.
    pub fn supports_ext_code(&self, ext_code: &str) -> bool {
        self.extension_codes.contains(ext_code)
    }
}

impl Debug for RealizationSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealizationSpec")
            .field("code", &self.code)
            .field("scenario", &self.scenario)
            .field("ext_class", &self.ext_class)
            .field("extension_codes", &self.extension_codes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{BusinessSpec, RealizationSpec};
    use crate::model::extension::{BusinessExt, ExtensionPointSpec};
    use std::collections::BTreeSet;
    use std::sync::Arc;

    struct EmptyExt;

    impl BusinessExt for EmptyExt {
        fn extension_points(&self) -> Vec<ExtensionPointSpec> {
            Vec::new()
        }
    }

    #[test]
    fn new_instance_copies_template_identity() {
        let spec = BusinessSpec {
            code: "b.retail".to_string(),
            name: "Retail".to_string(),
            description: String::new(),
            priority: 100,
            realizations: Vec::new(),
        };
        let template = spec.new_instance();
        assert_eq!(template.code, "b.retail");
        assert_eq!(template.priority, 100);
    }

    #[test]
    fn supports_ext_code_checks_derived_codes() {
        let mut codes = BTreeSet::new();
        codes.insert("trade.checkout".to_string());
        let spec = RealizationSpec {
            code: "b.retail".to_string(),
            scenario: None,
            ext_class: "RetailExt".to_string(),
            business_ext: Arc::new(EmptyExt),
            extension_codes: codes,
        };
        assert!(spec.supports_ext_code("trade.checkout"));
        assert!(!spec.supports_ext_code("trade.refund"));
    }
}
