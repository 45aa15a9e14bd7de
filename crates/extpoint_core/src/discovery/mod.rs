//! Pluggable descriptor discovery contracts.
//!
//! # Responsibility
//! - Define the typed descriptors the registry consumes.
//! - Provide the registrar abstraction replacing manifest-file scanning: the
//!   core depends only on the returned descriptor shape, never on how
//!   candidates were found.
//!
//! # Invariants
//! - `discover` returns an empty set, never a failure, when nothing is
//!   declared for a marker.
//! - Sources must de-duplicate candidates across their inputs.

use crate::model::extension::BusinessExt;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Constructor for one live business-extension instance.
///
/// Construction may fail (the Rust rendering of a missing or throwing
/// default constructor); the failure reason is surfaced as a fatal
/// registration error by the registry.
pub type ExtFactory = Arc<dyn Fn() -> Result<Arc<dyn BusinessExt>, String> + Send + Sync>;

/// Marker interfaces a discovery source can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Ability,
    Business,
    Product,
    BusinessExt,
}

/// Descriptor for one registrable ability implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityDescriptor {
    pub code: String,
    pub name: String,
    pub description: String,
}

impl AbilityDescriptor {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: String::new(),
        }
    }
}

/// Descriptor for one business scenario template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessDescriptor {
    pub code: String,
    pub name: String,
    pub description: String,
    /// Lower value = higher precedence in resolved chains.
    pub priority: i32,
}

impl BusinessDescriptor {
    pub fn new(code: impl Into<String>, name: impl Into<String>, priority: i32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: String::new(),
            priority,
        }
    }
}

/// Descriptor for one default-tier product template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDescriptor {
    pub code: String,
    pub name: String,
    pub description: String,
    /// Lower value = higher precedence in resolved chains.
    pub priority: i32,
}

impl ProductDescriptor {
    pub fn new(code: impl Into<String>, name: impl Into<String>, priority: i32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: String::new(),
            priority,
        }
    }
}

/// Descriptor binding one extension implementation to one or more codes.
#[derive(Clone)]
pub struct RealizationDescriptor {
    /// Business/product code patterns this realization applies to.
    pub codes: Vec<String>,
    /// Optional scenario qualifier.
    pub scenario: Option<String>,
    /// Implementation type identity, carried into fatal errors.
    pub ext_class: String,
    /// Live extension-instance constructor.
    pub factory: ExtFactory,
}

impl RealizationDescriptor {
    pub fn new(
        codes: Vec<String>,
        ext_class: impl Into<String>,
        factory: ExtFactory,
    ) -> Self {
        Self {
            codes,
            scenario: None,
            ext_class: ext_class.into(),
            factory,
        }
    }
}

impl Debug for RealizationDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealizationDescriptor")
            .field("codes", &self.codes)
            .field("scenario", &self.scenario)
            .field("ext_class", &self.ext_class)
            .finish_non_exhaustive()
    }
}

/// One discovered implementation candidate.
///
/// The variant is the marker: each registration pass picks out its own kind
/// and silently skips the rest.
#[derive(Debug, Clone)]
pub enum Candidate {
    Ability(AbilityDescriptor),
    Business(BusinessDescriptor),
    Product(ProductDescriptor),
    Realization(RealizationDescriptor),
}

impl Candidate {
    /// Marker interface this candidate carries.
    pub fn marker(&self) -> Marker {
        match self {
            Self::Ability(_) => Marker::Ability,
            Self::Business(_) => Marker::Business,
            Self::Product(_) => Marker::Product,
            Self::Realization(_) => Marker::BusinessExt,
        }
    }
}

/// Discovery collaborator returning implementation candidates per marker.
pub trait DescriptorSource: Send + Sync {
    /// Returns every candidate declared for `marker`; empty when none exist.
    fn discover(&self, marker: Marker) -> Vec<Candidate>;
}

/// In-memory descriptor source for embedding and tests.
#[derive(Debug, Default)]
pub struct StaticDescriptorSource {
    candidates: Vec<Candidate>,
}

impl StaticDescriptorSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one candidate in declaration order.
    pub fn add(&mut self, candidate: Candidate) -> &mut Self {
        self.candidates.push(candidate);
        self
    }

    pub fn add_ability(&mut self, descriptor: AbilityDescriptor) -> &mut Self {
        self.add(Candidate::Ability(descriptor))
    }

    pub fn add_business(&mut self, descriptor: BusinessDescriptor) -> &mut Self {
        self.add(Candidate::Business(descriptor))
    }

    pub fn add_product(&mut self, descriptor: ProductDescriptor) -> &mut Self {
        self.add(Candidate::Product(descriptor))
    }

    pub fn add_realization(&mut self, descriptor: RealizationDescriptor) -> &mut Self {
        self.add(Candidate::Realization(descriptor))
    }
}

impl DescriptorSource for StaticDescriptorSource {
    fn discover(&self, marker: Marker) -> Vec<Candidate> {
        self.candidates
            .iter()
            .filter(|candidate| candidate.marker() == marker)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AbilityDescriptor, BusinessDescriptor, Candidate, DescriptorSource, ExtFactory, Marker,
        ProductDescriptor, RealizationDescriptor, StaticDescriptorSource,
    };
    use crate::model::extension::{BusinessExt, ExtensionPointSpec};
    use std::sync::Arc;

    struct EmptyExt;

    impl BusinessExt for EmptyExt {
        fn extension_points(&self) -> Vec<ExtensionPointSpec> {
            Vec::new()
        }
    }

    fn empty_factory() -> ExtFactory {
        Arc::new(|| Ok(Arc::new(EmptyExt) as Arc<dyn BusinessExt>))
    }

    #[test]
    fn static_source_filters_by_marker() {
        let mut source = StaticDescriptorSource::new();
        source
            .add_ability(AbilityDescriptor::new("ability.order", "Order Ability"))
            .add_business(BusinessDescriptor::new("b.retail", "Retail", 100))
            .add_product(ProductDescriptor::new("p.presale", "Presale", 500))
            .add_realization(RealizationDescriptor::new(
                vec!["b.retail".to_string()],
                "RetailExt",
                empty_factory(),
            ));

        assert_eq!(source.discover(Marker::Ability).len(), 1);
        assert_eq!(source.discover(Marker::Business).len(), 1);
        assert_eq!(source.discover(Marker::Product).len(), 1);
        assert_eq!(source.discover(Marker::BusinessExt).len(), 1);
    }

    #[test]
    fn discover_returns_empty_for_undeclared_marker() {
        let source = StaticDescriptorSource::new();
        assert!(source.discover(Marker::Business).is_empty());
    }

    #[test]
    fn candidate_reports_its_marker() {
        let candidate = Candidate::Product(ProductDescriptor::new("p.presale", "Presale", 500));
        assert_eq!(candidate.marker(), Marker::Product);
    }
}
