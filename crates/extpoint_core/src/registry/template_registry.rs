//! Template registration over discovery candidates.
//!
//! # Responsibility
//! - Build spec records from typed candidates and append them in
//!   registration order.
//! - Attach realizations to businesses/products by code-pattern match at
//!   template registration time.
//!
//! # Invariants
//! - Registration is additive and not idempotent; callers invoke each pass
//!   exactly once per process lifetime.
//! - Realizations must be registered before businesses and products; later
//!   realizations never retroactively attach.
//! - Businesses and products are stably sorted ascending by priority after
//!   their registration pass.

use crate::discovery::Candidate;
use crate::matcher::CodeMatcher;
use crate::model::extension::supported_ext_codes;
use crate::model::template::{BusinessTemplate, ScenarioRequest};
use crate::registry::spec::{AbilitySpec, BusinessSpec, ProductSpec, RealizationSpec};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Fatal registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A realization's extension instance could not be constructed. The
    /// registry is unusable afterwards; startup must abort.
    RealizationInit { ext_class: String, reason: String },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RealizationInit { ext_class, reason } => {
                write!(
                    f,
                    "failed to construct extension instance for `{ext_class}`: {reason}"
                )
            }
        }
    }
}

impl Error for RegistryError {}

/// Canonical collections of registered templates and realizations.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    abilities: Vec<AbilitySpec>,
    businesses: Vec<BusinessSpec>,
    products: Vec<ProductSpec>,
    realizations: Vec<RealizationSpec>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers ability candidates; non-ability candidates are skipped
    /// silently.
    pub fn register_abilities(&mut self, candidates: &[Candidate]) {
        for candidate in candidates {
            let Candidate::Ability(descriptor) = candidate else {
                continue;
            };
            self.abilities.push(AbilitySpec {
                code: descriptor.code.clone(),
                name: descriptor.name.clone(),
                description: descriptor.description.clone(),
            });
        }
    }

    /// Registers realization candidates; non-realization candidates are
    /// skipped silently.
    ///
    /// Each declared code gets its own spec with a freshly constructed
    /// extension instance. Construction failure is fatal: downstream
    /// resolution assumes every registered realization is invocable.
    ///
    /// # Errors
    /// - `RegistryError::RealizationInit` when the descriptor's factory
    ///   fails, carrying the offending implementation identity.
    pub fn register_realizations(&mut self, candidates: &[Candidate]) -> RegistryResult<()> {
        for candidate in candidates {
            let Candidate::Realization(descriptor) = candidate else {
                continue;
            };
            for code in &descriptor.codes {
                let business_ext =
                    (descriptor.factory)().map_err(|reason| RegistryError::RealizationInit {
                        ext_class: descriptor.ext_class.clone(),
                        reason,
                    })?;
                let extension_codes = supported_ext_codes(business_ext.as_ref());
                self.realizations.push(RealizationSpec {
                    code: code.clone(),
                    scenario: descriptor.scenario.clone(),
                    ext_class: descriptor.ext_class.clone(),
                    business_ext,
                    extension_codes,
                });
            }
        }
        Ok(())
    }

    /// Registers business candidates and attaches matching realizations.
    pub fn register_businesses(&mut self, candidates: &[Candidate], matcher: &dyn CodeMatcher) {
        for candidate in candidates {
            let Candidate::Business(descriptor) = candidate else {
                continue;
            };
            let realizations = self.matched_realizations(&descriptor.code, matcher);
            self.businesses.push(BusinessSpec {
                code: descriptor.code.clone(),
                name: descriptor.name.clone(),
                description: descriptor.description.clone(),
                priority: descriptor.priority,
                realizations,
            });
        }
        self.businesses.sort_by_key(|spec| spec.priority);
    }

    /// Registers product candidates and attaches matching realizations.
    pub fn register_products(&mut self, candidates: &[Candidate], matcher: &dyn CodeMatcher) {
        for candidate in candidates {
            let Candidate::Product(descriptor) = candidate else {
                continue;
            };
            let realizations = self.matched_realizations(&descriptor.code, matcher);
            self.products.push(ProductSpec {
                code: descriptor.code.clone(),
                name: descriptor.name.clone(),
                description: descriptor.description.clone(),
                priority: descriptor.priority,
                realizations,
            });
        }
        self.products.sort_by_key(|spec| spec.priority);
    }

    fn matched_realizations(
        &self,
        template_code: &str,
        matcher: &dyn CodeMatcher,
    ) -> Vec<RealizationSpec> {
        self.realizations
            .iter()
            .filter(|spec| matcher.matches(&spec.code, template_code))
            .cloned()
            .collect()
    }

    pub fn abilities(&self) -> &[AbilitySpec] {
        &self.abilities
    }

    pub fn businesses(&self) -> &[BusinessSpec] {
        &self.businesses
    }

    pub fn products(&self) -> &[ProductSpec] {
        &self.products
    }

    pub fn realizations(&self) -> &[RealizationSpec] {
        &self.realizations
    }

    /// Returns the first registered business applying to the request, as a
    /// per-request value object.
    pub fn first_matched_business(&self, request: &ScenarioRequest) -> Option<BusinessTemplate> {
        self.businesses
            .iter()
            .map(BusinessSpec::new_instance)
            .find(|template| template.is_effect(request))
    }
}
