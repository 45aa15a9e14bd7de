//! Priority resolution engine.
//!
//! # Responsibility
//! - Compute, per business and extension code, the ordered chain of
//!   competing business/product providers.
//! - Back-fill product-only chains for extension codes a business does not
//!   override itself.
//!
//! # Invariants
//! - Exactly one `BusinessConfig` per registered business code.
//! - Within one business, each extension code gets at most one chain.
//! - Chains are ascending by priority; equal priorities keep registration
//!   order (stable sort).
//! - Pure computation over registered specs: no I/O, no recoverable errors.

use crate::model::config::{BusinessConfig, ExtPriority, PriorityConfig, ProductConfig};
use crate::registry::spec::{BusinessSpec, ProductSpec};
use crate::registry::template_registry::TemplateRegistry;
use std::collections::{BTreeMap, BTreeSet};

/// One-shot resolver over a fully populated registry.
#[derive(Debug)]
pub struct PriorityResolver<'a> {
    registry: &'a TemplateRegistry,
}

impl<'a> PriorityResolver<'a> {
    pub fn new(registry: &'a TemplateRegistry) -> Self {
        Self { registry }
    }

    /// Builds the finished configuration for every registered business.
    ///
    /// Every registered product is installed on every business config; the
    /// chain set covers each extension code reachable directly or through
    /// any product's realizations.
    pub fn build_business_configs(&self) -> Vec<BusinessConfig> {
        let installed_products: Vec<ProductConfig> = self
            .registry
            .products()
            .iter()
            .map(|spec| ProductConfig::new(spec.code.clone()))
            .collect();

        self.registry
            .businesses()
            .iter()
            .map(|business| {
                let mut config =
                    BusinessConfig::new(business.code.clone(), installed_products.clone());
                self.chain_direct(business, &mut config);
                self.chain_back_fill(&mut config);
                config
            })
            .collect()
    }

    /// Phase 1: chains for extension codes the business overrides itself.
    ///
    /// A code with no product competitor gets no chain; the business's own
    /// realization is sufficient and implicit.
    fn chain_direct(&self, business: &BusinessSpec, config: &mut BusinessConfig) {
        let mut chained = BTreeSet::new();
        for realization in &business.realizations {
            for ext_code in &realization.extension_codes {
                if chained.contains(ext_code.as_str()) {
                    continue;
                }
                let products = self.products_declaring(ext_code);
                if products.is_empty() {
                    continue;
                }
                let mut chain = PriorityConfig::new(ext_code.clone());
                chain.push(ExtPriority::business(
                    business.code.clone(),
                    business.priority,
                ));
                for product in products {
                    chain.push(ExtPriority::product(product.code.clone(), product.priority));
                }
                chain.sort_ascending();
                config.push_priority_config(chain);
                chained.insert(ext_code.clone());
            }
        }
    }

    /// Phase 2: product-only chains for extension codes the business never
    /// overrides, so product defaults are inherited without enumeration.
    fn chain_back_fill(&self, config: &mut BusinessConfig) {
        let mut pending: BTreeMap<String, PriorityConfig> = BTreeMap::new();
        for product in self.registry.products() {
            for realization in &product.realizations {
                for ext_code in &realization.extension_codes {
                    if config.contains_ext_code(ext_code) {
                        continue;
                    }
                    let chain = pending
                        .entry(ext_code.clone())
                        .or_insert_with(|| PriorityConfig::new(ext_code.clone()));
                    if chain
                        .priorities()
                        .iter()
                        .any(|entry| entry.code == product.code)
                    {
                        continue;
                    }
                    chain.push(ExtPriority::product(product.code.clone(), product.priority));
                }
            }
        }
        for (_, mut chain) in pending {
            chain.sort_ascending();
            config.push_priority_config(chain);
        }
    }

    fn products_declaring(&self, ext_code: &str) -> Vec<&ProductSpec> {
        self.registry
            .products()
            .iter()
            .filter(|product| {
                product
                    .realizations
                    .iter()
                    .any(|realization| realization.supports_ext_code(ext_code))
            })
            .collect()
    }
}
