//! Resolved priority-configuration artifacts.
//!
//! # Responsibility
//! - Define the per-business output of priority resolution.
//! - Expose finished configuration read-only to external collaborators.
//!
//! # Invariants
//! - Within one `PriorityConfig`, `priorities` is non-decreasing by priority
//!   and equal priorities keep insertion order.
//! - Within one `BusinessConfig`, each `ext_code` appears in at most one
//!   `PriorityConfig`.

use serde::{Deserialize, Serialize};

/// Owner tier of one resolution-chain entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Business,
    Product,
}

/// One entry in a resolution chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtPriority {
    /// Owning template tier.
    pub kind: TemplateKind,
    /// Owning business or product code.
    pub code: String,
    /// Lower value resolves earlier.
    pub priority: i32,
}

impl ExtPriority {
    /// Creates a business-tier chain entry.
    pub fn business(code: impl Into<String>, priority: i32) -> Self {
        Self {
            kind: TemplateKind::Business,
            code: code.into(),
            priority,
        }
    }

    /// Creates a product-tier chain entry.
    pub fn product(code: impl Into<String>, priority: i32) -> Self {
        Self {
            kind: TemplateKind::Product,
            code: code.into(),
            priority,
        }
    }
}

/// Resolved provider chain for one extension code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityConfig {
    ext_code: String,
    priorities: Vec<ExtPriority>,
}

impl PriorityConfig {
    /// Creates an empty chain for one extension code.
    pub fn new(ext_code: impl Into<String>) -> Self {
        Self {
            ext_code: ext_code.into(),
            priorities: Vec::new(),
        }
    }

    pub fn ext_code(&self) -> &str {
        &self.ext_code
    }

    /// Chain entries, earlier index = resolved first.
    pub fn priorities(&self) -> &[ExtPriority] {
        &self.priorities
    }

    pub(crate) fn push(&mut self, entry: ExtPriority) {
        self.priorities.push(entry);
    }

    /// Orders entries ascending by priority, keeping insertion order for ties.
    pub(crate) fn sort_ascending(&mut self) {
        // Vec::sort_by_key is stable, which is the only tie-break contract.
        self.priorities.sort_by_key(|entry| entry.priority);
    }
}

/// Installed-product record inside one business configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfig {
    /// Product code.
    pub code: String,
}

impl ProductConfig {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Finished resolution artifact for one business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessConfig {
    biz_code: String,
    installed_products: Vec<ProductConfig>,
    priority_configs: Vec<PriorityConfig>,
}

impl BusinessConfig {
    /// Creates a configuration shell for one business code.
    pub fn new(biz_code: impl Into<String>, installed_products: Vec<ProductConfig>) -> Self {
        Self {
            biz_code: biz_code.into(),
            installed_products,
            priority_configs: Vec::new(),
        }
    }

    pub fn biz_code(&self) -> &str {
        &self.biz_code
    }

    pub fn installed_products(&self) -> &[ProductConfig] {
        &self.installed_products
    }

    pub fn priority_configs(&self) -> &[PriorityConfig] {
        &self.priority_configs
    }

    /// Returns whether a chain already exists for one extension code.
    pub fn contains_ext_code(&self, ext_code: &str) -> bool {
        self.priority_configs
            .iter()
            .any(|config| config.ext_code() == ext_code)
    }

    pub(crate) fn push_priority_config(&mut self, config: PriorityConfig) {
        self.priority_configs.push(config);
    }
}

/// Read-only projection over one finished business configuration.
///
/// Lookups hand this out instead of the backing value so callers can never
/// mutate resolved collections.
#[derive(Debug, Clone, Copy)]
pub struct ReadonlyBusinessConfig<'a> {
    inner: &'a BusinessConfig,
}

impl<'a> ReadonlyBusinessConfig<'a> {
    pub(crate) fn new(inner: &'a BusinessConfig) -> Self {
        Self { inner }
    }

    pub fn biz_code(&self) -> &'a str {
        self.inner.biz_code()
    }

    pub fn installed_products(&self) -> &'a [ProductConfig] {
        self.inner.installed_products()
    }

    pub fn priority_configs(&self) -> &'a [PriorityConfig] {
        self.inner.priority_configs()
    }

    /// Returns the chain for one extension code, if resolved.
    pub fn priority_config_by_ext_code(&self, ext_code: &str) -> Option<&'a PriorityConfig> {
        self.inner
            .priority_configs()
            .iter()
            .find(|config| config.ext_code() == ext_code)
    }
}
