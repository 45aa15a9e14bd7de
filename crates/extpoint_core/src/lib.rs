//! Extension-point registration and priority resolution core.
//! This crate is the single source of truth for chain-ordering invariants.

pub mod discovery;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod registry;
pub mod resolve;
pub mod runtime;

pub use discovery::{
    AbilityDescriptor, BusinessDescriptor, Candidate, DescriptorSource, ExtFactory, Marker,
    ProductDescriptor, RealizationDescriptor, StaticDescriptorSource,
};
pub use logging::{init_logging, logging_status};
pub use matcher::{CodeMatcher, WildcardMatcher};
pub use model::config::{
    BusinessConfig, ExtPriority, PriorityConfig, ProductConfig, ReadonlyBusinessConfig,
    TemplateKind,
};
pub use model::extension::{
    supported_ext_codes, BusinessExt, ExtensionPointSpec, ProtocolType, ReduceType,
};
pub use model::template::{BusinessTemplate, ScenarioRequest};
pub use registry::spec::{AbilitySpec, BusinessSpec, ProductSpec, RealizationSpec};
pub use registry::template_registry::{RegistryError, RegistryResult, TemplateRegistry};
pub use resolve::PriorityResolver;
pub use runtime::{ExtensionRuntime, NoopCache, RuntimeCache, StartupError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
