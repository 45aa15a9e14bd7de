//! Runtime controller.
//!
//! # Responsibility
//! - Drive startup sequencing: abilities, realizations, businesses,
//!   products, resolution, cache hand-off.
//! - Expose read access to registered specs and finished configuration.
//!
//! # Invariants
//! - `start()` runs once, single-threaded, to completion before any read
//!   traffic; afterwards all state is immutable and freely shared.
//! - The cache collaborator is invoked exactly once, after resolution,
//!   before `initialized` flips.

use crate::discovery::{DescriptorSource, Marker};
use crate::matcher::{CodeMatcher, WildcardMatcher};
use crate::model::config::{BusinessConfig, ReadonlyBusinessConfig};
use crate::model::template::{BusinessTemplate, ScenarioRequest};
use crate::registry::spec::{AbilitySpec, BusinessSpec, ProductSpec, RealizationSpec};
use crate::registry::template_registry::{RegistryError, TemplateRegistry};
use crate::resolve::PriorityResolver;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Cache collaborator receiving finished configs after resolution.
pub trait RuntimeCache {
    /// Materializes an execution-ready cache from the finished configs.
    fn install(&mut self, configs: &[BusinessConfig]);
}

/// Default cache collaborator that materializes nothing.
#[derive(Debug, Default)]
pub struct NoopCache;

impl RuntimeCache for NoopCache {
    fn install(&mut self, _configs: &[BusinessConfig]) {}
}

/// Startup errors raised synchronously by `start()`.
#[derive(Debug)]
pub enum StartupError {
    /// `start()` was already driven to completion on this runtime.
    AlreadyStarted,
    /// Fatal registration failure; no partial registry is usable.
    Registry(RegistryError),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyStarted => write!(f, "runtime already started"),
            Self::Registry(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StartupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AlreadyStarted => None,
            Self::Registry(err) => Some(err),
        }
    }
}

impl From<RegistryError> for StartupError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

/// Process-wide extension runtime context.
///
/// Constructed once at process start and passed to whichever component needs
/// registry or resolution access; there is no global instance.
pub struct ExtensionRuntime {
    uuid: Uuid,
    simple_mode: bool,
    initialized: bool,
    registry: TemplateRegistry,
    source: Box<dyn DescriptorSource>,
    matcher: Box<dyn CodeMatcher>,
    cache: Box<dyn RuntimeCache>,
    business_configs: Vec<BusinessConfig>,
}

impl ExtensionRuntime {
    /// Creates a runtime over one descriptor source with default
    /// collaborators: wildcard matching, no-op cache, simple mode on.
    pub fn new(source: Box<dyn DescriptorSource>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            simple_mode: true,
            initialized: false,
            registry: TemplateRegistry::new(),
            source,
            matcher: Box::new(WildcardMatcher::new()),
            cache: Box::new(NoopCache),
            business_configs: Vec::new(),
        }
    }

    /// Replaces the code matcher collaborator.
    pub fn with_matcher(mut self, matcher: Box<dyn CodeMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Replaces the runtime cache collaborator.
    pub fn with_cache(mut self, cache: Box<dyn RuntimeCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Toggles automatic configuration synthesis.
    ///
    /// When off, this core produces no configuration and an external source
    /// owns it entirely.
    pub fn set_simple_mode(&mut self, simple_mode: bool) {
        self.simple_mode = simple_mode;
    }

    pub fn simple_mode(&self) -> bool {
        self.simple_mode
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// Diagnostic identity of this runtime instance.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Runs the startup sequence to completion.
    ///
    /// Registration order is load-bearing: realizations must exist before
    /// business/product matching can attach them.
    ///
    /// # Errors
    /// - `StartupError::AlreadyStarted` on re-entry.
    /// - `StartupError::Registry` when a realization cannot be constructed;
    ///   the runtime must be discarded afterwards.
    pub fn start(&mut self) -> Result<(), StartupError> {
        if self.initialized {
            return Err(StartupError::AlreadyStarted);
        }

        let abilities = self.source.discover(Marker::Ability);
        let realizations = self.source.discover(Marker::BusinessExt);
        let businesses = self.source.discover(Marker::Business);
        let products = self.source.discover(Marker::Product);

        self.registry.register_abilities(&abilities);
        if let Err(err) = self.registry.register_realizations(&realizations) {
            error!(
                "event=runtime_start module=runtime status=error uuid={} reason={err}",
                self.uuid
            );
            return Err(err.into());
        }
        self.registry
            .register_businesses(&businesses, self.matcher.as_ref());
        self.registry
            .register_products(&products, self.matcher.as_ref());

        if self.simple_mode {
            self.business_configs =
                PriorityResolver::new(&self.registry).build_business_configs();
        }

        self.cache.install(&self.business_configs);
        self.initialized = true;

        info!(
            "event=runtime_start module=runtime status=ok uuid={} simple_mode={} abilities={} realizations={} businesses={} products={} configs={}",
            self.uuid,
            self.simple_mode,
            self.registry.abilities().len(),
            self.registry.realizations().len(),
            self.registry.businesses().len(),
            self.registry.products().len(),
            self.business_configs.len()
        );
        Ok(())
    }

    /// Returns the finished config for one business code, read-only.
    pub fn business_config_by_code(&self, biz_code: &str) -> Option<ReadonlyBusinessConfig<'_>> {
        self.business_configs
            .iter()
            .find(|config| config.biz_code() == biz_code)
            .map(ReadonlyBusinessConfig::new)
    }

    pub fn all_registered_abilities(&self) -> &[AbilitySpec] {
        self.registry.abilities()
    }

    pub fn all_registered_businesses(&self) -> &[BusinessSpec] {
        self.registry.businesses()
    }

    pub fn all_registered_products(&self) -> &[ProductSpec] {
        self.registry.products()
    }

    pub fn all_registered_realizations(&self) -> &[RealizationSpec] {
        self.registry.realizations()
    }

    /// Returns the first realization whose pattern covers `code`.
    pub fn realization_spec_by_code(&self, code: &str) -> Option<&RealizationSpec> {
        self.registry
            .realizations()
            .iter()
            .find(|spec| self.matcher.matches(&spec.code, code))
    }

    /// Exact-code lookup over registered businesses.
    pub fn registered_business_by_code(&self, code: &str) -> Option<&BusinessSpec> {
        self.registry
            .businesses()
            .iter()
            .find(|spec| spec.code == code)
    }

    /// Exact-code lookup over registered products.
    pub fn registered_product_by_code(&self, code: &str) -> Option<&ProductSpec> {
        self.registry
            .products()
            .iter()
            .find(|spec| spec.code == code)
    }

    /// Returns the first registered business applying to the request.
    pub fn first_matched_business(&self, request: &ScenarioRequest) -> Option<BusinessTemplate> {
        self.registry.first_matched_business(request)
    }
}

#[cfg(test)]
mod tests {
    use super::{ExtensionRuntime, NoopCache, RuntimeCache, StartupError};
    use crate::discovery::{
        BusinessDescriptor, Candidate, ExtFactory, ProductDescriptor, RealizationDescriptor,
        StaticDescriptorSource,
    };
    use crate::model::config::BusinessConfig;
    use crate::model::extension::{BusinessExt, ExtensionPointSpec};
    use std::sync::Arc;

    struct FixedExt {
        codes: Vec<&'static str>,
    }

    impl BusinessExt for FixedExt {
        fn extension_points(&self) -> Vec<ExtensionPointSpec> {
            self.codes
                .iter()
                .map(|code| ExtensionPointSpec::new(*code, *code))
                .collect()
        }
    }

    fn fixed_factory(codes: Vec<&'static str>) -> ExtFactory {
        Arc::new(move || {
            Ok(Arc::new(FixedExt {
                codes: codes.clone(),
            }) as Arc<dyn BusinessExt>)
        })
    }

    fn demo_source() -> StaticDescriptorSource {
        let mut source = StaticDescriptorSource::new();
        source
            .add_business(BusinessDescriptor::new("b.demo", "Demo", 10))
            .add_product(ProductDescriptor::new("p.demo", "Demo P", 20))
            .add_realization(RealizationDescriptor::new(
                vec!["b.demo".to_string()],
                "DemoBizExt",
                fixed_factory(vec!["demo.hook"]),
            ))
            .add_realization(RealizationDescriptor::new(
                vec!["p.demo".to_string()],
                "DemoProdExt",
                fixed_factory(vec!["demo.hook"]),
            ));
        source
    }

    struct CountingCache {
        calls: Arc<std::sync::Mutex<usize>>,
    }

    impl RuntimeCache for CountingCache {
        fn install(&mut self, _configs: &[BusinessConfig]) {
            let mut calls = self.calls.lock().expect("cache call counter");
            *calls += 1;
        }
    }

    #[test]
    fn start_marks_runtime_initialized() {
        let mut runtime = ExtensionRuntime::new(Box::new(demo_source()));
        assert!(!runtime.initialized());
        runtime.start().expect("startup");
        assert!(runtime.initialized());
    }

    #[test]
    fn start_rejects_re_entry() {
        let mut runtime = ExtensionRuntime::new(Box::new(demo_source()));
        runtime.start().expect("startup");
        let err = runtime.start().expect_err("second start must fail");
        assert!(matches!(err, StartupError::AlreadyStarted));
    }

    #[test]
    fn cache_collaborator_is_invoked_exactly_once() {
        let calls = Arc::new(std::sync::Mutex::new(0usize));
        let cache = CountingCache {
            calls: calls.clone(),
        };
        let mut runtime = ExtensionRuntime::new(Box::new(demo_source())).with_cache(Box::new(cache));
        runtime.start().expect("startup");
        assert_eq!(*calls.lock().expect("cache call counter"), 1);
    }

    #[test]
    fn simple_mode_off_produces_no_configuration() {
        let mut runtime =
            ExtensionRuntime::new(Box::new(demo_source())).with_cache(Box::new(NoopCache));
        runtime.set_simple_mode(false);
        runtime.start().expect("startup");
        assert!(runtime.business_config_by_code("b.demo").is_none());
        // Registration still ran; only config synthesis is external now.
        assert_eq!(runtime.all_registered_businesses().len(), 1);
    }

    #[test]
    fn lookups_return_absence_for_unknown_codes() {
        let mut runtime = ExtensionRuntime::new(Box::new(demo_source()));
        runtime.start().expect("startup");
        assert!(runtime.business_config_by_code("b.missing").is_none());
        assert!(runtime.registered_business_by_code("b.missing").is_none());
        assert!(runtime.registered_product_by_code("p.missing").is_none());
        assert!(runtime.realization_spec_by_code("x.missing").is_none());
    }
}
