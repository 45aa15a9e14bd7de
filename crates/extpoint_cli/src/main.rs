//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `extpoint_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use extpoint_core::{
    BusinessDescriptor, BusinessExt, ExtFactory, ExtensionPointSpec, ExtensionRuntime,
    ProductDescriptor, RealizationDescriptor, StaticDescriptorSource,
};
use std::process::ExitCode;
use std::sync::Arc;

struct CheckoutExt;

impl BusinessExt for CheckoutExt {
    fn extension_points(&self) -> Vec<ExtensionPointSpec> {
        vec![ExtensionPointSpec::new("order.checkout", "checkout hook")]
    }
}

fn checkout_factory() -> ExtFactory {
    Arc::new(|| Ok(Arc::new(CheckoutExt) as Arc<dyn BusinessExt>))
}

fn main() -> ExitCode {
    let mut source = StaticDescriptorSource::new();
    source
        .add_business(BusinessDescriptor::new("b.demo", "Demo Business", 10))
        .add_product(ProductDescriptor::new("p.demo", "Demo Product", 20))
        .add_realization(RealizationDescriptor::new(
            vec!["b.demo".to_string()],
            "CheckoutExt",
            checkout_factory(),
        ))
        .add_realization(RealizationDescriptor::new(
            vec!["p.demo".to_string()],
            "CheckoutExt",
            checkout_factory(),
        ));

    let mut runtime = ExtensionRuntime::new(Box::new(source));
    if let Err(err) = runtime.start() {
        eprintln!("extpoint_core startup failed: {err}");
        return ExitCode::FAILURE;
    }

    println!("extpoint_core version={}", extpoint_core::core_version());
    match runtime.business_config_by_code("b.demo") {
        Some(config) => {
            for chain in config.priority_configs() {
                let entries: Vec<String> = chain
                    .priorities()
                    .iter()
                    .map(|entry| format!("{:?}:{}@{}", entry.kind, entry.code, entry.priority))
                    .collect();
                println!("ext_code={} chain=[{}]", chain.ext_code(), entries.join(", "));
            }
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("no config resolved for b.demo");
            ExitCode::FAILURE
        }
    }
}
