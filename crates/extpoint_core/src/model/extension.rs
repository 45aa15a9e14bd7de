//! Extension-point declaration model.
//!
//! # Responsibility
//! - Define the named hooks a business-extension type exposes.
//! - Provide the declaration-table contract replacing runtime type
//!   introspection: every extension type states its hooks explicitly.
//!
//! # Invariants
//! - Declared extension codes are stable identifiers; resolution keys on them.
//! - `supported_ext_codes` visits nested extension members exactly once per
//!   distinct code.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Invocation protocol for one extension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolType {
    /// In-process invocation.
    Local,
    /// Remote invocation through an external transport.
    Remote,
}

impl Default for ProtocolType {
    fn default() -> Self {
        Self::Local
    }
}

/// Strategy for combining multiple chain results for one extension point.
///
/// Carried as data for the external execution collaborator; this core never
/// interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReduceType {
    /// No combination declared.
    None,
    /// First provider result wins.
    First,
    /// All provider results are collected.
    All,
}

impl Default for ReduceType {
    fn default() -> Self {
        Self::None
    }
}

/// One named hook exposed by a business-extension type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionPointSpec {
    /// Stable extension code, e.g. `order.discount.calc`.
    pub code: String,
    /// Human-readable hook name.
    pub name: String,
    pub protocol_type: ProtocolType,
    pub reduce_type: ReduceType,
    pub description: String,
}

impl ExtensionPointSpec {
    /// Creates a local, non-reducing extension point declaration.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            protocol_type: ProtocolType::default(),
            reduce_type: ReduceType::default(),
            description: String::new(),
        }
    }
}

/// Declaration contract for one business-extension type.
///
/// Each implementation returns its extension-point table directly instead of
/// being introspected at runtime. Nested extension-returning members are
/// reachable through `nested()` and contribute their codes as well.
pub trait BusinessExt: Send + Sync {
    /// Extension points this type declares directly.
    fn extension_points(&self) -> Vec<ExtensionPointSpec>;

    /// Nested business-extension members, if any.
    fn nested(&self) -> Vec<Arc<dyn BusinessExt>> {
        Vec::new()
    }
}

/// Collects every extension code reachable from one extension instance.
///
/// Walks the declaration table recursively through nested members and
/// de-duplicates codes into a sorted set.
pub fn supported_ext_codes(ext: &dyn BusinessExt) -> BTreeSet<String> {
    let mut codes = BTreeSet::new();
    collect_ext_codes(ext, &mut codes);
    codes
}

fn collect_ext_codes(ext: &dyn BusinessExt, codes: &mut BTreeSet<String>) {
    for point in ext.extension_points() {
        codes.insert(point.code);
    }
    for nested in ext.nested() {
        collect_ext_codes(nested.as_ref(), codes);
    }
}

#[cfg(test)]
mod tests {
    use super::{supported_ext_codes, BusinessExt, ExtensionPointSpec, ProtocolType, ReduceType};
    use std::sync::Arc;

    struct LeafExt {
        codes: Vec<&'static str>,
    }

    impl BusinessExt for LeafExt {
        fn extension_points(&self) -> Vec<ExtensionPointSpec> {
            self.codes
                .iter()
                .map(|code| ExtensionPointSpec::new(*code, *code))
                .collect()
        }
    }

    struct RootExt {
        child: Arc<dyn BusinessExt>,
    }

    impl BusinessExt for RootExt {
        fn extension_points(&self) -> Vec<ExtensionPointSpec> {
            vec![ExtensionPointSpec::new("root.hook", "root hook")]
        }

        fn nested(&self) -> Vec<Arc<dyn BusinessExt>> {
            vec![self.child.clone()]
        }
    }

    #[test]
    fn defaults_are_local_and_non_reducing() {
        let spec = ExtensionPointSpec::new("a.b", "ab");
        assert_eq!(spec.protocol_type, ProtocolType::Local);
        assert_eq!(spec.reduce_type, ReduceType::None);
    }

    #[test]
    fn collects_direct_extension_codes() {
        let ext = LeafExt {
            codes: vec!["x.one", "x.two"],
        };
        let codes = supported_ext_codes(&ext);
        assert_eq!(codes.len(), 2);
        assert!(codes.contains("x.one"));
        assert!(codes.contains("x.two"));
    }

    #[test]
    fn collects_codes_through_nested_members() {
        let root = RootExt {
            child: Arc::new(LeafExt {
                codes: vec!["child.hook", "root.hook"],
            }),
        };
        let codes = supported_ext_codes(&root);
        assert_eq!(codes.len(), 2);
        assert!(codes.contains("root.hook"));
        assert!(codes.contains("child.hook"));
    }
}
