//! Scenario-matching value objects.
//!
//! # Responsibility
//! - Carry request-shaped input for business template matching.
//! - Provide the per-request value object produced from a registered
//!   business spec.

use serde::{Deserialize, Serialize};

/// One business-scenario matching request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    /// Business code the caller is executing under.
    pub biz_code: String,
    /// Optional scenario qualifier within the business.
    pub scenario: Option<String>,
}

impl ScenarioRequest {
    pub fn new(biz_code: impl Into<String>) -> Self {
        Self {
            biz_code: biz_code.into(),
            scenario: None,
        }
    }
}

/// Live business value object produced per matching request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessTemplate {
    pub code: String,
    pub name: String,
    pub priority: i32,
}

impl BusinessTemplate {
    /// Returns whether this template applies to the request.
    ///
    /// The default contract is exact business-code equality; scenario
    /// qualifiers are reserved for caller-side refinement.
    pub fn is_effect(&self, request: &ScenarioRequest) -> bool {
        self.code == request.biz_code
    }
}
