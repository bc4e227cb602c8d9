use crate::catalog::Catalog;
use crate::compile::{CompileOutcome, Compiler};
use crate::diff::{self, DuplicateGroup, KeyDiff, ParameterMismatch};
use crate::naming::{self, NamingViolation};
use serde::Serialize;

// ---------------------------------------------------------------------------
// CheckReport
// ---------------------------------------------------------------------------

// Severity split: duplicate-value groups are consolidation opportunities and
// never block (warnings); every other finding is error-class and drives a
// non-zero exit.

/// Read-only reconciliation view over a base/target catalog pair. Computed
/// in memory per invocation, never persisted.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub base_count: usize,
    pub target_count: usize,
    pub keys: KeyDiff,
    pub base_duplicates: Vec<DuplicateGroup>,
    pub target_duplicates: Vec<DuplicateGroup>,
    pub parameter_mismatches: Vec<ParameterMismatch>,
}

impl CheckReport {
    pub fn build(base: &Catalog, target: &Catalog) -> Self {
        Self {
            base_count: base.message_count(),
            target_count: target.message_count(),
            keys: diff::missing_keys(base, target),
            base_duplicates: diff::duplicate_value_groups(base),
            target_duplicates: diff::duplicate_value_groups(target),
            parameter_mismatches: diff::parameter_mismatches(base, target),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.keys.is_empty() || !self.parameter_mismatches.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.base_duplicates.is_empty() || !self.target_duplicates.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ValidationReport
// ---------------------------------------------------------------------------

/// Consolidated summary for the full validation run: naming, duplicates,
/// parameter consistency, and the optional external compile check.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub base_naming: Vec<NamingViolation>,
    pub target_naming: Vec<NamingViolation>,
    pub base_duplicates: Vec<DuplicateGroup>,
    pub target_duplicates: Vec<DuplicateGroup>,
    pub parameter_mismatches: Vec<ParameterMismatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile: Option<CompileOutcome>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.base_naming.is_empty()
            || !self.target_naming.is_empty()
            || !self.parameter_mismatches.is_empty()
            || self.compile.as_ref().is_some_and(|c| !c.passed)
    }

    pub fn has_warnings(&self) -> bool {
        !self.base_duplicates.is_empty() || !self.target_duplicates.is_empty()
    }
}

/// Run every validation, then the compile check if a compiler was supplied.
/// A compile failure is recorded in the report; it never aborts the rest.
pub fn run_validation(
    base: &Catalog,
    target: &Catalog,
    compiler: Option<&dyn Compiler>,
) -> ValidationReport {
    ValidationReport {
        base_naming: naming::violations(base),
        target_naming: naming::violations(target),
        base_duplicates: diff::duplicate_value_groups(base),
        target_duplicates: diff::duplicate_value_groups(target),
        parameter_mismatches: diff::parameter_mismatches(base, target),
        compile: compiler.map(|c| c.compile()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
