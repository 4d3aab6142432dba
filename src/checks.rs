//! Response checks that report every mismatch.
//!
//! A [`CheckReport`] collects [`CheckFailure`]s instead of stopping at the
//! first one, so a single run of a group lists every field the sandbox got
//! wrong. Fields are addressed with JSON pointers (`/data/sims/0/id`) and
//! type checks run against the raw JSON, so a numeric id that arrives as a
//! string is caught even though a typed parse might have coerced it.

use crate::error::{HarnessError, HarnessResult};
use serde_json::Value;
use std::fmt;

/// One mismatched field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    /// Name of the check that found the mismatch, e.g. `order.data`
    pub check: &'static str,
    /// Dotted path of the field, e.g. `data.sims.0.id`
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: expected {}, got {}",
            self.check, self.field, self.expected, self.actual
        )
    }
}

/// JSON value kinds, mirroring what a `typeof` check distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failures collected by one or more checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    group: String,
    failures: Vec<CheckFailure>,
}

impl CheckReport {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            failures: Vec::new(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn failures(&self) -> &[CheckFailure] {
        &self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Append another report's failures, keeping this report's group name.
    pub fn merge(&mut self, other: CheckReport) {
        self.failures.extend(other.failures);
    }

    /// `Ok(())` if nothing failed, else [`HarnessError::ValidationFailed`]
    /// carrying every failure.
    pub fn into_result(self) -> HarnessResult<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(HarnessError::validation_failed(self.group, self.failures))
        }
    }

    /// Panic with every failure listed. For use inside test functions.
    #[track_caller]
    pub fn assert_passed(&self) {
        if !self.failures.is_empty() {
            let lines: Vec<String> = self.failures.iter().map(ToString::to_string).collect();
            panic!(
                "{}: {} check(s) failed:\n  {}",
                self.group,
                self.failures.len(),
                lines.join("\n  ")
            );
        }
    }

    pub fn fail(
        &mut self,
        check: &'static str,
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) {
        self.failures.push(CheckFailure {
            check,
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        });
    }

    // =========================================================================
    // Primitives over raw JSON
    // =========================================================================

    /// HTTP status equals `expected`.
    pub fn expect_status(&mut self, check: &'static str, actual: u16, expected: u16) {
        if actual != expected {
            self.fail(check, "status", expected.to_string(), actual.to_string());
        }
    }

    /// The field exists (any kind, including `null`).
    pub fn expect_present<'v>(
        &mut self,
        check: &'static str,
        root: &'v Value,
        pointer: &str,
    ) -> Option<&'v Value> {
        let found = root.pointer(pointer);
        if found.is_none() {
            self.fail(check, field_name(pointer), "property to exist", "missing");
        }
        found
    }

    /// The field exists and has the given kind.
    pub fn expect_kind<'v>(
        &mut self,
        check: &'static str,
        root: &'v Value,
        pointer: &str,
        kind: JsonKind,
    ) -> Option<&'v Value> {
        let value = self.expect_present(check, root, pointer)?;
        let actual = JsonKind::of(value);
        if actual != kind {
            self.fail(check, field_name(pointer), kind.name(), actual.name());
            return None;
        }
        Some(value)
    }

    /// The field is a string equal to `expected`.
    pub fn expect_str(&mut self, check: &'static str, root: &Value, pointer: &str, expected: &str) {
        if let Some(value) = self.expect_kind(check, root, pointer, JsonKind::String) {
            let actual = value.as_str().unwrap_or_default();
            if actual != expected {
                self.fail(check, field_name(pointer), quoted(expected), quoted(actual));
            }
        }
    }

    /// The field is a number numerically equal to `expected`; `7.0` matches `7`.
    pub fn expect_u64(&mut self, check: &'static str, root: &Value, pointer: &str, expected: u64) {
        if let Some(value) = self.expect_kind(check, root, pointer, JsonKind::Number) {
            let equal = match value.as_u64() {
                Some(n) => n == expected,
                None => value.as_f64() == Some(expected as f64),
            };
            if !equal {
                self.fail(check, field_name(pointer), expected.to_string(), value.to_string());
            }
        }
    }

    /// The field is a string containing `needle`.
    pub fn expect_contains(
        &mut self,
        check: &'static str,
        root: &Value,
        pointer: &str,
        needle: &str,
    ) {
        if let Some(value) = self.expect_kind(check, root, pointer, JsonKind::String) {
            let actual = value.as_str().unwrap_or_default();
            if !actual.contains(needle) {
                self.fail(
                    check,
                    field_name(pointer),
                    format!("to contain {}", quoted(needle)),
                    quoted(actual),
                );
            }
        }
    }

    /// Plain-text equality, for values read off a rendered page.
    pub fn expect_text(&mut self, check: &'static str, field: &str, actual: &str, expected: &str) {
        if actual.trim() != expected {
            self.fail(check, field, quoted(expected), quoted(actual.trim()));
        }
    }
}

/// `/data/sims/0/id` -> `data.sims.0.id`
pub fn field_name(pointer: &str) -> String {
    let trimmed = pointer.trim_start_matches('/');
    if trimmed.is_empty() {
        "<body>".to_string()
    } else {
        trimmed.replace('/', ".")
    }
}

fn quoted(s: &str) -> String {
    format!("{s:?}")
}
