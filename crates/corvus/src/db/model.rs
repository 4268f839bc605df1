//! Model — column/value pairs used by the existence and upsert helpers.
//!
//! Values are `serde_json::Value` so ad-hoc scripts can pass strings,
//! numbers, bools, or null without a generic parameter per call.

use serde_json::Value;

/// A column/value pair for existence queries.
#[derive(Debug, Clone)]
pub struct Criterion {
    pub column: String,
    pub value: Value,
}

impl Criterion {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// A non-composite primary key for the upsert helpers.
#[derive(Debug, Clone)]
pub struct PrimaryKey {
    pub column: String,
    pub value: Value,
}

impl PrimaryKey {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}
