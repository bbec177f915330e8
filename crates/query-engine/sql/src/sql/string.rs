//! A low-level SQL string under construction.

use super::ast::Value;

/// Clause text paired with the values bound to its positional parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SQL {
    pub sql: String,
    pub params: Vec<Value>,
    /// for internal use and tests only
    pub param_index: u32,
}

impl SQL {
    pub fn new() -> SQL {
        SQL::default()
    }

    /// Append keywords, spacing and other fixed syntax.
    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append an identifier. Callers must only pass registry-approved
    /// column names here.
    pub fn append_identifier(&mut self, ident: &str) {
        self.sql.push_str(ident);
    }

    /// Append the next positional placeholder and record its bound value.
    pub fn append_param(&mut self, value: Value) {
        self.param_index += 1;
        self.sql.push_str(&format!("${}", self.param_index));
        self.params.push(value);
    }
}
