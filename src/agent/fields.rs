//! Typed field access over a parsed `agent.toml` table.
//!
//! Every error names the file and the dotted field path, e.g.
//! `agents/workflow/agent.toml: agent.temperature`.

use std::path::Path;
use toml::{Table, Value};

use crate::error::{Result, SubagentError};

pub(crate) struct FieldReader<'a> {
    table: &'a Table,
    prefix: &'a str,
    file: &'a Path,
}

impl<'a> FieldReader<'a> {
    /// `prefix` is prepended to keys in error locations (`""` or `"agent."`).
    pub(crate) fn new(table: &'a Table, prefix: &'a str, file: &'a Path) -> Self {
        Self {
            table,
            prefix,
            file,
        }
    }

    pub(crate) fn location(&self, key: &str) -> String {
        format!("{}: {}{}", self.file.display(), self.prefix, key)
    }

    fn invalid(&self, key: &str, message: impl Into<String>) -> SubagentError {
        SubagentError::invalid(self.location(key), message)
    }

    /// Reject keys outside `allowed`.
    pub(crate) fn deny_unknown(&self, allowed: &[&str]) -> Result<()> {
        match self.table.keys().find(|k| !allowed.contains(&k.as_str())) {
            Some(unknown) => Err(self.invalid(
                unknown,
                format!("unknown field; expected one of: {}", allowed.join(", ")),
            )),
            None => Ok(()),
        }
    }

    pub(crate) fn required_str(&self, key: &str) -> Result<String> {
        self.optional_str(key)?
            .ok_or_else(|| self.invalid(key, "missing required field"))
    }

    pub(crate) fn optional_str(&self, key: &str) -> Result<Option<String>> {
        match self.table.get(key) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => {
                Err(self.invalid(key, "must not be empty"))
            }
            Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
            Some(other) => Err(self.invalid(
                key,
                format!("expected a string, found {}", other.type_str()),
            )),
        }
    }

    /// Floats and integers are both accepted.
    pub(crate) fn optional_f64(&self, key: &str) -> Result<Option<f64>> {
        let value = match self.table.get(key) {
            None => return Ok(None),
            Some(Value::Float(f)) => *f,
            Some(Value::Integer(i)) => *i as f64,
            Some(other) => {
                return Err(self.invalid(
                    key,
                    format!("expected a number, found {}", other.type_str()),
                ));
            }
        };
        if !value.is_finite() || value < 0.0 {
            return Err(self.invalid(key, format!("must be a non-negative number, got {value}")));
        }
        Ok(Some(value))
    }

    pub(crate) fn optional_u32(&self, key: &str) -> Result<Option<u32>> {
        match self.table.get(key) {
            None => Ok(None),
            Some(Value::Integer(i)) => u32::try_from(*i).map(Some).map_err(|_| {
                self.invalid(key, format!("must be between 0 and {}, got {}", u32::MAX, i))
            }),
            Some(other) => Err(self.invalid(
                key,
                format!("expected an integer, found {}", other.type_str()),
            )),
        }
    }

    /// Array of non-empty strings; duplicates collapse keeping first occurrence.
    pub(crate) fn string_list(&self, key: &str) -> Result<Vec<String>> {
        let items = match self.table.get(key) {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(self.invalid(
                    key,
                    format!("expected an array of strings, found {}", other.type_str()),
                ));
            }
        };

        let mut out: Vec<String> = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let indexed = format!("{key}[{index}]");
            match item {
                Value::String(s) if s.trim().is_empty() => {
                    return Err(self.invalid(&indexed, "must not be empty"));
                }
                Value::String(s) => {
                    let s = s.trim().to_string();
                    if !out.contains(&s) {
                        out.push(s);
                    }
                }
                other => {
                    return Err(self.invalid(
                        &indexed,
                        format!("expected a string, found {}", other.type_str()),
                    ));
                }
            }
        }
        Ok(out)
    }
}
