//! Transpiler options.

use serde::Deserialize;

/// Decorator tags lowered as structural kinds when no override is given.
pub const DEFAULT_STRUCTURE_TAGS: [&str; 3] = ["order", "linear", "tree"];

/// Knobs for one transpile call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranspileOptions {
    /// Tags that mark a definition as a structure of that kind, at any
    /// decorator position.
    pub structure_tags: Vec<String>,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            structure_tags: DEFAULT_STRUCTURE_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl TranspileOptions {
    pub fn with_structure_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.structure_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_structure_tag(&self, tag: &str) -> bool {
        self.structure_tags.iter().any(|t| t == tag)
    }
}
