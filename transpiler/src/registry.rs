//! Template registry.
//!
//! Filled by a single registration pass before lowering, so a template may
//! be instantiated above its declaration. Holds borrowed, never-mutated
//! declarations; expansion always works on a renamed copy.

use crate::error::{TranspileError, TranspileResult};
use isc_parser::{PatternStatement, Statement};
use std::collections::HashMap;

/// Name to declaration mapping for every template in a program.
#[derive(Debug, Default)]
pub struct TemplateRegistry<'p> {
    templates: HashMap<&'p str, &'p PatternStatement>,
}

impl<'p> TemplateRegistry<'p> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every template declared in `statements`, including templates
    /// nested inside other template bodies.
    pub fn register_all(&mut self, statements: &'p [Statement]) -> TranspileResult<()> {
        for stmt in statements {
            if let Statement::Pattern(pattern) = stmt {
                self.register(pattern)?;
                self.register_all(&pattern.statements)?;
            }
        }
        Ok(())
    }

    /// Register one template. Names are global and must be unique.
    pub fn register(&mut self, pattern: &'p PatternStatement) -> TranspileResult<()> {
        let name = pattern.name.name.as_str();
        if self.templates.contains_key(name) {
            return Err(TranspileError::duplicate_template(&pattern.name));
        }
        self.templates.insert(name, pattern);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&'p PatternStatement> {
        self.templates.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
