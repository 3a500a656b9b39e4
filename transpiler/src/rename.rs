//! Hygienic renaming of template bodies.
//!
//! Renaming is a pure transform: it reads a borrowed statement and returns a
//! renamed copy, leaving the registered declaration untouched. Decorator tags
//! and template names live in their own namespace and are never rewritten.
//! Nested template declarations are separate lexical units and are copied
//! as-is.

use isc_parser::*;
use std::collections::HashMap;

/// The qualified name of member `name` owned by `owner`.
pub fn qualify(owner: &str, name: &str) -> String {
    format!("__{}__{}", owner, name)
}

/// Active name substitutions for one expansion.
#[derive(Debug, Clone, Default)]
pub struct Renames {
    map: HashMap<String, String>,
}

impl Renames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `from` to `to`, replacing any earlier binding.
    pub fn bind(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.map.insert(from.into(), to.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// A renamed copy of `stmt`.
    pub fn apply(&self, stmt: &Statement) -> Statement {
        match stmt {
            Statement::Pattern(p) => Statement::Pattern(p.clone()),
            Statement::Definition(d) => Statement::Definition(self.definition(d)),
            Statement::Expression(e) => Statement::Expression(ExpressionStatement {
                expression: self.expression(&e.expression),
            }),
            Statement::BinaryRelation(r) => Statement::BinaryRelation(BinaryRelation {
                left: self.relation_left(&r.left),
                right: self.expression(&r.right),
                relation: r.relation,
            }),
            Statement::CoverRelation(r) => Statement::CoverRelation(CoverRelation {
                left: self.relation_left(&r.left),
                middle: self.expression(&r.middle),
                right: self.expression(&r.right),
            }),
            Statement::RepresentsRelation(r) => Statement::RepresentsRelation(RepresentsRelation {
                view: self.relation_left(&r.view),
                data: self.with_expression(&r.data),
                structure: r.structure.as_ref().map(|s| self.with_expression(s)),
            }),
        }
    }

    fn identifier(&self, id: &Identifier) -> Identifier {
        match self.get(&id.name) {
            Some(to) => id.renamed(to),
            None => id.clone(),
        }
    }

    fn definition(&self, def: &DefinitionStatement) -> DefinitionStatement {
        let decorators = def
            .decorators
            .iter()
            .map(|d| match d {
                Decorator::Tag(tag) => Decorator::Tag(tag.clone()),
                Decorator::Call(call) => Decorator::Call(PatternCall {
                    name: call.name.clone(),
                    args: call.args.iter().map(|a| self.identifier(a)).collect(),
                }),
            })
            .collect();

        DefinitionStatement {
            decorators,
            name: self.identifier(&def.name),
        }
    }

    fn expression(&self, expr: &Expression) -> Expression {
        match expr {
            Expression::Identifier(id) => Expression::Identifier(self.identifier(id)),
            Expression::Binary(b) => Expression::Binary(BinaryExpression {
                op: b.op,
                left: Box::new(self.expression(&b.left)),
                right: Box::new(self.expression(&b.right)),
            }),
        }
    }

    fn relation_left(&self, left: &RelationLeft) -> RelationLeft {
        match left {
            RelationLeft::Definition(d) => RelationLeft::Definition(self.definition(d)),
            RelationLeft::Expression(e) => RelationLeft::Expression(self.expression(e)),
        }
    }

    fn with_expression(&self, with: &WithExpression) -> WithExpression {
        WithExpression {
            left: self.expression(&with.left),
            right: with.right.as_ref().map(|r| self.expression(r)),
        }
    }
}
