//! Abstract Syntax Tree types for interface schemas.
//!
//! Every node serializes with a `_type` discriminator so the tree can be
//! dumped as JSON for tooling. Spans are carried on identifiers for error
//! reporting but never serialized.

use serde::Serialize;
use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

// ==================== PROGRAM ====================

/// The compilation unit: one per parsed document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "_type")]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// A statement in an interface schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statement {
    BinaryRelation(BinaryRelation),
    CoverRelation(CoverRelation),
    RepresentsRelation(RepresentsRelation),
    Pattern(PatternStatement),
    Definition(DefinitionStatement),
    Expression(ExpressionStatement),
}

impl Statement {
    /// Collect every definition in this statement, in pre-order.
    ///
    /// Nested pattern declarations are their own lexical unit and are not
    /// descended into.
    pub fn definitions(&self) -> Vec<&DefinitionStatement> {
        match self {
            Statement::BinaryRelation(r) => r.left.definition().into_iter().collect(),
            Statement::CoverRelation(r) => r.left.definition().into_iter().collect(),
            Statement::RepresentsRelation(r) => r.view.definition().into_iter().collect(),
            Statement::Definition(d) => vec![d],
            Statement::Pattern(_) | Statement::Expression(_) => Vec::new(),
        }
    }
}

// ==================== IDENTIFIERS & EXPRESSIONS ====================

/// A bare name reference.
#[derive(Debug, Clone, Eq, Serialize)]
#[serde(tag = "_type")]
pub struct Identifier {
    pub name: String,
    #[serde(skip)]
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: Span::default(),
        }
    }

    pub fn with_span(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// The same identifier under another name, keeping its location.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: self.span,
        }
    }
}

/// Spans are ignored: two identifiers are equal when they name the same thing.
impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An expression: a name, or two expressions joined by an operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expression {
    Identifier(Identifier),
    Binary(BinaryExpression),
}

impl Expression {
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier::new(name))
    }

    /// The left-most identifier of the expression.
    pub fn head(&self) -> &Identifier {
        match self {
            Expression::Identifier(id) => id,
            Expression::Binary(b) => b.left.head(),
        }
    }
}

/// Binary expression operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    /// Member access `a.b`.
    #[serde(rename = ".")]
    Member,
    /// Derives-from arrow `a<-b`.
    #[serde(rename = "<-")]
    DerivesFrom,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Member => ".",
            BinaryOp::DerivesFrom => "<-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type")]
pub struct BinaryExpression {
    pub op: BinaryOp,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

/// A statement consisting of a lone expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type")]
pub struct ExpressionStatement {
    pub expression: Expression,
}

// ==================== DEFINITIONS ====================

/// One slot of a definition's qualifier chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Decorator {
    /// A bare tag: `many`, `order`, a template name, ...
    Tag(Identifier),
    /// A template instantiation with arguments: `Tmpl(x, y)`.
    Call(PatternCall),
}

impl Decorator {
    pub fn tag(name: impl Into<String>) -> Self {
        Decorator::Tag(Identifier::new(name))
    }

    pub fn name(&self) -> &Identifier {
        match self {
            Decorator::Tag(id) => id,
            Decorator::Call(call) => &call.name,
        }
    }

    /// True for the bare tag with the given name.
    pub fn is_tag(&self, name: &str) -> bool {
        matches!(self, Decorator::Tag(id) if id.name == name)
    }
}

/// A decorator slot instantiating a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type")]
pub struct PatternCall {
    pub name: Identifier,
    pub args: Vec<Identifier>,
}

/// `A: B: C: name`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type")]
pub struct DefinitionStatement {
    /// Never empty for a parsed definition.
    pub decorators: Vec<Decorator>,
    pub name: Identifier,
}

impl DefinitionStatement {
    /// Build a definition. Panics on an empty decorator list: the grammar
    /// cannot produce one, so reaching it is a parser bug.
    pub fn new(decorators: Vec<Decorator>, name: Identifier) -> Self {
        assert!(
            !decorators.is_empty(),
            "definition '{}' built without decorators",
            name.name
        );
        Self { decorators, name }
    }

    /// True if the chain carries the `shared` renaming directive.
    pub fn is_shared(&self) -> bool {
        self.decorators.iter().any(|d| d.is_tag(SHARED_TAG))
    }
}

/// Decorator tag marking a template member as shared by all instances.
pub const SHARED_TAG: &str = "shared";

/// A reusable template declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type")]
pub struct PatternStatement {
    pub name: Identifier,
    pub args: Option<Vec<Identifier>>,
    pub statements: Vec<Statement>,
    pub extends: Option<Identifier>,
}

impl PatternStatement {
    pub fn params(&self) -> &[Identifier] {
        self.args.as_deref().unwrap_or(&[])
    }
}

// ==================== RELATIONS ====================

/// Relation keywords, longest alternatives first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelationKind {
    #[serde(rename = "mapto many")]
    MapToMany,
    #[serde(rename = "mapto")]
    MapTo,
    #[serde(rename = "structures")]
    Structures,
    #[serde(rename = "constrains")]
    Constrains,
}

impl RelationKind {
    /// The keyword as written in source.
    pub fn keyword(&self) -> &'static str {
        match self {
            RelationKind::MapToMany => "mapto many",
            RelationKind::MapTo => "mapto",
            RelationKind::Structures => "structures",
            RelationKind::Constrains => "constrains",
        }
    }

    /// The keyword as used in fact names: spaces become underscores.
    pub fn fact_name(&self) -> String {
        self.keyword().replace(' ', "_")
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Left operand of a relation: an inline definition or an expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RelationLeft {
    Definition(DefinitionStatement),
    Expression(Expression),
}

impl RelationLeft {
    pub fn definition(&self) -> Option<&DefinitionStatement> {
        match self {
            RelationLeft::Definition(d) => Some(d),
            RelationLeft::Expression(_) => None,
        }
    }
}

/// `left <relation> right`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type")]
pub struct BinaryRelation {
    pub left: RelationLeft,
    pub right: Expression,
    pub relation: RelationKind,
}

/// `left cover middle along right`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type")]
pub struct CoverRelation {
    pub left: RelationLeft,
    pub middle: Expression,
    pub right: Expression,
}

/// `left with right`, used by view bindings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type")]
pub struct WithExpression {
    pub left: Expression,
    pub right: Option<Expression>,
}

/// `view represents data [as structure]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type")]
pub struct RepresentsRelation {
    pub view: RelationLeft,
    pub data: WithExpression,
    pub structure: Option<WithExpression>,
}
