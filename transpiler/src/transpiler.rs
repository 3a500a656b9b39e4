//! AST to fact lowering.
//!
//! A `TranspileContext` is created per call and consumed by it. It owns the
//! template registry, the expansion scope stack and the set of shared facts
//! already emitted, so concurrent transpiles never share state.

use crate::error::{TranspileError, TranspileResult};
use crate::fact::{Fact, FactBase, Unimplemented};
use crate::options::TranspileOptions;
use crate::registry::TemplateRegistry;
use crate::rename::{qualify, Renames};
use crate::scope::{ExpansionScope, ScopeStack};
use isc_parser::*;
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Decorator kinds lowered to `set(kind, N)` in head position.
const PRIMITIVE_KINDS: [&str; 2] = ["single", "many"];
/// Decorator lowered to `structure(N)` in head position.
const STRUCTURE_TAG: &str = "structure";

/// Lower a program to fact text using default options.
pub fn transpile(program: &Program) -> TranspileResult<String> {
    transpile_with(program, &TranspileOptions::default()).map(|facts| facts.render())
}

/// Lower a program to facts.
pub fn transpile_with(
    program: &Program,
    options: &TranspileOptions,
) -> TranspileResult<FactBase> {
    TranspileContext::new(options).run(program)
}

/// Per-call lowering state.
pub struct TranspileContext<'p> {
    options: &'p TranspileOptions,
    registry: TemplateRegistry<'p>,
    scopes: ScopeStack,
    shared_emitted: HashSet<String>,
}

impl<'p> TranspileContext<'p> {
    pub fn new(options: &'p TranspileOptions) -> Self {
        Self {
            options,
            registry: TemplateRegistry::new(),
            scopes: ScopeStack::new(),
            shared_emitted: HashSet::new(),
        }
    }

    /// Register every template, then lower top-level statements in order.
    pub fn run(mut self, program: &'p Program) -> TranspileResult<FactBase> {
        self.registry.register_all(&program.statements)?;
        debug!(templates = self.registry.len(), "registered templates");

        let mut out = FactBase::new();
        for stmt in &program.statements {
            self.lower_statement(stmt, &mut out)?;
        }
        debug!(facts = out.len(), "lowered program");
        Ok(out)
    }

    fn lower_statement(&mut self, stmt: &Statement, out: &mut FactBase) -> TranspileResult<()> {
        match stmt {
            // Declarations are handled by the registration pass.
            Statement::Pattern(_) => {}
            Statement::Definition(def) => self.lower_definition(def, out)?,
            Statement::Expression(e) => out.push(Fact::Term(self.lower_expression(&e.expression))),
            Statement::BinaryRelation(r) => {
                let left = self.lower_relation_left(&r.left, out)?;
                let right = self.lower_expression(&r.right);
                out.push(Fact::apply(r.relation, left, right));
            }
            Statement::CoverRelation(r) => {
                let left = self.lower_relation_left(&r.left, out)?;
                let middle = self.lower_expression(&r.middle);
                let right = self.lower_expression(&r.right);
                out.push(Fact::ApplyCover {
                    left,
                    middle,
                    right,
                });
            }
            Statement::RepresentsRelation(_) => {
                warn!("represents relations are not lowered; emitting placeholder");
                out.push(Fact::Unimplemented(Unimplemented::Represents));
            }
        }
        Ok(())
    }

    /// Lower a relation's left side, returning the operand text. Inline
    /// definitions emit their own facts first.
    fn lower_relation_left(
        &mut self,
        left: &RelationLeft,
        out: &mut FactBase,
    ) -> TranspileResult<String> {
        match left {
            RelationLeft::Definition(def) => {
                self.lower_definition(def, out)?;
                Ok(def.name.name.clone())
            }
            RelationLeft::Expression(e) => Ok(self.lower_expression(e)),
        }
    }

    fn lower_expression(&self, expr: &Expression) -> String {
        match expr {
            Expression::Identifier(id) => id.name.clone(),
            Expression::Binary(b) => match b.op {
                BinaryOp::DerivesFrom => self.lower_expression(&b.left),
                BinaryOp::Member => {
                    warn!(
                        object = %b.left.head(),
                        "member access is not lowered; emitting placeholder"
                    );
                    Unimplemented::MemberAccess.to_string()
                }
            },
        }
    }

    /// Lower a decorator chain. Positions are counted after `shared` is
    /// stripped; `shared` itself never produces facts.
    fn lower_definition(
        &mut self,
        def: &DefinitionStatement,
        out: &mut FactBase,
    ) -> TranspileResult<()> {
        if def.decorators.is_empty() {
            return Err(TranspileError::empty_definition(&def.name));
        }

        let decorators = def.decorators.iter().filter(|d| !d.is_tag(SHARED_TAG));
        for (position, decorator) in decorators.enumerate() {
            match decorator {
                Decorator::Tag(tag) => self.lower_tag(tag, position, &def.name, out)?,
                Decorator::Call(call) => {
                    let template = self
                        .registry
                        .get(&call.name.name)
                        .ok_or_else(|| TranspileError::undeclared_template(&call.name))?;
                    let args = Some(call.args.as_slice());
                    self.expand(template, &call.name, args, &def.name.name, out)?;
                }
            }
        }
        Ok(())
    }

    fn lower_tag(
        &mut self,
        tag: &Identifier,
        position: usize,
        name: &Identifier,
        out: &mut FactBase,
    ) -> TranspileResult<()> {
        let tag_name = tag.name.as_str();
        let instance = name.name.as_str();

        if position == 0 && PRIMITIVE_KINDS.contains(&tag_name) {
            out.push(Fact::set(tag_name, instance));
        } else if position == 0 && tag_name == STRUCTURE_TAG {
            out.push(Fact::Structure(instance.to_string()));
        } else if self.options.is_structure_tag(tag_name) {
            out.push(Fact::Structure(instance.to_string()));
            out.push(Fact::instance(tag_name, instance));
        } else if let Some(template) = self.registry.get(tag_name) {
            self.expand(template, tag, None, instance, out)?;
        } else {
            out.push(Fact::instance(tag_name, instance));
        }
        Ok(())
    }

    /// Instantiate `template` for `instance`.
    ///
    /// `args` is `None` for a bare tag, which binds no parameters. Each body
    /// statement is renamed with the bindings accumulated so far plus its own
    /// definitions, so a reference above a member's definition keeps its
    /// source name.
    fn expand(
        &mut self,
        template: &'p PatternStatement,
        site: &Identifier,
        args: Option<&[Identifier]>,
        instance: &str,
        out: &mut FactBase,
    ) -> TranspileResult<()> {
        let template_name = template.name.name.as_str();
        if self.scopes.is_expanding(template_name) {
            return Err(TranspileError::recursive_template(
                template_name,
                self.scopes.chain(template_name),
            ));
        }

        let mut renames = Renames::new();
        if let Some(args) = args {
            let params = template.params();
            if params.len() != args.len() {
                return Err(TranspileError::arity_mismatch(site, params.len(), args.len()));
            }
            for (param, arg) in params.iter().zip(args) {
                renames.bind(param.name.as_str(), arg.name.as_str());
            }
        }

        trace!(template = template_name, instance, "expanding template");
        out.push(Fact::ApplyInstance {
            template: template_name.to_string(),
            instance: instance.to_string(),
        });

        self.scopes.push(ExpansionScope::new(template_name, instance));
        let result = self.expand_body(template, renames, instance, out);
        self.scopes.pop();
        result
    }

    fn expand_body(
        &mut self,
        template: &'p PatternStatement,
        mut renames: Renames,
        instance: &str,
        out: &mut FactBase,
    ) -> TranspileResult<()> {
        let template_name = template.name.name.as_str();

        for stmt in &template.statements {
            let definitions = stmt.definitions();
            let shared = definitions.iter().any(|d| d.is_shared());
            for def in &definitions {
                let owner = if def.is_shared() { template_name } else { instance };
                renames.bind(def.name.name.as_str(), qualify(owner, &def.name.name));
            }
            trace!(template = template_name, instance, renames = renames.len(), "renaming statement");

            let renamed = renames.apply(stmt);
            let mut facts = FactBase::new();
            self.lower_statement(&renamed, &mut facts)?;

            if shared {
                for fact in facts {
                    if self.shared_emitted.insert(fact.to_string()) {
                        out.push(fact);
                    }
                }
            } else {
                out.extend(facts);
            }

            for def in renamed.definitions() {
                out.push(Fact::apply(RelationKind::MapTo, instance, def.name.name.as_str()));
            }
        }
        Ok(())
    }
}
