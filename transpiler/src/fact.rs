//! Emitted fact lines.

use isc_parser::RelationKind;
use std::fmt;

/// One emitted line of the fact stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fact {
    /// `set(kind, Name)` for the primitive kinds `single` and `many`.
    Set { kind: String, name: String },
    /// `structure(Name)`
    Structure(String),
    /// `instance(Tag, Name)`
    Instance { tag: String, name: String },
    /// `apply_instance(Template, Instance)`
    ApplyInstance { template: String, instance: String },
    /// `apply_<relation>(A, B)`
    Apply {
        relation: RelationKind,
        left: String,
        right: String,
    },
    /// `apply_cover(A, B, C)`
    ApplyCover {
        left: String,
        middle: String,
        right: String,
    },
    /// The lowered text of an expression statement.
    Term(String),
    /// Placeholder for a construct that has no lowering yet.
    Unimplemented(Unimplemented),
}

impl Fact {
    pub fn set(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Fact::Set {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn instance(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Fact::Instance {
            tag: tag.into(),
            name: name.into(),
        }
    }

    pub fn apply(relation: RelationKind, left: impl Into<String>, right: impl Into<String>) -> Self {
        Fact::Apply {
            relation,
            left: left.into(),
            right: right.into(),
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fact::Set { kind, name } => write!(f, "set({}, {})", kind, name),
            Fact::Structure(name) => write!(f, "structure({})", name),
            Fact::Instance { tag, name } => write!(f, "instance({}, {})", tag, name),
            Fact::ApplyInstance { template, instance } => {
                write!(f, "apply_instance({}, {})", template, instance)
            }
            Fact::Apply {
                relation,
                left,
                right,
            } => write!(f, "apply_{}({}, {})", relation.fact_name(), left, right),
            Fact::ApplyCover {
                left,
                middle,
                right,
            } => write!(f, "apply_cover({}, {}, {})", left, middle, right),
            Fact::Term(text) => f.write_str(text),
            Fact::Unimplemented(feature) => write!(f, "{}", feature),
        }
    }
}

/// Constructs that parse but are not lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unimplemented {
    /// The `.` member access operator.
    MemberAccess,
    /// `represents` view bindings.
    Represents,
}

impl fmt::Display for Unimplemented {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unimplemented::MemberAccess => f.write_str("[member access not implemented]"),
            Unimplemented::Represents => f.write_str("[represents not implemented]"),
        }
    }
}

/// The ordered output of one transpile call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactBase {
    facts: Vec<Fact>,
}

impl FactBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fact: Fact) {
        self.facts.push(fact);
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Newline-joined fact text, without a trailing newline.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FactBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fact) in self.facts.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", fact)?;
        }
        Ok(())
    }
}

impl Extend<Fact> for FactBase {
    fn extend<T: IntoIterator<Item = Fact>>(&mut self, iter: T) {
        self.facts.extend(iter);
    }
}

impl IntoIterator for FactBase {
    type Item = Fact;
    type IntoIter = std::vec::IntoIter<Fact>;

    fn into_iter(self) -> Self::IntoIter {
        self.facts.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_display_vocabulary() {
        assert_eq!(Fact::set("many", "webpages").to_string(), "set(many, webpages)");
        assert_eq!(Fact::Structure("h".into()).to_string(), "structure(h)");
        assert_eq!(Fact::instance("order", "t").to_string(), "instance(order, t)");
        assert_eq!(
            Fact::ApplyInstance {
                template: "P".into(),
                instance: "i1".into()
            }
            .to_string(),
            "apply_instance(P, i1)"
        );
        assert_eq!(
            Fact::apply(RelationKind::MapToMany, "a", "b").to_string(),
            "apply_mapto_many(a, b)"
        );
        assert_eq!(
            Fact::ApplyCover {
                left: "a".into(),
                middle: "b".into(),
                right: "c".into()
            }
            .to_string(),
            "apply_cover(a, b, c)"
        );
    }

    #[test]
    fn test_render_has_no_trailing_newline() {
        let mut facts = FactBase::new();
        facts.push(Fact::set("many", "a"));
        facts.push(Fact::set("single", "b"));

        assert_eq!(facts.render(), "set(many, a)\nset(single, b)");
        assert_eq!(FactBase::new().render(), "");
    }
}
