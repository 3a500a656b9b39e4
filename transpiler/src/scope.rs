//! Expansion scope management.

/// One active template expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionScope {
    /// The template being expanded.
    pub template: String,
    /// The (already qualified) instance name it is being expanded for.
    pub instance: String,
}

impl ExpansionScope {
    pub fn new(template: impl Into<String>, instance: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            instance: instance.into(),
        }
    }
}

/// Stack of in-progress expansions, innermost last.
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<ExpansionScope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scope: ExpansionScope) {
        self.frames.push(scope);
    }

    pub fn pop(&mut self) -> Option<ExpansionScope> {
        self.frames.pop()
    }

    /// True if `template` is being expanded somewhere up the stack.
    pub fn is_expanding(&self, template: &str) -> bool {
        self.frames.iter().any(|f| f.template == template)
    }

    /// Human-readable expansion chain, outermost first, ending in `next`.
    pub fn chain(&self, next: &str) -> String {
        let mut parts: Vec<String> = self
            .frames
            .iter()
            .map(|f| format!("{}({})", f.template, f.instance))
            .collect();
        parts.push(next.to_string());
        parts.join(" -> ")
    }
}
