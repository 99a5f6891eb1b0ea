//! Keyword-indexed registration table for command statements. The
//! parser consults it for any statement whose leading word is not part
//! of the core grammar; the evaluator consults the matching handler
//! table. The standard vocabulary is registered through the same calls
//! the domain layer uses to add its own forms.

use indexmap::IndexMap;

/// One slot of a command's argument pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgShape {
    /// Any expression, evaluated by the handler.
    Expr,
    /// An assignment target (bare name, `$` name, property or index
    /// path).
    Lvalue,
    /// A raw word captured as a string, not resolved as a variable.
    Word,
    /// A fixed connective word such as `by` or `to`, required and
    /// discarded.
    Particle(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandForm {
    pub keyword: String,
    pub shape: Vec<ArgShape>,
}

impl CommandForm {
    pub fn new(keyword: impl Into<String>, shape: Vec<ArgShape>) -> Self {
        CommandForm {
            keyword: keyword.into(),
            shape,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    forms: IndexMap<String, CommandForm>,
}

impl CommandRegistry {
    pub fn empty() -> Self {
        CommandRegistry::default()
    }

    /// The core action vocabulary.
    pub fn standard() -> Self {
        let mut registry = CommandRegistry::default();
        registry.register(CommandForm::new("echo", vec![ArgShape::Expr]));
        registry.register(CommandForm::new("say", vec![ArgShape::Expr]));
        registry.register(CommandForm::new(
            "increase",
            vec![
                ArgShape::Lvalue,
                ArgShape::Particle("by".to_string()),
                ArgShape::Expr,
            ],
        ));
        registry.register(CommandForm::new(
            "decrease",
            vec![
                ArgShape::Lvalue,
                ArgShape::Particle("by".to_string()),
                ArgShape::Expr,
            ],
        ));
        registry.register(CommandForm::new(
            "add",
            vec![
                ArgShape::Expr,
                ArgShape::Particle("to".to_string()),
                ArgShape::Expr,
            ],
        ));
        registry.register(CommandForm::new(
            "remove",
            vec![
                ArgShape::Expr,
                ArgShape::Particle("from".to_string()),
                ArgShape::Expr,
            ],
        ));
        registry
    }

    /// Later registrations replace earlier ones under the same keyword.
    pub fn register(&mut self, form: CommandForm) {
        self.forms.insert(form.keyword.clone(), form);
    }

    pub fn form(&self, keyword: &str) -> Option<&CommandForm> {
        self.forms.get(keyword)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.forms.contains_key(keyword)
    }
}
