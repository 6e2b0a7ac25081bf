//! Categorized filter arguments.

/// How a filter argument is interpreted by the compilation pipeline.
///
/// The upstream categorizer assigns one of these to every raw argument;
/// each pipeline stage then rewrites arguments by exhaustive match. Past
/// the category-expansion stage only [`Category::Operator`],
/// [`Category::Domain`], and [`Category::Expression`] remain, and after
/// sub-expression lexing only the first two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// A working-set id sequence, e.g. `1,3-5`.
    Id,

    /// A UUID list, e.g. `a5b2...,c9d1...`.
    Uuid,

    /// Tag syntax: `+name` (present) or `-name` (absent).
    Tag,

    /// A delimited pattern: `/text/`.
    Pattern,

    /// Attribute syntax: `name:value` or `name=value`.
    Attribute,

    /// Attribute-modifier syntax: `name.mod:value`.
    AttributeModifier,

    /// A bare word, matched against the description.
    Word,

    /// An algebraic sub-expression, re-lexed during compilation.
    Expression,

    /// A recognized operator token.
    Operator,

    /// A field name or literal operand.
    Domain,
}

/// One categorized argument: its raw text plus how to interpret it.
///
/// Immutable once categorized; pipeline stages replace whole arguments
/// with new ones, never edit text in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// The argument text.
    pub text: String,

    /// How the text is interpreted.
    pub category: Category,
}

impl Argument {
    /// Creates a categorized argument.
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    /// Shorthand for an operator argument.
    pub fn operator(text: impl Into<String>) -> Self {
        Self::new(text, Category::Operator)
    }

    /// Shorthand for a domain/literal argument.
    pub fn domain(text: impl Into<String>) -> Self {
        Self::new(text, Category::Domain)
    }
}
