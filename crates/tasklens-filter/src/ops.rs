//! The static operator table.
//!
//! One process-wide, read-only registry of every operator the filter
//! grammar knows: its precedence (higher binds tighter), associativity,
//! and arity. Parentheses appear in the table so the sub-expression lexer
//! classifies them as operators; the infix-to-postfix converter handles
//! them structurally rather than by precedence.

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    /// Groups left to right.
    Left,
    /// Groups right to left.
    Right,
}

/// Operator arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Takes one operand.
    Unary,
    /// Takes two operands.
    Binary,
}

struct OpDef {
    token: &'static str,
    precedence: u8,
    assoc: Assoc,
    arity: Arity,
}

// `not` sits below the comparison and match operators: its operand is a
// completed predicate, so `not a = 1` negates the comparison, while
// `not a = 1 and b` still groups as `(not (a = 1)) and b`.
const OPERATORS: &[OpDef] = &[
    OpDef { token: "<",   precedence: 8, assoc: Assoc::Left,  arity: Arity::Binary },
    OpDef { token: "<=",  precedence: 8, assoc: Assoc::Left,  arity: Arity::Binary },
    OpDef { token: ">",   precedence: 8, assoc: Assoc::Left,  arity: Arity::Binary },
    OpDef { token: ">=",  precedence: 8, assoc: Assoc::Left,  arity: Arity::Binary },
    OpDef { token: "=",   precedence: 7, assoc: Assoc::Left,  arity: Arity::Binary },
    OpDef { token: "==",  precedence: 7, assoc: Assoc::Left,  arity: Arity::Binary },
    OpDef { token: "!=",  precedence: 7, assoc: Assoc::Left,  arity: Arity::Binary },
    OpDef { token: "~",   precedence: 7, assoc: Assoc::Left,  arity: Arity::Binary },
    OpDef { token: "!~",  precedence: 7, assoc: Assoc::Left,  arity: Arity::Binary },
    OpDef { token: "not", precedence: 6, assoc: Assoc::Right, arity: Arity::Unary },
    OpDef { token: "and", precedence: 5, assoc: Assoc::Left,  arity: Arity::Binary },
    OpDef { token: "xor", precedence: 4, assoc: Assoc::Left,  arity: Arity::Binary },
    OpDef { token: "or",  precedence: 3, assoc: Assoc::Left,  arity: Arity::Binary },
    OpDef { token: "(",   precedence: 0, assoc: Assoc::Left,  arity: Arity::Binary },
    OpDef { token: ")",   precedence: 0, assoc: Assoc::Left,  arity: Arity::Binary },
];

fn lookup(token: &str) -> Option<&'static OpDef> {
    OPERATORS.iter().find(|op| op.token == token)
}

/// Returns true if `token` is a recognized operator (including parentheses).
pub fn is_operator(token: &str) -> bool {
    lookup(token).is_some()
}

/// The operator's precedence; higher binds tighter.
pub fn precedence(token: &str) -> Option<u8> {
    lookup(token).map(|op| op.precedence)
}

/// The operator's associativity.
pub fn associativity(token: &str) -> Option<Assoc> {
    lookup(token).map(|op| op.assoc)
}

/// The operator's arity.
pub fn arity(token: &str) -> Option<Arity> {
    lookup(token).map(|op| op.arity)
}
