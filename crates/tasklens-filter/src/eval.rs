//! Postfix predicate evaluation.
//!
//! A single left-to-right pass over the compiled postfix sequence with an
//! operand stack. Domain tokens resolve through the task's attribute
//! accessors; everything else is a literal. Exactly one boolean must
//! remain when the pass completes.

use regex::Regex;
use tasklens_core::{Task, Value};

use crate::args::{Argument, Category};
use crate::error::{FilterError, FilterResult};
use crate::ops::{self, Arity};

/// Attribute names that resolve against the record even when absent.
///
/// A missing built-in becomes the absent sentinel; any other non-literal
/// token falls back to being a literal value.
const BUILTIN_ATTRIBUTES: &[&str] = &[
    "id",
    "uuid",
    "description",
    "status",
    "project",
    "priority",
    "due",
    "entry",
    "end",
    "tags",
];

/// One entry on the evaluation stack.
#[derive(Debug, Clone)]
enum Operand {
    /// The result of a boolean operator.
    Bool(bool),

    /// A literal value.
    Val(Value),

    /// A record attribute; `value` is `None` when the attribute is absent.
    Field { name: String, value: Option<Value> },
}

impl Operand {
    fn truth(&self) -> bool {
        match self {
            Operand::Bool(b) => *b,
            Operand::Val(v) => value_truth(v),
            Operand::Field { value: Some(v), .. } => value_truth(v),
            Operand::Field { value: None, .. } => false,
        }
    }

    fn is_absent(&self) -> bool {
        matches!(self, Operand::Field { value: None, .. })
    }

    fn is_empty_text(&self) -> bool {
        match self {
            Operand::Val(v) => v.is_empty_text(),
            Operand::Field { value: Some(v), .. } => v.is_empty_text(),
            Operand::Field { value: None, .. } => true,
            Operand::Bool(_) => false,
        }
    }

    fn value(&self) -> Value {
        match self {
            Operand::Bool(b) => Value::Str(b.to_string()),
            Operand::Val(v) => v.clone(),
            Operand::Field { value: Some(v), .. } => v.clone(),
            Operand::Field { value: None, .. } => Value::Str(String::new()),
        }
    }

    fn text(&self) -> String {
        self.value().as_text()
    }
}

fn value_truth(value: &Value) -> bool {
    match value {
        Value::Str(s) => !s.is_empty(),
        Value::Number(n) => *n != 0.0,
        Value::Date(_) => true,
    }
}

/// Evaluates a compiled postfix sequence against one task.
pub(crate) fn evaluate(postfix: &[Argument], task: &Task) -> FilterResult<bool> {
    let mut stack: Vec<Operand> = Vec::new();

    for arg in postfix {
        match arg.category {
            Category::Operator => apply(&arg.text, &mut stack, task)?,
            Category::Domain => stack.push(resolve(task, &arg.text)),
            other => {
                return Err(FilterError::malformed_predicate(format!(
                    "unexpected {:?} token '{}' in postfix form",
                    other, arg.text
                )))
            }
        }
    }

    let result = stack
        .pop()
        .ok_or_else(|| FilterError::malformed_predicate("evaluation produced no result"))?;
    if !stack.is_empty() {
        return Err(FilterError::malformed_predicate(format!(
            "{} operands left on the stack",
            stack.len() + 1
        )));
    }

    Ok(result.truth())
}

/// Resolves a domain token: quoted spans and unknown names are literals,
/// attribute names become field references (absent when unset).
fn resolve(task: &Task, text: &str) -> Operand {
    if let Some(inner) = strip_quotes(text) {
        return Operand::Val(Value::Str(inner.to_string()));
    }

    if BUILTIN_ATTRIBUTES.contains(&text) {
        return Operand::Field {
            name: text.to_string(),
            value: task.get(text),
        };
    }

    // A user-defined attribute carried by this task also resolves as a
    // field; names the record knows nothing about are literals.
    if let Some(value) = task.get(text) {
        return Operand::Field {
            name: text.to_string(),
            value: Some(value),
        };
    }

    Operand::Val(Value::infer(text))
}

fn strip_quotes(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    if text.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[text.len() - 1] == bytes[0]
    {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

/// Applies one operator, popping operands per its tabled arity.
fn apply(op: &str, stack: &mut Vec<Operand>, task: &Task) -> FilterResult<()> {
    let arity = ops::arity(op).ok_or_else(|| {
        FilterError::malformed_predicate(format!("unknown operator '{}'", op))
    })?;

    let result = match arity {
        Arity::Unary => {
            let a = pop(stack, op)?;
            match op {
                "not" => !a.truth(),
                other => {
                    return Err(FilterError::malformed_predicate(format!(
                        "unary operator '{}' has no evaluation rule",
                        other
                    )))
                }
            }
        }

        Arity::Binary => {
            let b = pop(stack, op)?;
            let a = pop(stack, op)?;
            match op {
                "and" => a.truth() && b.truth(),
                "or" => a.truth() || b.truth(),
                "xor" => a.truth() ^ b.truth(),
                "=" | "==" | "!=" | "<" | "<=" | ">" | ">=" => compare(op, &a, &b),
                "~" => is_match(task, &a, &b),
                "!~" => !is_match(task, &a, &b),
                other => {
                    return Err(FilterError::malformed_predicate(format!(
                        "binary operator '{}' has no evaluation rule",
                        other
                    )))
                }
            }
        }
    };

    stack.push(Operand::Bool(result));
    Ok(())
}

fn pop(stack: &mut Vec<Operand>, op: &str) -> FilterResult<Operand> {
    stack.pop().ok_or_else(|| {
        FilterError::malformed_predicate(format!("insufficient operands for '{}'", op))
    })
}

/// Type-aware comparison with absent-attribute handling.
///
/// An absent attribute equals only an explicit empty test and orders
/// against nothing; it never raises.
fn compare(op: &str, a: &Operand, b: &Operand) -> bool {
    if a.is_absent() || b.is_absent() {
        let equal = a.is_empty_text() && b.is_empty_text();
        return match op {
            "=" | "==" => equal,
            "!=" => !equal,
            _ => false,
        };
    }

    let av = a.value();
    let bv = b.value();
    match op {
        "=" | "==" => av.same(&bv),
        "!=" => !av.same(&bv),
        "<" => av.compare(&bv) == std::cmp::Ordering::Less,
        "<=" => av.compare(&bv) != std::cmp::Ordering::Greater,
        ">" => av.compare(&bv) == std::cmp::Ordering::Greater,
        ">=" => av.compare(&bv) != std::cmp::Ordering::Less,
        _ => false,
    }
}

/// Match semantics for `~` / `!~`.
///
/// The `tags` field uses exact tag membership; everything else matches the
/// pattern as a regex, falling back to substring search when the pattern
/// is not a valid regex.
fn is_match(task: &Task, subject: &Operand, pattern: &Operand) -> bool {
    if let Operand::Field { name, .. } = subject {
        if name == "tags" {
            return task.has_tag(&pattern.text());
        }
    }

    let subject_text = match subject {
        Operand::Field { value: None, .. } => String::new(),
        other => other.text(),
    };
    let pattern_text = pattern.text();

    match Regex::new(&pattern_text) {
        Ok(re) => re.is_match(&subject_text),
        Err(_) => subject_text.contains(&pattern_text),
    }
}
