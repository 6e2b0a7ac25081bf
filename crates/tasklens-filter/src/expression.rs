//! The filter expression compiler.
//!
//! Compilation turns a categorized argument list into a postfix predicate
//! in four stages, each producing a fresh argument list:
//!
//! 1. **Sequence expansion** folds scattered id/uuid arguments into one
//!    parenthesized disjunction.
//! 2. **Category expansion** rewrites tag/attribute/modifier/word/pattern
//!    arguments into (domain, operator, literal) triples, inserting an
//!    implicit `and` between adjacent terms of legacy-style input.
//! 3. **Sub-expression lexing** re-tokenizes every algebraic sub-expression
//!    and classifies each token as operator or operand.
//! 4. **Infix-to-postfix conversion** linearizes the token sequence by
//!    operator precedence, eliminating parentheses.
//!
//! The result is an immutable [`Expression`] that can be evaluated against
//! any number of task records.

use tasklens_core::Task;

use crate::args::{Argument, Category};
use crate::error::{FilterError, FilterResult};
use crate::eval;
use crate::fragments::{
    extract_attr, extract_attmod, extract_ids, extract_pattern, extract_tag, extract_uuids,
    TagSense,
};
use crate::lexer::Lexer;
use crate::ops::{self, Assoc};

/// A compiled filter predicate.
///
/// Owns the postfix argument list produced by compilation. The predicate
/// is immutable and free of interior state, so one compiled `Expression`
/// may be evaluated against many records, in any order, from any thread.
///
/// # Example
///
/// ```
/// use tasklens_filter::{Argument, Category, Expression};
///
/// let args = vec![Argument::new("+urgent", Category::Tag)];
/// let expr = Expression::compile(&args).unwrap();
/// assert!(!expr.postfix().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    postfix: Vec<Argument>,
}

impl Expression {
    /// Compiles a categorized argument list into a postfix predicate.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MalformedFragment`] when an id/uuid/tag/
    /// attribute argument has invalid syntax,
    /// [`FilterError::UnsupportedModifier`] for a recognized modifier with
    /// no defined semantics, and [`FilterError::MismatchedParentheses`]
    /// when the expression does not balance.
    pub fn compile(arguments: &[Argument]) -> FilterResult<Expression> {
        let structured = is_structured_style(arguments);
        let sequenced = expand_sequence(arguments)?;
        let infix = to_infix(&sequenced, structured)?;
        let expanded = expand_subexpressions(&infix);
        let postfix = to_postfix(&expanded)?;
        Ok(Expression { postfix })
    }

    /// The compiled postfix token sequence.
    pub fn postfix(&self) -> &[Argument] {
        &self.postfix
    }

    /// Evaluates the predicate against one task.
    ///
    /// An empty predicate (no filter arguments at all) matches every task.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MalformedPredicate`] when the postfix form is
    /// structurally invalid. That cannot happen for predicates produced by
    /// [`Expression::compile`] on well-formed input; it indicates a
    /// compiler defect rather than bad user data.
    pub fn matches(&self, task: &Task) -> FilterResult<bool> {
        if self.postfix.is_empty() {
            return Ok(true);
        }
        eval::evaluate(&self.postfix, task)
    }
}

/// Returns true when any argument's text is a recognized operator token.
///
/// Structured input carries its own boolean connectives; legacy input gets
/// an implicit `and` between adjacent terms.
fn is_structured_style(arguments: &[Argument]) -> bool {
    arguments.iter().any(|arg| ops::is_operator(&arg.text))
}

/// Folds all id/uuid arguments into a single algebraic disjunction.
///
/// `1,3` plus a uuid becomes the one Expression argument
/// `(id=1 or id=3 or uuid="...")`, spliced where the first id/uuid stood.
/// Identity transform when no id/uuid arguments exist.
fn expand_sequence(original: &[Argument]) -> FilterResult<Vec<Argument>> {
    let mut ids = Vec::new();
    let mut uuids = Vec::new();
    for arg in original {
        match arg.category {
            Category::Id => ids.extend(extract_ids(&arg.text)?),
            Category::Uuid => uuids.extend(extract_uuids(&arg.text)?),
            _ => {}
        }
    }

    if ids.is_empty() && uuids.is_empty() {
        return Ok(original.to_vec());
    }

    let mut terms: Vec<String> = ids.iter().map(|id| format!("id={}", id)).collect();
    terms.extend(uuids.iter().map(|uuid| format!("uuid=\"{}\"", uuid)));
    let aggregate = format!("({})", terms.join(" or "));

    // Copy everything before the first id/uuid, insert the aggregate, then
    // copy every non-id/uuid argument that followed the first one.
    let mut result = Vec::new();
    for arg in original {
        if matches!(arg.category, Category::Id | Category::Uuid) {
            break;
        }
        result.push(arg.clone());
    }

    result.push(Argument::new(aggregate, Category::Expression));

    let mut found = false;
    for arg in original {
        if matches!(arg.category, Category::Id | Category::Uuid) {
            found = true;
        } else if found {
            result.push(arg.clone());
        }
    }

    Ok(result)
}

/// Rewrites every legacy-category argument into a domain/operator/literal
/// triple, inserting implicit `and` connectives for legacy-style input.
fn to_infix(sequenced: &[Argument], structured: bool) -> FilterResult<Vec<Argument>> {
    let mut infix: Vec<Argument> = Vec::new();
    let mut previous = Category::Operator;

    for arg in sequenced {
        // Legacy-style filters need 'and' conjunctions between terms.
        if !structured && previous != Category::Operator && arg.category != Category::Operator {
            infix.push(Argument::operator("and"));
        }

        match arg.category {
            // Already folded into the aggregate by sequence expansion.
            Category::Id | Category::Uuid => {}

            Category::Tag => {
                let (sense, name) = extract_tag(&arg.text)?;
                let op = match sense {
                    TagSense::Present => "~",
                    TagSense::Absent => "!~",
                };
                push_triple(&mut infix, "tags", op, &name);
            }

            Category::Pattern => {
                let text = extract_pattern(&arg.text)?;
                push_triple(&mut infix, "description", "~", &text);
            }

            Category::Attribute => {
                let (name, value) = extract_attr(&arg.text)?;
                push_triple(&mut infix, &name, "=", &value);
            }

            Category::AttributeModifier => {
                let (name, modifier, value) = extract_attmod(&arg.text)?;
                let (op, literal) = modifier_semantics(&modifier, &value)?;
                push_triple(&mut infix, &name, op, &literal);
            }

            Category::Word => {
                push_triple(&mut infix, "description", "~", &arg.text);
            }

            // Sub-expressions resolve in the next stage; operators and
            // domains are already in final form.
            Category::Expression | Category::Operator | Category::Domain => {
                infix.push(arg.clone());
            }
        }

        previous = arg.category;
    }

    Ok(infix)
}

/// Appends one (domain, operator, literal) triple.
fn push_triple(infix: &mut Vec<Argument>, domain: &str, op: &str, literal: &str) {
    infix.push(Argument::domain(domain));
    infix.push(Argument::operator(op));
    infix.push(Argument::new(protect(literal), Category::Expression));
}

/// Quotes a literal that would not survive re-lexing as a single token.
///
/// Empty values and values with embedded spaces or punctuation become
/// quoted spans; everything else passes through untouched.
fn protect(literal: &str) -> String {
    let tokens = Lexer::new(literal)
        .skip_whitespace(true)
        .coalesce_alpha(true)
        .coalesce_digits(true)
        .coalesce_quoted(true)
        .tokenize();

    if tokens.len() == 1 && tokens[0] == literal {
        literal.to_string()
    } else {
        format!("\"{}\"", literal)
    }
}

/// Maps an attribute modifier to its comparison operator and literal.
fn modifier_semantics(modifier: &str, value: &str) -> FilterResult<(&'static str, String)> {
    let pair = match modifier {
        "before" | "under" | "below" => ("<", value.to_string()),
        "after" | "over" | "above" => (">", value.to_string()),
        "none" => ("==", String::new()),
        "any" => ("!=", String::new()),
        "is" | "equals" => ("=", value.to_string()),
        "isnt" | "not" => ("!=", value.to_string()),
        "has" | "contains" => ("~", value.to_string()),
        "hasnt" => ("!~", value.to_string()),
        "startswith" | "left" | "endswith" | "right" | "word" | "noword" => {
            return Err(FilterError::unsupported_modifier(modifier));
        }
        other => {
            // The extractor validates modifiers; reaching here is a bug.
            return Err(FilterError::malformed_predicate(format!(
                "unvalidated modifier '{}'",
                other
            )));
        }
    };
    Ok(pair)
}

/// Re-tokenizes every sub-expression argument, classifying each resulting
/// token as operator or domain/literal.
fn expand_subexpressions(infix: &[Argument]) -> Vec<Argument> {
    let mut expanded = Vec::new();

    for arg in infix {
        if arg.category == Category::Expression {
            let tokens = Lexer::new(&arg.text)
                .skip_whitespace(true)
                .coalesce_alpha(true)
                .coalesce_digits(true)
                .coalesce_quoted(true)
                .tokenize();

            for token in tokens {
                if ops::is_operator(&token) {
                    expanded.push(Argument::operator(token));
                } else {
                    expanded.push(Argument::domain(token));
                }
            }
        } else {
            expanded.push(arg.clone());
        }
    }

    expanded
}

/// Dijkstra shunting-yard conversion of the infix list to postfix form.
fn to_postfix(infix: &[Argument]) -> FilterResult<Vec<Argument>> {
    let mut output: Vec<Argument> = Vec::new();
    let mut stack: Vec<Argument> = Vec::new();

    for arg in infix {
        if arg.category != Category::Operator {
            output.push(arg.clone());
            continue;
        }

        match arg.text.as_str() {
            "(" => stack.push(arg.clone()),

            ")" => loop {
                match stack.pop() {
                    Some(top) if top.text == "(" => break,
                    Some(top) => output.push(top),
                    None => return Err(FilterError::MismatchedParentheses),
                }
            },

            op => {
                let prec = ops::precedence(op).unwrap_or(0);
                let left = ops::associativity(op) == Some(Assoc::Left);

                while let Some(top) = stack.last() {
                    if top.text == "(" {
                        break;
                    }
                    let top_prec = ops::precedence(&top.text).unwrap_or(0);
                    if top_prec > prec || (top_prec == prec && left) {
                        if let Some(popped) = stack.pop() {
                            output.push(popped);
                        }
                    } else {
                        break;
                    }
                }
                stack.push(arg.clone());
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top.text == "(" {
            return Err(FilterError::MismatchedParentheses);
        }
        output.push(top);
    }

    Ok(output)
}
