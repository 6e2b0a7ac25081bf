//! Filter expression compilation and evaluation for task queries.
//!
//! Command-line filter arguments arrive pre-categorized (id sequences,
//! tags, attribute pairs, bare words, algebraic sub-expressions). This
//! crate compiles such a list into a postfix predicate and evaluates it
//! against task records:
//!
//! ```
//! use tasklens_core::Task;
//! use tasklens_filter::{Argument, Category, Expression};
//! use uuid::Uuid;
//!
//! let args = vec![
//!     Argument::new("project:home", Category::Attribute),
//!     Argument::new("+urgent", Category::Tag),
//! ];
//! let expr = Expression::compile(&args).unwrap();
//!
//! let mut task = Task::new(Uuid::nil(), "Fix the gutters");
//! task.project = Some("home".to_string());
//! task.tags = vec!["urgent".to_string()];
//! assert!(expr.matches(&task).unwrap());
//! ```
//!
//! Compilation is pure: it reads only its arguments and produces an
//! immutable [`Expression`] that can be evaluated any number of times.

pub mod args;
pub mod error;
mod eval;
pub mod expression;
pub mod fragments;
pub mod lexer;
pub mod ops;

pub use args::{Argument, Category};
pub use error::{FilterError, FilterResult};
pub use expression::Expression;
pub use fragments::TagSense;
pub use lexer::Lexer;
