//! Task record model and sync addressing for tasklens.
//!
//! This crate holds the data the filter engine operates on: the [`Task`]
//! record with its typed attribute accessors, the [`Value`] type used for
//! attribute comparison, the injected [`ConfigLookup`] capability, and the
//! [`Locator`] parser for remote sync addresses.

pub mod config;
pub mod locator;
pub mod task;
pub mod value;

pub use config::{ConfigLookup, MapConfig};
pub use locator::{Locator, LocatorError};
pub use task::Task;
pub use value::Value;
