//! Builtin scalar function resolution and evaluation for SkiffSQL.
//!
//! The planner resolves each function call node once through the
//! [`FunctionRegistry`], obtaining a [`Signature`] specialized for the
//! arguments' coercion domain; the executor then invokes that signature
//! once per row, passing the [`Session`] for the few builtins that touch
//! session state (`SET_VAR`, `GET_VAR`, `VALUES`).

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![allow(missing_docs)]

pub mod expression;
pub mod registry;
pub mod scalar;
pub mod session;

mod other;
mod variable;

pub use expression::Expr;
pub use registry::{registry, FunctionRegistry};
pub use scalar::{Arity, FunctionClass, Signature};
pub use session::{InsertContext, Session, SessionVars};
