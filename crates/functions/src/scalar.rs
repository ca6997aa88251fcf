//! The function-resolution framework: a `FunctionClass` validates a call
//! site once at plan-build time and produces a `Signature`, the concrete
//! per-call-site evaluator invoked for every row.

use std::fmt::Debug;
use std::sync::Arc;

use skiffsql_common::types::FieldType;
use skiffsql_common::{Result, Row, Value};

use crate::expression::Expr;
use crate::session::Session;

/// A resolved, row-callable evaluator bound to fixed argument
/// expressions and a return type. Immutable after construction and
/// reentrant: many worker threads may evaluate the same signature
/// against different rows concurrently.
pub trait Signature: Debug + Send + Sync {
    fn return_type(&self) -> &FieldType;

    fn eval(&self, session: &Session, row: &Row) -> Result<Value>;
}

/// Builder for one operation: validates argument count and types, deduces
/// the coercion domain, and constructs the domain-specialized signature.
/// Arity and type errors surface here, never during per-row evaluation.
pub trait FunctionClass: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve(&self, args: Vec<Expr>) -> Result<Arc<dyn Signature>>;
}

/// Fixed or variadic argument-count bound of an operation.
#[derive(Debug, Clone, Copy)]
pub struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exact(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    pub const fn at_least(n: usize) -> Self {
        Self { min: n, max: None }
    }

    pub fn check(&self, func: &str, actual: usize) -> Result<()> {
        if actual < self.min || self.max.is_some_and(|max| actual > max) {
            return Err(skiffsql_common::Error::wrong_param_count(func));
        }
        Ok(())
    }
}
