//! Argument expressions as the planner hands them to function
//! resolution: column references, constants, and already-resolved nested
//! calls.

use std::sync::Arc;

use skiffsql_common::types::FieldType;
use skiffsql_common::{Error, Result, Row, Value};

use crate::scalar::Signature;
use crate::session::Session;

#[derive(Debug, Clone)]
pub enum Expr {
    Column { index: usize, field_type: FieldType },
    Constant { value: Value, field_type: FieldType },
    Call(Arc<dyn Signature>),
}

impl Expr {
    pub fn column(index: usize, field_type: FieldType) -> Self {
        Expr::Column { index, field_type }
    }

    /// Constant whose declared type follows the value's own tag.
    pub fn constant(value: Value) -> Self {
        let field_type = value.field_type();
        Expr::Constant { value, field_type }
    }

    pub fn constant_with_type(value: Value, field_type: FieldType) -> Self {
        Expr::Constant { value, field_type }
    }

    pub fn field_type(&self) -> &FieldType {
        match self {
            Expr::Column { field_type, .. } => field_type,
            Expr::Constant { field_type, .. } => field_type,
            Expr::Call(sig) => sig.return_type(),
        }
    }

    /// The constant value bound to this expression, if it is one.
    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            Expr::Constant { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn eval(&self, session: &Session, row: &Row) -> Result<Value> {
        match self {
            Expr::Column { index, .. } => row
                .get(*index)
                .cloned()
                .ok_or_else(|| Error::column_not_found(*index)),
            Expr::Constant { value, .. } => Ok(value.clone()),
            Expr::Call(sig) => sig.eval(session, row),
        }
    }
}
