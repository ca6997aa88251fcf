//! Comparison-shaped builtins: the `IN` membership operator, the `ROW`
//! tuple constructor, and `BIT_COUNT`.

use std::cmp::Ordering;
use std::sync::Arc;

use skiffsql_common::types::compare::{compare, deduce_cmp_domain, CmpDomain};
use skiffsql_common::types::{DataType, FieldType};
use skiffsql_common::{Error, Result, Row, Value};

use crate::expression::Expr;
use crate::registry::FunctionRegistry;
use crate::scalar::{Arity, FunctionClass, Signature};
use crate::session::Session;

pub(crate) fn register(registry: &mut FunctionRegistry) {
    registry.register(Arc::new(InClass));
    registry.register(Arc::new(RowClass));
    registry.register(Arc::new(BitCountClass));
}

/// `x IN (a, b, ...)` — base expression plus one or more candidates.
#[derive(Debug)]
struct InClass;

impl FunctionClass for InClass {
    fn name(&self) -> &'static str {
        "in"
    }

    fn resolve(&self, args: Vec<Expr>) -> Result<Arc<dyn Signature>> {
        Arity::at_least(2).check(self.name(), args.len())?;

        let types: Vec<&FieldType> = args.iter().map(|arg| arg.field_type()).collect();
        let domain = deduce_cmp_domain(&types);
        if domain == CmpDomain::Tuple {
            // Row-wise IN requires every operand to be a tuple of the
            // base's arity; scalars mixed in cannot be compared.
            if let Some(bad) = types.iter().find(|ft| ft.data_type != DataType::Tuple) {
                return Err(Error::type_mismatch("TUPLE", bad.data_type.to_string()));
            }
        }

        Ok(Arc::new(InSig {
            args,
            domain,
            ret: FieldType::new(DataType::Int64).with_display_width(1),
        }))
    }
}

#[derive(Debug)]
struct InSig {
    args: Vec<Expr>,
    domain: CmpDomain,
    ret: FieldType,
}

impl InSig {
    /// One base-vs-candidate comparison in the resolved domain. The pure
    /// integer domains take the direct path; every mixed domain routes
    /// through the cross-domain comparison core.
    fn compare_pair(&self, base: &Value, item: &Value) -> Result<Option<Ordering>> {
        match self.domain {
            CmpDomain::SignedInt => match (base.as_i64(), item.as_i64()) {
                (Some(x), Some(y)) => Ok(Some(x.cmp(&y))),
                _ => compare(base, item),
            },
            CmpDomain::UnsignedInt => match (base.as_u64(), item.as_u64()) {
                (Some(x), Some(y)) => Ok(Some(x.cmp(&y))),
                _ => compare(base, item),
            },
            _ => compare(base, item),
        }
    }
}

impl Signature for InSig {
    fn return_type(&self) -> &FieldType {
        &self.ret
    }

    fn eval(&self, session: &Session, row: &Row) -> Result<Value> {
        let base = self.args[0].eval(session, row)?;
        if base.is_null() {
            return Ok(Value::null());
        }

        let mut has_null = false;
        for item in &self.args[1..] {
            let candidate = item.eval(session, row)?;
            match self.compare_pair(&base, &candidate)? {
                // First equal match wins; later candidates are irrelevant.
                Some(Ordering::Equal) => return Ok(Value::int64(1)),
                Some(_) => {}
                None => has_null = true,
            }
        }

        if has_null {
            // No definite match and at least one unknown: the membership
            // itself is unknown.
            Ok(Value::null())
        } else {
            Ok(Value::int64(0))
        }
    }
}

/// `ROW(a, b, ...)` — builds a fixed-arity tuple from its arguments,
/// preserving each element's own type.
#[derive(Debug)]
struct RowClass;

impl FunctionClass for RowClass {
    fn name(&self) -> &'static str {
        "row"
    }

    fn resolve(&self, args: Vec<Expr>) -> Result<Arc<dyn Signature>> {
        Arity::at_least(2).check(self.name(), args.len())?;
        Ok(Arc::new(RowSig {
            args,
            ret: FieldType::new(DataType::Tuple),
        }))
    }
}

#[derive(Debug)]
struct RowSig {
    args: Vec<Expr>,
    ret: FieldType,
}

impl Signature for RowSig {
    fn return_type(&self) -> &FieldType {
        &self.ret
    }

    fn eval(&self, session: &Session, row: &Row) -> Result<Value> {
        let mut elems = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            elems.push(arg.eval(session, row)?);
        }
        Ok(Value::tuple(elems))
    }
}

/// `BIT_COUNT(n)` — number of one bits in the two's complement form of
/// the integer argument.
#[derive(Debug)]
struct BitCountClass;

impl FunctionClass for BitCountClass {
    fn name(&self) -> &'static str {
        "bit_count"
    }

    fn resolve(&self, args: Vec<Expr>) -> Result<Arc<dyn Signature>> {
        Arity::exact(1).check(self.name(), args.len())?;
        let ft = args[0].field_type();
        if !ft.is_integral() && ft.data_type != DataType::Unknown {
            return Err(Error::type_mismatch("INT64", ft.data_type.to_string()));
        }
        Ok(Arc::new(BitCountSig {
            args,
            ret: FieldType::new(DataType::Int64),
        }))
    }
}

#[derive(Debug)]
struct BitCountSig {
    args: Vec<Expr>,
    ret: FieldType,
}

impl Signature for BitCountSig {
    fn return_type(&self) -> &FieldType {
        &self.ret
    }

    fn eval(&self, session: &Session, row: &Row) -> Result<Value> {
        let value = self.args[0].eval(session, row)?;
        let bits = match value {
            Value::Null => return Ok(Value::null()),
            Value::Int64(v) => (v as u64).count_ones(),
            Value::UInt64(v) => v.count_ones(),
            other => {
                return Err(Error::type_mismatch(
                    "INT64",
                    other.data_type().to_string(),
                ))
            }
        };
        Ok(Value::int64(i64::from(bits)))
    }
}
