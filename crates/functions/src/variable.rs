//! Builtins backed by session state: user-variable assignment and
//! lookup (`@name := v`, `@name`), and the `VALUES(col)` accessor valid
//! inside INSERT statements.

use std::sync::Arc;

use skiffsql_common::types::{DataType, FieldType};
use skiffsql_common::{Error, Result, Row, Value};

use crate::expression::Expr;
use crate::registry::FunctionRegistry;
use crate::scalar::{Arity, FunctionClass, Signature};
use crate::session::Session;

pub(crate) fn register(registry: &mut FunctionRegistry) {
    registry.register(Arc::new(SetVarClass));
    registry.register(Arc::new(GetVarClass));
    registry.register(Arc::new(ValuesClass));
}

fn check_name_arg(func: &str, arg: &Expr) -> Result<()> {
    let ft = arg.field_type();
    if !ft.is_stringy() && ft.data_type != DataType::Unknown {
        return Err(Error::type_mismatch(
            format!("STRING name for '{}'", func),
            ft.data_type.to_string(),
        ));
    }
    Ok(())
}

/// `@name := value` — stores `value` as text under `name` and yields the
/// stored text, so the assignment is itself usable as a value.
#[derive(Debug)]
struct SetVarClass;

impl FunctionClass for SetVarClass {
    fn name(&self) -> &'static str {
        "set_var"
    }

    fn resolve(&self, args: Vec<Expr>) -> Result<Arc<dyn Signature>> {
        Arity::exact(2).check(self.name(), args.len())?;
        check_name_arg(self.name(), &args[0])?;
        Ok(Arc::new(SetVarSig {
            args,
            ret: FieldType::new(DataType::String),
        }))
    }
}

#[derive(Debug)]
struct SetVarSig {
    args: Vec<Expr>,
    ret: FieldType,
}

impl Signature for SetVarSig {
    fn return_type(&self) -> &FieldType {
        &self.ret
    }

    fn eval(&self, session: &Session, row: &Row) -> Result<Value> {
        let name = self.args[0].eval(session, row)?.to_text();
        let value = self.args[1].eval(session, row)?;
        // `to_text` materializes an owned string, so the stored variable
        // cannot alias a reusable row buffer. NULL assigns empty text.
        let text = value.to_text();
        session.vars.set(&name, text.clone());
        Ok(Value::String(text))
    }
}

/// `@name` — the stored text, or empty text for a name never assigned.
#[derive(Debug)]
struct GetVarClass;

impl FunctionClass for GetVarClass {
    fn name(&self) -> &'static str {
        "get_var"
    }

    fn resolve(&self, args: Vec<Expr>) -> Result<Arc<dyn Signature>> {
        Arity::exact(1).check(self.name(), args.len())?;
        check_name_arg(self.name(), &args[0])?;
        Ok(Arc::new(GetVarSig {
            args,
            ret: FieldType::new(DataType::String),
        }))
    }
}

#[derive(Debug)]
struct GetVarSig {
    args: Vec<Expr>,
    ret: FieldType,
}

impl Signature for GetVarSig {
    fn return_type(&self) -> &FieldType {
        &self.ret
    }

    fn eval(&self, session: &Session, row: &Row) -> Result<Value> {
        let name = self.args[0].eval(session, row)?.to_text();
        Ok(Value::String(session.vars.get(&name)))
    }
}

/// `VALUES(col)` — the value at `col` of the row currently being
/// inserted. Outside an INSERT context, or when `col` is beyond the
/// context row, the result is NULL rather than an error.
#[derive(Debug)]
struct ValuesClass;

impl FunctionClass for ValuesClass {
    fn name(&self) -> &'static str {
        "values"
    }

    fn resolve(&self, args: Vec<Expr>) -> Result<Arc<dyn Signature>> {
        Arity::exact(1).check(self.name(), args.len())?;
        let offset = match args[0].as_constant() {
            Some(Value::Int64(v)) if *v >= 0 => *v as usize,
            Some(Value::UInt64(v)) => *v as usize,
            _ => {
                return Err(Error::type_mismatch(
                    "constant column index for 'values'",
                    args[0].field_type().data_type.to_string(),
                ))
            }
        };
        Ok(Arc::new(ValuesSig {
            offset,
            ret: FieldType::new(DataType::Unknown),
        }))
    }
}

#[derive(Debug)]
struct ValuesSig {
    offset: usize,
    ret: FieldType,
}

impl Signature for ValuesSig {
    fn return_type(&self) -> &FieldType {
        &self.ret
    }

    fn eval(&self, session: &Session, _row: &Row) -> Result<Value> {
        match session.insert.current() {
            Some(insert_row) => Ok(insert_row.get(self.offset).cloned().unwrap_or(Value::Null)),
            None => Ok(Value::null()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::registry;

    fn resolve_eval(session: &Session, name: &str, args: Vec<Expr>) -> Value {
        registry()
            .resolve(name, args)
            .unwrap()
            .eval(session, &Row::default())
            .unwrap()
    }

    #[test]
    fn test_set_var_returns_stored_text() {
        let session = Session::new();
        let cases = [
            ("a", Value::string("12"), "12"),
            ("b", Value::string("34"), "34"),
            ("c", Value::null(), ""),
            ("c", Value::string("ABC"), "ABC"),
            ("c", Value::string("dEf"), "dEf"),
        ];
        for (name, value, expected) in cases {
            let result = resolve_eval(
                &session,
                "set_var",
                vec![Expr::constant(Value::string(name)), Expr::constant(value)],
            );
            assert_eq!(result, Value::string(expected));
            assert_eq!(session.vars.get(name), expected);
        }
    }

    #[test]
    fn test_set_var_coerces_numerics_to_text() {
        let session = Session::new();
        let result = resolve_eval(
            &session,
            "set_var",
            vec![
                Expr::constant(Value::string("n")),
                Expr::constant(Value::int64(5)),
            ],
        );
        assert_eq!(result, Value::string("5"));
        assert_eq!(session.vars.get("n"), "5");
    }

    #[test]
    fn test_get_var() {
        let session = Session::new();
        for (key, val) in [("a", "你好"), ("b", "和平chuan"), ("c", "")] {
            session.vars.set(key, val.to_string());
        }
        for (key, expected) in [("a", "你好"), ("b", "和平chuan"), ("c", ""), ("d", "")] {
            let result = resolve_eval(
                &session,
                "get_var",
                vec![Expr::constant(Value::string(key))],
            );
            assert_eq!(result, Value::string(expected));
        }
    }

    #[test]
    fn test_set_var_copies_out_of_row_buffer() {
        let session = Session::new();
        let sig = registry()
            .resolve(
                "set_var",
                vec![
                    Expr::constant(Value::string("a")),
                    Expr::column(0, FieldType::new(DataType::String)),
                ],
            )
            .unwrap();

        let mut row = Row::new(vec![Value::string("a")]);
        assert_eq!(sig.eval(&session, &row).unwrap(), Value::string("a"));

        // Reusing the row buffer must not reach into the stored copy.
        row.set(0, Value::string("b"));
        assert_eq!(session.vars.get("a"), "a");
    }

    #[test]
    fn test_var_name_must_be_stringy() {
        let err = registry()
            .resolve(
                "set_var",
                vec![
                    Expr::constant(Value::int64(1)),
                    Expr::constant(Value::string("v")),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        let err = registry()
            .resolve("get_var", vec![Expr::constant(Value::float64(1.0))])
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_values_arity_message() {
        let err = registry().resolve("values", vec![]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Incorrect parameter count in the call to native function 'values'"
        );
    }

    #[test]
    fn test_values_outside_insert_is_null() {
        let session = Session::new();
        let result = resolve_eval(&session, "values", vec![Expr::constant(Value::int64(0))]);
        assert_eq!(result, Value::null());

        // A pending row without an active INSERT statement stays hidden.
        session.insert.set_row(Row::new(vec![Value::string("1")]));
        let result = resolve_eval(&session, "values", vec![Expr::constant(Value::int64(0))]);
        assert_eq!(result, Value::null());
    }

    #[test]
    fn test_values_reads_insert_row() {
        let session = Session::new();
        session.insert.enter();
        session
            .insert
            .set_row(Row::new(vec![Value::string("1"), Value::string("2")]));

        let result = resolve_eval(&session, "values", vec![Expr::constant(Value::int64(1))]);
        assert_eq!(result, Value::string("2"));

        // Insufficient VALUES context: index beyond the row is NULL.
        let result = resolve_eval(&session, "values", vec![Expr::constant(Value::int64(5))]);
        assert_eq!(result, Value::null());

        session.insert.exit();
        let result = resolve_eval(&session, "values", vec![Expr::constant(Value::int64(1))]);
        assert_eq!(result, Value::null());
    }

    #[test]
    fn test_values_requires_constant_index() {
        let err = registry()
            .resolve(
                "values",
                vec![Expr::column(0, FieldType::new(DataType::Int64))],
            )
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }
}
