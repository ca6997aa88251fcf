//! SkiffSQL - the scalar expression evaluation core of a SQL engine
//! (MySQL dialect).
//!
//! This workspace implements the builtin-function subsystem that turns a
//! parsed function call into a type-specialized, row-callable evaluator:
//!
//! ```text
//! Expression tree → FunctionRegistry::resolve (once, at plan build)
//!                 → Signature::eval (once per row, with the Session)
//! ```
//!
//! Resolution validates argument count and types and deduces the single
//! coercion domain of the call; evaluation applies null-aware
//! three-valued logic, including exact mixed signed/unsigned integer
//! comparison. The only mutable state reachable from evaluation is the
//! per-session user-variable store and the INSERT row context.
//!
//! # Example
//!
//! ```rust
//! use skiffsql::{registry, Expr, Row, Session, Value};
//!
//! let session = Session::new();
//! let sig = registry()
//!     .resolve(
//!         "in",
//!         vec![
//!             Expr::constant(Value::int64(1)),
//!             Expr::constant(Value::int64(1)),
//!             Expr::constant(Value::int64(2)),
//!         ],
//!     )
//!     .unwrap();
//! assert_eq!(sig.eval(&session, &Row::default()).unwrap(), Value::int64(1));
//! ```

pub use skiffsql_common::error::{Error, Result};
pub use skiffsql_common::result::Row;
pub use skiffsql_common::types::compare::{compare, deduce_cmp_domain, CmpDomain};
pub use skiffsql_common::types::{DataType, FieldType, Value};
pub use skiffsql_functions::{
    registry, Arity, Expr, FunctionClass, FunctionRegistry, InsertContext, Session, SessionVars,
    Signature,
};
