//! Session-scoped state read and written by scalar functions: the
//! user-defined variable store behind `@name`, and the transient "row
//! being inserted" slot behind `VALUES(col)`.

use std::sync::RwLock;

use dashmap::DashMap;
use skiffsql_common::Row;

/// User-defined session variables. Values are always text: assignment
/// coerces to a string, and an unset name reads as the empty string.
///
/// The map locks per key, so concurrent `GET_VAR` reads proceed in
/// parallel while a `SET_VAR` write excludes readers of that key — a
/// reader never observes a partially-written value.
#[derive(Debug, Default)]
pub struct SessionVars {
    users: DashMap<String, String>,
}

impl SessionVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored text for `name`, or `""` if the name was never set.
    /// Keys are case-sensitive.
    pub fn get(&self, name: &str) -> String {
        self.users
            .get(name)
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    /// Stores an owned copy of `value` under `name`. The caller keeps no
    /// alias into the stored string.
    pub fn set(&self, name: &str, value: String) {
        self.users.insert(name.to_string(), value);
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }
}

#[derive(Debug, Default)]
struct InsertState {
    active: bool,
    row: Option<Row>,
}

/// Single-slot holder of the row currently being inserted. The statement
/// executor writes it before a row's expressions are evaluated; INSERT
/// rows are evaluated sequentially, so the slot is never written
/// concurrently with reads for the same row.
#[derive(Debug, Default)]
pub struct InsertContext {
    state: RwLock<InsertState>,
}

impl InsertContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the session as being inside an INSERT statement.
    pub fn enter(&self) {
        self.state.write().unwrap().active = true;
    }

    /// Leaves the INSERT statement and drops the pending row.
    pub fn exit(&self) {
        let mut state = self.state.write().unwrap();
        state.active = false;
        state.row = None;
    }

    /// Installs the row whose `VALUES(col)` references are about to be
    /// evaluated.
    pub fn set_row(&self, row: Row) {
        self.state.write().unwrap().row = Some(row);
    }

    /// The current insert row, or `None` when the session is not inside
    /// an INSERT statement or no row has been installed.
    pub fn current(&self) -> Option<Row> {
        let state = self.state.read().unwrap();
        if state.active {
            state.row.clone()
        } else {
            None
        }
    }
}

/// Per-session state shared by all worker threads evaluating rows of the
/// same query. Signatures receive it explicitly on every evaluation call;
/// pure functions simply ignore it.
#[derive(Debug, Default)]
pub struct Session {
    pub vars: SessionVars,
    pub insert: InsertContext,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
