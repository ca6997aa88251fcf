//! Process-wide builtin function table. Built once, never mutated
//! afterward; lookups need no locking.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use debug_print::debug_eprintln;
use skiffsql_common::{Error, Result};

use crate::expression::Expr;
use crate::scalar::{FunctionClass, Signature};
use crate::{other, variable};

static REGISTRY: LazyLock<FunctionRegistry> = LazyLock::new(FunctionRegistry::new);

/// The shared immutable registry instance.
pub fn registry() -> &'static FunctionRegistry {
    &REGISTRY
}

/// Mapping from function identifier to its class. Identifiers are stored
/// lowercase; lookups fold the requested name the same way.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    classes: HashMap<&'static str, Arc<dyn FunctionClass>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_builtins();
        registry
    }

    fn register_builtins(&mut self) {
        other::register(self);
        variable::register(self);
    }

    pub fn register(&mut self, class: Arc<dyn FunctionClass>) {
        self.classes.insert(class.name(), class);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn FunctionClass>> {
        self.classes.get(name.to_lowercase().as_str()).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.classes.contains_key(name.to_lowercase().as_str())
    }

    /// Resolves a call site to its concrete evaluator. All argument
    /// validation and domain deduction happens here, once per call site;
    /// per-row evaluation never revisits it.
    pub fn resolve(&self, name: &str, args: Vec<Expr>) -> Result<Arc<dyn Signature>> {
        let class = self
            .get(name)
            .ok_or_else(|| Error::function_not_found(name))?;
        debug_eprintln!(
            "[functions::registry] resolving '{}' with {} args",
            class.name(),
            args.len()
        );
        class.resolve(args)
    }
}
