use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

struct EnvironmentCore {
    store: HashMap<Rc<str>, Rc<Object>>,
    outer: Option<Environment>,
}

/// A shared, mutable scope. Cloning an `Environment` clones the handle, not
/// the bindings: every clone observes the same scope.
///
/// Closures stored in the scope they captured form a reference cycle and are
/// only freed with the process.
#[derive(Clone)]
pub struct Environment {
    environment: Rc<RefCell<EnvironmentCore>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            environment: Rc::new(RefCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: None,
            })),
        }
    }

    pub fn new_enclosed(outer: Environment) -> Environment {
        Environment {
            environment: Rc::new(RefCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: Some(outer),
            })),
        }
    }

    /// Walks the scope chain from the innermost scope outwards.
    pub fn lookup(&self, key: &str) -> Option<Rc<Object>> {
        let env = self.environment.borrow();
        match env.store.get(key) {
            Some(value) => Some(value.clone()),
            None => env.outer.as_ref().and_then(|outer| outer.lookup(key)),
        }
    }

    /// Binds `key` in this scope only, shadowing any outer binding.
    pub fn define(&self, key: Rc<str>, value: Rc<Object>) -> Rc<Object> {
        self.environment
            .borrow_mut()
            .store
            .insert(key, value.clone());
        value
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.environment, &other.environment)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_walks_the_whole_chain() {
        let global = Environment::new();
        global.define("a".into(), Object::integer(1));
        let middle = Environment::new_enclosed(global.clone());
        middle.define("b".into(), Object::integer(2));
        let inner = Environment::new_enclosed(middle.clone());

        assert_eq!(inner.lookup("a"), Some(Object::integer(1)));
        assert_eq!(inner.lookup("b"), Some(Object::integer(2)));
        assert_eq!(inner.lookup("c"), None);
        assert_eq!(global.lookup("b"), None);
    }

    #[test]
    fn test_define_shadows_in_innermost_scope() {
        let global = Environment::new();
        global.define("x".into(), Object::integer(1));
        let inner = Environment::new_enclosed(global.clone());

        let defined = inner.define("x".into(), Object::integer(2));

        assert_eq!(defined, Object::integer(2));
        assert_eq!(inner.lookup("x"), Some(Object::integer(2)));
        assert_eq!(global.lookup("x"), Some(Object::integer(1)));
    }

    #[test]
    fn test_clones_share_bindings() {
        let env = Environment::new();
        let alias = env.clone();
        alias.define("shared".into(), Object::boolean(true));

        assert!(env.ptr_eq(&alias));
        assert_eq!(env.lookup("shared"), Some(Object::boolean(true)));
    }
}
