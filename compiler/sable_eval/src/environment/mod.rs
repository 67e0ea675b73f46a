//! Lexical scopes for variables, mixins and functions.
//!
//! Scopes form a parent chain ending at the global scope. Style rules,
//! mixin and function bodies get ordinary scopes; control directives
//! (`@if`, `@each`, `@for`, `@while`) get semi-global ones, through which an
//! assignment can reach an existing global variable.
//!
//! Callables keep only a weak handle to the scope they were defined in, so
//! a scope holding its own definitions does not form a reference cycle.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use sable_ir::CallableDef;
use sable_value::Value;

/// A single-threaded scope handle with shared interior mutability.
///
/// All scope allocations go through [`LocalScope::new`]. Evaluation runs on
/// one thread, so `Rc` is enough.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// A handle that does not keep the scope alive.
    pub fn downgrade(&self) -> WeakScope<T> {
        WeakScope(Rc::downgrade(&self.0))
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Weak counterpart of [`LocalScope`].
pub struct WeakScope<T>(Weak<RefCell<T>>);

impl<T> WeakScope<T> {
    pub fn upgrade(&self) -> Option<LocalScope<T>> {
        self.0.upgrade().map(LocalScope)
    }
}

impl<T> Clone for WeakScope<T> {
    fn clone(&self) -> Self {
        WeakScope(Weak::clone(&self.0))
    }
}

impl<T> fmt::Debug for WeakScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakScope")
    }
}

/// A user-defined mixin or function together with its defining scope.
#[derive(Clone, Debug)]
pub struct UserCallable {
    pub def: Arc<CallableDef>,
    closure: WeakScope<Scope>,
}

impl UserCallable {
    pub fn new(def: Arc<CallableDef>, closure: &LocalScope<Scope>) -> Self {
        UserCallable {
            def,
            closure: closure.downgrade(),
        }
    }

    /// The defining scope, if it is still alive.
    ///
    /// A callable is only reachable through a lookup that walked its
    /// defining scope, so this is `None` only for a stale handle.
    pub fn closure(&self) -> Option<LocalScope<Scope>> {
        self.closure.upgrade()
    }
}

/// A single scope of bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    variables: FxHashMap<String, Value>,
    mixins: FxHashMap<String, UserCallable>,
    functions: FxHashMap<String, UserCallable>,
    parent: Option<LocalScope<Scope>>,
    /// Control-directive scope: assignments may fall through to globals.
    semi_global: bool,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>, semi_global: bool) -> Self {
        Scope {
            parent: Some(parent),
            semi_global,
            ..Self::default()
        }
    }

    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }

    #[inline]
    pub fn define(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_owned(), value);
    }

    /// The binding in this scope only.
    pub fn local(&self, name: &str) -> Option<Value> {
        self.variables.get(name).cloned()
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.variables.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    pub fn define_mixin(&mut self, callable: UserCallable) {
        self.mixins.insert(callable.def.name.clone(), callable);
    }

    pub fn define_function(&mut self, callable: UserCallable) {
        self.functions.insert(callable.def.name.clone(), callable);
    }

    pub fn lookup_mixin(&self, name: &str) -> Option<UserCallable> {
        if let Some(mixin) = self.mixins.get(name) {
            return Some(mixin.clone());
        }
        self.parent.as_ref()?.borrow().lookup_mixin(name)
    }

    pub fn lookup_function(&self, name: &str) -> Option<UserCallable> {
        if let Some(function) = self.functions.get(name) {
            return Some(function.clone());
        }
        self.parent.as_ref()?.borrow().lookup_function(name)
    }
}

/// The scope chain of a running evaluation.
///
/// `current` moves when a block is entered; calls replace the whole chain
/// with one rooted at the callee's defining scope and restore it afterwards.
pub struct Environment {
    global: LocalScope<Scope>,
    current: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            current: global.clone(),
            global,
        }
    }

    pub fn global(&self) -> &LocalScope<Scope> {
        &self.global
    }

    pub fn current(&self) -> &LocalScope<Scope> {
        &self.current
    }

    pub fn is_global(&self) -> bool {
        self.current.ptr_eq(&self.global)
    }

    /// Enter a child of the current scope.
    pub fn push_scope(&mut self, semi_global: bool) {
        let child = Scope::with_parent(self.current.clone(), semi_global);
        self.current = LocalScope::new(child);
    }

    /// Leave the current scope. The global scope is never popped.
    pub fn pop_scope(&mut self) {
        let parent = self.current.borrow().parent.clone();
        if let Some(parent) = parent {
            self.current = parent;
        }
    }

    /// Make `scope` current, returning the scope to restore later.
    pub fn replace_current(&mut self, scope: LocalScope<Scope>) -> LocalScope<Scope> {
        std::mem::replace(&mut self.current, scope)
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.current.borrow().lookup(name)
    }

    pub fn lookup_global(&self, name: &str) -> Option<Value> {
        self.global.borrow().local(name)
    }

    /// Bind `name` in the current scope, shadowing outer bindings.
    pub fn define(&mut self, name: &str, value: Value) {
        self.current.borrow_mut().define(name, value);
    }

    pub fn define_global(&mut self, name: &str, value: Value) {
        self.global.borrow_mut().define(name, value);
    }

    /// `$name: value` without `!global`.
    ///
    /// Updates the nearest local binding. Failing that, a chain made only of
    /// control-directive scopes updates an existing global; anything else
    /// defines the variable in the current scope.
    pub fn assign(&mut self, name: &str, value: Value) {
        let mut scope = self.current.clone();
        let mut only_semi_global = true;
        loop {
            if scope.ptr_eq(&self.global) {
                if only_semi_global && self.global.borrow().variables.contains_key(name) {
                    self.define_global(name, value);
                    return;
                }
                break;
            }
            if scope.borrow().variables.contains_key(name) {
                scope.borrow_mut().define(name, value);
                return;
            }
            only_semi_global &= scope.borrow().semi_global;
            let parent = scope.borrow().parent.clone();
            match parent {
                Some(parent) => scope = parent,
                None => break,
            }
        }
        self.define(name, value);
    }

    /// `$name: value !default`: assign only when unset or `null`.
    pub fn assign_default(&mut self, name: &str, value: Value, global: bool) {
        let existing = if global {
            self.lookup_global(name)
        } else {
            self.lookup(name)
        };
        if existing.is_some_and(|v| !v.is_null()) {
            return;
        }
        if global {
            self.define_global(name, value);
        } else {
            self.assign(name, value);
        }
    }

    pub fn define_mixin(&mut self, def: Arc<CallableDef>) {
        let callable = UserCallable::new(def, &self.current);
        self.current.borrow_mut().define_mixin(callable);
    }

    pub fn define_function(&mut self, def: Arc<CallableDef>) {
        let callable = UserCallable::new(def, &self.current);
        self.current.borrow_mut().define_function(callable);
    }

    pub fn lookup_mixin(&self, name: &str) -> Option<UserCallable> {
        self.current.borrow().lookup_mixin(name)
    }

    pub fn lookup_function(&self, name: &str) -> Option<UserCallable> {
        self.current.borrow().lookup_function(name)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
