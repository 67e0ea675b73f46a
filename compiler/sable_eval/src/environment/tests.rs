#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use sable_ir::{CallableDef, ParameterList, Span};

use super::*;

fn px(n: f64) -> Value {
    Value::number(n, "px")
}

#[test]
fn test_scope_define_lookup() {
    let mut scope = Scope::new();
    scope.define("x", px(1.0));
    assert_eq!(scope.lookup("x"), Some(px(1.0)));
    assert_eq!(scope.lookup("y"), None);
}

#[test]
fn test_scope_shadowing() {
    let parent = LocalScope::new(Scope::new());
    parent.borrow_mut().define("x", px(1.0));
    let mut child = Scope::with_parent(parent.clone(), false);
    child.define("x", px(2.0));

    assert_eq!(child.lookup("x"), Some(px(2.0)));
    assert_eq!(parent.borrow().lookup("x"), Some(px(1.0)));
}

#[test]
fn test_push_pop() {
    let mut env = Environment::new();
    env.define("x", px(1.0));
    env.push_scope(false);
    env.define("x", px(2.0));
    assert_eq!(env.lookup("x"), Some(px(2.0)));
    env.pop_scope();
    assert_eq!(env.lookup("x"), Some(px(1.0)));

    // The global scope stays put.
    env.pop_scope();
    assert!(env.is_global());
}

#[test]
fn test_assign_updates_nearest_local() {
    let mut env = Environment::new();
    env.push_scope(false);
    env.define("x", px(1.0));
    env.push_scope(false);
    env.assign("x", px(5.0));
    env.pop_scope();
    assert_eq!(env.lookup("x"), Some(px(5.0)));
}

#[test]
fn test_assign_in_rule_shadows_global() {
    let mut env = Environment::new();
    env.define("x", px(1.0));
    env.push_scope(false);
    env.assign("x", px(2.0));
    assert_eq!(env.lookup("x"), Some(px(2.0)));
    env.pop_scope();
    assert_eq!(env.lookup("x"), Some(px(1.0)));
}

#[test]
fn test_assign_in_control_flow_reaches_global() {
    let mut env = Environment::new();
    env.define("x", px(1.0));
    env.push_scope(true);
    env.push_scope(true);
    env.assign("x", px(3.0));
    // New names stay local to the directive.
    env.assign("fresh", px(4.0));
    env.pop_scope();
    env.pop_scope();
    assert_eq!(env.lookup_global("x"), Some(px(3.0)));
    assert_eq!(env.lookup("fresh"), None);
}

#[test]
fn test_global_flag_and_default() {
    let mut env = Environment::new();
    env.push_scope(false);
    env.define_global("g", px(1.0));
    env.assign_default("g", px(9.0), true);
    assert_eq!(env.lookup_global("g"), Some(px(1.0)));

    env.define("n", Value::Null);
    env.assign_default("n", px(2.0), false);
    assert_eq!(env.lookup("n"), Some(px(2.0)));

    env.assign_default("missing", px(3.0), false);
    assert_eq!(env.lookup("missing"), Some(px(3.0)));
}

#[test]
fn test_callables_resolve_through_the_chain() {
    let def = Arc::new(CallableDef {
        name: "double".into(),
        params: ParameterList::default(),
        body: Vec::new(),
        span: Span::DUMMY,
    });
    let mut env = Environment::new();
    env.define_function(Arc::clone(&def));
    env.push_scope(false);

    let found = env.lookup_function("double").unwrap();
    assert_eq!(found.def.name, "double");
    assert!(found.closure().unwrap().ptr_eq(env.global()));
    assert!(env.lookup_mixin("double").is_none());
}

#[test]
fn test_replace_current_restores_chain() {
    let mut env = Environment::new();
    env.push_scope(false);
    env.define("local", px(1.0));
    let callee = LocalScope::new(Scope::with_parent(env.global().clone(), false));
    let saved = env.replace_current(callee);
    assert_eq!(env.lookup("local"), None);
    env.replace_current(saved);
    assert_eq!(env.lookup("local"), Some(px(1.0)));
}
