//! Resolution through complete scope chains

use std::rc::Rc;

use garnet_scope::{
    ClassScope, Function, FunctionScope, GlobalScope, LocalScope, Param, Resolution, Scope,
    CLASS_FIELD,
};

fn global_scope() -> Rc<GlobalScope> {
    let gs = Rc::new(GlobalScope::new());
    gs.add_global("my_global");
    gs
}

fn func_scope(defining: Scope) -> Scope {
    let f = Function::with_args(None, ["arg1", "arg2", "arg3"], defining);
    FunctionScope::new(f).into()
}

#[test]
fn test_fresh_global_scope_knows_constants() {
    let gs = Rc::new(GlobalScope::new());
    assert_eq!(gs.len(), 3);

    let scope: Scope = gs.clone().into();
    for name in ["true", "false", "nil"] {
        assert!(gs.contains(name));
        assert_eq!(scope.resolve(name), Resolution::GlobalVar(name.to_string()));
    }
}

#[test]
fn test_unknown_global_is_never_global_var() {
    let scope: Scope = global_scope().into();
    for name in ["foo", "Bar", "$baz", "@qux"] {
        assert_eq!(scope.resolve(name), Resolution::PossibleMethodCall(name.to_string()));
    }
}

#[test]
fn test_function_scope_sees_late_globals() {
    let global = Rc::new(GlobalScope::new());
    let fs = func_scope(global.clone().into());

    assert_eq!(fs.resolve("arg3"), Resolution::Arg(2));
    assert_eq!(
        fs.resolve("MY_GLOBAL"),
        Resolution::PossibleMethodCall("MY_GLOBAL".into())
    );

    global.add_global("MY_GLOBAL");
    assert_eq!(fs.resolve("MY_GLOBAL"), Resolution::GlobalVar("MY_GLOBAL".into()));
}

#[test]
fn test_local_scope_chain() {
    let fs = func_scope(global_scope().into());
    let ls: Scope = LocalScope::new([("local1", 0), ("local2", 1)], Some(fs)).into();

    assert_eq!(ls.resolve("local1"), Resolution::LocalVar(0));
    assert_eq!(ls.resolve("local2"), Resolution::LocalVar(1));
    assert_eq!(ls.resolve("arg1"), Resolution::Arg(0));
    assert_eq!(ls.resolve("my_global"), Resolution::GlobalVar("my_global".into()));
    assert_eq!(
        ls.resolve("undefined_arg"),
        Resolution::PossibleMethodCall("undefined_arg".into())
    );
}

#[test]
fn test_parentless_local_scope_yields_address() {
    let ls: Scope = LocalScope::from_names(Vec::<String>::new(), None).into();
    assert_eq!(ls.resolve("some_var"), Resolution::Address("some_var".into()));
}

#[test]
fn test_method_body_in_class() {
    let class = Rc::new(ClassScope::new("Counter", global_scope()));
    class.add_field("@count").unwrap();

    let params = vec![Param::required("step"), Param::rest("rest")];
    let method = Function::new(Some("incr".into()), params, class.clone().into());
    let fs = FunctionScope::new(method);
    assert!(fs.has_rest_parameter());

    let body: Scope = LocalScope::from_names(["old"], Some(fs.into())).into();

    assert_eq!(body.resolve("old"), Resolution::LocalVar(0));
    assert_eq!(body.resolve("step"), Resolution::Arg(0));
    assert_eq!(body.resolve("rest"), Resolution::Arg(1));
    assert_eq!(body.resolve(CLASS_FIELD), Resolution::InstanceVar(0));
    assert_eq!(body.resolve("@count"), Resolution::InstanceVar(1));
    assert_eq!(body.resolve("my_global"), Resolution::GlobalVar("my_global".into()));
    assert_eq!(body.resolve("puts"), Resolution::PossibleMethodCall("puts".into()));

    // Fields added after the method scope exists are still visible
    class.add_field("@limit").unwrap();
    assert_eq!(body.resolve("@limit"), Resolution::InstanceVar(2));
}

#[test]
fn test_class_variable_key_contains_class_and_name() {
    let class: Scope = ClassScope::new("SampleClass", global_scope()).into();
    match class.resolve("@@class_var") {
        Resolution::ClassVarGlobal(key) => {
            assert!(key.contains("SampleClass"));
            assert!(key.contains("class_var"));
            assert!(!key.contains("@@"));
        }
        other => panic!("expected class variable, got {other:?}"),
    }
}

#[test]
fn test_nested_function_uses_defining_scope() {
    let global = global_scope();
    let outer = func_scope(global.into());
    let inner = Function::with_args(None, ["x"], outer);
    let inner: Scope = FunctionScope::new(inner).into();

    assert_eq!(inner.resolve("x"), Resolution::Arg(0));
    assert_eq!(inner.resolve("arg2"), Resolution::Arg(1));
}
