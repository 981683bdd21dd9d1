use super::*;
use crate::{Form, TypeRef};
use pretty_assertions::assert_eq;

#[test]
fn builtins_use_their_names() {
    let pool = Pool::new();
    assert_eq!(pool.format_type(Idx::INT), "int");
    assert_eq!(pool.format_type(Idx::NONE_TYPE), "NoneType");
    assert_eq!(pool.format_type(Idx::FROZENSET), "frozenset");
}

#[test]
fn classes_are_module_qualified() {
    let mut pool = Pool::new();
    let model = pool.class("app.models", "User");
    assert_eq!(pool.format_type(model), "app.models.User");
}

#[test]
fn unknown_index() {
    let pool = Pool::new();
    assert_eq!(pool.format_type(Idx::from_raw(500)), "<unknown type#500>");
}

#[test]
fn nested_hint() {
    let mut pool = Pool::new();
    let user = pool.class("app", "User");
    let hint = Hint::callable(
        [Hint::generic(Idx::LIST, [Hint::Type(user)]), Hint::Any],
        Hint::union([Hint::Type(Idx::INT), Hint::None]),
    );
    assert_eq!(
        pool.format_hint(&hint),
        "Callable[[list[app.User], Any], Union[int, None]]"
    );
}

#[test]
fn references_and_forms() {
    let pool = Pool::new();
    let node = TypeRef::promised("Node");
    let hint = Hint::Tuple(vec![Hint::Ref(node), Hint::bare(Form::Callable)]);
    assert_eq!(pool.format_hint(&hint), "(PromisedType[Node], Callable)");
}

#[test]
fn matches_display_for_builtins() {
    let pool = Pool::new();
    let hint = Hint::sequence(Hint::tuple_type([Hint::Type(Idx::STR), Hint::Ellipsis]));
    assert_eq!(pool.format_hint(&hint), hint.to_string());
}
