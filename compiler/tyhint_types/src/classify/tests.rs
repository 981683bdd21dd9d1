use super::*;
use crate::{Form, Idx, TypeRef};

#[test]
fn unions_and_bare_forms_are_expressions() {
    assert!(is_type_expression(&Hint::union([
        Idx::INT.into(),
        Idx::FLOAT.into()
    ])));
    assert!(is_type_expression(&Hint::bare(Form::Callable)));
    assert!(is_type_expression(&Hint::callable_any(Idx::INT)));
    assert!(is_type_expression(&Hint::generic(Idx::LIST, [Idx::INT.into()])));
}

#[test]
fn other_shapes_are_not_expressions() {
    assert!(!is_type_expression(&Hint::Type(Idx::INT)));
    assert!(!is_type_expression(&Hint::None));
    assert!(!is_type_expression(&TypeRef::promised("T").into()));
    assert!(!is_type_expression(&Hint::Tuple(vec![Idx::INT.into()])));
    assert!(!is_type_expression(&Hint::opaque(String::from("x"))));
}

#[test]
fn union_collapsing_to_a_type_is_not_an_expression() {
    let hint = Hint::union([Idx::INT.into(), Idx::INT.into()]);
    assert_eq!(classify(&hint), HintKind::Concrete);
}

#[test]
fn classify_each_variant() {
    assert_eq!(classify(&Hint::Ellipsis), HintKind::Leaf);
    assert_eq!(classify(&Hint::Any), HintKind::Leaf);
    assert_eq!(classify(&Hint::Type(Idx::STR)), HintKind::Concrete);
    assert_eq!(
        classify(&TypeRef::resolvable("T").into()),
        HintKind::Reference
    );
    assert_eq!(classify(&Hint::List(Vec::new())), HintKind::Container);
    assert_eq!(classify(&Hint::sequence(Idx::INT)), HintKind::Expression);
    assert_eq!(classify(&Hint::opaque(1_i32)), HintKind::Opaque);
    assert_eq!(HintKind::Opaque.as_str(), "opaque");
}

#[test]
fn finds_references_at_depth() {
    let t = TypeRef::promised("T").deliver(Idx::INT);
    let nested = Hint::union([
        Idx::STR.into(),
        Hint::callable([Idx::FLOAT.into()], Hint::List(vec![t.into()])),
    ]);
    assert!(contains_references(&nested));

    let plain = Hint::union([
        Idx::STR.into(),
        Hint::callable([Idx::FLOAT.into()], Hint::List(vec![Idx::INT.into()])),
    ]);
    assert!(!contains_references(&plain));
    assert!(!contains_references(&Hint::callable_any(Hint::Ellipsis)));
}
