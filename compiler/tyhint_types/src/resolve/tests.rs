#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::{HintWarningKind, Idx, LookupError, SharedNamespaces};
use pretty_assertions::assert_eq;

#[test]
fn leaves_and_types_pass_through() {
    for hint in [Hint::None, Hint::Any, Hint::Ellipsis, Hint::Type(Idx::INT)] {
        assert_eq!(resolve_hint(&hint), Ok(hint.clone()));
    }
}

#[test]
fn delivered_reference_is_replaced() {
    let p = TypeRef::promised("p");
    p.deliver(Idx::INT);
    assert_eq!(resolve_hint(&Hint::Ref(p)), Ok(Hint::Type(Idx::INT)));
}

#[test]
fn undelivered_reference_is_kept() {
    let p = TypeRef::promised("p");
    assert_eq!(resolve_hint(&Hint::Ref(p.clone())), Ok(Hint::Ref(p)));
}

#[test]
fn chain_ending_unbound_returns_last_link() {
    let a = TypeRef::promised("a");
    let b = TypeRef::promised("b");
    a.deliver(&b);
    assert_eq!(resolve_hint(&Hint::Ref(a)), Ok(Hint::Ref(b)));
}

#[test]
fn targets_are_resolved_again() {
    let inner = TypeRef::promised("inner");
    let outer = TypeRef::promised("outer");
    outer.deliver(Hint::List(vec![Hint::Ref(inner.clone())]));
    inner.deliver(Idx::STR);

    assert_eq!(
        resolve_hint(&Hint::Ref(outer)),
        Ok(Hint::List(vec![Hint::Type(Idx::STR)]))
    );
}

#[test]
fn containers_keep_their_kind() {
    let p = TypeRef::promised("p");
    p.deliver(Idx::FLOAT);

    let tuple = Hint::Tuple(vec![Hint::Ref(p.clone()), Hint::Type(Idx::INT)]);
    assert_eq!(
        resolve_hint(&tuple),
        Ok(Hint::Tuple(vec![Hint::Type(Idx::FLOAT), Hint::Type(Idx::INT)]))
    );

    let list = Hint::List(vec![Hint::Ref(p)]);
    assert_eq!(resolve_hint(&list), Ok(Hint::List(vec![Hint::Type(Idx::FLOAT)])));
}

#[test]
fn callable_keeps_params_and_return_apart() {
    let arg = TypeRef::promised("arg");
    let ret = TypeRef::promised("ret");
    arg.deliver(Idx::INT);
    ret.deliver(Idx::BOOL);

    let hint = Hint::callable([Hint::Ref(arg.clone()), Hint::Type(Idx::STR)], &ret);
    assert_eq!(
        resolve_hint(&hint),
        Ok(Hint::callable(
            [Hint::Type(Idx::INT), Hint::Type(Idx::STR)],
            Idx::BOOL
        ))
    );

    let any = Hint::callable_any(&arg);
    assert_eq!(resolve_hint(&any), Ok(Hint::callable_any(Idx::INT)));
}

#[test]
fn unions_renormalize() {
    let p = TypeRef::promised("p");
    p.deliver(Idx::FLOAT);

    let hint = Hint::union([Hint::Ref(p.clone()), Hint::Type(Idx::FLOAT)]);
    assert_eq!(resolve_hint(&hint), Ok(Hint::Type(Idx::FLOAT)));

    let q = TypeRef::promised("q");
    q.deliver(Hint::union([Hint::Type(Idx::INT), Hint::None]));
    let nested = Hint::union([Hint::Ref(q), Hint::Type(Idx::STR)]);
    assert_eq!(
        resolve_hint(&nested),
        Ok(Hint::union([
            Hint::Type(Idx::INT),
            Hint::None,
            Hint::Type(Idx::STR)
        ]))
    );
}

#[test]
fn generic_and_sequence_arguments() {
    let p = TypeRef::promised("p");
    p.deliver(Idx::BYTES);

    let hint = Hint::generic(
        Idx::DICT,
        [Hint::Type(Idx::STR), Hint::sequence(&p)],
    );
    assert_eq!(
        resolve_hint(&hint),
        Ok(Hint::generic(
            Idx::DICT,
            [Hint::Type(Idx::STR), Hint::sequence(Idx::BYTES)]
        ))
    );
}

#[test]
fn bare_forms_pass_through() {
    let hint = Hint::bare(crate::Form::Callable);
    assert_eq!(resolve_hint(&hint), Ok(hint.clone()));
}

#[test]
fn opaque_warns_once() {
    let mut resolver = HintResolver::default();
    let opaque = Hint::opaque(17_u8);
    let hint = Hint::Tuple(vec![Hint::Type(Idx::INT), opaque.clone()]);

    assert_eq!(resolver.resolve(&hint), Ok(hint.clone()));
    assert_eq!(resolver.warnings().len(), 1);
    let warning = &resolver.warnings()[0];
    assert_eq!(warning.depth, 1);
    assert_eq!(
        warning.kind,
        HintWarningKind::Unrecognized {
            hint: opaque.to_string()
        }
    );

    assert_eq!(resolver.take_warnings().len(), 1);
    assert!(resolver.warnings().is_empty());
}

#[test]
fn opaque_warnings_can_be_disabled() {
    let config = ResolverConfig::default().with_unrecognized_warnings(false);
    let mut resolver = HintResolver::new(config);
    let hint = Hint::opaque("x");
    assert_eq!(resolver.resolve(&hint), Ok(hint.clone()));
    assert!(resolver.warnings().is_empty());
}

#[test]
fn self_delivery_is_a_cycle() {
    let p = TypeRef::promised("p");
    p.deliver(&p);
    assert!(matches!(
        resolve_hint(&Hint::Ref(p)),
        Err(ResolveError::Cycle { .. })
    ));
}

#[test]
fn reference_inside_its_own_target_is_a_cycle() {
    let node = TypeRef::promised("Node");
    node.deliver(Hint::generic(Idx::LIST, [Hint::Ref(node.clone())]));

    assert_eq!(
        resolve_hint(&Hint::Ref(node)),
        Err(ResolveError::Cycle {
            chain: vec!["PromisedType[Node]".into(), "PromisedType[Node]".into()]
        })
    );
}

#[test]
fn repeated_reference_is_not_a_cycle() {
    let p = TypeRef::promised("p");
    p.deliver(Idx::INT);
    let hint = Hint::Tuple(vec![Hint::Ref(p.clone()), Hint::Ref(p)]);
    assert_eq!(
        resolve_hint(&hint),
        Ok(Hint::Tuple(vec![Hint::Type(Idx::INT), Hint::Type(Idx::INT)]))
    );
}

#[test]
fn resolver_is_reusable_after_error() {
    let mut resolver = HintResolver::default();
    let looped = TypeRef::promised("looped");
    looped.deliver(Hint::List(vec![Hint::Ref(looped.clone())]));
    assert!(resolver.resolve(&Hint::Ref(looped)).is_err());

    let fine = TypeRef::promised("fine");
    fine.deliver(Idx::INT);
    assert_eq!(resolver.resolve(&Hint::Ref(fine)), Ok(Hint::Type(Idx::INT)));
}

#[test]
fn depth_limit() {
    let mut hint = Hint::Type(Idx::INT);
    for _ in 0..4 {
        hint = Hint::List(vec![hint]);
    }

    let mut shallow = HintResolver::new(ResolverConfig::default().with_max_depth(3));
    assert_eq!(
        shallow.resolve(&hint),
        Err(ResolveError::DepthExceeded { limit: 3 })
    );

    let mut enough = HintResolver::new(ResolverConfig::default().with_max_depth(4));
    assert_eq!(enough.resolve(&hint), Ok(hint.clone()));
}

#[test]
fn deep_nesting_within_limit() {
    let mut hint = Hint::Type(Idx::INT);
    for _ in 0..1_000 {
        hint = Hint::sequence(hint);
    }
    let mut resolver = HintResolver::new(ResolverConfig::default().with_max_depth(2_000));
    assert_eq!(resolver.resolve(&hint), Ok(hint.clone()));
}

#[test]
fn module_reference_is_retrieved_on_demand() {
    let ns = SharedNamespaces::with_builtins();
    let r = TypeRef::module(ns, "__builtins__", "str").unwrap();
    assert!(!r.is_resolved());

    assert_eq!(resolve_hint(&Hint::Ref(r.clone())), Ok(Hint::Type(Idx::STR)));
    assert!(r.is_resolved());
}

#[test]
fn module_lookup_failure_propagates() {
    let ns = SharedNamespaces::with_builtins();
    let r = TypeRef::module(ns, "builtins", "nope").unwrap();
    assert_eq!(
        resolve_hint(&Hint::Ref(r)),
        Err(ResolveError::Lookup(LookupError::AttributeNotFound {
            module: "builtins".into(),
            attribute: "nope".into()
        }))
    );
}

#[test]
fn allow_fail_module_reference_stays_unbound() {
    let ns = SharedNamespaces::with_builtins();
    let r = TypeRef::module_allow_fail(ns, "plugins", "Widget").unwrap();
    assert_eq!(resolve_hint(&Hint::Ref(r.clone())), Ok(Hint::Ref(r)));
}

#[test]
fn resolution_is_idempotent() {
    let p = TypeRef::promised("p");
    let q = TypeRef::promised("q");
    p.deliver(Hint::union([Hint::Ref(q.clone()), Hint::None]));
    q.deliver(Idx::INT);

    let once = resolve_hint(&Hint::Ref(p)).unwrap();
    assert_eq!(resolve_hint(&once), Ok(once.clone()));
}

#[test]
fn module_reference_behind_a_promise_is_retrieved() {
    let m = TypeRef::module(SharedNamespaces::with_builtins(), "builtins", "int").unwrap();
    let p = TypeRef::promised("p").deliver(&m);

    assert_eq!(resolve_hint(&Hint::Ref(p)), Ok(Hint::Type(Idx::INT)));
    assert!(m.is_resolved());
}

#[test]
fn allow_fail_module_reference_behind_a_promise_stays_unbound() {
    let m = TypeRef::module_allow_fail(SharedNamespaces::with_builtins(), "plugins", "Widget")
        .unwrap();
    let p = TypeRef::promised("p").deliver(&m);

    assert_eq!(resolve_hint(&Hint::Ref(p)), Ok(Hint::Ref(m.clone())));
    assert!(!m.is_resolved());
}

#[test]
fn failing_module_reference_behind_a_promise_propagates() {
    let m = TypeRef::module(SharedNamespaces::with_builtins(), "app", "Model").unwrap();
    let p = TypeRef::promised("p").deliver(&m);

    assert!(matches!(
        resolve_hint(&Hint::Ref(p)),
        Err(ResolveError::Lookup(LookupError::ModuleNotFound { .. }))
    ));
}
