use strata_lang_ast::*;
use strata_lang_driver::prelude::int;
use strata_lang_driver::{DriverError, Session};
use strata_lang_elaborator::conversion_checking::AlphaEq;
use strata_lang_elaborator::{FreshNames, NoImports, NormEnv, TypeError, check_program, is_equal_to, normal};
use strata_lang_printer::Print;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn type_error(err: DriverError) -> TypeError {
    match err {
        DriverError::Type(err) => *err,
        other => panic!("expected a type error, got {other}"),
    }
}

fn int_type() -> Term {
    Term::var("int")
}

fn plus(lhs: Term, rhs: Term) -> Term {
    Term::apply_all(Term::var("+"), [lhs, rhs])
}

#[test]
fn universes_are_stratified() {
    init_logging();
    let session = Session::with_prelude();
    for rank in 0..5 {
        let class = check_program(&NoImports, session.checker_env(), &Term::universe(rank)).unwrap();
        assert_eq!(class.universe, Universe::new(rank + 2));
        assert_eq!(*class.typ, TypedTerm::Universe(Universe::new(rank + 1)));
        assert_eq!(class.term, TypedTerm::Universe(Universe::new(rank)));

        let result = session.execute(&Term::universe(rank)).unwrap();
        assert!(result.term.is_absent());
    }
}

#[test]
fn nested_binders_cannot_reuse_a_name() {
    init_logging();
    let session = Session::with_prelude();
    let shadowing = Term::lambda("x", Term::lambda("x", Term::var("x")));
    let typ = Term::arrow(int_type(), Term::arrow(int_type(), int_type()));
    let err = session.execute(&Term::anno(typ, shadowing)).unwrap_err();
    assert_eq!(type_error(err), TypeError::Shadowing { identifier: "x".to_owned() });

    let annotated = Term::lambda_annotated(
        "x",
        int_type(),
        Term::lambda_annotated("x", int_type(), Term::var("x")),
    );
    let err = session.execute(&annotated).unwrap_err();
    assert_eq!(type_error(err), TypeError::Shadowing { identifier: "x".to_owned() });
}

#[test]
fn identity_is_typed_and_evaluated() {
    init_logging();
    let session = Session::with_prelude();
    let id = Term::lambda_annotated("x", int_type(), Term::var("x"));

    let result = session.execute(&id).unwrap();
    assert_eq!(result.typ.print_to_string(None), "int -> int");
    assert!(matches!(result.term, Value::Closure(_)));

    let result = session.execute(&Term::apply(id, int(5))).unwrap();
    assert_eq!(result.term, Value::Int(5));
    assert_eq!(*result.typ, TypedTerm::var("int"));
}

#[test]
fn records_round_trip() {
    init_logging();
    let session = Session::with_prelude();
    let signature = Term::module([("a", int_type()), ("b", int_type())]);
    let value = Term::new_struct([("a", int(1)), ("b", int(2))]);

    let result = session.execute(&Term::access(Term::anno(signature, value.clone()), "b")).unwrap();
    assert_eq!(*result.typ, TypedTerm::var("int"));
    assert_eq!(result.term, Value::Int(2));

    let swapped = Term::module([("b", int_type()), ("a", int_type())]);
    let err = session.execute(&Term::anno(swapped, value)).unwrap_err();
    assert!(matches!(type_error(err), TypeError::MemberNameMismatch { position: 0, .. }));
}

#[test]
fn records_must_define_every_member() {
    let session = Session::with_prelude();
    let signature = Term::module([("a", int_type()), ("b", int_type())]);
    let value = Term::new_struct([("a", int(1))]);
    let err = session.execute(&Term::anno(signature, value)).unwrap_err();
    assert_eq!(type_error(err), TypeError::ArityMismatch { expected: 2, actual: 1 });
}

#[test]
fn equality_ignores_bound_names() {
    init_logging();
    let session = Session::with_prelude();
    let typ = Term::arrow(int_type(), int_type());
    let elaborate = |identifier: &str| {
        let lambda = Term::lambda(identifier, Term::var(identifier));
        check_program(&NoImports, session.checker_env(), &Term::anno(typ.clone(), lambda)).unwrap()
    };
    let id_x = elaborate("x");
    let id_y = elaborate("y");
    assert_ne!(id_x.term, id_y.term);

    let env = NormEnv::empty();
    let nf_x = normal(&id_x, &env, &mut FreshNames::new()).unwrap();
    let nf_y = normal(&id_y, &env, &mut FreshNames::new()).unwrap();
    assert_eq!(nf_x, normal(&id_x, &env, &mut FreshNames::new()).unwrap());
    assert!(nf_x.alpha_eq(&nf_y));
    assert!(is_equal_to(&id_x, &id_y, &env).unwrap());
}

#[test]
fn only_functions_can_be_applied() {
    init_logging();
    let session = Session::with_prelude();
    let err = session.execute(&Term::apply(int(5), int(3))).unwrap_err();
    assert!(matches!(type_error(err), TypeError::ExpectedFunction { .. }));
}

#[test]
fn let_behaves_like_application() {
    init_logging();
    let session = Session::with_prelude();
    for n in [0, 5, -21] {
        let body = || plus(Term::var("x"), Term::var("x"));
        let with_let = session.execute(&Term::let_in("x", int(n), body())).unwrap();
        let with_lambda = session.execute(&Term::apply(Term::lambda("x", body()), int(n))).unwrap();
        assert_eq!(with_let.term, Value::Int(2 * n));
        assert_eq!(with_let, with_lambda);
    }
}

#[test]
fn lambda_operators_check_against_the_expected_type() {
    let session = Session::with_prelude();
    let term = Term::anno(int_type(), Term::apply(Term::lambda("x", plus(Term::var("x"), int(1))), int(5)));
    assert_eq!(session.execute(&term).unwrap().term, Value::Int(6));
}

#[test]
fn definitions_cannot_be_replaced() {
    init_logging();
    let mut session = Session::with_prelude();
    session.define("five", Some(int_type()), int(5)).unwrap();
    let err = session.define("five", None, int(6)).unwrap_err();
    assert_eq!(err, DriverError::Redefinition { name: "five".to_owned() });
    assert_eq!(session.lookup("five").unwrap().term, Value::Int(5));

    let err = session.define("int", None, int(0)).unwrap_err();
    assert_eq!(err, DriverError::Redefinition { name: "int".to_owned() });
}

#[test]
fn definitions_are_checked_against_their_annotation() {
    let mut session = Session::with_prelude();
    let err = session.define("name", Some(int_type()), prelude_string("strata")).unwrap_err();
    assert!(matches!(type_error(err), TypeError::NotEq { .. }));
    assert!(session.lookup("name").is_none());
}

#[test]
fn host_failures_are_runtime_errors() {
    let session = Session::with_prelude();
    let err = session.execute(&plus(int(i64::MAX), int(1))).unwrap_err();
    assert!(matches!(err, DriverError::Runtime(_)));
}

#[test]
fn dependent_functions_take_types() {
    init_logging();
    let mut session = Session::with_prelude();
    let typ = Term::generic("A", Term::arrow(Term::var("A"), Term::var("A")));
    let id = Term::lambda("A", Term::lambda("x", Term::var("x")));
    session.define("id", Some(typ), id).unwrap();

    let result = session.execute(&Term::apply_all(Term::var("id"), [int_type(), int(7)])).unwrap();
    assert_eq!(result.term, Value::Int(7));
    assert_eq!(session.render(&result), "7 : int : Type");
}

fn prelude_string(s: &str) -> Term {
    strata_lang_driver::prelude::string(s)
}
