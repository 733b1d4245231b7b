use super::*;
use pretty_assertions::assert_eq;
use yamlate_ir::{Category, ErrorKind, Hash};

fn node(source: &str) -> Value {
    yamlate_parse::parse_str(source).unwrap()
}

fn eval_in(source: &str, env: &mut Environment) -> YamlResult<Value> {
    evaluate(&node(source), env)
}

fn eval(source: &str) -> YamlResult<Value> {
    eval_in(source, &mut Environment::new())
}

fn category(result: YamlResult<Value>) -> Option<Category> {
    result.err().map(|e| e.category())
}

// === Classification ===

#[test]
fn test_classification() {
    assert_eq!(classify(&Value::Integer(1)), Node::Literal);
    assert_eq!(classify(&Value::string("plain")), Node::Literal);
    assert_eq!(classify(&Value::string("$x")), Node::Reference("x"));
    assert_eq!(classify(&Value::string("$not a ref")), Node::Literal);
    assert_eq!(classify(&Value::string(" ~> 1")), Node::Inline(" ~> 1"));

    let op = Value::Array(vec![Value::string("add"), Value::Integer(1)]);
    assert!(matches!(classify(&op), Node::Operation { op: yamlate_ir::Op::Add, .. }));

    let list = Value::Array(vec![Value::string("apple"), Value::Integer(1)]);
    assert!(matches!(classify(&list), Node::Sequence(_)));
    assert!(matches!(classify(&Value::Array(vec![])), Node::Sequence(_)));

    let mut branch = Hash::new();
    branch.insert("if".to_owned(), Value::Boolean(true));
    assert!(matches!(
        classify(&Value::Hash(branch)),
        Node::Branch { form: BranchForm::If, .. }
    ));

    let mut later = Hash::new();
    later.insert("name".to_owned(), Value::Null);
    later.insert("if".to_owned(), Value::Boolean(true));
    assert!(matches!(classify(&Value::Hash(later)), Node::Mapping(_)));
}

// === Literals and references ===

#[test]
fn test_literals_evaluate_to_themselves() {
    assert_eq!(eval("42"), Ok(Value::Integer(42)));
    assert_eq!(eval("2.5"), Ok(Value::Real(2.5)));
    assert_eq!(eval("true"), Ok(Value::Boolean(true)));
    assert_eq!(eval("~"), Ok(Value::Null));
    assert_eq!(eval("spring"), Ok(Value::string("spring")));
}

#[test]
fn test_plain_strings_ignore_environment() {
    let mut env = Environment::new();
    env.set_string("season", "winter");
    assert_eq!(eval_in("season", &mut env), Ok(Value::string("season")));
}

#[test]
fn test_reference_resolves_binding() {
    let mut env = Environment::new();
    env.set_string("season", "spring");
    env.set_decimal("ratio", 0.5);

    assert_eq!(eval_in("$season", &mut env), Ok(Value::string("spring")));
    assert_eq!(eval_in("$ratio", &mut env), Ok(Value::Real(0.5)));
}

#[test]
fn test_unbound_reference_is_not_defined() {
    let err = eval("$missing").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UndefinedVariable { name: "missing".to_owned() });
    assert_eq!(err.code(), yamlate_ir::ErrorCode::NotDefined);
}

#[test]
fn test_collections_evaluate_elementwise() {
    let mut env = Environment::new();
    env.set_integer("n", 4);

    assert_eq!(
        eval_in("[$n, [add, $n, 1], text]", &mut env),
        Ok(Value::Array(vec![
            Value::Integer(4),
            Value::Integer(5),
            Value::string("text"),
        ]))
    );

    let result = eval_in("b: $n\na: [mul, $n, 2]\n", &mut env).unwrap();
    assert_eq!(result.hash_keys(), Ok(vec!["b", "a"]));
    assert_eq!(result.hash_get("a"), Ok(Value::Integer(8)));
}

#[test]
fn test_evaluation_does_not_mutate_node() {
    let tree = node("total: [+, 1, 2]\nname: $who\n");
    let before = tree.clone();
    let mut env = Environment::new();
    env.set_string("who", "cricket");

    let result = evaluate(&tree, &mut env).unwrap();
    assert_eq!(tree, before);
    assert_eq!(result.hash_get("total"), Ok(Value::Integer(3)));
}

// === Operations ===

#[test]
fn test_worked_example() {
    let root = node("blah: 2\nfoo: [+, 5, 5]\n");
    let foo = root.hash_get("foo").unwrap();
    assert_eq!(foo.array_len(), Ok(3));
    assert_eq!(evaluate(&foo, &mut Environment::new()), Ok(Value::Integer(10)));
}

#[test]
fn test_word_and_symbol_spellings_agree() {
    for (word, symbol) in [
        ("add", "'+'"),
        ("sub", "'-'"),
        ("mul", "'*'"),
        ("div", "'/'"),
        ("mod", "'%'"),
        ("pow", "'^'"),
        ("lt", "'<'"),
        ("ge", "'>='"),
        ("ne", "'!='"),
    ] {
        assert_eq!(
            eval(&format!("[{word}, 7, 3]")),
            eval(&format!("[{symbol}, 7, 3]")),
            "{word}"
        );
    }
}

#[test]
fn test_variadic_fold() {
    assert_eq!(eval("[add, 1, 2, 3, 4]"), Ok(Value::Integer(10)));
    assert_eq!(eval("[sub, 10, 1, 2]"), Ok(Value::Integer(7)));
    assert_eq!(eval("[add, a, b, c]"), Ok(Value::string("abc")));
    assert_eq!(eval("[add, 1, 0.5]"), Ok(Value::Real(1.5)));
}

#[test]
fn test_unary_sub_negates() {
    assert_eq!(eval("[sub, 5]"), Ok(Value::Integer(-5)));
}

#[test]
fn test_arity_errors() {
    for source in ["[add, 1]", "[pow, 1, 2, 3]", "[not]", "[if, true]", "[quote, 1, 2]", "[inc]"] {
        let err = eval(source).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ArityMismatch { .. }), "{source}");
        assert_eq!(err.category(), Category::EvalError);
    }
}

#[test]
fn test_operand_errors_carry_position() {
    let err = eval("foo: [+, 1, true]\n").unwrap_err();
    assert_eq!(err.category(), Category::WrongType);
    assert_eq!(err.location(), Some("foo[2]"));
}

#[test]
fn test_comparisons() {
    assert_eq!(eval("[eq, 2, 2.0]"), Ok(Value::Boolean(true)));
    assert_eq!(eval("[eq, '2', 2]"), Ok(Value::Boolean(false)));
    assert_eq!(eval("[lt, apple, banana]"), Ok(Value::Boolean(true)));
    assert_eq!(category(eval("[lt, apple, 1]")), Some(Category::WrongType));
}

#[test]
fn test_logic_short_circuits() {
    let mut env = Environment::new();
    assert_eq!(eval_in("[and, false, [set, x, 1]]", &mut env), Ok(Value::Boolean(false)));
    assert_eq!(eval_in("[or, true, [set, x, 1]]", &mut env), Ok(Value::Boolean(true)));
    assert!(!env.contains("x"));

    assert_eq!(eval("[and, true, true, false]"), Ok(Value::Boolean(false)));
    assert_eq!(eval("[or, false, false]"), Ok(Value::Boolean(false)));
    assert_eq!(eval("[not, false]"), Ok(Value::Boolean(true)));
}

#[test]
fn test_conditions_must_be_boolean() {
    assert_eq!(category(eval("[and, 1, true]")), Some(Category::WrongType));
    assert_eq!(category(eval("[if, yes, 1, 2]")), Some(Category::WrongType));
    assert_eq!(category(eval("[not, 0]")), Some(Category::WrongType));
}

#[test]
fn test_if_operation() {
    assert_eq!(eval("[if, true, a, b]"), Ok(Value::string("a")));
    assert_eq!(eval("[if, [gt, 1, 2], a, b]"), Ok(Value::string("b")));
    assert_eq!(
        eval("[if, false, a]").unwrap_err().kind(),
        &ErrorKind::NoMatchingBranch
    );
}

#[test]
fn test_do_and_quote() {
    assert_eq!(eval("[do, 1, 2, 3]"), Ok(Value::Integer(3)));
    assert_eq!(
        eval("[quote, [add, 1, 2]]"),
        Ok(Value::Array(vec![
            Value::string("add"),
            Value::Integer(1),
            Value::Integer(2),
        ]))
    );
    assert_eq!(eval("[quote, $unbound]"), Ok(Value::string("$unbound")));
}

// === Environment operations ===

#[test]
fn test_operands_observe_earlier_mutations() {
    let mut env = Environment::new();
    assert_eq!(
        eval_in("[do, [set, x, 1], [add, $x, 1]]", &mut env),
        Ok(Value::Integer(2))
    );
    assert_eq!(env.get_integer("x"), Ok(1));
}

#[test]
fn test_set_and_defined() {
    let mut env = Environment::new();
    assert_eq!(eval_in("[defined, color]", &mut env), Ok(Value::Boolean(false)));
    assert_eq!(eval_in("[set, $color, red]", &mut env), Ok(Value::string("red")));
    assert_eq!(eval_in("[defined, $color]", &mut env), Ok(Value::Boolean(true)));
    assert_eq!(env.get_string("color"), Ok("red"));
}

#[test]
fn test_set_rejects_unbindable_values() {
    let err = eval("[set, x, [1, 2]]").unwrap_err();
    assert_eq!(err.category(), Category::WrongType);
    assert_eq!(err.location(), Some("[2]"));
}

#[test]
fn test_name_operands_are_literal() {
    for source in ["[set, 1, 2]", "[inc, 'two words']", "[defined, [quote, x]]", "[consume, '']"] {
        let err = eval(source).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidTarget { .. }), "{source}");
        assert_eq!(err.category(), Category::EvalError);
    }
}

#[test]
fn test_inc_and_dec() {
    let mut env = Environment::new();
    env.set_integer("count", 5);

    assert_eq!(eval_in("[inc, count]", &mut env), Ok(Value::Integer(6)));
    assert_eq!(eval_in("[dec, count, 4]", &mut env), Ok(Value::Integer(2)));
    assert_eq!(eval_in("[inc, $count, [mul, 2, 5]]", &mut env), Ok(Value::Integer(12)));
    assert_eq!(env.get_integer("count"), Ok(12));
}

#[test]
fn test_inc_errors() {
    let mut env = Environment::new();
    env.set_string("name", "x");
    env.set_integer("big", i64::MAX);

    assert_eq!(category(eval_in("[inc, missing]", &mut env)), Some(Category::NotDefined));
    assert_eq!(category(eval_in("[inc, name]", &mut env)), Some(Category::WrongType));
    assert_eq!(category(eval_in("[inc, big]", &mut env)), Some(Category::EvalError));
    assert_eq!(category(eval_in("[dec, big, 0.5]", &mut env)), Some(Category::WrongType));
    assert_eq!(env.get_integer("big"), Ok(i64::MAX));
}

#[test]
fn test_consume() {
    let mut env = Environment::new();
    env.set_integer("tokens", 1);

    assert_eq!(eval_in("[consume, tokens]", &mut env), Ok(Value::Boolean(true)));
    assert_eq!(env.get_integer("tokens"), Ok(0));
    assert_eq!(eval_in("[consume, tokens]", &mut env), Ok(Value::Boolean(false)));
    assert_eq!(env.get_integer("tokens"), Ok(0));

    env.set_integer("tokens", -3);
    assert_eq!(eval_in("[consume, tokens]", &mut env), Ok(Value::Boolean(false)));
    assert_eq!(env.get_integer("tokens"), Ok(-3));

    assert_eq!(category(eval_in("[consume, nothing]", &mut env)), Some(Category::NotDefined));
}

#[test]
fn test_mutation_is_not_rolled_back() {
    let mut env = Environment::new();
    let err = eval_in("[do, [set, x, 1], [div, 1, 0]]", &mut env).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DivisionByZero);
    assert_eq!(err.location(), Some("[2][2]"));
    assert_eq!(env.get_integer("x"), Ok(1));
}

// === Branch forms ===

const SEASONS: &str = "
case: $season
spring: red
summer: [add, gre, en]
winter: $undefined
default: brown
";

#[test]
fn test_case_selects_label() {
    let mut env = Environment::new();
    env.set_string("season", "spring");
    assert_eq!(eval_in(SEASONS, &mut env), Ok(Value::string("red")));

    env.set_string("season", "summer");
    assert_eq!(eval_in(SEASONS, &mut env), Ok(Value::string("green")));
}

#[test]
fn test_case_falls_back_to_default() {
    let mut env = Environment::new();
    env.set_string("season", "autumn");
    assert_eq!(eval_in(SEASONS, &mut env), Ok(Value::string("brown")));
}

#[test]
fn test_case_evaluates_only_selected_branch() {
    let mut env = Environment::new();
    env.set_string("season", "winter");
    let err = eval_in(SEASONS, &mut env).unwrap_err();
    assert_eq!(err.location(), Some("winter"));
}

#[test]
fn test_case_without_match_or_default() {
    let err = eval("{case: x, a: 1}").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NoMatchingBranch);
}

#[test]
fn test_case_subject_kinds() {
    assert_eq!(eval("{case: [add, 1, 1], 1: one, 2: two}"), Ok(Value::string("two")));
    assert_eq!(eval("{case: [eq, 1, 1], true: yes, false: no}"), Ok(Value::string("yes")));
    assert_eq!(category(eval("{case: 1.5, 1.5: x}")), Some(Category::WrongType));
}

#[test]
fn test_when_form() {
    let source = "
when:
  - [[lt, $n, 0], negative]
  - [[eq, $n, 0], zero]
else: positive
";
    let mut env = Environment::new();
    for (n, expected) in [(-4, "negative"), (0, "zero"), (9, "positive")] {
        env.set_integer("n", n);
        assert_eq!(eval_in(source, &mut env), Ok(Value::string(expected)));
    }
}

#[test]
fn test_when_without_else() {
    let err = eval("{when: [[false, a]]}").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NoMatchingBranch);
}

#[test]
fn test_when_is_validated_before_evaluation() {
    let mut env = Environment::new();
    let err = eval_in("{when: [[[set, x, 1], a], [b]]}", &mut env).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MalformedForm { form: "when", .. }));
    assert!(!env.contains("x"));

    let err = eval("{when: [[true, a]], otherwise: b}").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MalformedForm { .. }));
}

#[test]
fn test_when_condition_location() {
    let err = eval("{when: [[true, [add, 1, x]]]}").unwrap_err();
    assert_eq!(err.location(), Some("when[0][1][2]"));
}

#[test]
fn test_if_form() {
    assert_eq!(eval("{if: true, then: a, else: b}"), Ok(Value::string("a")));
    assert_eq!(eval("{if: [not, true], then: a, else: b}"), Ok(Value::string("b")));
    assert_eq!(
        eval("{if: false, then: a}").unwrap_err().kind(),
        &ErrorKind::NoMatchingBranch
    );
    assert!(matches!(
        eval("{if: true, else: b}").unwrap_err().kind(),
        ErrorKind::MalformedForm { .. }
    ));
    assert!(matches!(
        eval("{if: true, then: a, otherwise: b}").unwrap_err().kind(),
        ErrorKind::MalformedForm { .. }
    ));
}

// === Inline expressions ===

#[test]
fn test_inline_arithmetic() {
    assert_eq!(eval("'~> 1 + 2 * 3'"), Ok(Value::Integer(7)));
    assert_eq!(eval("'~> (1 + 2) * 3'"), Ok(Value::Integer(9)));
    assert_eq!(eval("'~> 2 ^ 3 ^ 2'"), Ok(Value::Integer(512)));
    assert_eq!(eval("'~> 7 % 4 + 1.5'"), Ok(Value::Real(4.5)));
    assert_eq!(eval(r#"'~> "wing" + "_color"'"#), Ok(Value::string("wing_color")));
}

#[test]
fn test_inline_declare_and_assign() {
    let mut env = Environment::new();
    assert_eq!(eval_in("'~> x := 5'", &mut env), Ok(Value::Integer(5)));
    assert_eq!(eval_in("'~> x = x * 2'", &mut env), Ok(Value::Integer(10)));
    assert_eq!(env.get_integer("x"), Ok(10));
    assert_eq!(eval_in("'~> $x == 10'", &mut env), Ok(Value::Boolean(true)));
}

#[test]
fn test_inline_assign_requires_binding() {
    let mut env = Environment::new();
    let err = eval_in("'~> y = 1'", &mut env).unwrap_err();
    assert_eq!(err.category(), Category::NotDefined);
    assert!(!env.contains("y"));
}

#[test]
fn test_inline_assign_requires_bindable_value() {
    let mut env = Environment::new();
    env.set_integer("flag", 0);
    assert_eq!(category(eval_in("'~> flag = true'", &mut env)), Some(Category::WrongType));
    assert_eq!(env.get_integer("flag"), Ok(0));
}

#[test]
fn test_inline_logic() {
    let mut env = Environment::new();
    env.set_integer("n", 3);
    assert_eq!(eval_in("'~> n > 1 && n < 5'", &mut env), Ok(Value::Boolean(true)));
    assert_eq!(eval_in("'~> !(n == 3) || false'", &mut env), Ok(Value::Boolean(false)));
    // Right side never runs, so the unbound name is not an error
    assert_eq!(eval_in("'~> false && missing'", &mut env), Ok(Value::Boolean(false)));
    assert_eq!(category(eval_in("'~> 1 && true'", &mut env)), Some(Category::WrongType));
}

#[test]
fn test_inline_unbound_identifier() {
    assert_eq!(category(eval("'~> ghost + 1'")), Some(Category::NotDefined));
}

#[test]
fn test_evaluate_inline_entry_point() {
    let mut env = Environment::new();
    let evaluator = Evaluator::new();
    assert_eq!(evaluator.evaluate_inline("2 * 21", &mut env), Ok(Value::Integer(42)));
    assert_eq!(
        category(evaluator.evaluate_inline("2 *", &mut env)),
        Some(Category::InvalidString)
    );
}

// === Limits ===

#[test]
fn test_depth_limit() {
    let evaluator = Evaluator::builder().max_depth(4).build();
    assert_eq!(evaluator.max_depth(), 4);

    let shallow = node("[[[1]]]");
    assert!(evaluator.evaluate(&shallow, &mut Environment::new()).is_ok());

    let deep = node("[[[[[1]]]]]");
    let err = evaluator.evaluate(&deep, &mut Environment::new()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimit { limit: 4 });
    assert_eq!(err.category(), Category::EvalError);
}

#[test]
fn test_default_depth_allows_deep_documents() {
    assert_eq!(Evaluator::new().max_depth(), DEFAULT_MAX_DEPTH);

    let mut tree = Value::Integer(1);
    for _ in 0..500 {
        tree = Value::Array(vec![Value::string("do"), tree]);
    }
    assert_eq!(evaluate(&tree, &mut Environment::new()), Ok(Value::Integer(1)));
}

#[test]
fn test_depth_limit_covers_inline_expressions() {
    let evaluator = Evaluator::builder().max_depth(8).build();
    let text = format!("~> {}1{}", "-(".repeat(10), ")".repeat(10));
    let err = evaluator
        .evaluate(&Value::string(text), &mut Environment::new())
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DepthLimit { limit: 8 });
}

mod proptest_eval {
    use super::*;
    use proptest::prelude::*;

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i64>().prop_map(Value::Integer),
            any::<f64>()
                .prop_filter("NaN never equals itself", |r| !r.is_nan())
                .prop_map(Value::Real),
            any::<bool>().prop_map(Value::Boolean),
            Just(Value::Null),
            "[a-zA-Z0-9 _.,]{0,16}".prop_map(Value::String),
        ]
    }

    fn literal_tree() -> impl Strategy<Value = Value> {
        scalar().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                // A leading non-operator element keeps the array a literal
                prop::collection::vec(inner.clone(), 0..4).prop_map(|mut items| {
                    items.insert(0, Value::Integer(0));
                    Value::Array(items)
                }),
                prop::collection::vec(("[x-z][0-9]", inner), 0..4).prop_map(|entries| {
                    let mut hash = Hash::new();
                    for (key, value) in entries {
                        hash.insert(key, value);
                    }
                    Value::Hash(hash)
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn literals_round_trip(value in literal_tree()) {
            let mut env = Environment::new();
            prop_assert_eq!(evaluate(&value, &mut env), Ok(value));
            prop_assert!(env.is_empty());
        }

        #[test]
        fn integer_addition_matches_checked_add(a in any::<i64>(), b in any::<i64>()) {
            let node = Value::Array(vec![Value::string("+"), Value::Integer(a), Value::Integer(b)]);
            let result = evaluate(&node, &mut Environment::new());
            match a.checked_add(b) {
                Some(sum) => prop_assert_eq!(result, Ok(Value::Integer(sum))),
                None => prop_assert_eq!(result.err().map(|e| e.category()), Some(Category::EvalError)),
            }
        }

        #[test]
        fn references_follow_bindings(name in "[a-z_][a-z0-9_]{0,10}", n in any::<i64>()) {
            let mut env = Environment::new();
            env.set_integer(name.as_str(), n);
            let reference = Value::String(format!("${name}"));
            prop_assert_eq!(evaluate(&reference, &mut env), Ok(Value::Integer(n)));
        }
    }
}
