use proptest::prelude::*;

use super::*;

fn calc_showing(text: &str) -> Calculator<()> {
    let mut calc = Calculator::with_hook(());
    calc.append(text);
    calc
}

/// Feeds `tokens` to a fresh calculator and returns the display.
fn press(tokens: &[&str]) -> String {
    let mut calc = Calculator::with_hook(());
    for token in tokens {
        calc.handle_token(token);
    }
    calc.display().to_owned()
}

#[test]
fn division_by_zero_is_not_a_number() {
    let mut calc = Calculator::with_hook(());
    calc.evaluate("1/0");
    assert_eq!(calc.display(), "Not a number");
    assert_eq!(press(&["0", "/", "0", "="]), "Not a number");
    assert_eq!(press(&["7", "/", "/", "0", "="]), "Not a number");
}

#[test]
fn incomplete_expression_is_invalid() {
    let mut calc = Calculator::with_hook(());
    assert_eq!(calc.evaluate("2+"), Outcome::Rejected(Fault::InvalidInput));
    assert_eq!(calc.display(), "Invalid Input");
    assert_eq!(press(&["="]), "Invalid Input");
    assert_eq!(press(&["(", "1", "="]), "Invalid Input");
    assert_eq!(press(&["0", "7", "="]), "Invalid Input");
    assert_eq!(press(&["1", ".", "2", ".", "3", "="]), "Invalid Input");
}

#[test]
fn square_root() {
    let mut calc = calc_showing("-4");
    calc.apply_unary(Unary::Sqrt, Mode::Real);
    assert_eq!(calc.display(), "Not a number");

    let mut calc = calc_showing("9");
    calc.apply_unary(Unary::Sqrt, Mode::Real);
    assert_eq!(calc.display(), "3");
}

#[test]
fn cube_root_rejects_negatives() {
    assert_eq!(press(&["-", "8", "3√"]), "Not a number");
    assert_eq!(press(&["8", "3√"]), "2");
}

#[test]
fn factorial() {
    let mut calc = calc_showing("5");
    calc.apply_unary(Unary::Factorial, Mode::Integer);
    assert_eq!(calc.display(), "120");

    let mut calc = calc_showing("abc");
    calc.apply_unary(Unary::Factorial, Mode::Integer);
    assert_eq!(calc.display(), "Invalid Input");

    assert_eq!(
        press(&["-", "3", "x!"]),
        "Error: x! -3 is not defined"
    );
    assert_eq!(
        press(&["2", "5", "x!"]),
        "Error: expression 'x! 25' would overflow"
    );
}

#[test]
fn other_unary_failures_are_generic_errors() {
    assert_eq!(press(&["0", "1/x"]), "Error: 1/x 0 is not defined");
    assert_eq!(press(&["0", "log"]), "Error: log 0 is not defined");
    assert_eq!(press(&["1", "+", "log"]), "Invalid Input");
}

#[test]
fn unary_table() {
    assert_eq!(press(&["3", "^2"]), "9");
    assert_eq!(press(&["2", "^3"]), "8");
    assert_eq!(press(&["5", "0", "%"]), "0.5");
    assert_eq!(press(&["4", "1/x"]), "0.25");
    assert_eq!(press(&["1", "0", "0", "log"]), "2");
    assert_eq!(press(&["0", "sin"]), "0");
    assert_eq!(press(&["0", "cos"]), "1");
    assert_eq!(press(&["1", "2", "+/-"]), "-12");
    assert_eq!(press(&["1", "2", "+/-", "+/-"]), "12");
}

#[test]
fn unary_operators_chain_on_the_displayed_text() {
    assert_eq!(press(&["3", "^2", "^2"]), "81");
    assert_eq!(press(&["9", "√", "+", "1", "="]), "4");
    assert_eq!(press(&["2", "^2", "+/-"]), "-4");
}

#[test]
fn memory_round_trip() {
    let mut calc = calc_showing("5");
    assert_eq!(calc.memory(), Number::Int(0));

    calc.handle_token("M+");
    assert_eq!(calc.memory(), Number::Int(5));
    assert_eq!(calc.display(), "5");

    calc.handle_token("MC");
    assert_eq!(calc.memory(), Number::Int(0));
    assert_eq!(calc.display(), "5");

    calc.handle_token("MR");
    assert_eq!(calc.display(), "0");
}

#[test]
fn memory_subtract_and_recall() {
    let mut calc = calc_showing("10");
    calc.handle_memory(MemoryOp::Subtract);
    assert_eq!(calc.display(), "-10");
    calc.handle_token("C");
    calc.handle_token("MR");
    assert_eq!(calc.display(), "-10");
}

#[test]
fn backspace() {
    let mut calc = calc_showing("12");
    calc.backspace();
    assert_eq!(calc.display(), "1");

    let mut calc = calc_showing("");
    calc.backspace();
    assert_eq!(calc.display(), "");
    calc.backspace();
    assert_eq!(calc.display(), "");
}

#[test]
fn clear_empties_the_display() {
    let mut calc = calc_showing("Not a number");
    calc.handle_token("C");
    assert_eq!(calc.display(), "");
}

#[test]
fn errors_can_be_typed_over() {
    let mut calc = Calculator::with_hook(());
    calc.handle_token("=");
    calc.handle_token("5");
    assert_eq!(calc.display(), "Invalid Input5");
    calc.handle_token("=");
    assert_eq!(calc.display(), "Invalid Input");
    calc.handle_token("C");
    calc.handle_token("5");
    calc.handle_token("=");
    assert_eq!(calc.display(), "5");
}

#[test]
fn names_are_never_evaluated() {
    let attempts = vec![
        ("__import__('os')", "Invalid Input"),
        ("abc", "Error: name 'abc' is not defined"),
        ("x.y", "Invalid Input"),
        ("abs(-1)", "Invalid Input"),
        ("(lambda)", "Error: name 'lambda' is not defined"),
        ("1 + exit", "Error: name 'exit' is not defined"),
        ("2;3", "Invalid Input"),
    ];
    for (input, expected) in attempts {
        let mut calc = Calculator::with_hook(());
        calc.evaluate(input);
        assert_eq!(calc.display(), expected, "{}", input);
    }
}

#[test]
fn results_keep_working_as_input() {
    assert_eq!(press(&["1", "0", "*", "*", "1", "6", "=", "*", "1", "0", "="]), "100000000000000000");
    assert_eq!(press(&["1", "/", "3", "=", "*", "3", "="]), "1");
    assert_eq!(press(&["1", "/", "6", "5", "5", "3", "6", "="]), "1.52587890625e-5");
    assert_eq!(press(&["1", "/", "6", "5", "5", "3", "6", "=", "1/x"]), "65536");
}

#[test]
fn integer_overflow_falls_back_to_floats() {
    let mut calc = Calculator::with_hook(());
    calc.evaluate("9223372036854775807 + 1");
    assert_eq!(calc.display(), "9.223372036854776e18");
}

#[test]
fn every_keypad_button_is_handled() {
    for token in KEYPAD.iter() {
        let mut calc = calc_showing("4");
        let outcome = calc.handle_token(token);
        assert_ne!(outcome, Outcome::Rejected(Fault::InvalidInput), "{}", token);
    }
}

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Hook for Recorder {
    fn before(&mut self, token: &str, display: &str) {
        self.events.push(format!("before {} [{}]", token, display));
    }

    fn after(&mut self, token: &str, outcome: &Outcome, display: &str) {
        self.events.push(format!("after {} {} [{}]", token, outcome, display));
    }
}

#[test]
fn hook_sees_every_token() {
    let mut calc = Calculator::with_hook(Recorder::default());
    for token in &["9", "√", "bogus"] {
        calc.handle_token(token);
    }
    calc.handle_key(Key::BackSpace);
    assert_eq!(
        calc.hook().events,
        vec![
            "before 9 []",
            "after 9 appended [9]",
            "before √ [9]",
            "after √ applied √ [3]",
            "before bogus [3]",
            "after bogus rejected: Invalid Input [Invalid Input]",
            "before BackSpace [Invalid Input]",
            "after BackSpace erased [Invalid Inpu]",
        ]
    );
}

#[test]
fn borrowed_hooks() {
    let mut recorder = Recorder::default();
    {
        let mut calc = Calculator::with_hook(&mut recorder);
        calc.handle_token("1");
    }
    assert_eq!(recorder.events.len(), 2);

    let mut calc = Calculator::with_hook(Box::new(Recorder::default()) as Box<dyn Hook>);
    assert_eq!(calc.handle_token("C"), Outcome::Cleared);
}

#[test]
fn direct_clear_and_backspace_are_observed() {
    let mut calc = Calculator::with_hook(Recorder::default());
    calc.append("12");
    calc.backspace();
    calc.clear();
    assert_eq!(
        calc.hook().events,
        vec![
            "before BackSpace [12]",
            "after BackSpace erased [1]",
            "before C [1]",
            "after C cleared []",
        ]
    );
}

#[derive(Clone, Debug)]
enum Gen {
    Lit(i64),
    Neg(Box<Gen>),
    Bin(Box<Gen>, char, Box<Gen>),
}

impl Gen {
    fn render(&self) -> String {
        match *self {
            Gen::Lit(n) => n.to_string(),
            Gen::Neg(ref e) => format!("-({})", e.render()),
            Gen::Bin(ref l, op, ref r) => format!("({}){}({})", l.render(), op, r.render()),
        }
    }

    /// Reference value in plain `f64`; `None` on division by zero.
    fn value(&self) -> Option<f64> {
        match *self {
            Gen::Lit(n) => Some(n as f64),
            Gen::Neg(ref e) => e.value().map(|x| -x),
            Gen::Bin(ref l, op, ref r) => {
                let (l, r) = (l.value()?, r.value()?);
                match op {
                    '+' => Some(l + r),
                    '-' => Some(l - r),
                    '*' => Some(l * r),
                    _ if r == 0.0 => None,
                    _ => Some(l / r),
                }
            }
        }
    }
}

fn arb_expr() -> impl Strategy<Value = Gen> {
    let leaf = (0i64..=20).prop_map(Gen::Lit);
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!['+', '-', '*', '/']),
                inner.clone()
            )
                .prop_map(|(l, op, r)| Gen::Bin(Box::new(l), op, Box::new(r))),
            inner.prop_map(|e| Gen::Neg(Box::new(e))),
        ]
    })
}

proptest! {
    #[test]
    fn evaluates_like_floating_point(expr in arb_expr()) {
        let input = expr.render();
        match expr.value() {
            Some(expected) => {
                let got = eval(&input).map(|n| n.as_float());
                prop_assert!(got.is_ok(), "{} failed: {:?}", input, got);
                let got = got.unwrap_or_default();
                prop_assert!(
                    (got - expected).abs() <= 1e-9 * expected.abs().max(1.0),
                    "{} gave {}, expected {}", input, got, expected
                );
            }
            None => prop_assert_eq!(eval(&input), Err(CalcError::DivideByZero)),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition(
        terms in prop::collection::vec(
            prop::collection::vec(0i64..=50, 1..4),
            1..5
        )
    ) {
        let input = terms
            .iter()
            .map(|factors| {
                factors.iter().map(|f| f.to_string()).collect::<Vec<_>>().join("*")
            })
            .collect::<Vec<_>>()
            .join("+");
        let expected: i64 = terms.iter().map(|factors| factors.iter().product::<i64>()).sum();
        prop_assert_eq!(eval(&input), Ok(Number::Int(expected)));
    }

    #[test]
    fn identifiers_are_rejected(name in "[a-z_][a-z0-9_]{0,8}") {
        let input = format!("1 + {}", name);
        prop_assert_eq!(eval(&input), Err(CalcError::UnknownAtom(name)));
    }

    #[test]
    fn evaluation_never_leaves_an_empty_display(input in ".{0,40}") {
        let mut calc = Calculator::with_hook(());
        calc.evaluate(&input);
        prop_assert!(!calc.display().is_empty());
    }
}
