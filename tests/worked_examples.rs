use approx::assert_relative_eq;
use balance::{
    history::HistoryConfig,
    ops::{self, Operation, OperationError, OperationKind, Target},
    parse_equation, Equation, EquationSide, HistoryLog, Session, Side,
};
use pretty_assertions::assert_eq;

fn terms(side: &EquationSide) -> Vec<(f64, Option<&str>)> {
    side.terms()
        .map(|t| (t.coefficient, t.variable.as_deref()))
        .collect()
}

#[test]
fn parse_the_canonical_example() {
    let equation = parse_equation("2x + 3 = 7").unwrap();

    assert_eq!(terms(&equation.left), vec![(2.0, Some("x")), (3.0, None)]);
    assert_eq!(terms(&equation.right), vec![(7.0, None)]);
}

#[test]
fn subtract_from_the_left_only() {
    let equation = parse_equation("2x + 3 = 7").unwrap();
    let operation = Operation::new(OperationKind::Subtract, "3", Target::Left);

    let got = ops::apply_operation(&equation, &operation).unwrap();

    assert_eq!(
        terms(&got.left),
        vec![(2.0, Some("x")), (3.0, None), (-3.0, None)]
    );
    assert_eq!(got.right, equation.right);
}

#[test]
fn dividing_by_zero_leaves_the_input_alone() {
    let equation = parse_equation("2x + 3 = 7").unwrap();
    let snapshot = equation.clone();
    let operation = Operation::new(OperationKind::Divide, "0", Target::Both);

    let got = ops::apply_operation(&equation, &operation);

    assert_eq!(got, Err(OperationError::DivisionByZero));
    assert_eq!(equation, snapshot);
}

#[test]
fn moving_there_and_back_again() {
    let equation = parse_equation("2x = 7 - 3").unwrap();
    let three = equation.right.items[1].id();

    let moved = ops::move_terms(&equation, &[three], Side::Right, Side::Left);
    assert_eq!(terms(&moved.left), vec![(2.0, Some("x")), (3.0, None)]);
    assert_eq!(terms(&moved.right), vec![(7.0, None)]);

    let back = ops::move_terms(&moved, &[three], Side::Left, Side::Right);
    assert!(back.same_value(&equation));
}

#[test]
fn thirds_dont_come_back_exactly() {
    let equation = parse_equation("x = 1").unwrap();
    let divide = Operation::new(OperationKind::Divide, "3", Target::Right);
    let multiply = Operation::new(OperationKind::Multiply, "3", Target::Right);

    let got = ops::apply_operation(&equation, &divide)
        .and_then(|eq| ops::apply_operation(&eq, &multiply))
        .unwrap();

    let one = got.right.items[0].as_term().unwrap().coefficient;
    assert_relative_eq!(one, 1.0);
}

#[test]
fn six_steps_in_a_log_of_five() {
    let mut log = HistoryLog::new();
    let equations: Vec<Equation> = (1..=6)
        .map(|i| parse_equation(&format!("x = {}", i)).unwrap())
        .collect();

    for (i, equation) in equations.iter().enumerate() {
        log.add_step(equation, None, format!("step {}", i + 1));
    }

    assert_eq!(log.history().len(), 5);
    assert_eq!(log.history()[0].description(), "step 2");
    assert!(log.history()[0].equation().same_value(&equations[1]));

    log.undo();
    log.undo();
    log.add_step(&equations[0], None, "branch");

    assert!(!log.can_redo());
    assert_eq!(log.history().len(), 4);
}

#[test]
fn a_whole_session() {
    let config = balance::SessionConfig::default()
        .with_history(HistoryConfig::default().with_capacity(3));
    let mut session = Session::with_config("2x + 3 = 7", config).unwrap();
    let three = session.equation().left.items[1].id();

    session.move_terms(&[three], Side::Left, Side::Right);
    session
        .apply(Operation::new(OperationKind::Divide, "2", Target::Both))
        .unwrap();
    session
        .apply(Operation::new(OperationKind::Multiply, "2", Target::Both))
        .unwrap();

    let descriptions: Vec<&str> =
        session.steps().iter().map(|s| s.description()).collect();
    assert_eq!(
        descriptions,
        vec![
            "Moved 3 from left to right",
            "÷ 2 both sides",
            "× 2 both sides"
        ]
    );
    assert_eq!(session.equation().to_string(), "2x = 7 - 3");

    assert!(session.undo());
    assert_eq!(session.equation().to_string(), "x = 3.5 - 1.5");
    assert!(session.undo());
    assert_eq!(session.equation().to_string(), "2x = 7 - 3");
    assert!(!session.undo());
}
