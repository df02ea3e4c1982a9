use scicalc::{
    edit, evaluate, format, normalize, AngleMode, BinaryOp, Constant, EditOp, EvaluationResult,
    ExpressionBuffer, Function, Number,
};

fn int(n: i64) -> EvaluationResult {
    EvaluationResult::Number(Number::Integer(n))
}

/// Every button the keypad offers.
fn all_ops() -> Vec<EditOp> {
    let mut ops = vec![
        EditOp::Clear,
        EditOp::Backspace,
        EditOp::Decimal,
        EditOp::LeftParen,
        EditOp::RightParen,
        EditOp::Constant(Constant::Pi),
        EditOp::Constant(Constant::E),
    ];
    ops.extend(['0', '5', '9'].map(EditOp::Digit));
    ops.extend(
        [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div, BinaryOp::Pow].map(EditOp::Operator),
    );
    ops.extend(
        [
            Function::Sin,
            Function::Cos,
            Function::Tan,
            Function::Log,
            Function::Ln,
            Function::Sqrt,
            Function::Exp,
        ]
        .map(EditOp::Function),
    );
    ops
}

fn unmatched_openers(text: &str) -> usize {
    let mut open = 0usize;
    for c in text.chars() {
        match c {
            '(' => open += 1,
            ')' => open = open.saturating_sub(1),
            _ => {}
        }
    }
    open
}

/// Small deterministic generator so the walk is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as usize
    }
}

#[test]
fn paren_balance_matches_text_after_any_edits() {
    let ops = all_ops();
    let mut rng = Lcg(0x5eed);

    for _ in 0..200 {
        let mut buffer = ExpressionBuffer::new();
        for _ in 0..40 {
            let op = ops[rng.next() % ops.len()];
            buffer = edit(buffer, op);
            assert_eq!(
                buffer.paren_balance(),
                unmatched_openers(buffer.text()),
                "after {:?} text is {:?}",
                op,
                buffer.text()
            );
            // No `)` ever closes nothing.
            let closers = buffer.text().matches(')').count();
            let openers = buffer.text().matches('(').count();
            assert_eq!(openers - closers, buffer.paren_balance());
        }
    }
}

#[test]
fn normalize_is_idempotent_on_keypad_text() {
    let ops = all_ops();
    let mut rng = Lcg(42);

    for _ in 0..200 {
        let mut buffer = ExpressionBuffer::new();
        for _ in 0..25 {
            buffer = edit(buffer, ops[rng.next() % ops.len()]);
        }
        let once = normalize(buffer.text());
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn documented_evaluations() {
    assert_eq!(evaluate("2+2", AngleMode::Degrees), int(4));
    assert_eq!(evaluate("sqrt(25)+sin(0)", AngleMode::Degrees), int(5));
    assert_eq!(evaluate("cos(180)", AngleMode::Degrees), int(-1));
    assert_eq!(evaluate("1/0", AngleMode::Degrees), EvaluationResult::Error);
    assert_eq!(evaluate("5+(2*3", AngleMode::Degrees), EvaluationResult::Error);
}

#[test]
fn right_paren_without_open_group_is_ignored() {
    let buffer = ExpressionBuffer::from_text("7+3");
    assert_eq!(buffer.paren_balance(), 0);
    assert_eq!(edit(buffer.clone(), EditOp::RightParen), buffer);
}

#[test]
fn backspace_removes_function_opener() {
    let buffer = edit(ExpressionBuffer::new(), EditOp::Function(Function::Sin));
    assert_eq!(buffer.paren_balance(), 1);
    let buffer = edit(buffer, EditOp::Backspace);
    assert_eq!(buffer.text(), "");
    assert_eq!(buffer.paren_balance(), 0);
}

#[test]
fn repeated_operator_replaces() {
    let buffer = edit(ExpressionBuffer::from_text("3+"), EditOp::Operator(BinaryOp::Add));
    assert_eq!(buffer.text(), "3+");
}

#[test]
fn euler_button_inserts_e() {
    let buffer = edit(ExpressionBuffer::new(), EditOp::Constant(Constant::E));
    assert_eq!(buffer.text(), "e");
}

#[test]
fn typed_expression_end_to_end() {
    let keys = [
        EditOp::Digit('2'),
        EditOp::Constant(Constant::Pi),
        EditOp::Operator(BinaryOp::Add),
        EditOp::Function(Function::Sqrt),
        EditOp::Digit('9'),
        EditOp::RightParen,
        EditOp::LeftParen,
        EditOp::Digit('2'),
        EditOp::RightParen,
    ];
    let buffer = keys.into_iter().fold(ExpressionBuffer::new(), edit);
    assert_eq!(buffer.text(), "2π+√(9)(2)");

    let normalized = normalize(buffer.text());
    assert_eq!(normalized, "2*π+√(9)*(2)");
    assert_eq!(format(&evaluate(&normalized, AngleMode::Degrees)), "12.2831853072");
}
