use crate::calc_engine::{EvaluationResult, Number};

pub const ERROR_TEXT: &str = "Error";

/// Text shown for a result. Real values always carry a fractional part
/// (`1.0`, not `1`) so they stay distinguishable from integers.
pub fn format(result: &EvaluationResult) -> String {
    match result {
        EvaluationResult::Number(number) => format_number(*number),
        EvaluationResult::Error => ERROR_TEXT.to_string(),
    }
}

pub fn format_number(number: Number) -> String {
    match number {
        Number::Integer(n) => n.to_string(),
        Number::Real(x) => {
            let s = x.to_string();
            if s.contains('.') {
                s
            } else {
                format!("{}.0", s)
            }
        }
    }
}
