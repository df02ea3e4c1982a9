//! Implicit multiplication.
//!
//! `2(3)` means `2*(3)`, `2π` means `2*π`, `)(` means `)*(` and so on. The
//! rewrite is a single left-to-right scan that looks at each adjacent pair of
//! characters and inserts `*` when the left one ends an operand and the right
//! one starts another. An inserted `*` is never part of a boundary itself, so
//! running the scan again changes nothing.

use tracing::debug;

fn is_constant(c: char) -> bool {
    c == 'π' || c == 'e'
}

/// Whether `*` belongs between `left` and `right`.
fn is_juxtaposition(left: char, right: char) -> bool {
    if left.is_ascii_digit() {
        right == '(' || is_constant(right)
    } else if left == ')' || is_constant(left) {
        right.is_ascii_digit() || right == '(' || is_constant(right)
    } else {
        false
    }
}

pub fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 4);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        result.push(c);
        if let Some(&next) = chars.peek() {
            if is_juxtaposition(c, next) {
                result.push('*');
            }
        }
    }

    if result.len() != text.len() {
        debug!(input = text, normalized = %result, "inserted implicit multiplication");
    }
    result
}
