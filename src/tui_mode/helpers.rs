use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The longest suffix of `text` that fits in `width` terminal columns.
/// The display keeps the end of the expression visible, like a real
/// calculator screen.
pub fn tail_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();

    for (idx, grapheme) in text.grapheme_indices(true).rev() {
        let w = grapheme.width();
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Name,
    Number,
    Operator,
    Other,
}

fn classify(c: char) -> CharClass {
    match c {
        '0'..='9' | '.' => CharClass::Number,
        '+' | '-' | '*' | '/' | '^' => CharClass::Operator,
        '√' => CharClass::Name,
        _ if c.is_alphabetic() => CharClass::Name,
        _ => CharClass::Other,
    }
}

pub fn highlight_expression(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let function_style = Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD);

    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let number_style = Style::default()
        .fg(Color::LightGreen);

    let style_for = |class: CharClass| match class {
        CharClass::Name => function_style,
        CharClass::Number => number_style,
        CharClass::Operator => operator_style,
        CharClass::Other => base_style,
    };

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut current_class = CharClass::Other;

    for c in expr.chars() {
        let class = classify(c);
        if class != current_class && !current.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut current), style_for(current_class)));
        }
        current_class = class;
        current.push(c);
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, style_for(current_class)));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_end_of_expression() {
        assert_eq!(tail_to_width("12+34", 3), "+34");
        assert_eq!(tail_to_width("2π+√(9)", 4), "√(9)");
        assert_eq!(tail_to_width("abc", 10), "abc");
        assert_eq!(tail_to_width("abc", 0), "");
    }

    #[test]
    fn spans_group_by_class() {
        let spans = highlight_expression("sin(30)+2", Style::default());
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, ["sin", "(", "30", ")", "+", "2"]);
    }
}
