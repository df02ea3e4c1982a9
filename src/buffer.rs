use tracing::trace;

/// Characters that end the current numeric token when scanning backwards.
const TOKEN_BREAKS: &str = "+-*/^()";

/// Characters after which an operator replaces instead of appending.
const REPLACEABLE: &str = "+-*/^(";

/// Openers removed as one unit by backspace.
const COMPOUND_OPENERS: [&str; 6] = ["sin(", "cos(", "tan(", "log(", "ln(", "√("];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            '^' => Some(BinaryOp::Pow),
            _ => None,
        }
    }
}

/// Function buttons. Each one is inserted together with its opening parenthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    /// `e^(`, the exponential button.
    Exp,
}

impl Function {
    pub fn opener(self) -> &'static str {
        match self {
            Function::Sin => "sin(",
            Function::Cos => "cos(",
            Function::Tan => "tan(",
            Function::Log => "log(",
            Function::Ln => "ln(",
            Function::Sqrt => "√(",
            Function::Exp => "e^(",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn symbol(self) -> char {
        match self {
            Constant::Pi => 'π',
            Constant::E => 'e',
        }
    }
}

/// One button press as seen by the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Clear,
    Backspace,
    Digit(char),
    Decimal,
    Operator(BinaryOp),
    LeftParen,
    RightParen,
    Function(Function),
    Constant(Constant),
}

/// The in-progress expression text and the number of unmatched `(` in it.
///
/// Every edit either keeps `paren_balance` equal to the count of unmatched
/// openers or leaves the buffer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionBuffer {
    text: String,
    paren_balance: usize,
}

/// Applies `op` to `buffer` and hands the new state back.
pub fn edit(mut buffer: ExpressionBuffer, op: EditOp) -> ExpressionBuffer {
    buffer.apply(op);
    buffer
}

impl ExpressionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a buffer around existing text, e.g. a displayed result that
    /// starts the next expression. Stray `)` are not counted.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let paren_balance = text.chars().fold(0usize, |open, c| match c {
            '(' => open + 1,
            ')' => open.saturating_sub(1),
            _ => open,
        });
        ExpressionBuffer { text, paren_balance }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn paren_balance(&self) -> usize {
        self.paren_balance
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn apply(&mut self, op: EditOp) {
        match op {
            EditOp::Clear => self.clear(),
            EditOp::Backspace => self.backspace(),
            EditOp::Digit(d) => self.append_digit(d),
            EditOp::Decimal => self.append_decimal(),
            EditOp::Operator(op) => self.append_operator(op),
            EditOp::LeftParen => self.append_left_paren(),
            EditOp::RightParen => self.append_right_paren(),
            EditOp::Function(f) => self.append_function(f),
            EditOp::Constant(c) => self.append_constant(c),
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.paren_balance = 0;
    }

    pub fn backspace(&mut self) {
        if let Some(opener) = COMPOUND_OPENERS.iter().find(|o| self.text.ends_with(*o)) {
            self.text.truncate(self.text.len() - opener.len());
            self.paren_balance = self.paren_balance.saturating_sub(1);
            return;
        }

        match self.text.pop() {
            Some('(') => self.paren_balance = self.paren_balance.saturating_sub(1),
            Some(')') => self.paren_balance += 1,
            Some(_) => {}
            None => trace!("backspace on empty buffer"),
        }
    }

    pub fn append_digit(&mut self, d: char) {
        if !d.is_ascii_digit() {
            trace!(?d, "not a digit");
            return;
        }
        self.text.push(d);
    }

    pub fn append_decimal(&mut self) {
        let token = self.current_numeric_token();
        if token.contains('.') {
            trace!(token, "number already has a decimal point");
            return;
        }
        if token.is_empty() {
            self.text.push('0');
        }
        self.text.push('.');
    }

    pub fn append_operator(&mut self, op: BinaryOp) {
        let Some(last) = self.text.chars().last() else {
            // Only a leading sign may start an expression.
            if op == BinaryOp::Sub {
                self.text.push('-');
            } else {
                trace!(?op, "operator rejected on empty buffer");
            }
            return;
        };

        if REPLACEABLE.contains(last) && !(last == '(' && op == BinaryOp::Sub) {
            self.text.pop();
            if last == '(' {
                self.paren_balance = self.paren_balance.saturating_sub(1);
            }
            self.text.push(op.symbol());
            return;
        }

        if last == '.' {
            self.text.pop();
        }
        self.text.push(op.symbol());
    }

    pub fn append_left_paren(&mut self) {
        self.text.push('(');
        self.paren_balance += 1;
    }

    pub fn append_right_paren(&mut self) {
        if self.paren_balance == 0 {
            trace!("no open group to close");
            return;
        }
        match self.text.chars().last() {
            Some(last) if !REPLACEABLE.contains(last) => {
                self.text.push(')');
                self.paren_balance -= 1;
            }
            _ => trace!(text = %self.text, "closing paren would end an empty group"),
        }
    }

    pub fn append_function(&mut self, function: Function) {
        self.text.push_str(function.opener());
        self.paren_balance += 1;
    }

    pub fn append_constant(&mut self, constant: Constant) {
        self.text.push(constant.symbol());
    }

    /// The number being typed: the trailing run after the last operator or paren.
    fn current_numeric_token(&self) -> &str {
        let start = self
            .text
            .rfind(|c: char| TOKEN_BREAKS.contains(c))
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.text[start..]
    }
}
