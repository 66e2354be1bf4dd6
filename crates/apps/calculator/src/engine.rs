use serde::{Deserialize, Serialize};

const ERROR_TEXT: &str = "Error";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '×' => Some(Self::Multiply),
            '÷' => Some(Self::Divide),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CalcAction {
    Digit(char),
    Decimal,
    ClearAll,
    ToggleSign,
    Percent,
    Binary(BinaryOp),
    Equals,
}

/// Keypad state: the expression exactly as typed, or the result of the last `=`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CalculatorState {
    expression: String,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            expression: "0".to_string(),
        }
    }
}

impl CalculatorState {
    pub(crate) fn apply(&mut self, action: CalcAction) {
        match action {
            CalcAction::Digit(digit) => self.push_operand_char(digit),
            CalcAction::Decimal => self.push_operand_char('.'),
            CalcAction::ClearAll => *self = Self::default(),
            CalcAction::ToggleSign => self.map_leading_number(|value| -value),
            CalcAction::Percent => self.map_leading_number(|value| value / 100.0),
            CalcAction::Binary(op) => {
                if !self.is_error() {
                    self.expression.push(op.symbol());
                }
            }
            CalcAction::Equals => {
                self.expression = match evaluate(&self.expression) {
                    Ok(value) => format_number(value),
                    Err(_) => ERROR_TEXT.to_string(),
                };
            }
        }
    }

    pub(crate) fn display_text(&self) -> String {
        self.expression.clone()
    }

    fn is_error(&self) -> bool {
        self.expression == ERROR_TEXT
    }

    fn push_operand_char(&mut self, ch: char) {
        if self.is_error() {
            *self = Self::default();
        }
        if self.expression == "0" && ch != '.' {
            self.expression = ch.to_string();
        } else {
            self.expression.push(ch);
        }
    }

    /// `±` and `%` rewrite the whole display from its leading number.
    fn map_leading_number(&mut self, map: impl FnOnce(f64) -> f64) {
        if self.is_error() {
            return;
        }
        self.expression = match leading_number(&self.expression) {
            Some(value) => format_number(map(value)),
            None => ERROR_TEXT.to_string(),
        };
    }
}

/// Maps a keypad label to its action.
pub(crate) fn button_action(label: &str) -> Option<CalcAction> {
    let mut chars = label.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if ch.is_ascii_digit() {
            return Some(CalcAction::Digit(ch));
        }
        if let Some(op) = BinaryOp::from_symbol(ch) {
            return Some(CalcAction::Binary(op));
        }
    }
    match label {
        "." => Some(CalcAction::Decimal),
        "C" => Some(CalcAction::ClearAll),
        "±" => Some(CalcAction::ToggleSign),
        "%" => Some(CalcAction::Percent),
        "=" => Some(CalcAction::Equals),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Number(f64),
    Op(BinaryOp),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EvalError {
    Malformed,
    DivideByZero,
    NotFinite,
}

fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

fn leading_number(text: &str) -> Option<f64> {
    let body = text.strip_prefix('-').unwrap_or(text);
    let len = body.find(|ch| !is_number_char(ch)).unwrap_or(body.len());
    let value = body[..len].parse::<f64>().ok()?;
    Some(if body.len() == text.len() { value } else { -value })
}

/// Splits an expression into alternating numbers and operators. A `-` where an operand is
/// expected is the number's sign.
fn tokenize(text: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some(&(start, ch)) = chars.peek() {
        let expects_operand = !matches!(tokens.last(), Some(Token::Number(_)));
        if is_number_char(ch) || (ch == '-' && expects_operand) {
            chars.next();
            let mut end = start + ch.len_utf8();
            while let Some(&(index, next)) = chars.peek() {
                if !is_number_char(next) {
                    break;
                }
                end = index + next.len_utf8();
                chars.next();
            }
            let value = text[start..end]
                .parse::<f64>()
                .map_err(|_| EvalError::Malformed)?;
            tokens.push(Token::Number(value));
        } else {
            let op = BinaryOp::from_symbol(ch).ok_or(EvalError::Malformed)?;
            if expects_operand {
                return Err(EvalError::Malformed);
            }
            tokens.push(Token::Op(op));
            chars.next();
        }
    }
    Ok(tokens)
}

fn next_operand(tokens: &mut impl Iterator<Item = Token>) -> Result<f64, EvalError> {
    match tokens.next() {
        Some(Token::Number(value)) => Ok(value),
        _ => Err(EvalError::Malformed),
    }
}

/// Evaluates `×`/`÷` before `+`/`-`, left to right within each level.
fn evaluate(text: &str) -> Result<f64, EvalError> {
    let mut tokens = tokenize(text)?.into_iter();
    let mut sum = 0.0;
    let mut sign = 1.0;
    let mut term = next_operand(&mut tokens)?;

    while let Some(token) = tokens.next() {
        let Token::Op(op) = token else {
            return Err(EvalError::Malformed);
        };
        let rhs = next_operand(&mut tokens)?;
        match op {
            BinaryOp::Multiply | BinaryOp::Divide => term = apply_binary(term, op, rhs)?,
            BinaryOp::Add | BinaryOp::Subtract => {
                sum += sign * term;
                sign = if op == BinaryOp::Add { 1.0 } else { -1.0 };
                term = rhs;
            }
        }
    }

    let result = sum + sign * term;
    if result.is_finite() {
        Ok(result)
    } else {
        Err(EvalError::NotFinite)
    }
}

fn apply_binary(lhs: f64, op: BinaryOp, rhs: f64) -> Result<f64, EvalError> {
    let result = match op {
        BinaryOp::Add => lhs + rhs,
        BinaryOp::Subtract => lhs - rhs,
        BinaryOp::Multiply => lhs * rhs,
        BinaryOp::Divide => {
            if rhs == 0.0 {
                return Err(EvalError::DivideByZero);
            }
            lhs / rhs
        }
    };

    if result.is_finite() {
        Ok(result)
    } else {
        Err(EvalError::NotFinite)
    }
}

pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }

    let mut text = format!("{value:.12}");
    while text.contains('.') && text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn press(state: &mut CalculatorState, labels: &[&str]) {
        for label in labels {
            state.apply(button_action(label).expect("known key"));
        }
    }

    fn pressed(labels: &[&str]) -> String {
        let mut state = CalculatorState::default();
        press(&mut state, labels);
        state.display_text()
    }

    #[test]
    fn digit_entry_replaces_leading_zero() {
        assert_eq!(pressed(&[]), "0");
        assert_eq!(pressed(&["0", "0", "7", "."]), "7.");
        assert_eq!(pressed(&[".", "5"]), "0.5");
    }

    #[test]
    fn display_shows_the_expression_while_typing() {
        let mut state = CalculatorState::default();
        press(&mut state, &["7", "+", "5"]);
        assert_eq!(state.display_text(), "7+5");
        press(&mut state, &["="]);
        assert_eq!(state.display_text(), "12");
        press(&mut state, &["3"]);
        assert_eq!(state.display_text(), "123");
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(pressed(&["2", "+", "3", "×", "4", "="]), "14");
        assert_eq!(pressed(&["1", "0", "-", "2", "×", "3", "-", "1", "="]), "3");
        assert_eq!(pressed(&["9", "÷", "3", "÷", "3", "+", "1", "="]), "2");
        assert_eq!(pressed(&["0", ".", "1", "+", "0", ".", "2", "="]), "0.3");
    }

    #[test]
    fn minus_in_operand_position_is_a_sign() {
        assert_eq!(pressed(&["5", "×", "-", "3", "="]), "-15");
        assert_eq!(pressed(&["5", "±", "×", "3", "="]), "-15");
        assert_eq!(pressed(&["+", "2", "="]), "2");
    }

    #[test]
    fn sign_and_percent_rewrite_from_the_leading_number() {
        let mut state = CalculatorState::default();
        press(&mut state, &["5", "0", "±"]);
        assert_eq!(state.display_text(), "-50");
        press(&mut state, &["%"]);
        assert_eq!(state.display_text(), "-0.5");
        assert_eq!(pressed(&["7", "+", "5", "±"]), "-7");
        assert_eq!(pressed(&["±"]), "0");
    }

    #[test]
    fn malformed_expressions_show_error() {
        assert_eq!(pressed(&["7", "+", "="]), "Error");
        assert_eq!(pressed(&["7", "+", "×", "2", "="]), "Error");
        assert_eq!(pressed(&["7", ".", ".", "5", "="]), "Error");
    }

    #[test]
    fn division_by_zero_shows_error_until_new_input() {
        let mut state = CalculatorState::default();
        press(&mut state, &["8", "÷", "0", "="]);
        assert_eq!(state.display_text(), "Error");
        press(&mut state, &["+", "±"]);
        assert_eq!(state.display_text(), "Error");
        press(&mut state, &["4"]);
        assert_eq!(state.display_text(), "4");
        press(&mut state, &["C"]);
        assert_eq!(state.display_text(), "0");
    }

    #[test]
    fn unknown_labels_have_no_action() {
        assert_eq!(button_action("sqrt"), None);
        assert_eq!(button_action("12"), None);
        assert_eq!(button_action("7"), Some(CalcAction::Digit('7')));
        assert_eq!(
            button_action("÷"),
            Some(CalcAction::Binary(BinaryOp::Divide))
        );
    }

    #[test]
    fn format_number_trims_trailing_zeroes() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(-0.0), "0");
    }
}
