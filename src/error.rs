use lite_matcher::{Position, StrPosition};
use thiserror::Error;

/// Errors from parsing or evaluating an expression.
///
/// Positions are zero based; the rendered message counts lines and columns
/// from one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("unexpected character {found:?} at line {}, column {}", .line + 1, .column + 1)]
    UnexpectedChar {
        found: char,
        index: usize,
        line: u32,
        column: u32,
    },

    #[error("unexpected end of input at line {}, column {}", .line + 1, .column + 1)]
    UnexpectedEnd { index: usize, line: u32, column: u32 },

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,
}

impl CalcError {
    /// Describes the input at the furthest position a failed parse reached.
    pub fn unexpected(position: StrPosition<'_>) -> Self {
        match position.current() {
            Some(found) => CalcError::UnexpectedChar {
                found,
                index: position.index(),
                line: position.line(),
                column: position.column(),
            },
            None => CalcError::UnexpectedEnd {
                index: position.index(),
                line: position.line(),
                column: position.column(),
            },
        }
    }
}
