#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use crate::error::CalcError;
use core::fmt;

#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }

    /// Checked arithmetic; division truncates toward zero.
    pub fn apply(self, lhs: i64, rhs: i64) -> Result<i64, CalcError> {
        match self {
            BinaryOp::Add => lhs.checked_add(rhs).ok_or(CalcError::Overflow),
            BinaryOp::Sub => lhs.checked_sub(rhs).ok_or(CalcError::Overflow),
            BinaryOp::Mul => lhs.checked_mul(rhs).ok_or(CalcError::Overflow),
            BinaryOp::Div if rhs == 0 => Err(CalcError::DivisionByZero),
            BinaryOp::Div => lhs.checked_div(rhs).ok_or(CalcError::Overflow),
        }
    }
}

#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone, PartialEq, Eq)]
pub enum Expr {
    Number(i64),
    Negate(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn negate(expr: Expr) -> Self {
        Expr::Negate(Box::new(expr))
    }

    pub fn eval(&self) -> Result<i64, CalcError> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Negate(expr) => expr.eval()?.checked_neg().ok_or(CalcError::Overflow),
            Expr::Binary { op, lhs, rhs } => op.apply(lhs.eval()?, rhs.eval()?),
        }
    }
}

/// Fully parenthesized, so the rendering shows how the input was grouped.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Negate(expr) => write!(f, "(-{})", expr),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
        }
    }
}
