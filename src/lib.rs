#![cfg_attr(not(feature = "std"), no_std)]

//! Integer arithmetic expressions: `+ - * /`, unary minus and parentheses.
//!
//! ```
//! assert_eq!(lite_calc::evaluate("2 * (3 + 4) - 1"), Ok(13));
//! ```

#[cfg(not(feature = "std"))]
extern crate alloc;

pub use crate::error::CalcError;
pub use crate::expr::{BinaryOp, Expr};
pub use crate::expr_parser::{evaluate, parse_expr, parse_expr_with_options};
pub use lite_matcher::MatchOptions;

pub mod error;
pub mod expr;
pub mod expr_parser;
