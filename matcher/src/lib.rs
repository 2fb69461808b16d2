#![cfg_attr(not(feature = "std"), no_std)]

//! Backtracking recursive-descent matchers over an abstract character stream.
//!
//! A grammar is a tree of [`Matcher`] values built from primitives
//! ([`literal`], [`class`], anchors) and combinators (sequence, ordered choice,
//! repetition, lookahead). Running the root against a [`Position`] yields a
//! [`MatchResult`]; named sub-matches land in the [`MatchContext`]'s capture
//! table.

extern crate alloc;

#[doc(hidden)]
pub use paste;

pub use crate::capture::{backref, capture, Backref, Capture, CaptureTable, Span};
pub use crate::combinators::{
    choice, guard, keep_left, keep_right, many, many1, not, optional, sequence,
};
pub use crate::impls::StrPosition;
pub use crate::matcher::{match_all, BoxedMatcher, MatchContext, MatchOptions, Matcher};
pub use crate::primitives::{
    any_char, class, end_of_input, fail, literal, preceded_by, start_of_input, succeed,
    LiteralText,
};
pub use crate::result::MatchResult;
pub use crate::rule::{defer, Rule, WeakRule};
pub use crate::traits::Position;

pub mod capture;
pub mod combinators;
pub mod impls;
pub mod matcher;
pub mod primitives;
pub mod result;
pub mod rule;
pub mod traits;
