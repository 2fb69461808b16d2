use crate::matcher::{MatchContext, Matcher};
use crate::result::MatchResult;
use crate::traits::Position;

#[cfg(not(feature = "std"))]
use alloc::string::String;

use core::marker::PhantomData;

/// One character satisfying `predicate`.
pub struct Class<P, F> {
    predicate: F,
    _marker: PhantomData<fn(P)>,
}

pub fn class<P: Position, F: Fn(char) -> bool>(predicate: F) -> Class<P, F> {
    Class {
        predicate,
        _marker: PhantomData,
    }
}

impl<P: Position, F: Fn(char) -> bool> Matcher<P> for Class<P, F> {
    type Output = char;

    fn run(&self, _context: &mut MatchContext<P>, current: P) -> MatchResult<P, char> {
        match current.current() {
            Some(c) if (self.predicate)(c) => MatchResult::Success {
                value: c,
                next: current.advance(),
            },
            _ => MatchResult::Failure { next: current },
        }
    }
}

fn any(_: char) -> bool {
    true
}

pub fn any_char<P: Position>() -> Class<P, fn(char) -> bool> {
    class(any as fn(char) -> bool)
}

/// Text that can be matched verbatim.
pub trait LiteralText: Clone {
    /// On mismatch, `Err` holds the position of the first character that
    /// did not match (or end of input).
    fn match_at<P: Position>(&self, current: P) -> Result<P, P>;
}

fn match_chars<P: Position, I: Iterator<Item = char>>(chars: I, mut current: P) -> Result<P, P> {
    for expected in chars {
        if current.current() != Some(expected) {
            return Err(current);
        }
        current = current.advance();
    }
    Ok(current)
}

impl LiteralText for char {
    fn match_at<P: Position>(&self, current: P) -> Result<P, P> {
        match_chars(core::iter::once(*self), current)
    }
}

impl LiteralText for &str {
    fn match_at<P: Position>(&self, current: P) -> Result<P, P> {
        match_chars(self.chars(), current)
    }
}

impl LiteralText for String {
    fn match_at<P: Position>(&self, current: P) -> Result<P, P> {
        match_chars(self.chars(), current)
    }
}

pub struct Literal<P, T> {
    text: T,
    _marker: PhantomData<fn(P)>,
}

/// Matches `text` exactly, yielding it back as the value.
pub fn literal<P: Position, T: LiteralText>(text: T) -> Literal<P, T> {
    Literal {
        text,
        _marker: PhantomData,
    }
}

impl<P: Position, T: LiteralText> Matcher<P> for Literal<P, T> {
    type Output = T;

    fn run(&self, _context: &mut MatchContext<P>, current: P) -> MatchResult<P, T> {
        match self.text.match_at(current) {
            Ok(next) => MatchResult::Success {
                value: self.text.clone(),
                next,
            },
            Err(next) => MatchResult::Failure { next },
        }
    }
}

pub struct StartOfInput<P>(PhantomData<fn(P)>);

pub fn start_of_input<P: Position>() -> StartOfInput<P> {
    StartOfInput(PhantomData)
}

impl<P: Position> Matcher<P> for StartOfInput<P> {
    type Output = ();

    fn run(&self, _context: &mut MatchContext<P>, current: P) -> MatchResult<P, ()> {
        if current.at_start() {
            MatchResult::Success {
                value: (),
                next: current,
            }
        } else {
            MatchResult::Failure { next: current }
        }
    }
}

pub struct EndOfInput<P>(PhantomData<fn(P)>);

pub fn end_of_input<P: Position>() -> EndOfInput<P> {
    EndOfInput(PhantomData)
}

impl<P: Position> Matcher<P> for EndOfInput<P> {
    type Output = ();

    fn run(&self, _context: &mut MatchContext<P>, current: P) -> MatchResult<P, ()> {
        if current.at_end() {
            MatchResult::Success {
                value: (),
                next: current,
            }
        } else {
            MatchResult::Failure { next: current }
        }
    }
}

/// Zero-width lookbehind on the previous character.
pub struct Preceded<P, F> {
    predicate: F,
    _marker: PhantomData<fn(P)>,
}

pub fn preceded_by<P: Position, F: Fn(char) -> bool>(predicate: F) -> Preceded<P, F> {
    Preceded {
        predicate,
        _marker: PhantomData,
    }
}

impl<P: Position, F: Fn(char) -> bool> Matcher<P> for Preceded<P, F> {
    type Output = ();

    fn run(&self, _context: &mut MatchContext<P>, current: P) -> MatchResult<P, ()> {
        match current.previous() {
            Some(c) if (self.predicate)(c) => MatchResult::Success {
                value: (),
                next: current,
            },
            _ => MatchResult::Failure { next: current },
        }
    }
}

pub struct Succeed<P, R> {
    value: R,
    _marker: PhantomData<fn(P)>,
}

pub fn succeed<P: Position, R: Clone>(value: R) -> Succeed<P, R> {
    Succeed {
        value,
        _marker: PhantomData,
    }
}

impl<P: Position, R: Clone> Matcher<P> for Succeed<P, R> {
    type Output = R;

    fn run(&self, _context: &mut MatchContext<P>, current: P) -> MatchResult<P, R> {
        MatchResult::Success {
            value: self.value.clone(),
            next: current,
        }
    }
}

pub struct Fail<P, R>(PhantomData<fn(P) -> R>);

pub fn fail<P: Position, R>() -> Fail<P, R> {
    Fail(PhantomData)
}

impl<P: Position, R> Matcher<P> for Fail<P, R> {
    type Output = R;

    fn run(&self, _context: &mut MatchContext<P>, current: P) -> MatchResult<P, R> {
        MatchResult::Failure { next: current }
    }
}

/// Declares named character classes.
///
/// ```ignore
/// classes! {
///     pub digit => '0' ..= '9';
///     pub sign => '+' | '-';
/// }
/// ```
///
/// expands to `is_digit(char) -> bool` plus a `digit()` matcher constructor,
/// and likewise for `sign`.
#[macro_export]
macro_rules! classes {
    (
        $(
            $( #[ $attr:meta ] )*
            $vis:vis $name:ident => $($($value:literal)..=+)|+;
        )*
    ) => {
        $(
            $crate::classes!{
                IMPL
                $( #[ $attr ] )*
                $vis $name => $($($value)..=+)|+
            }
        )*
    };
    (
        IMPL
        $( #[ $attr:meta ] )*
        $vis:vis $name:ident => $($($value:literal)..=+)|+
    ) => (
        $crate::paste::paste! {
            $vis fn [< is_ $name >](c: char) -> bool {
                match c {
                    $($($value)..=+)|+ => true,
                    _ => false
                }
            }

            $( #[ $attr ] )*
            $vis fn $name<P: $crate::traits::Position>(
            ) -> $crate::primitives::Class<P, fn(char) -> bool> {
                $crate::primitives::class([< is_ $name >] as fn(char) -> bool)
            }
        }
    );
}
