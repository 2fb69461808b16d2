use crate::capture::{Capture, CaptureTable, Span};
use crate::combinators::{
    Choice, FlatMap, KeepLeft, KeepRight, Many, Many1, Map, Optional, Sequence,
};
use crate::primitives::{end_of_input, EndOfInput};
use crate::result::MatchResult;
use crate::traits::Position;

#[cfg(not(feature = "std"))]
use alloc::string::String;

use alloc::rc::Rc;

#[cfg_attr(feature = "std", derive(Debug, PartialEq, Eq))]
#[derive(Clone)]
pub struct MatchOptions {
    /// How many deferred rules may be active at once. `None`, the default,
    /// means unbounded.
    ///
    /// A reference entered at the limit fails like any other mismatch, so an
    /// enclosing choice may go on to its next alternative.
    pub max_depth: Option<u32>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions { max_depth: None }
    }
}

/// Per-parse session state.
///
/// Holds the capture table written by [`Capture`] and the nesting counter for
/// deferred rules. One context serves one parse at a time; nothing in it is
/// reset between runs unless the caller does so.
#[cfg_attr(feature = "std", derive(Debug))]
pub struct MatchContext<P> {
    captures: CaptureTable<P>,
    depth: u32,
    options: MatchOptions,
}

impl<P> MatchContext<P> {
    pub fn new(options: MatchOptions) -> Self {
        Self {
            captures: CaptureTable::new(),
            depth: 0,
            options,
        }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn captures(&self) -> &CaptureTable<P> {
        &self.captures
    }

    pub fn captures_mut(&mut self) -> &mut CaptureTable<P> {
        &mut self.captures
    }

    pub fn group(&self, name: &str) -> Option<&Span<P>> {
        self.captures.group(name)
    }

    pub fn clear(&mut self) {
        self.captures.clear()
    }

    /// Run `f` one rule level deeper, or fail in place if the limit is reached.
    pub(crate) fn nested<R, F>(&mut self, current: P, f: F) -> MatchResult<P, R>
    where
        F: FnOnce(&mut Self, P) -> MatchResult<P, R>,
    {
        if self.options.max_depth.map_or(false, |max| self.depth >= max) {
            return MatchResult::Failure { next: current };
        }
        self.depth += 1;
        let result = f(self, current);
        self.depth -= 1;
        result
    }
}

impl<P: Position> MatchContext<P> {
    pub fn substring(&self, name: &str) -> Option<String> {
        self.captures.substring(name)
    }
}

impl<P> Default for MatchContext<P> {
    fn default() -> Self {
        Self::new(MatchOptions::default())
    }
}

/// A rule mapping a position to a [`MatchResult`].
pub trait Matcher<P> {
    type Output;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, Self::Output>;

    fn map<R, F>(self, f: F) -> Map<Self, F, R>
    where
        Self: Sized,
        F: Fn(Self::Output) -> R,
    {
        Map::new(self, f)
    }

    fn flat_map<N, F>(self, f: F) -> FlatMap<Self, F, N>
    where
        Self: Sized,
        N: Matcher<P>,
        F: Fn(Self::Output) -> N,
    {
        FlatMap::new(self, f)
    }

    fn then<B>(self, other: B) -> Sequence<Self, B>
    where
        Self: Sized,
        B: Matcher<P>,
    {
        Sequence::new(self, other)
    }

    fn then_skip<B>(self, other: B) -> KeepLeft<Self, B>
    where
        Self: Sized,
        B: Matcher<P>,
    {
        KeepLeft::new(self, other)
    }

    fn skip_then<B>(self, other: B) -> KeepRight<Self, B>
    where
        Self: Sized,
        B: Matcher<P>,
    {
        KeepRight::new(self, other)
    }

    fn or_else<B>(self, other: B) -> Choice<Self, B>
    where
        Self: Sized,
        B: Matcher<P, Output = Self::Output>,
    {
        Choice::new(self, other)
    }

    fn many(self) -> Many<Self>
    where
        Self: Sized,
    {
        Many::new(self)
    }

    fn many1(self) -> Many1<Self>
    where
        Self: Sized,
    {
        Many1::new(self)
    }

    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        Optional::new(self)
    }

    fn capture<S: Into<String>>(self, name: S) -> Capture<Self>
    where
        Self: Sized,
    {
        Capture::new(name, self)
    }

    fn boxed<'a>(self) -> BoxedMatcher<'a, P, Self::Output>
    where
        Self: Sized + 'a,
    {
        Rc::new(self)
    }
}

pub type BoxedMatcher<'a, P, R> = Rc<dyn Matcher<P, Output = R> + 'a>;

impl<P: Position, M: Matcher<P> + ?Sized> Matcher<P> for Rc<M> {
    type Output = M::Output;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, Self::Output> {
        (**self).run(context, current)
    }
}

impl<P: Position, M: Matcher<P> + ?Sized> Matcher<P> for &M {
    type Output = M::Output;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, Self::Output> {
        (**self).run(context, current)
    }
}

/// Succeeds only if `matcher` succeeds and leaves nothing unconsumed.
///
/// Otherwise fails where the leftover input begins.
pub fn match_all<P: Position, M: Matcher<P>>(matcher: M) -> KeepLeft<M, EndOfInput<P>> {
    KeepLeft::new(matcher, end_of_input())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::many1;
    use crate::impls::StrPosition;
    use crate::primitives::{class, literal};
    use crate::rule::defer;

    fn nth(text: &str, n: usize) -> StrPosition<'_> {
        let mut pos = StrPosition::new(text);
        for _ in 0..n {
            pos = pos.advance();
        }
        pos
    }

    fn integer<'a>() -> impl Matcher<StrPosition<'a>, Output = u32> {
        many1(class(|c: char| c.is_ascii_digit())).map(|digits: Vec<char>| {
            digits
                .iter()
                .fold(0, |acc, c| acc * 10 + c.to_digit(10).unwrap_or(0))
        })
    }

    #[test]
    fn it_matches_whole_input() {
        let mut context = MatchContext::default();
        let text = "123";
        assert_eq!(
            match_all(integer()).run(&mut context, StrPosition::new(text)),
            MatchResult::success(123, nth(text, 3))
        );
    }

    #[test]
    fn it_should_consume_all() {
        let mut context = MatchContext::default();
        let text = "12a";
        assert_eq!(
            integer().run(&mut context, StrPosition::new(text)),
            MatchResult::success(12, nth(text, 2))
        );
        assert_eq!(
            match_all(integer()).run(&mut context, StrPosition::new(text)),
            MatchResult::failure(nth(text, 2))
        );
    }

    #[test]
    fn boxed_matchers_run_through_rc() {
        let mut context = MatchContext::default();
        let text = "ab";
        let boxed: BoxedMatcher<'_, StrPosition<'_>, char> = literal('a').boxed();
        let shared = boxed.clone();
        assert_eq!(
            shared.then(literal('b')).run(&mut context, StrPosition::new(text)),
            MatchResult::success(('a', 'b'), nth(text, 2))
        );
        assert_eq!(
            literal('b')
                .or_else(&boxed)
                .run(&mut context, StrPosition::new(text)),
            MatchResult::success('a', nth(text, 1))
        );
    }

    fn nested<'a>() -> BoxedMatcher<'a, StrPosition<'a>, u32> {
        literal('(')
            .skip_then(defer(nested))
            .then_skip(literal(')'))
            .map(|depth: u32| depth + 1)
            .or_else(literal('x').map(|_| 0))
            .boxed()
    }

    #[test]
    fn it_accepts_nest_depth() {
        let mut context = MatchContext::new(MatchOptions { max_depth: Some(3) });
        let text = "((x))";
        assert_eq!(
            nested().run(&mut context, StrPosition::new(text)),
            MatchResult::success(2, nth(text, 5))
        );
        assert_eq!(context.depth(), 0);
    }

    #[test]
    fn default_options_are_unbounded() {
        assert_eq!(MatchOptions::default(), MatchOptions { max_depth: None });

        let text = format!("{}x{}", "(".repeat(300), ")".repeat(300));
        let mut context = MatchContext::default();
        assert_eq!(
            nested().run(&mut context, StrPosition::new(&text)),
            MatchResult::success(300, nth(&text, 601))
        );
    }

    #[test]
    fn it_fails_on_too_deep_nest() {
        let mut context = MatchContext::new(MatchOptions { max_depth: Some(2) });
        let text = "(((x)))";
        let result = nested().run(&mut context, StrPosition::new(text));
        assert!(result.is_failure());
        assert_eq!(context.depth(), 0);

        let mut unbounded = MatchContext::new(MatchOptions { max_depth: None });
        assert_eq!(
            nested().run(&mut unbounded, StrPosition::new(text)),
            MatchResult::success(3, nth(text, 7))
        );
    }
}
