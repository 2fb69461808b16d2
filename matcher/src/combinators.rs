use crate::matcher::{MatchContext, Matcher};
use crate::result::MatchResult;
use crate::traits::Position;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::marker::PhantomData;

pub struct Map<M, F, R> {
    matcher: M,
    f: F,
    _marker: PhantomData<fn() -> R>,
}

impl<M, F, R> Map<M, F, R> {
    pub fn new(matcher: M, f: F) -> Self {
        Self {
            matcher,
            f,
            _marker: PhantomData,
        }
    }
}

impl<P: Position, M: Matcher<P>, F: Fn(M::Output) -> R, R> Matcher<P> for Map<M, F, R> {
    type Output = R;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, R> {
        self.matcher.run(context, current).map(|value| (self.f)(value))
    }
}

/// Runs the matcher built from the first match's value, from where it ended.
pub struct FlatMap<M, F, N> {
    matcher: M,
    f: F,
    _marker: PhantomData<fn() -> N>,
}

impl<M, F, N> FlatMap<M, F, N> {
    pub fn new(matcher: M, f: F) -> Self {
        Self {
            matcher,
            f,
            _marker: PhantomData,
        }
    }
}

impl<P, M, F, N> Matcher<P> for FlatMap<M, F, N>
where
    P: Position,
    M: Matcher<P>,
    N: Matcher<P>,
    F: Fn(M::Output) -> N,
{
    type Output = N::Output;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, N::Output> {
        self.matcher
            .run(context, current)
            .flat_map(context, |value| (self.f)(value))
    }
}

/// `first` then `second`; no backtracking into `first` when `second` fails.
pub struct Sequence<A, B> {
    first: A,
    second: B,
}

impl<A, B> Sequence<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<P: Position, A: Matcher<P>, B: Matcher<P>> Matcher<P> for Sequence<A, B> {
    type Output = (A::Output, B::Output);

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, Self::Output> {
        match self.first.run(context, current) {
            MatchResult::Success { value: first, next } => self
                .second
                .run(context, next)
                .map(|second| (first, second)),
            MatchResult::Failure { next } => MatchResult::Failure { next },
        }
    }
}

pub struct KeepLeft<A, B>(Sequence<A, B>);

impl<A, B> KeepLeft<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self(Sequence::new(first, second))
    }
}

impl<P: Position, A: Matcher<P>, B: Matcher<P>> Matcher<P> for KeepLeft<A, B> {
    type Output = A::Output;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, Self::Output> {
        self.0.run(context, current).map(|(first, _)| first)
    }
}

pub struct KeepRight<A, B>(Sequence<A, B>);

impl<A, B> KeepRight<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self(Sequence::new(first, second))
    }
}

impl<P: Position, A: Matcher<P>, B: Matcher<P>> Matcher<P> for KeepRight<A, B> {
    type Output = B::Output;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, Self::Output> {
        self.0.run(context, current).map(|(_, second)| second)
    }
}

/// Ordered choice: `second` is tried from the original position only when
/// `first` fails, and the further-reaching failure is reported.
pub struct Choice<A, B> {
    first: A,
    second: B,
}

impl<A, B> Choice<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<P, A, B> Matcher<P> for Choice<A, B>
where
    P: Position,
    A: Matcher<P>,
    B: Matcher<P, Output = A::Output>,
{
    type Output = A::Output;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, Self::Output> {
        self.first
            .run(context, current.clone())
            .append(|| self.second.run(context, current))
    }
}

/// Applies `matcher` until it fails or stops making progress. Never fails.
pub struct Many<M> {
    matcher: M,
}

impl<M> Many<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }
}

fn repeat<P: Position, M: Matcher<P>>(
    matcher: &M,
    context: &mut MatchContext<P>,
    mut values: Vec<M::Output>,
    mut pos: P,
) -> MatchResult<P, Vec<M::Output>> {
    loop {
        match matcher.run(context, pos.clone()) {
            MatchResult::Success { value, next } if pos.is_before(&next) => {
                values.push(value);
                pos = next;
            }
            _ => return MatchResult::Success { value: values, next: pos },
        }
    }
}

impl<P: Position, M: Matcher<P>> Matcher<P> for Many<M> {
    type Output = Vec<M::Output>;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, Self::Output> {
        repeat(&self.matcher, context, Vec::new(), current)
    }
}

pub struct Many1<M> {
    matcher: M,
}

impl<M> Many1<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }
}

impl<P: Position, M: Matcher<P>> Matcher<P> for Many1<M> {
    type Output = Vec<M::Output>;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, Self::Output> {
        match self.matcher.run(context, current) {
            MatchResult::Success { value, next } => {
                let mut values = Vec::new();
                values.push(value);
                repeat(&self.matcher, context, values, next)
            }
            MatchResult::Failure { next } => MatchResult::Failure { next },
        }
    }
}

pub struct Optional<M> {
    matcher: M,
}

impl<M> Optional<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }
}

impl<P: Position, M: Matcher<P>> Matcher<P> for Optional<M> {
    type Output = Option<M::Output>;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, Self::Output> {
        match self.matcher.run(context, current.clone()) {
            MatchResult::Success { value, next } => MatchResult::Success {
                value: Some(value),
                next,
            },
            MatchResult::Failure { .. } => MatchResult::Success {
                value: None,
                next: current,
            },
        }
    }
}

/// Negative lookahead. Zero width either way.
pub struct Not<M> {
    matcher: M,
}

impl<M> Not<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }
}

impl<P: Position, M: Matcher<P>> Matcher<P> for Not<M> {
    type Output = ();

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, ()> {
        match self.matcher.run(context, current.clone()) {
            MatchResult::Success { .. } => MatchResult::Failure { next: current },
            MatchResult::Failure { .. } => MatchResult::Success {
                value: (),
                next: current,
            },
        }
    }
}

/// Positive lookahead: keeps the value, gives back the input.
pub struct Guard<M> {
    matcher: M,
}

impl<M> Guard<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }
}

impl<P: Position, M: Matcher<P>> Matcher<P> for Guard<M> {
    type Output = M::Output;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, Self::Output> {
        match self.matcher.run(context, current.clone()) {
            MatchResult::Success { value, .. } => MatchResult::Success {
                value,
                next: current,
            },
            failure => failure,
        }
    }
}

pub fn sequence<P: Position, A: Matcher<P>, B: Matcher<P>>(first: A, second: B) -> Sequence<A, B> {
    Sequence::new(first, second)
}

pub fn keep_left<P: Position, A: Matcher<P>, B: Matcher<P>>(first: A, second: B) -> KeepLeft<A, B> {
    KeepLeft::new(first, second)
}

pub fn keep_right<P: Position, A: Matcher<P>, B: Matcher<P>>(
    first: A,
    second: B,
) -> KeepRight<A, B> {
    KeepRight::new(first, second)
}

pub fn choice<P, A, B>(first: A, second: B) -> Choice<A, B>
where
    P: Position,
    A: Matcher<P>,
    B: Matcher<P, Output = A::Output>,
{
    Choice::new(first, second)
}

pub fn many<P: Position, M: Matcher<P>>(matcher: M) -> Many<M> {
    Many::new(matcher)
}

pub fn many1<P: Position, M: Matcher<P>>(matcher: M) -> Many1<M> {
    Many1::new(matcher)
}

pub fn optional<P: Position, M: Matcher<P>>(matcher: M) -> Optional<M> {
    Optional::new(matcher)
}

pub fn not<P: Position, M: Matcher<P>>(matcher: M) -> Not<M> {
    Not::new(matcher)
}

pub fn guard<P: Position, M: Matcher<P>>(matcher: M) -> Guard<M> {
    Guard::new(matcher)
}
