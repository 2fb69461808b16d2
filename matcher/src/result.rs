use crate::matcher::{MatchContext, Matcher};
use crate::traits::Position;

/// Outcome of running a matcher at a position.
///
/// `Failure::next` is the furthest point the attempt reached, not where it
/// started, so that alternatives can report the most informative failure.
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone, PartialEq, Eq)]
pub enum MatchResult<P, R> {
    Success { value: R, next: P },
    Failure { next: P },
}

impl<P, R> MatchResult<P, R> {
    pub fn success(value: R, next: P) -> Self {
        MatchResult::Success { value, next }
    }

    pub fn failure(next: P) -> Self {
        MatchResult::Failure { next }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MatchResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn next(&self) -> &P {
        match self {
            MatchResult::Success { next, .. } | MatchResult::Failure { next } => next,
        }
    }

    pub fn value(&self) -> Option<&R> {
        match self {
            MatchResult::Success { value, .. } => Some(value),
            MatchResult::Failure { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<R> {
        match self {
            MatchResult::Success { value, .. } => Some(value),
            MatchResult::Failure { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<(R, P), P> {
        match self {
            MatchResult::Success { value, next } => Ok((value, next)),
            MatchResult::Failure { next } => Err(next),
        }
    }

    pub fn map<S, F>(self, f: F) -> MatchResult<P, S>
    where
        F: FnOnce(R) -> S,
    {
        match self {
            MatchResult::Success { value, next } => MatchResult::Success {
                value: f(value),
                next,
            },
            MatchResult::Failure { next } => MatchResult::Failure { next },
        }
    }
}

impl<P: Position, R> MatchResult<P, R> {
    /// Continue with the matcher `f` builds from the value, starting where this
    /// match ended.
    pub fn flat_map<N, F>(self, context: &mut MatchContext<P>, f: F) -> MatchResult<P, N::Output>
    where
        N: Matcher<P>,
        F: FnOnce(R) -> N,
    {
        match self {
            MatchResult::Success { value, next } => f(value).run(context, next),
            MatchResult::Failure { next } => MatchResult::Failure { next },
        }
    }

    /// Combine with an alternative outcome, computed only if `self` failed.
    ///
    /// Of two failures the one that got further wins; on a tie `self` is kept.
    pub fn append<F>(self, other: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        if self.is_success() {
            return self;
        }
        match other() {
            MatchResult::Failure { next } if !self.next().is_before(&next) => self,
            other => other,
        }
    }
}
