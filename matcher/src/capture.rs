//! Named sub-match spans recorded as a side effect of matching.

use crate::matcher::{MatchContext, Matcher};
use crate::primitives::LiteralText;
use crate::result::MatchResult;
use crate::traits::Position;

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use alloc::collections::BTreeMap;
use core::marker::PhantomData;

/// Start and end of a captured match.
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone, PartialEq, Eq)]
pub struct Span<P> {
    pub start: P,
    pub end: P,
}

impl<P: Position> Span<P> {
    pub fn text(&self) -> String {
        self.start.text_between(&self.end)
    }
}

/// Captured spans keyed by name, at most one per name.
///
/// Entries survive later failed attempts and are only replaced by a newer
/// successful capture under the same name or removed explicitly.
#[cfg_attr(feature = "std", derive(Debug))]
#[derive(Clone)]
pub struct CaptureTable<P> {
    spans: BTreeMap<String, Span<P>>,
}

impl<P> Default for CaptureTable<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> CaptureTable<P> {
    pub fn new() -> Self {
        Self {
            spans: BTreeMap::new(),
        }
    }

    /// Insert or replace a span, returning the one it replaced
    pub fn insert<S: Into<String>>(&mut self, name: S, start: P, end: P) -> Option<Span<P>> {
        self.spans.insert(name.into(), Span { start, end })
    }

    pub fn group(&self, name: &str) -> Option<&Span<P>> {
        self.spans.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Span<P>> {
        self.spans.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.spans.contains_key(name)
    }

    pub fn clear(&mut self) {
        self.spans.clear()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// All captured names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        self.spans.keys().map(|name| name.as_str()).collect()
    }
}

impl<P: Position> CaptureTable<P> {
    pub fn substring(&self, name: &str) -> Option<String> {
        self.group(name).map(Span::text)
    }
}

pub struct Capture<M> {
    name: String,
    matcher: M,
}

impl<M> Capture<M> {
    pub fn new<S: Into<String>>(name: S, matcher: M) -> Self {
        Self {
            name: name.into(),
            matcher,
        }
    }
}

/// Records where `matcher` started and ended under `name` whenever it succeeds.
pub fn capture<M, S: Into<String>>(name: S, matcher: M) -> Capture<M> {
    Capture::new(name, matcher)
}

impl<P: Position, M: Matcher<P>> Matcher<P> for Capture<M> {
    type Output = M::Output;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, Self::Output> {
        let start = current.clone();
        let result = self.matcher.run(context, current);
        if let MatchResult::Success { next, .. } = &result {
            context
                .captures_mut()
                .insert(self.name.clone(), start, next.clone());
        }
        result
    }
}

/// Matches the text currently captured under `name`.
pub struct Backref<P> {
    name: String,
    _marker: PhantomData<fn(P)>,
}

pub fn backref<P: Position, S: Into<String>>(name: S) -> Backref<P> {
    Backref {
        name: name.into(),
        _marker: PhantomData,
    }
}

impl<P: Position> Matcher<P> for Backref<P> {
    type Output = String;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, String> {
        let text = match context.substring(&self.name) {
            Some(text) => text,
            None => return MatchResult::Failure { next: current },
        };
        match text.match_at(current) {
            Ok(next) => MatchResult::Success { value: text, next },
            Err(next) => MatchResult::Failure { next },
        }
    }
}
