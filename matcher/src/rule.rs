//! Deferred grammar references for recursive and mutually recursive rules.
//!
//! All of them count towards [`MatchOptions::max_depth`](crate::MatchOptions)
//! while they run.

use crate::matcher::{BoxedMatcher, MatchContext, Matcher};
use crate::result::MatchResult;
use crate::traits::Position;

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::marker::PhantomData;

/// Builds its matcher from `factory` each time it runs.
pub struct Defer<F, M> {
    factory: F,
    _marker: PhantomData<fn() -> M>,
}

/// Wraps a rule constructor so a grammar can refer to itself.
///
/// ```ignore
/// fn list<'a>() -> BoxedMatcher<'a, StrPosition<'a>, usize> {
///     literal('(')
///         .skip_then(defer(list))
///         .then_skip(literal(')'))
///         .map(|n| n + 1)
///         .or_else(succeed(0))
///         .boxed()
/// }
/// ```
pub fn defer<F, M>(factory: F) -> Defer<F, M>
where
    F: Fn() -> M,
{
    Defer {
        factory,
        _marker: PhantomData,
    }
}

impl<P: Position, F: Fn() -> M, M: Matcher<P>> Matcher<P> for Defer<F, M> {
    type Output = M::Output;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, M::Output> {
        context.nested(current, |context, current| {
            (self.factory)().run(context, current)
        })
    }
}

/// A named slot that is declared first and defined later.
///
/// Clones share the slot, so a rule can be used inside its own definition or
/// in the definition of a rule it depends on. A clone embedded that way forms
/// a reference cycle which lives until [`Rule::clear`] is called. Embed
/// [`Rule::downgrade`] instead to let the grammar drop with its last `Rule`.
pub struct Rule<'a, P, R> {
    slot: Rc<Slot<'a, P, R>>,
}

type Slot<'a, P, R> = RefCell<Option<BoxedMatcher<'a, P, R>>>;

/// A non-owning handle to a [`Rule`]. Fails in place once the rule is gone.
pub struct WeakRule<'a, P, R> {
    slot: Weak<Slot<'a, P, R>>,
}

impl<P, R> Clone for WeakRule<'_, P, R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<P, R> Clone for Rule<'_, P, R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<'a, P: Position, R> Rule<'a, P, R> {
    pub fn declare() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }

    /// Replaces any earlier definition.
    pub fn define<M: Matcher<P, Output = R> + 'a>(&self, matcher: M) {
        *self.slot.borrow_mut() = Some(Rc::new(matcher));
    }

    pub fn is_defined(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Drops the definition, breaking any cycle through this rule.
    pub fn clear(&self) {
        let definition = self.slot.borrow_mut().take();
        drop(definition);
    }

    pub fn downgrade(&self) -> WeakRule<'a, P, R> {
        WeakRule {
            slot: Rc::downgrade(&self.slot),
        }
    }
}

fn run_slot<P: Position, R>(
    slot: &Slot<'_, P, R>,
    context: &mut MatchContext<P>,
    current: P,
) -> MatchResult<P, R> {
    let matcher = slot.borrow().clone();
    match matcher {
        Some(matcher) => context.nested(current, |context, current| {
            matcher.run(context, current)
        }),
        None => MatchResult::Failure { next: current },
    }
}

impl<'a, P: Position, R> Matcher<P> for Rule<'a, P, R> {
    type Output = R;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, R> {
        run_slot(&self.slot, context, current)
    }
}

impl<'a, P: Position, R> Matcher<P> for WeakRule<'a, P, R> {
    type Output = R;

    fn run(&self, context: &mut MatchContext<P>, current: P) -> MatchResult<P, R> {
        match self.slot.upgrade() {
            Some(slot) => run_slot(&slot, context, current),
            None => MatchResult::Failure { next: current },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{many, optional};
    use crate::impls::StrPosition;
    use crate::matcher::{match_all, MatchOptions};
    use crate::primitives::{class, literal, succeed};

    fn nth(text: &str, n: usize) -> StrPosition<'_> {
        let mut pos = StrPosition::new(text);
        for _ in 0..n {
            pos = pos.advance();
        }
        pos
    }

    fn parens<'a>() -> BoxedMatcher<'a, StrPosition<'a>, usize> {
        literal('(')
            .skip_then(defer(parens))
            .then_skip(literal(')'))
            .map(|n: usize| n + 1)
            .or_else(succeed(0))
            .boxed()
    }

    #[test]
    fn defer_allows_self_reference() {
        let mut context = MatchContext::default();
        let text = "((()))";
        assert_eq!(
            parens().run(&mut context, StrPosition::new(text)),
            MatchResult::success(3, nth(text, 6))
        );
    }

    #[test]
    fn defer_builds_only_when_reached() {
        let mut context = MatchContext::default();
        let text = "x";
        let matcher = literal('x').or_else(defer(|| -> crate::primitives::Literal<_, char> {
            panic!("must not be built")
        }));
        assert!(matcher.run(&mut context, StrPosition::new(text)).is_success());
    }

    #[test]
    fn rules_support_mutual_recursion() {
        // list := '[' (item (',' item)*)? ']'
        // item := digit | list
        let list: Rule<'_, StrPosition<'_>, usize> = Rule::declare();
        let item: Rule<'_, StrPosition<'_>, usize> = Rule::declare();
        assert!(!list.is_defined());

        item.define(
            class(|c: char| c.is_ascii_digit())
                .map(|_| 1)
                .or_else(list.clone()),
        );
        list.define(
            literal('[')
                .skip_then(optional(
                    item.clone()
                        .then(many(literal(',').skip_then(item.clone()))),
                ))
                .then_skip(literal(']'))
                .map(|items: Option<(usize, Vec<usize>)>| match items {
                    Some((first, rest)) => first + rest.into_iter().sum::<usize>(),
                    None => 0,
                }),
        );
        assert!(list.is_defined());

        let mut context = MatchContext::default();
        let text = "[1,[2,3],[]]";
        assert_eq!(
            list.run(&mut context, StrPosition::new(text)),
            MatchResult::success(3, nth(text, 12))
        );
        assert_eq!(context.depth(), 0);

        // `many` drops the inner failure, so the error surfaces at the
        // outer list's missing ']'.
        let text = "[1,[2,x]]";
        assert_eq!(
            list.run(&mut context, StrPosition::new(text)),
            MatchResult::failure(nth(text, 2))
        );
    }

    #[test]
    fn undefined_rule_fails_in_place() {
        let rule: Rule<'_, StrPosition<'_>, ()> = Rule::declare();
        let mut context = MatchContext::default();
        let text = "abc";
        assert_eq!(
            rule.run(&mut context, nth(text, 1)),
            MatchResult::failure(nth(text, 1))
        );
    }

    #[test]
    fn rule_depth_is_limited() {
        let nested: Rule<'_, StrPosition<'_>, usize> = Rule::declare();
        nested.define(
            literal('(')
                .skip_then(nested.clone())
                .then_skip(literal(')'))
                .map(|n: usize| n + 1)
                .or_else(succeed(0)),
        );

        let text = "((()))";
        let mut context = MatchContext::new(MatchOptions { max_depth: Some(3) });
        assert_eq!(
            nested.run(&mut context, StrPosition::new(text)),
            MatchResult::success(0, nth(text, 0))
        );
        assert_eq!(
            match_all(nested.clone()).run(&mut context, StrPosition::new(text)),
            MatchResult::failure(nth(text, 0))
        );
        assert_eq!(context.depth(), 0);

        let mut context = MatchContext::new(MatchOptions { max_depth: Some(4) });
        assert_eq!(
            nested.run(&mut context, StrPosition::new(text)),
            MatchResult::success(3, nth(text, 6))
        );

        let mut context = MatchContext::default();
        assert_eq!(
            nested.run(&mut context, StrPosition::new(text)),
            MatchResult::success(3, nth(text, 6))
        );
    }

    #[test]
    fn clear_breaks_self_reference() {
        let nested: Rule<'_, StrPosition<'_>, usize> = Rule::declare();
        nested.define(
            literal('(')
                .skip_then(nested.clone())
                .then_skip(literal(')'))
                .map(|n: usize| n + 1)
                .or_else(succeed(0)),
        );
        assert_eq!(Rc::strong_count(&nested.slot), 2);

        nested.clear();
        assert!(!nested.is_defined());
        assert_eq!(Rc::strong_count(&nested.slot), 1);

        let mut context = MatchContext::default();
        let text = "()";
        assert_eq!(
            nested.run(&mut context, StrPosition::new(text)),
            MatchResult::failure(nth(text, 0))
        );
    }

    #[test]
    fn weak_self_reference_is_freed() {
        let nested: Rule<'_, StrPosition<'_>, usize> = Rule::declare();
        nested.define(
            literal('(')
                .skip_then(nested.downgrade())
                .then_skip(literal(')'))
                .map(|n: usize| n + 1)
                .or_else(succeed(0)),
        );
        assert_eq!(Rc::strong_count(&nested.slot), 1);

        let mut context = MatchContext::default();
        let text = "((()))";
        assert_eq!(
            nested.run(&mut context, StrPosition::new(text)),
            MatchResult::success(3, nth(text, 6))
        );

        let handle = nested.downgrade();
        assert_eq!(
            handle.run(&mut context, StrPosition::new(text)),
            MatchResult::success(3, nth(text, 6))
        );
        drop(nested);
        assert_eq!(
            handle.run(&mut context, nth(text, 1)),
            MatchResult::failure(nth(text, 1))
        );
    }

    #[test]
    fn deep_right_recursion_is_unbounded_by_default() {
        let text = vec!["a"; 300].join(",");

        // list := 'a' (',' list)?
        let list: Rule<'_, StrPosition<'_>, usize> = Rule::declare();
        list.define(
            literal('a')
                .skip_then(optional(literal(',').skip_then(list.clone())))
                .map(|rest: Option<usize>| rest.unwrap_or(0) + 1),
        );

        let mut context = MatchContext::default();
        assert_eq!(
            match_all(list.clone()).run(&mut context, StrPosition::new(&text)),
            MatchResult::success(300, nth(&text, 599))
        );
        assert_eq!(context.depth(), 0);
    }
}
