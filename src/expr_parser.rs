#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::error::CalcError;
use crate::expr::{BinaryOp, Expr};
use lite_matcher::{
    classes, defer, fail, literal, match_all, succeed, BoxedMatcher, LiteralText, MatchContext,
    MatchOptions, Matcher, StrPosition,
};
use num_traits::{NumCast, PrimInt};

type Pos<'a> = StrPosition<'a>;

classes! {
    pub whitespace_char => ' ' | '\t' | '\r' | '\n';
    pub digit => '0' ..= '9';
}

/// Decimal value of `digits`, or `None` if it does not fit in `N`.
pub fn fold_digits<N: PrimInt>(digits: &[char]) -> Option<N> {
    let radix = <N as NumCast>::from(10u32)?;
    digits.iter().try_fold(N::zero(), |acc, c| {
        let digit = <N as NumCast>::from(c.to_digit(10)?)?;
        acc.checked_mul(&radix)?.checked_add(&digit)
    })
}

pub fn whitespace<'a>() -> impl Matcher<Pos<'a>, Output = Vec<char>> {
    whitespace_char().many()
}

fn token<'a, T: LiteralText>(text: T) -> impl Matcher<Pos<'a>, Output = T> {
    literal(text).then_skip(whitespace())
}

/// An unsigned decimal literal. Literals too large for `i64` fail where the
/// digits end.
pub fn number<'a>() -> impl Matcher<Pos<'a>, Output = Expr> {
    digit()
        .many1()
        .flat_map(|digits: Vec<char>| -> BoxedMatcher<'a, Pos<'a>, Expr> {
            match fold_digits::<i64>(&digits) {
                Some(value) => succeed(Expr::Number(value)).boxed(),
                None => fail::<Pos<'a>, Expr>().boxed(),
            }
        })
        .then_skip(whitespace())
}

fn additive_op<'a>() -> impl Matcher<Pos<'a>, Output = BinaryOp> {
    token('+')
        .map(|_| BinaryOp::Add)
        .or_else(token('-').map(|_| BinaryOp::Sub))
}

fn multiplicative_op<'a>() -> impl Matcher<Pos<'a>, Output = BinaryOp> {
    token('*')
        .map(|_| BinaryOp::Mul)
        .or_else(token('/').map(|_| BinaryOp::Div))
}

/// `operand (operator operand)*`, folded left.
fn chain_left<'a, T, O>(operand: fn() -> T, operator: O) -> impl Matcher<Pos<'a>, Output = Expr>
where
    T: Matcher<Pos<'a>, Output = Expr>,
    O: Matcher<Pos<'a>, Output = BinaryOp>,
{
    operand()
        .then(operator.then(operand()).many())
        .map(|(first, rest): (Expr, Vec<(BinaryOp, Expr)>)| {
            rest.into_iter()
                .fold(first, |lhs, (op, rhs)| Expr::binary(op, lhs, rhs))
        })
}

pub fn expression<'a>() -> BoxedMatcher<'a, Pos<'a>, Expr> {
    chain_left(term, additive_op()).boxed()
}

pub fn term<'a>() -> BoxedMatcher<'a, Pos<'a>, Expr> {
    chain_left(factor, multiplicative_op()).boxed()
}

pub fn factor<'a>() -> BoxedMatcher<'a, Pos<'a>, Expr> {
    number()
        .or_else(
            token('(')
                .skip_then(defer(expression))
                .then_skip(token(')')),
        )
        .or_else(token('-').skip_then(defer(factor)).map(Expr::negate))
        .boxed()
}

/// A whole input: leading whitespace, one expression, nothing after it.
pub fn program<'a>() -> impl Matcher<Pos<'a>, Output = Expr> {
    match_all(whitespace().skip_then(expression()))
}

/// Parses with unbounded nesting. Use [`parse_expr_with_options`] with a
/// `max_depth` to reject deeply nested input instead.
pub fn parse_expr(input: &str) -> Result<Expr, CalcError> {
    parse_expr_with_options(input, Default::default())
}

pub fn parse_expr_with_options(input: &str, options: MatchOptions) -> Result<Expr, CalcError> {
    program()
        .run(&mut MatchContext::new(options), StrPosition::new(input))
        .into_result()
        .map(|(expr, _)| expr)
        .map_err(CalcError::unexpected)
}

pub fn evaluate(input: &str) -> Result<i64, CalcError> {
    parse_expr(input)?.eval()
}
