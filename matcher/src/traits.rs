#[cfg(not(feature = "std"))]
use alloc::string::String;

/// An immutable cursor into a character stream.
///
/// Matchers never mutate a position: every step forward goes through
/// [`Position::advance`], which hands back a new value. Two positions are
/// equal iff they denote the same offset in the stream.
pub trait Position: Clone + PartialEq {
    fn at_start(&self) -> bool;

    fn at_end(&self) -> bool;

    fn has_current(&self) -> bool {
        !self.at_end()
    }

    /// The character under the cursor, `None` at end of input.
    fn current(&self) -> Option<char>;

    /// The character just before the cursor, `None` at start of input.
    fn previous(&self) -> Option<char>;

    /// Position one character further on. At end of input the result equals `self`.
    fn advance(&self) -> Self;

    /// Strict stream-order comparison.
    fn is_before(&self, other: &Self) -> bool;

    /// Text from `self` up to (excluding) `end`. Empty if `end` is not after `self`.
    fn text_between(&self, end: &Self) -> String;
}
