#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

pub type Variable = u32;

/// A literal packed as `2 * var + negated`.
///
/// Both polarities of a variable are adjacent, so a literal doubles as an index
/// into per-literal tables such as the watch lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal(u32);

impl Literal {
    #[must_use]
    pub const fn new(var: Variable, polarity: bool) -> Self {
        if polarity {
            Self(var * 2)
        } else {
            Self(var * 2 + 1)
        }
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0 / 2
    }

    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0 % 2 == 0
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self(self.0 ^ 1)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Builds a literal from its DIMACS form. `value` must be nonzero.
    #[must_use]
    pub fn from_i32(value: i32) -> Self {
        debug_assert_ne!(value, 0, "0 is not a literal");
        Self::new(value.unsigned_abs(), value.is_positive())
    }

    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn to_i32(self) -> i32 {
        let var = self.variable() as i32;
        if self.polarity() { var } else { -var }
    }
}
