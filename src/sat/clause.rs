use crate::sat::literal::Literal;
use core::ops::Index;
use smallvec::SmallVec;

/// A disjunction of literals as stored inside the engine.
///
/// The first two positions are the watched literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    literals: SmallVec<[Literal; 8]>,
}

impl Clause {
    /// Sorts and deduplicates the literals.
    ///
    /// Returns `None` for a tautology (a clause holding both `x` and `-x`).
    #[must_use]
    pub fn normalised(literals: &[i32]) -> Option<Self> {
        let mut literals: SmallVec<[Literal; 8]> =
            literals.iter().map(|&l| Literal::from_i32(l)).collect();
        literals.sort_unstable();
        literals.dedup();

        if literals
            .windows(2)
            .any(|pair| pair[0].variable() == pair[1].variable())
        {
            return None;
        }

        Some(Self { literals })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.literals.swap(i, j);
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}
