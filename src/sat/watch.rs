#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::literal::Literal;
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

pub type WatchList = SmallVec<[usize; 6]>;

/// Clause indices watched by each literal. A clause sits in the lists of its
/// first two literals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchedLiterals(Vec<WatchList>);

impl WatchedLiterals {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![WatchList::new(); 2 * (num_vars + 1)])
    }

    pub fn grow(&mut self, num_vars: usize) {
        let len = 2 * (num_vars + 1);
        if len > self.0.len() {
            self.0.resize(len, WatchList::new());
        }
    }

    pub fn watch(&mut self, lit: Literal, clause_idx: usize) {
        self[lit].push(clause_idx);
    }

    /// Moves the list out so it can be rewritten while other lists are pushed to.
    pub fn take(&mut self, lit: Literal) -> WatchList {
        std::mem::take(&mut self[lit])
    }

    pub fn restore(&mut self, lit: Literal, list: WatchList) {
        self[lit] = list;
    }
}

impl Index<Literal> for WatchedLiterals {
    type Output = WatchList;

    fn index(&self, index: Literal) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl IndexMut<Literal> for WatchedLiterals {
    fn index_mut(&mut self, index: Literal) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_per_polarity() {
        let mut watches = WatchedLiterals::new(2);
        watches.watch(Literal::from_i32(1), 0);
        watches.watch(Literal::from_i32(-1), 1);

        assert_eq!(watches[Literal::from_i32(1)].as_slice(), &[0]);
        assert_eq!(watches[Literal::from_i32(-1)].as_slice(), &[1]);
    }

    #[test]
    fn test_take_and_restore() {
        let mut watches = WatchedLiterals::new(1);
        watches.grow(3);
        watches.watch(Literal::from_i32(3), 4);

        let list = watches.take(Literal::from_i32(3));
        assert!(watches[Literal::from_i32(3)].is_empty());
        watches.restore(Literal::from_i32(3), list);
        assert_eq!(watches[Literal::from_i32(3)].len(), 1);
    }
}
