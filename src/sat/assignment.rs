use crate::sat::literal::{Literal, Variable};
use core::ops::Index;

/// The state of one variable during search.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    /// No value yet.
    #[default]
    Unassigned,
    /// Assigned to the given truth value.
    Assigned(bool),
}

impl VarState {
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        !self.is_assigned()
    }
}

/// One signed DIMACS literal per variable, in variable order.
pub type Solutions = Vec<i32>;

/// Current truth values, indexed by variable. Slot 0 is unused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(Vec<VarState>);

impl Index<usize> for Assignment {
    type Output = VarState;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Assignment {
    /// Creates an assignment for variables `1..=num_vars`, all unassigned.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![VarState::Unassigned; num_vars + 1])
    }

    /// The largest variable that can be assigned.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Makes room for variables up to `num_vars`. Never shrinks.
    pub fn grow(&mut self, num_vars: usize) {
        if num_vars > self.num_vars() {
            self.0.resize(num_vars + 1, VarState::Unassigned);
        }
    }

    /// Makes `lit` true.
    pub fn assign(&mut self, lit: Literal) {
        self.0[lit.variable() as usize] = VarState::Assigned(lit.polarity());
    }

    /// Resets `var` to `Unassigned`.
    pub fn unassign(&mut self, var: Variable) {
        self.0[var as usize] = VarState::Unassigned;
    }

    /// The value of `var`, or `None` if it is unassigned or out of range.
    #[must_use]
    pub fn var_value(&self, var: usize) -> Option<bool> {
        match self.0.get(var) {
            Some(VarState::Assigned(b)) => Some(*b),
            _ => None,
        }
    }

    /// Whether `lit` is currently true, false, or undecided.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.var_value(lit.variable() as usize)
            .map(|b| b == lit.polarity())
    }

    /// The full model. Unassigned variables are reported as false.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn solutions(&self) -> Solutions {
        self.0
            .iter()
            .enumerate()
            .skip(1)
            .map(|(var, state)| match state {
                VarState::Assigned(true) => var as i32,
                _ => -(var as i32),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_and_value() {
        let mut a = Assignment::new(3);
        a.assign(Literal::from_i32(-2));
        assert_eq!(a.var_value(2), Some(false));
        assert_eq!(a.literal_value(Literal::from_i32(2)), Some(false));
        assert_eq!(a.literal_value(Literal::from_i32(-2)), Some(true));
        assert_eq!(a.literal_value(Literal::from_i32(1)), None);

        a.unassign(2);
        assert!(a[2].is_unassigned());
    }

    #[test]
    fn test_solutions_are_signed_per_variable() {
        let mut a = Assignment::new(3);
        a.assign(Literal::from_i32(1));
        a.assign(Literal::from_i32(-3));
        assert_eq!(a.solutions(), vec![1, -2, -3]);
    }

    #[test]
    fn test_grow() {
        let mut a = Assignment::new(2);
        a.grow(5);
        assert_eq!(a.num_vars(), 5);
        assert_eq!(a.var_value(5), None);
    }
}
