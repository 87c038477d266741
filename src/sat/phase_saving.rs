use crate::sat::assignment::Solutions;
use bit_vec::BitVec;

/// Preferred polarity per variable, taken from the last model found.
///
/// Re-solving under slightly different assumptions then starts from the
/// previous solution instead of from scratch.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SavedPhases(BitVec);

impl SavedPhases {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(BitVec::from_elem(num_vars + 1, true))
    }

    pub fn grow(&mut self, num_vars: usize) {
        let len = num_vars + 1;
        if len > self.0.len() {
            self.0.grow(len - self.0.len(), true);
        }
    }

    #[must_use]
    pub fn get(&self, var: usize) -> bool {
        self.0.get(var).unwrap_or(true)
    }

    pub fn save_model(&mut self, solutions: &Solutions) {
        for (i, &lit) in solutions.iter().enumerate() {
            if i + 1 < self.0.len() {
                self.0.set(i + 1, lit > 0);
            }
        }
    }
}
