//! Alignment - four-axis moral profile of the player
//!
//! The source tracked these as unbounded scalars; here every adjustment
//! clamps to the same `[-100, 100]` range relationship scores use.

use serde::{Deserialize, Serialize};

/// One of the four alignment axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentAxis {
    Wisdom,
    Chaos,
    Mercy,
    Curiosity,
}

/// Signed alignment scalars, each clamped to `[-100, 100]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alignment {
    pub wisdom: i32,
    pub chaos: i32,
    pub mercy: i32,
    pub curiosity: i32,
}

impl Alignment {
    pub const MIN: i32 = -100;
    pub const MAX: i32 = 100;

    pub fn get(&self, axis: AlignmentAxis) -> i32 {
        match axis {
            AlignmentAxis::Wisdom => self.wisdom,
            AlignmentAxis::Chaos => self.chaos,
            AlignmentAxis::Mercy => self.mercy,
            AlignmentAxis::Curiosity => self.curiosity,
        }
    }

    /// Adds `delta` to the given axis, clamping to `[MIN, MAX]`
    pub fn adjust(&mut self, axis: AlignmentAxis, delta: i32) {
        let slot = match axis {
            AlignmentAxis::Wisdom => &mut self.wisdom,
            AlignmentAxis::Chaos => &mut self.chaos,
            AlignmentAxis::Mercy => &mut self.mercy,
            AlignmentAxis::Curiosity => &mut self.curiosity,
        };
        *slot = (*slot + delta).clamp(Self::MIN, Self::MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_clamps_both_ends() {
        let mut alignment = Alignment::default();
        alignment.adjust(AlignmentAxis::Chaos, 150);
        assert_eq!(alignment.chaos, 100);
        alignment.adjust(AlignmentAxis::Mercy, -500);
        assert_eq!(alignment.mercy, -100);
        alignment.adjust(AlignmentAxis::Wisdom, 10);
        alignment.adjust(AlignmentAxis::Wisdom, -4);
        assert_eq!(alignment.get(AlignmentAxis::Wisdom), 6);
    }
}
