//! Performance score grading thresholds

use serde::{Deserialize, Serialize};

/// Thresholds for grading a performance score, as percentages (0-100).
///
/// A score at or above `excellent` grades "Excellent", at or above `good`
/// grades "Good", anything below grades "Needs improvement".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreThresholds {
    /// Lower bound for an excellent grade
    #[serde(default = "default_excellent")]
    pub excellent: u8,
    /// Lower bound for a good grade
    #[serde(default = "default_good")]
    pub good: u8,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            excellent: default_excellent(),
            good: default_good(),
        }
    }
}

/// Grade assigned to a performance score percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreGrade {
    /// At or above the excellent threshold
    Excellent,
    /// At or above the good threshold
    Good,
    /// Below the good threshold
    NeedsImprovement,
}

impl ScoreThresholds {
    /// Grade a score percentage against these thresholds
    pub fn grade(&self, score_percent: u8) -> ScoreGrade {
        if score_percent >= self.excellent {
            ScoreGrade::Excellent
        } else if score_percent >= self.good {
            ScoreGrade::Good
        } else {
            ScoreGrade::NeedsImprovement
        }
    }
}

fn default_excellent() -> u8 {
    90
}

fn default_good() -> u8 {
    70
}
