use serde::{Deserialize, Serialize};

use super::LearningStyle;

/// One inventory question; each option maps to a learning style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentQuestion {
    pub id: u32,
    pub question_text: String,
    pub visual_answer: String,
    pub auditory_answer: String,
    pub kinesthetic_answer: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// A single response as received on the wire. The `answer` label is checked
/// against the style enumeration by the scorer so the rejection can name it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentAnswer {
    pub question_id: u32,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub answers: Vec<AssessmentAnswer>,
}

/// Per-style answer tallies. Always serialized with all three keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleScores {
    #[serde(default)]
    pub visual: u32,
    #[serde(default)]
    pub auditory: u32,
    #[serde(default)]
    pub kinesthetic: u32,
}

impl StyleScores {
    pub fn get(&self, style: LearningStyle) -> u32 {
        match style {
            LearningStyle::Visual => self.visual,
            LearningStyle::Auditory => self.auditory,
            LearningStyle::Kinesthetic => self.kinesthetic,
        }
    }

    pub fn increment(&mut self, style: LearningStyle) {
        match style {
            LearningStyle::Visual => self.visual += 1,
            LearningStyle::Auditory => self.auditory += 1,
            LearningStyle::Kinesthetic => self.kinesthetic += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.visual + self.auditory + self.kinesthetic
    }

    /// Style holding the maximum tally; the first style in enumeration
    /// order wins a tie.
    pub fn dominant(&self) -> (LearningStyle, u32) {
        let mut best = (LearningStyle::Visual, self.visual);
        for style in LearningStyle::ALL.into_iter().skip(1) {
            let tally = self.get(style);
            if tally > best.1 {
                best = (style, tally);
            }
        }
        best
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub learning_style: LearningStyle,
    pub scores: StyleScores,
    pub confidence: f64,
}

impl AssessmentResult {
    /// Builds a result from stored tallies. Confidence is the winning share of
    /// all answers, or one third when there are no answers at all.
    pub fn from_scores(scores: StyleScores) -> Self {
        let (learning_style, max_tally) = scores.dominant();
        let total = scores.total();
        let confidence = if total == 0 {
            1.0 / 3.0
        } else {
            f64::from(max_tally) / f64::from(total)
        };

        Self {
            learning_style,
            scores,
            confidence,
        }
    }
}
