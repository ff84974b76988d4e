use crate::models::{
    assessment::{AssessmentAnswer, AssessmentResult, StyleScores},
    LearningStyle,
};

pub const DEFAULT_QUESTION_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("Assessment must have exactly {expected} answers, got {actual}")]
    InvalidSubmissionSize { expected: usize, actual: usize },

    #[error("Invalid answer: {0}")]
    InvalidCategory(String),
}

impl AssessmentError {
    pub fn kind(&self) -> &'static str {
        match self {
            AssessmentError::InvalidSubmissionSize { .. } => "invalid_submission_size",
            AssessmentError::InvalidCategory(_) => "invalid_category",
        }
    }
}

/// Classifies a fixed-length answer set into a learning style.
#[derive(Debug, Clone, Copy)]
pub struct AssessmentScorer {
    question_count: usize,
}

impl Default for AssessmentScorer {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION_COUNT)
    }
}

impl AssessmentScorer {
    pub fn new(question_count: usize) -> Self {
        Self { question_count }
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn score(&self, answers: &[AssessmentAnswer]) -> Result<AssessmentResult, AssessmentError> {
        if answers.len() != self.question_count {
            return Err(AssessmentError::InvalidSubmissionSize {
                expected: self.question_count,
                actual: answers.len(),
            });
        }

        // Every label is parsed before the first tally is touched.
        let styles = answers
            .iter()
            .map(|answer| {
                answer
                    .answer
                    .parse::<LearningStyle>()
                    .map_err(|e| AssessmentError::InvalidCategory(e.0))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut scores = StyleScores::default();
        for style in styles {
            scores.increment(style);
        }

        let (learning_style, max_tally) = scores.dominant();
        let confidence = if self.question_count == 0 {
            1.0 / 3.0
        } else {
            max_tally as f64 / self.question_count as f64
        };

        Ok(AssessmentResult {
            learning_style,
            scores,
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(labels: &[&str]) -> Vec<AssessmentAnswer> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| AssessmentAnswer {
                question_id: i as u32 + 1,
                answer: label.to_string(),
            })
            .collect()
    }

    fn repeated(counts: &[(&'static str, usize)]) -> Vec<AssessmentAnswer> {
        let labels: Vec<&str> = counts
            .iter()
            .flat_map(|(label, n)| std::iter::repeat(*label).take(*n))
            .collect();
        answers(&labels)
    }

    #[test]
    fn tallies_always_sum_to_question_count() {
        let scorer = AssessmentScorer::default();
        for split in [(10, 0, 0), (4, 3, 3), (0, 1, 9), (2, 6, 2)] {
            let submission = repeated(&[
                ("visual", split.0),
                ("auditory", split.1),
                ("kinesthetic", split.2),
            ]);
            let result = scorer.score(&submission).unwrap();
            assert_eq!(result.scores.total(), 10);
            assert!(result.confidence > 0.0 && result.confidence <= 1.0);
        }
    }

    #[test]
    fn unanimous_answers_give_full_confidence() {
        let scorer = AssessmentScorer::default();
        let result = scorer.score(&repeated(&[("kinesthetic", 10)])).unwrap();
        assert_eq!(result.learning_style, LearningStyle::Kinesthetic);
        assert_eq!(result.confidence, 1.0);

        let mixed = scorer
            .score(&repeated(&[("kinesthetic", 9), ("visual", 1)]))
            .unwrap();
        assert!(mixed.confidence < 1.0);
    }

    #[test]
    fn tie_goes_to_first_style_in_enumeration() {
        let scorer = AssessmentScorer::default();
        let result = scorer
            .score(&repeated(&[("auditory", 5), ("visual", 5)]))
            .unwrap();

        assert_eq!(result.learning_style, LearningStyle::Visual);
        assert_eq!(
            result.scores,
            StyleScores {
                visual: 5,
                auditory: 5,
                kinesthetic: 0
            }
        );
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn three_way_tie_on_custom_length() {
        let scorer = AssessmentScorer::new(3);
        let result = scorer
            .score(&answers(&["kinesthetic", "auditory", "visual"]))
            .unwrap();
        assert_eq!(result.learning_style, LearningStyle::Visual);
        assert!((result.confidence - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let scorer = AssessmentScorer::default();
        let err = scorer.score(&repeated(&[("visual", 9)])).unwrap_err();
        assert_eq!(
            err,
            AssessmentError::InvalidSubmissionSize {
                expected: 10,
                actual: 9
            }
        );

        let err = scorer.score(&repeated(&[("visual", 11)])).unwrap_err();
        assert_eq!(err.kind(), "invalid_submission_size");
    }

    #[test]
    fn unknown_label_is_rejected_by_name() {
        let scorer = AssessmentScorer::default();
        let mut submission = repeated(&[("visual", 9)]);
        submission.push(AssessmentAnswer {
            question_id: 10,
            answer: "telepathic".to_string(),
        });

        let err = scorer.score(&submission).unwrap_err();
        assert_eq!(err, AssessmentError::InvalidCategory("telepathic".to_string()));
        assert!(err.to_string().contains("telepathic"));
    }

    #[test]
    fn empty_inventory_uses_one_third_confidence() {
        let scorer = AssessmentScorer::new(0);
        let result = scorer.score(&[]).unwrap();
        assert_eq!(result.learning_style, LearningStyle::Visual);
        assert!((result.confidence - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn scoring_is_repeatable() {
        let scorer = AssessmentScorer::default();
        let submission = repeated(&[("auditory", 6), ("kinesthetic", 4)]);
        let first = scorer.score(&submission).unwrap();
        let second = scorer.score(&submission).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );

        let mut bad = submission.clone();
        bad[3].answer = "olfactory".to_string();
        assert_eq!(scorer.score(&bad), scorer.score(&bad));
    }
}
