use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod analytics;
pub mod assessment;
pub mod content;
pub mod user;

/// Learning-style classification assigned from the assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    /// Substituted when a user has not completed the assessment.
    #[default]
    Visual,
    Auditory,
    Kinesthetic,
}

impl LearningStyle {
    /// Fixed enumeration order. Tie-breaks always prefer the earlier entry.
    pub const ALL: [LearningStyle; 3] = [
        LearningStyle::Visual,
        LearningStyle::Auditory,
        LearningStyle::Kinesthetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStyle::Visual => "visual",
            LearningStyle::Auditory => "auditory",
            LearningStyle::Kinesthetic => "kinesthetic",
        }
    }

    /// Format fallback chain used for the style-based recommendation.
    pub fn preferred_formats(&self) -> [ContentFormat; 4] {
        match self {
            LearningStyle::Visual => [
                ContentFormat::Video,
                ContentFormat::Text,
                ContentFormat::Audio,
                ContentFormat::Interactive,
            ],
            LearningStyle::Auditory => [
                ContentFormat::Audio,
                ContentFormat::Video,
                ContentFormat::Text,
                ContentFormat::Interactive,
            ],
            LearningStyle::Kinesthetic => [
                ContentFormat::Interactive,
                ContentFormat::Video,
                ContentFormat::Text,
                ContentFormat::Audio,
            ],
        }
    }

    /// Head of the fallback chain.
    pub fn primary_format(&self) -> ContentFormat {
        self.preferred_formats()[0]
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown learning style: {0}")]
pub struct UnknownLearningStyle(pub String);

impl FromStr for LearningStyle {
    type Err = UnknownLearningStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visual" => Ok(LearningStyle::Visual),
            "auditory" => Ok(LearningStyle::Auditory),
            "kinesthetic" => Ok(LearningStyle::Kinesthetic),
            other => Err(UnknownLearningStyle(other.to_string())),
        }
    }
}

/// Presentation channel a content item may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Video,
    Audio,
    Text,
    Interactive,
}

impl ContentFormat {
    /// Fixed enumeration order used for alternatives and usage tie-breaks.
    pub const ALL: [ContentFormat; 4] = [
        ContentFormat::Video,
        ContentFormat::Audio,
        ContentFormat::Text,
        ContentFormat::Interactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFormat::Video => "video",
            ContentFormat::Audio => "audio",
            ContentFormat::Text => "text",
            ContentFormat::Interactive => "interactive",
        }
    }

    fn index(&self) -> usize {
        match self {
            ContentFormat::Video => 0,
            ContentFormat::Audio => 1,
            ContentFormat::Text => 2,
            ContentFormat::Interactive => 3,
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-format use counts, e.g. the interaction history of one user with one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatUsage {
    counts: [u32; 4],
}

impl FormatUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_formats<I>(formats: I) -> Self
    where
        I: IntoIterator<Item = ContentFormat>,
    {
        let mut usage = Self::new();
        for format in formats {
            usage.record(format);
        }
        usage
    }

    pub fn record(&mut self, format: ContentFormat) {
        self.counts[format.index()] += 1;
    }

    pub fn with_count(mut self, format: ContentFormat, count: u32) -> Self {
        self.counts[format.index()] = count;
        self
    }

    pub fn count(&self, format: ContentFormat) -> u32 {
        self.counts[format.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Most used format and its count. Ties keep the earliest format in
    /// enumeration order, so an empty history yields `(Video, 0)`.
    pub fn most_used(&self) -> (ContentFormat, u32) {
        let mut best = (ContentFormat::Video, self.count(ContentFormat::Video));
        for format in ContentFormat::ALL.into_iter().skip(1) {
            let count = self.count(format);
            if count > best.1 {
                best = (format, count);
            }
        }
        best
    }

    /// Non-zero counters keyed by format name, in enumeration order.
    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        ContentFormat::ALL
            .into_iter()
            .filter(|format| self.count(*format) > 0)
            .map(|format| (format.as_str().to_string(), self.count(format).into()))
            .collect()
    }
}
