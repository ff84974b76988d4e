use crate::models::{content::FormatRecommendation, ContentFormat, FormatUsage, LearningStyle};

/// Prior uses a format needs (strictly more than this) to override the
/// style-based pick.
pub const USAGE_OVERRIDE_THRESHOLD: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Content has no available format")]
    NoAvailableFormat,
}

/// Picks a presentation format from the learner's style and their history
/// with the item.
///
/// `available` is the set of formats the item offers; order does not matter.
pub fn select(
    style: LearningStyle,
    available: &[ContentFormat],
    history: &FormatUsage,
) -> Result<FormatRecommendation, SelectionError> {
    if available.is_empty() {
        return Err(SelectionError::NoAvailableFormat);
    }

    let base = style
        .preferred_formats()
        .into_iter()
        .find(|format| available.contains(format))
        .ok_or(SelectionError::NoAvailableFormat)?;

    let (top_format, top_count) = history.most_used();
    let usage_override = top_count > USAGE_OVERRIDE_THRESHOLD && available.contains(&top_format);
    let recommended_format = if usage_override { top_format } else { base };

    let alternative_formats = ContentFormat::ALL
        .into_iter()
        .filter(|format| *format != recommended_format && available.contains(format))
        .collect();

    let mut personalization_reason = format!("Recommended based on your {style} learning preference");
    if usage_override {
        personalization_reason.push_str(&format!(
            " and your usage pattern (preferring {top_format} format)"
        ));
    }

    Ok(FormatRecommendation {
        recommended_format,
        alternative_formats,
        personalization_reason,
        usage_override,
    })
}
