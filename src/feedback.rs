//! Structural writing advice derived from the analysis results.

use crate::metrics::TextMetrics;
use crate::readability::{ReadabilityBand, ReadabilityResult};
use crate::vocabulary::{VarietyBand, VocabularyResult};
use crate::HP;

/// Suggestions on length, sentence rhythm, structure, readability and word
/// choice. Empty when the text has no words.
pub fn advise(
    metrics: &TextMetrics,
    readability: &ReadabilityResult,
    vocabulary: &VocabularyResult,
) -> Vec<String> {
    if metrics.word_count == 0 {
        return vec![];
    }

    let mut advice = Vec::new();

    if metrics.word_count < HP.advice_min_words {
        advice.push(format!(
            "Essay is short ({} words). Consider expanding to at least {} words.",
            metrics.word_count, HP.advice_min_words
        ));
    }

    if metrics.sentence_count > 0 {
        let avg = metrics.avg_words_per_sentence();
        if avg > HP.advice_long_sentence_words {
            advice.push(format!(
                "Sentences average {avg:.1} words and may be too long. Consider breaking them up."
            ));
        } else if avg < HP.advice_short_sentence_words {
            advice.push(format!(
                "Sentences average {avg:.1} words and may be too short. Consider combining some."
            ));
        }
    }

    if metrics.paragraph_count < HP.advice_min_paragraphs {
        advice.push("Consider adding more paragraphs for better structure.".to_string());
    }

    if readability.band >= ReadabilityBand::Difficult {
        advice.push(format!(
            "Readability is {} ({:.0}). Prefer shorter sentences and simpler words.",
            readability.band.label(),
            readability.score
        ));
    }

    if vocabulary.variety == VarietyBand::NeedsImprovement {
        advice.push(format!(
            "Vocabulary variety is low ({:.0}% unique words). Vary your word choice.",
            vocabulary.type_token_ratio * 100.0
        ));
    }

    advice
}
