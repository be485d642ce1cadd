use std::collections::VecDeque;

use regex::Regex;

use crate::types::pairs::SentencePair;

/// Spanish half of a synthetic follow-up line produced when English overflow
/// is found stuck to the end of a Spanish clause. The tag is exempt from
/// artifact stripping so it survives re-processing intact.
pub const PENDING_TRANSLATION_TAG: &str = "[Translation pending]";

/// Overflow after an exclamation mark must be longer than this (in chars)
/// before it is treated as unseparated English continuation.
const OVERFLOW_MIN_CHARS: usize = 20;

/// Result of parsing one translation block. Malformed lines are never an
/// error; they are skipped and counted so the caller can surface the count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPairs {
    pub pairs: Vec<SentencePair>,
    pub dropped_lines: usize,
}

/// Converts a freeform "English / Spanish" text block, one pair per line,
/// into an ordered sequence of SentencePair.
///
/// Lines are cleaned (list markers, enclosing quote/bracket artifacts) and
/// split at the first `/` only, so slashes later in the Spanish clause do
/// not break the pair. Lines without a separator, or with an empty half
/// after cleanup, yield nothing and are counted in `dropped_lines`.
pub fn parse_translation_block(raw: &str) -> ParsedPairs {
    let marker_re = Regex::new(r"^\s*(?:[-*•]\s*|\d+[.)]\s*)+").unwrap();

    let mut queue: VecDeque<String> = raw.lines().map(str::to_string).collect();
    let mut pairs: Vec<SentencePair> = Vec::new();
    let mut dropped_lines = 0;

    while let Some(line) = queue.pop_front() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // Markers come off before separator detection so "1. Hi / Hola"
        // splits on the slash, not on anything inside the prefix.
        let line = marker_re.replace(line, "");

        let Some((english_raw, spanish_raw)) = line.split_once('/') else {
            dropped_lines += 1;
            continue;
        };

        let english = clean_half(english_raw).to_string();
        let mut spanish = clean_half(spanish_raw).to_string();

        if let Some((kept, overflow)) = split_exclamation_overflow(&spanish) {
            spanish = kept;
            // Defer the overflow as its own line, re-processed next so it
            // lands directly after the pair it was torn from.
            queue.push_front(format!("{} / {}", overflow, PENDING_TRANSLATION_TAG));
        }

        if english.is_empty() || spanish.is_empty() {
            dropped_lines += 1;
            continue;
        }
        pairs.push(SentencePair { english, spanish });
    }

    ParsedPairs {
        pairs,
        dropped_lines,
    }
}

/// Trims a half and strips enclosing quote/bracket/emphasis artifacts while
/// leaving terminal sentence punctuation alone.
fn clean_half(half: &str) -> &str {
    let half = half.trim();
    if half == PENDING_TRANSLATION_TAG {
        return half;
    }
    half.trim_matches(|c: char| {
        matches!(
            c,
            '"' | '\'' | '(' | ')' | '[' | ']' | '{' | '}' | '*' | '_' | '«' | '»' | '“' | '”'
                | '‘' | '’'
        )
    })
    .trim()
}

/// Detects English continuation welded onto a Spanish clause after an
/// exclamation mark. Returns the truncated Spanish half and the overflow
/// text when the tail is long enough and reads as English (no Spanish
/// diacritics or inverted punctuation, starts with a capital).
fn split_exclamation_overflow(spanish: &str) -> Option<(String, String)> {
    let bang = spanish.find('!')?;
    let tail = spanish[bang + 1..].trim_start_matches('!').trim();
    if tail.chars().count() <= OVERFLOW_MIN_CHARS {
        return None;
    }
    if !looks_english(tail) {
        return None;
    }
    // A slash in the overflow would shift the synthetic line's separator.
    if tail.contains('/') {
        return None;
    }
    Some((spanish[..=bang].to_string(), tail.to_string()))
}

fn looks_english(text: &str) -> bool {
    let has_spanish_marks = text
        .chars()
        .any(|c| "áéíóúüñÁÉÍÓÚÜÑ¿¡".contains(c));
    let starts_upper = text.chars().next().map_or(false, |c| c.is_ascii_uppercase());
    !has_spanish_marks && starts_upper
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(english: &str, spanish: &str) -> SentencePair {
        SentencePair::new(english, spanish)
    }

    #[test]
    fn well_formed_line_parses_to_trimmed_pair() {
        let parsed = parse_translation_block("Hello there. / Hola alli.");
        assert_eq!(parsed.pairs, vec![pair("Hello there.", "Hola alli.")]);
        assert_eq!(parsed.dropped_lines, 0);
    }

    #[test]
    fn numbered_lines_and_blank_lines() {
        let parsed =
            parse_translation_block("1. Good morning / Buenos dias\n\n2. See you / Nos vemos");
        assert_eq!(
            parsed.pairs,
            vec![
                pair("Good morning", "Buenos dias"),
                pair("See you", "Nos vemos"),
            ]
        );
        assert_eq!(parsed.dropped_lines, 0);
    }

    #[test]
    fn bullet_markers_are_stripped_before_separator_detection() {
        let parsed = parse_translation_block("- Thanks a lot. / Muchas gracias.\n* Bye / Adios");
        assert_eq!(
            parsed.pairs,
            vec![pair("Thanks a lot.", "Muchas gracias."), pair("Bye", "Adios")]
        );
    }

    #[test]
    fn line_without_separator_yields_no_pair() {
        let parsed = parse_translation_block("This line has no separator at all");
        assert!(parsed.pairs.is_empty());
        assert_eq!(parsed.dropped_lines, 1);
    }

    #[test]
    fn empty_half_after_cleanup_is_dropped() {
        let parsed = parse_translation_block(" / Hola\nHello / \n\"\" / Hola");
        assert!(parsed.pairs.is_empty());
        assert_eq!(parsed.dropped_lines, 3);
    }

    #[test]
    fn splits_at_first_separator_only() {
        let parsed = parse_translation_block("He said yes / Dijo que si / o no");
        assert_eq!(parsed.pairs, vec![pair("He said yes", "Dijo que si / o no")]);
    }

    #[test]
    fn enclosing_artifacts_stripped_terminal_punctuation_kept() {
        let parsed = parse_translation_block("\"Hello there.\" / *¡Hola!*");
        assert_eq!(parsed.pairs, vec![pair("Hello there.", "¡Hola!")]);

        let parsed = parse_translation_block("(Good night.) / «Buenas noches.»");
        assert_eq!(parsed.pairs, vec![pair("Good night.", "Buenas noches.")]);
    }

    #[test]
    fn blank_lines_do_not_shift_ordering_or_count_as_dropped() {
        let parsed = parse_translation_block("\n\nA / B\n\n\nC / D\n");
        assert_eq!(parsed.pairs, vec![pair("A", "B"), pair("C", "D")]);
        assert_eq!(parsed.dropped_lines, 0);
    }

    #[test]
    fn exclamation_overflow_defers_a_pending_follow_up_pair() {
        let parsed = parse_translation_block(
            "Watch out! / ¡Cuidado! Then we ran back to the old house\nBye / Adios",
        );
        assert_eq!(
            parsed.pairs,
            vec![
                pair("Watch out!", "¡Cuidado!"),
                pair(
                    "Then we ran back to the old house",
                    PENDING_TRANSLATION_TAG,
                ),
                pair("Bye", "Adios"),
            ]
        );
        assert_eq!(parsed.dropped_lines, 0);
    }

    #[test]
    fn short_or_spanish_tails_after_exclamation_are_left_alone() {
        // Tail too short.
        let parsed = parse_translation_block("Wow! Nice. / ¡Guau! Que bien.");
        assert_eq!(parsed.pairs, vec![pair("Wow! Nice.", "¡Guau! Que bien.")]);

        // Tail is clearly still Spanish.
        let parsed =
            parse_translation_block("Run! The house is on fire. / ¡Corre! La casa está en llamas.");
        assert_eq!(
            parsed.pairs,
            vec![pair(
                "Run! The house is on fire.",
                "¡Corre! La casa está en llamas.",
            )]
        );
    }

    #[test]
    fn mixed_good_and_malformed_lines_keep_the_good_ones_in_order() {
        let input = "1. First / Primero\nbroken line\n2. Second / Segundo\n / \n3. Third / Tercero";
        let parsed = parse_translation_block(input);
        assert_eq!(
            parsed.pairs,
            vec![
                pair("First", "Primero"),
                pair("Second", "Segundo"),
                pair("Third", "Tercero"),
            ]
        );
        assert_eq!(parsed.dropped_lines, 2);
    }
}
