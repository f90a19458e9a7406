use serde::{Deserialize, Serialize};

use super::features::{corpus, FeedbackEntry};
use super::lexicon::{Category, NEGATIVE_WORDS, POSITIVE_WORDS};
use super::sentiment::polarity;

const MAX_THEMES: usize = 5;
const KEYWORDS_PER_THEME: usize = 2;
const STRONG_POLARITY: f64 = 0.3;

/// Human-readable positive and negative themes for a feedback batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Themes {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

fn classify(keyword: &str, lexicon: &[&str]) -> bool {
    lexicon.contains(&keyword) || lexicon.iter().any(|word| keyword.contains(word))
}

fn already_listed(themes: &[String], word: &str) -> bool {
    themes.iter().any(|theme| theme.to_lowercase().contains(word))
}

fn surface_word(themes: &mut Vec<String>, text: &str, lexicon: &[&str]) {
    let found = lexicon
        .iter()
        .find(|word| text.contains(*word) && !already_listed(themes, word));
    if let Some(word) = found {
        themes.push(title_case(word));
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Summarize which topics attendees praised or complained about.
///
/// Category themes come first, in category order, followed by single words
/// surfaced from strongly polarized entries. Both lists are capped at five.
pub fn summarize_themes(entries: &[FeedbackEntry]) -> Themes {
    let mut themes = Themes::default();
    let text = corpus(entries);

    for category in Category::ALL {
        let mentioned: Vec<&str> = category
            .keywords()
            .iter()
            .copied()
            .filter(|keyword| text.contains(keyword))
            .collect();
        if mentioned.is_empty() {
            continue;
        }

        let positive: Vec<&str> = mentioned
            .iter()
            .copied()
            .filter(|keyword| classify(keyword, &POSITIVE_WORDS))
            .take(KEYWORDS_PER_THEME)
            .collect();
        let negative: Vec<&str> = mentioned
            .iter()
            .copied()
            .filter(|keyword| classify(keyword, &NEGATIVE_WORDS))
            .take(KEYWORDS_PER_THEME)
            .collect();

        if !positive.is_empty() {
            themes
                .positive
                .push(format!("{}: {}", category.title(), positive.join(", ")));
        }
        if !negative.is_empty() {
            themes
                .negative
                .push(format!("{}: {}", category.title(), negative.join(", ")));
        }
    }

    for entry in entries {
        let entry_polarity = polarity(&entry.text);
        let lowered = entry.text.to_lowercase();
        if entry_polarity > STRONG_POLARITY {
            surface_word(&mut themes.positive, &lowered, &POSITIVE_WORDS);
        } else if entry_polarity < -STRONG_POLARITY {
            surface_word(&mut themes.negative, &lowered, &NEGATIVE_WORDS);
        }
    }

    themes.positive.truncate(MAX_THEMES);
    themes.negative.truncate(MAX_THEMES);
    themes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> FeedbackEntry {
        FeedbackEntry::new(text, None)
    }

    #[test]
    fn test_no_matches_yield_empty_lists() {
        let themes = summarize_themes(&[entry("It happened on a Tuesday")]);
        assert!(themes.positive.is_empty());
        assert!(themes.negative.is_empty());
    }

    #[test]
    fn test_category_theme_lists_at_most_two_keywords() {
        let themes = summarize_themes(&[entry("fun, memorable, amazing, great")]);
        assert_eq!(themes.positive[0], "Vibe: fun, memorable");
    }

    #[test]
    fn test_negative_category_theme() {
        let themes = summarize_themes(&[entry("The registration was chaotic")]);
        assert_eq!(themes.negative, vec!["Logistics: chaotic".to_string()]);
    }

    #[test]
    fn test_strong_entry_surfaces_unlisted_word() {
        // "perfect" belongs to no category keyword list.
        let themes = summarize_themes(&[entry("Perfect")]);
        assert_eq!(themes.positive, vec!["Perfect".to_string()]);
    }

    #[test]
    fn test_surfaced_word_skips_listed_ones() {
        // "great" is already inside "Vibe: great", so "perfect" is surfaced.
        let themes = summarize_themes(&[entry("great and perfect")]);
        assert_eq!(
            themes.positive,
            vec!["Vibe: great".to_string(), "Perfect".to_string()]
        );
    }

    #[test]
    fn test_surfaced_words_are_not_repeated() {
        let themes = summarize_themes(&[entry("Perfect"), entry("Perfect")]);
        assert_eq!(themes.positive, vec!["Perfect".to_string()]);
    }

    #[test]
    fn test_lists_truncate_to_five() {
        let themes = summarize_themes(&[entry(
            "smooth organization, delicious food, engaging speakers, comfortable venue, \
             friendly people, fun energy, good time",
        )]);
        assert_eq!(themes.positive.len(), 5);
        assert!(themes.positive[0].starts_with("Logistics"));
    }
}
