//! Lexicon-based polarity estimation.
//!
//! Each recognized opinion word carries a polarity in [-1, 1]. An intensifier
//! directly before the word scales it, a negator up to two tokens before it
//! flips and halves it. The text polarity is the mean over recognized words,
//! or 0.0 when none are found.

const POLARITY: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("appreciated", 0.4),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("comfortable", 0.4),
    ("convenient", 0.3),
    ("delicious", 1.0),
    ("engaging", 0.5),
    ("enjoyable", 0.5),
    ("enjoyed", 0.5),
    ("entertaining", 0.5),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("festive", 0.4),
    ("friendly", 0.4),
    ("fun", 0.3),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("impressed", 1.0),
    ("inclusive", 0.3),
    ("informative", 0.5),
    ("interesting", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("memorable", 0.5),
    ("nice", 0.6),
    ("organized", 0.3),
    ("perfect", 1.0),
    ("smooth", 0.4),
    ("tasty", 0.6),
    ("welcoming", 0.5),
    ("wonderful", 1.0),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("chaotic", -0.5),
    ("cold", -0.6),
    ("confusing", -0.4),
    ("crowded", -0.3),
    ("difficult", -0.5),
    ("disappointing", -0.6),
    ("disorganized", -0.5),
    ("dull", -0.3),
    ("expensive", -0.5),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("hungry", -0.2),
    ("lacking", -0.3),
    ("late", -0.3),
    ("messy", -0.4),
    ("poor", -0.4),
    ("rushed", -0.3),
    ("sad", -0.5),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("uncomfortable", -0.5),
    ("waste", -0.2),
    ("worst", -1.0),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("super", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "didn't", "wasn't", "isn't", "weren't", "aren't", "couldn't",
    "won't", "can't", "nothing",
];

const NEGATION_FACTOR: f64 = -0.5;

fn lookup(table: &[(&str, f64)], token: &str) -> Option<f64> {
    table
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, value)| *value)
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace('\u{2019}', "'")
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Polarity of a single piece of text, in [-1, 1].
pub fn polarity(text: &str) -> f64 {
    let tokens = tokenize(text);
    let mut total = 0.0;
    let mut hits = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        let Some(base) = lookup(POLARITY, token) else {
            continue;
        };

        let mut value = base;
        if i > 0 {
            if let Some(factor) = lookup(INTENSIFIERS, &tokens[i - 1]) {
                value *= factor;
            }
        }

        let window_start = i.saturating_sub(2);
        if tokens[window_start..i]
            .iter()
            .any(|t| NEGATORS.contains(&t.as_str()))
        {
            value *= NEGATION_FACTOR;
        }

        total += value.clamp(-1.0, 1.0);
        hits += 1;
    }

    if hits == 0 {
        0.0
    } else {
        (total / hits as f64).clamp(-1.0, 1.0)
    }
}
