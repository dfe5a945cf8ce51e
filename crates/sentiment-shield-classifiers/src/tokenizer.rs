//! Text normalization and word tokenization

/// A lowercase word-like unit and its position in the token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub position: usize,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Split `text` into lowercase tokens.
///
/// Curly apostrophes become `'`. Anything that is not an ASCII word
/// character (`[a-z0-9_]`), whitespace, `'`, `!` or `?` becomes a space, so
/// `!` and `?` stay attached to the word they follow and accented letters
/// split a word.
pub fn tokenize(text: &str) -> Vec<Token> {
    let normalized: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{02BC}' => '\'',
            c if is_kept(c) => c,
            _ => ' ',
        })
        .collect();

    normalized
        .split_whitespace()
        .enumerate()
        .map(|(position, word)| Token {
            text: word.to_string(),
            position,
        })
        .collect()
}

fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() || matches!(c, '\'' | '!' | '?')
}
