use unicode_normalization::UnicodeNormalization;

/// Characters stripped from both ends of the first selected word
pub const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '\'', '"', '(', ')', '[', ']', '{', '}', '<', '>', '«', '»',
    '“', '”', '‘', '’',
];

const MIN_SELECTION_CHARS: usize = 2;
const SENTENCE_FALLBACK_CHARS: usize = 200;

/// A released selection, classified
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionContext {
    pub raw_text: String,
    /// First token with surrounding punctuation removed
    pub first_word: String,
    pub is_single_word: bool,
    pub cursor_x: i32,
    pub cursor_y: i32,
}

impl SelectionContext {
    /// Word to look up, if the cleaned first token is long enough
    pub fn lookup_word(&self) -> Option<&str> {
        (self.first_word.chars().count() > 1).then_some(self.first_word.as_str())
    }

    /// Multi-word selections also get the simplify / translate bar
    pub fn wants_action_bar(&self) -> bool {
        !self.is_single_word
    }
}

/// Normalize and classify a selection. `None` when the trimmed text is shorter
/// than two characters.
pub fn classify(text: &str, cursor_x: i32, cursor_y: i32) -> Option<SelectionContext> {
    let normalized: String = text.nfc().collect();
    let raw_text = normalized.trim();

    if raw_text.chars().count() < MIN_SELECTION_CHARS {
        return None;
    }

    let mut tokens = raw_text.split_whitespace();
    let first_word = tokens.next().map(clean_word).unwrap_or_default();
    let is_single_word = tokens.next().is_none();

    Some(SelectionContext {
        raw_text: raw_text.to_string(),
        first_word,
        is_single_word,
        cursor_x,
        cursor_y,
    })
}

/// Strip surrounding punctuation from a token
pub fn clean_word(token: &str) -> String {
    token.trim_matches(PUNCTUATION).to_string()
}

/// Sentence of `text` containing the first case-insensitive occurrence of `word`
pub fn sentence_containing(text: &str, word: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let Some(word_index) = find_case_insensitive(text, word) else {
        return take_chars(text, SENTENCE_FALLBACK_CHARS).trim().to_string();
    };

    let before = &text[..word_index];
    let start = ["! ", ". ", "? "]
        .iter()
        .filter_map(|b| before.rfind(b).map(|i| i + b.len()))
        .chain(before.rfind('\n').map(|i| i + 1))
        .max()
        .unwrap_or(0);

    let after = &text[word_index..];
    let end = match after.find(['.', '!', '?']) {
        Some(i) => word_index + i + 1,
        None => word_index + take_chars(after, SENTENCE_FALLBACK_CHARS).len(),
    };

    text[start..end].trim().to_string()
}

/// Byte index of the first case-insensitive match of `needle` in `haystack`
pub fn find_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();

    haystack.char_indices().map(|(i, _)| i).find(|&i| {
        let mut rest = haystack[i..].chars().flat_map(char::to_lowercase);
        needle.iter().all(|c| rest.next() == Some(*c))
    })
}

/// Byte length of the case-insensitive match of `needle` starting at `start`
pub fn match_len(haystack: &str, start: usize, needle: &str) -> usize {
    let wanted = needle.chars().flat_map(char::to_lowercase).count();
    let mut seen = 0;

    for (offset, c) in haystack[start..].char_indices() {
        if seen >= wanted {
            return offset;
        }
        seen += c.to_lowercase().count();
    }

    haystack.len() - start
}

fn take_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}
