//! Splitting text into words.
//!
//! Words are whitespace-separated. Edge punctuation can optionally be trimmed
//! so that `"word,"` and `word` count as the same word.

/// Whether a character is trimmed from word edges.
///
/// Covers ASCII punctuation and the General Punctuation block
/// (U+2000..=U+206E: dashes, curly quotes, ellipsis and the like).
#[inline]
pub fn is_edge_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation() || ('\u{2000}'..='\u{206E}').contains(&ch)
}

/// Whitespace word splitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordSplitter {
    /// Trim edge punctuation and drop words left empty
    pub strip_punctuation: bool,
    /// Lowercase every word
    pub lowercase: bool,
}

impl WordSplitter {
    /// Create a splitter that keeps words exactly as written.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a line into words, calling `emit` for each.
    pub fn for_each_word<F>(&self, line: &str, mut emit: F)
    where
        F: FnMut(&str),
    {
        for raw in line.split_whitespace() {
            let word = if self.strip_punctuation {
                raw.trim_matches(is_edge_punctuation)
            } else {
                raw
            };
            if word.is_empty() {
                continue;
            }

            if self.lowercase && word.chars().any(char::is_uppercase) {
                emit(&word.to_lowercase());
            } else {
                emit(word);
            }
        }
    }

    /// Split a line into owned words.
    pub fn split(&self, line: &str) -> Vec<String> {
        let mut words = Vec::new();
        self.for_each_word(line, |w| words.push(w.to_string()));
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_split() {
        let splitter = WordSplitter::new();
        assert_eq!(
            splitter.split("hello  world\ttest\n"),
            vec!["hello", "world", "test"]
        );
    }

    #[test]
    fn test_keeps_punctuation_by_default() {
        let splitter = WordSplitter::new();
        assert_eq!(splitter.split("hi, there."), vec!["hi,", "there."]);
    }

    #[test]
    fn test_strip_punctuation() {
        let splitter = WordSplitter {
            strip_punctuation: true,
            ..Default::default()
        };
        assert_eq!(
            splitter.split("\u{201C}well,\u{201D} -- don't... \u{2014}"),
            vec!["well", "don't"]
        );
    }

    #[test]
    fn test_lowercase() {
        let splitter = WordSplitter {
            lowercase: true,
            ..Default::default()
        };
        assert_eq!(splitter.split("The CAT sat"), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn test_empty_line() {
        assert!(WordSplitter::new().split("   ").is_empty());
    }
}
