//! Shared tokenizer for filter sub-expressions.
//!
//! Splits a string into token strings under four independently switchable
//! rules: whitespace skipping, alphabetic coalescing, digit coalescing,
//! and quoted-span coalescing. The output preserves left-to-right order
//! and never contains an empty token.

/// Tokenizer for sub-expression text.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    skip_whitespace: bool,
    coalesce_alpha: bool,
    coalesce_digits: bool,
    coalesce_quoted: bool,
}

impl Lexer {
    /// Creates a lexer with all coalescing options off.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            skip_whitespace: false,
            coalesce_alpha: false,
            coalesce_digits: false,
            coalesce_quoted: false,
        }
    }

    /// Discard whitespace between tokens.
    pub fn skip_whitespace(mut self, on: bool) -> Self {
        self.skip_whitespace = on;
        self
    }

    /// Combine contiguous alphabetic runs into single tokens.
    pub fn coalesce_alpha(mut self, on: bool) -> Self {
        self.coalesce_alpha = on;
        self
    }

    /// Combine contiguous digit runs (including date/decimal separators)
    /// into single tokens.
    pub fn coalesce_digits(mut self, on: bool) -> Self {
        self.coalesce_digits = on;
        self
    }

    /// Combine quoted spans into single tokens, quotes included.
    pub fn coalesce_quoted(mut self, on: bool) -> Self {
        self.coalesce_quoted = on;
        self
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Reads a word: an alphabetic start followed by alphanumerics,
    /// underscores, or hyphens.
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.current() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                word.push(c);
                self.advance();
            } else {
                break;
            }
        }
        word
    }

    /// Reads a number-like run. A `-` or `.` continues the run only when a
    /// digit follows, so dates (`2024-01-15`) and decimals (`3.5`) stay
    /// whole while `1)` and `5 or` split correctly.
    fn read_number(&mut self) -> String {
        let mut number = String::new();
        while let Some(c) = self.current() {
            if c.is_ascii_digit() {
                number.push(c);
                self.advance();
            } else if (c == '-' || c == '.') && self.peek(1).is_some_and(|n| n.is_ascii_digit()) {
                number.push(c);
                self.advance();
            } else {
                break;
            }
        }
        number
    }

    /// Reads a quoted span including both quote characters. An unterminated
    /// quote consumes the rest of the input.
    fn read_quoted(&mut self, quote: char) -> String {
        let mut span = String::new();
        span.push(quote);
        self.advance();

        while let Some(c) = self.current() {
            span.push(c);
            self.advance();
            if c == quote {
                break;
            }
        }
        span
    }

    /// Reads an operator glyph, joining the two-character forms.
    fn read_symbol(&mut self) -> String {
        let c = self.current().unwrap_or_default();
        self.advance();

        let two = match (c, self.current()) {
            ('<', Some('=')) | ('>', Some('=')) | ('=', Some('=')) => true,
            ('!', Some('=')) | ('!', Some('~')) => true,
            _ => false,
        };

        if two {
            let mut glyph = String::from(c);
            glyph.push(self.current().unwrap_or_default());
            self.advance();
            glyph
        } else {
            c.to_string()
        }
    }

    /// Splits the input into token strings.
    pub fn tokenize(mut self) -> Vec<String> {
        let mut tokens = Vec::new();

        while let Some(c) = self.current() {
            if c.is_whitespace() {
                if self.skip_whitespace {
                    self.advance();
                } else {
                    tokens.push(c.to_string());
                    self.advance();
                }
            } else if (c == '"' || c == '\'') && self.coalesce_quoted {
                tokens.push(self.read_quoted(c));
            } else if c.is_alphabetic() && self.coalesce_alpha {
                tokens.push(self.read_word());
            } else if c.is_ascii_digit() && self.coalesce_digits {
                tokens.push(self.read_number());
            } else if matches!(c, '<' | '>' | '=' | '!') {
                tokens.push(self.read_symbol());
            } else {
                tokens.push(c.to_string());
                self.advance();
            }
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<String> {
        Lexer::new(input)
            .skip_whitespace(true)
            .coalesce_alpha(true)
            .coalesce_digits(true)
            .coalesce_quoted(true)
            .tokenize()
    }

    #[test]
    fn test_tokenize_words_and_operators() {
        assert_eq!(lex("due < tomorrow"), vec!["due", "<", "tomorrow"]);
        assert_eq!(
            lex("priority = H and project = home"),
            vec!["priority", "=", "H", "and", "project", "=", "home"]
        );
    }

    #[test]
    fn test_tokenize_two_char_glyphs() {
        assert_eq!(lex("a != b"), vec!["a", "!=", "b"]);
        assert_eq!(lex("a !~ b"), vec!["a", "!~", "b"]);
        assert_eq!(lex("a <= b >= c == d"), vec!["a", "<=", "b", ">=", "c", "==", "d"]);
    }

    #[test]
    fn test_tokenize_sequence_aggregate() {
        assert_eq!(
            lex("(id=1 or id=3)"),
            vec!["(", "id", "=", "1", "or", "id", "=", "3", ")"]
        );
    }

    #[test]
    fn test_tokenize_dates_and_decimals_stay_whole() {
        assert_eq!(lex("due < 2024-01-15"), vec!["due", "<", "2024-01-15"]);
        assert_eq!(lex("urgency > 3.5"), vec!["urgency", ">", "3.5"]);
        // A trailing separator does not join
        assert_eq!(lex("1)"), vec!["1", ")"]);
    }

    #[test]
    fn test_tokenize_quoted_spans() {
        assert_eq!(
            lex("uuid=\"00000000-0000-0000-0000-000000000000\""),
            vec!["uuid", "=", "\"00000000-0000-0000-0000-000000000000\""]
        );
        // The empty quoted span survives as a non-empty token
        assert_eq!(lex("priority == \"\""), vec!["priority", "==", "\"\""]);
    }

    #[test]
    fn test_tokenize_without_coalescing() {
        let tokens = Lexer::new("ab 12").skip_whitespace(true).tokenize();
        assert_eq!(tokens, vec!["a", "b", "1", "2"]);
    }

    #[test]
    fn test_tokenize_preserves_whitespace_when_not_skipping() {
        let tokens = Lexer::new("a b").coalesce_alpha(true).tokenize();
        assert_eq!(tokens, vec!["a", " ", "b"]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(lex("").is_empty());
    }

    #[test]
    fn test_tokenize_unterminated_quote_takes_rest() {
        assert_eq!(lex("\"open end"), vec!["\"open end"]);
    }
}
