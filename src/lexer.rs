//! Shell-style tokenizer for netrc files.
//!
//! Splits input into whitespace-delimited word tokens with an extended
//! word-character set, double-quoted tokens (kept raw, decoded later by
//! [`crate::quote::unquote`]), and comment tokens running from `#` to end
//! of line. A separate verbatim mode hands back whole raw lines for
//! `macdef` macro bodies, which must not be word-split.

/// A lexical unit produced by the [`Lexer`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// A maximal run of word characters.
    Word(String),
    /// A double-quoted token, raw text including both quotes.
    Quoted(String),
    /// A `#` comment, text up to (excluding) the end of the line.
    Comment(String),
}

impl Token {
    /// Raw token text as it appeared in the input.
    pub(crate) fn text(&self) -> &str {
        match self {
            Token::Word(s) | Token::Quoted(s) | Token::Comment(s) => s,
        }
    }

    pub(crate) fn is_comment(&self) -> bool {
        matches!(self, Token::Comment(_))
    }
}

/// Tokenization failure, converted to [`crate::Error::Parse`] by the
/// parser, which knows the file identifier.
#[derive(Debug)]
pub(crate) struct LexError {
    pub(crate) message: String,
    pub(crate) line: usize,
}

/// Whitespace handling mode.
///
/// An explicit enum rather than a mutable whitespace set, so a mode
/// switch cannot leak if the lexer is reused.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    /// Normal shell-style word splitting.
    Standard,
    /// Raw line capture for macro bodies; newlines are content.
    Verbatim,
}

pub(crate) struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    mode: Mode,
    pushback: Option<Token>,
}

impl Lexer {
    pub(crate) fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            mode: Mode::Standard,
            pushback: None,
        }
    }

    /// Current 1-based line number, for diagnostics.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
            }
        }
        ch
    }

    /// Return one token to the head of the stream. At most one token may
    /// be buffered; the parser over-reads exactly one token to detect the
    /// end of an entry.
    pub(crate) fn push_token(&mut self, token: Token) {
        debug_assert!(self.pushback.is_none(), "pushback slot already occupied");
        self.pushback = Some(token);
    }

    /// Next token, or `None` at end of stream.
    pub(crate) fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        debug_assert_eq!(self.mode, Mode::Standard, "next_token in verbatim mode");
        if let Some(token) = self.pushback.take() {
            return Ok(Some(token));
        }
        self.skip_whitespace();
        match self.peek() {
            None => Ok(None),
            Some('"') => self.read_quoted().map(Some),
            Some('#') => Ok(Some(self.read_comment())),
            Some(c) if is_word_char(c) => Ok(Some(self.read_word())),
            // Anything else is self-delimiting; the parser will reject it.
            Some(c) => {
                self.advance();
                Ok(Some(Token::Word(c.to_string())))
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' || ch == '\n' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self) -> Token {
        let mut s = String::new();
        while let Some(ch) = self.peek() {
            if is_word_char(ch) {
                s.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        Token::Word(s)
    }

    fn read_comment(&mut self) -> Token {
        let mut s = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            s.push(ch);
            self.advance();
        }
        Token::Comment(s)
    }

    /// Read a double-quoted token, raw text including the quotes. A
    /// backslash protects the following character, so an escaped quote
    /// does not close the token.
    fn read_quoted(&mut self) -> Result<Token, LexError> {
        let mut s = String::new();
        s.push(self.advance().unwrap_or('"'));
        loop {
            match self.advance() {
                None => {
                    return Err(LexError {
                        message: "no closing quotation".to_string(),
                        line: self.line,
                    });
                }
                Some('\\') => {
                    s.push('\\');
                    if let Some(next) = self.advance() {
                        s.push(next);
                    }
                }
                Some('"') => {
                    s.push('"');
                    return Ok(Token::Quoted(s));
                }
                Some(ch) => s.push(ch),
            }
        }
    }

    /// Switch to verbatim line capture, discarding the remainder of the
    /// current line (the tail of the `macdef` header).
    pub(crate) fn begin_verbatim(&mut self) {
        debug_assert!(self.pushback.is_none(), "pushback across mode switch");
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
        self.mode = Mode::Verbatim;
    }

    /// Restore normal word splitting.
    pub(crate) fn end_verbatim(&mut self) {
        self.mode = Mode::Standard;
    }

    /// Next raw line including its trailing newline, or `None` at end of
    /// stream. The final line of the input may lack a trailing newline.
    pub(crate) fn read_verbatim_line(&mut self) -> Option<String> {
        debug_assert_eq!(self.mode, Mode::Verbatim, "read_verbatim_line in standard mode");
        self.peek()?;
        let mut line = String::new();
        while let Some(ch) = self.advance() {
            line.push(ch);
            if ch == '\n' {
                break;
            }
        }
        Some(line)
    }
}

/// Word characters: letters, digits, and the netrc punctuation set.
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || "!#$%&'()*+,-./:;<=>?@[\\]^_`{|}~".contains(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        while let Some(token) = lexer.next_token().unwrap() {
            out.push(token);
        }
        out
    }

    #[test]
    fn test_word_splitting() {
        assert_eq!(
            tokens("machine example.com login alice"),
            vec![
                Token::Word("machine".into()),
                Token::Word("example.com".into()),
                Token::Word("login".into()),
                Token::Word("alice".into()),
            ]
        );
    }

    #[test]
    fn test_punctuation_word_chars() {
        assert_eq!(
            tokens("p@ss:w0rd/{x}~"),
            vec![Token::Word("p@ss:w0rd/{x}~".into())]
        );
    }

    #[test]
    fn test_whitespace_variants() {
        assert_eq!(
            tokens("a\tb\r\nc"),
            vec![
                Token::Word("a".into()),
                Token::Word("b".into()),
                Token::Word("c".into()),
            ]
        );
    }

    #[test]
    fn test_quoted_token_kept_raw() {
        assert_eq!(
            tokens(r#"password "s3 cr3t""#),
            vec![
                Token::Word("password".into()),
                Token::Quoted(r#""s3 cr3t""#.into()),
            ]
        );
    }

    #[test]
    fn test_escaped_quote_does_not_close() {
        assert_eq!(
            tokens(r#""pa\"ss""#),
            vec![Token::Quoted(r#""pa\"ss""#.into())]
        );
    }

    #[test]
    fn test_unterminated_quote() {
        let mut lexer = Lexer::new("\"oops");
        let err = lexer.next_token().err().unwrap();
        assert_eq!(err.message, "no closing quotation");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(
            tokens("# a comment\nword"),
            vec![
                Token::Comment("# a comment".into()),
                Token::Word("word".into()),
            ]
        );
    }

    #[test]
    fn test_hash_inside_word() {
        assert_eq!(tokens("foo#bar"), vec![Token::Word("foo#bar".into())]);
    }

    #[test]
    fn test_line_counter() {
        let mut lexer = Lexer::new("one\ntwo\nthree");
        lexer.next_token().unwrap();
        assert_eq!(lexer.line(), 1);
        lexer.next_token().unwrap();
        assert_eq!(lexer.line(), 2);
        lexer.next_token().unwrap();
        assert_eq!(lexer.line(), 3);
    }

    #[test]
    fn test_pushback_replays_token() {
        let mut lexer = Lexer::new("a b");
        let first = lexer.next_token().unwrap().unwrap();
        lexer.push_token(first.clone());
        assert_eq!(lexer.next_token().unwrap(), Some(first));
        assert_eq!(lexer.next_token().unwrap(), Some(Token::Word("b".into())));
    }

    #[test]
    fn test_verbatim_lines() {
        let mut lexer = Lexer::new("macdef init\nsend hello\nquit\n\nmachine x");
        assert_eq!(
            lexer.next_token().unwrap(),
            Some(Token::Word("macdef".into()))
        );
        assert_eq!(lexer.next_token().unwrap(), Some(Token::Word("init".into())));
        lexer.begin_verbatim();
        assert_eq!(lexer.read_verbatim_line(), Some("send hello\n".into()));
        assert_eq!(lexer.read_verbatim_line(), Some("quit\n".into()));
        assert_eq!(lexer.read_verbatim_line(), Some("\n".into()));
        lexer.end_verbatim();
        assert_eq!(
            lexer.next_token().unwrap(),
            Some(Token::Word("machine".into()))
        );
    }

    #[test]
    fn test_verbatim_eof_without_newline() {
        let mut lexer = Lexer::new("macdef m\nlast line");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        lexer.begin_verbatim();
        assert_eq!(lexer.read_verbatim_line(), Some("last line".into()));
        assert_eq!(lexer.read_verbatim_line(), None);
    }

    #[test]
    fn test_eof() {
        assert_eq!(tokens("  \n\t "), vec![]);
    }
}
