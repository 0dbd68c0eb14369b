//! Expression tokens

use std::fmt;

/// Token of an assembled expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Named boolean variable
    Variable(String),
    /// `&&`
    And,
    /// `||`
    Or,
    /// `not`
    Not,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// Text the grammar has no token for
    Raw(String),
}

impl Token {
    /// Split expression text into tokens.
    ///
    /// `and`/`&&`, `or`/`||` and `not`/`!` are operators, other words are
    /// variables. Anything else ends up as `Raw` and is rejected by the parser.
    pub fn lex(input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut chars = input.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            match c {
                c if c.is_whitespace() => {}
                '(' => tokens.push(Token::LeftParen),
                ')' => tokens.push(Token::RightParen),
                '!' => tokens.push(Token::Not),
                '&' | '|' if chars.peek().map(|(_, next)| *next) == Some(c) => {
                    chars.next();
                    tokens.push(if c == '&' { Token::And } else { Token::Or });
                }
                c if is_word_char(c) => {
                    let mut end = start + c.len_utf8();
                    while let Some((idx, next)) = chars.peek().copied() {
                        if !is_word_char(next) {
                            break;
                        }
                        end = idx + next.len_utf8();
                        chars.next();
                    }
                    tokens.push(Token::word(&input[start..end]));
                }
                _ => {
                    let mut end = start + c.len_utf8();
                    while let Some((idx, next)) = chars.peek().copied() {
                        if next.is_whitespace() || is_word_char(next) || matches!(next, '(' | ')') {
                            break;
                        }
                        end = idx + next.len_utf8();
                        chars.next();
                    }
                    tokens.push(Token::Raw(input[start..end].to_string()));
                }
            }
        }

        tokens
    }

    fn word(word: &str) -> Token {
        match word {
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            _ => Token::Variable(word.to_string()),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Variable(name) => f.write_str(name),
            Token::And => f.write_str("&&"),
            Token::Or => f.write_str("||"),
            Token::Not => f.write_str("not"),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Join tokens with single spaces
pub(crate) fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Token {
        Token::Variable(name.to_string())
    }

    #[test]
    fn test_lex_symbols_and_keywords() {
        assert_eq!(
            Token::lex("(a_1 || b_1) && not c_1"),
            vec![
                Token::LeftParen,
                var("a_1"),
                Token::Or,
                var("b_1"),
                Token::RightParen,
                Token::And,
                Token::Not,
                var("c_1"),
            ]
        );
        assert_eq!(
            Token::lex("a and !b or c"),
            vec![var("a"), Token::And, Token::Not, var("b"), Token::Or, var("c")]
        );
    }

    #[test]
    fn test_lex_unknown_symbols_are_raw() {
        assert_eq!(Token::lex("^"), vec![Token::Raw("^".to_string())]);
        assert_eq!(Token::lex("&"), vec![Token::Raw("&".to_string())]);
        assert_eq!(
            Token::lex("a =~ b"),
            vec![var("a"), Token::Raw("=~".to_string()), var("b")]
        );
    }

    #[test]
    fn test_join() {
        let tokens = vec![var("a_1"), Token::And, Token::Not, var("b_1")];
        assert_eq!(join(&tokens), "a_1 && not b_1");
        assert_eq!(join(&[]), "");
    }
}
