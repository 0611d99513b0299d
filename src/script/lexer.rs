//! Lexer for the gesture script language using logos

use logos::Logos;

use super::ast::Span;
use crate::error::ParseError;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Statement keywords
    #[token("widget")]
    Widget,
    #[token("constrain")]
    Constrain,
    #[token("unconstrain")]
    Unconstrain,
    #[token("snap")]
    Snap,
    #[token("move")]
    Move,
    #[token("resize")]
    Resize,
    #[token("align")]
    Align,
    #[token("distribute")]
    Distribute,
    #[token("settle")]
    Settle,
    #[token("remove")]
    Remove,

    // Gesture modifiers
    #[token("to")]
    To,
    #[token("by")]
    By,
    #[token("with")]
    With,
    #[token("bypass")]
    Bypass,

    // Switch values
    #[token("on")]
    On,
    #[token("off")]
    Off,

    // Axes for distribute
    #[token("horizontal")]
    Horizontal,
    #[token("vertical")]
    Vertical,

    // Anchor keywords
    #[token("left")]
    Left,
    #[token("right")]
    Right,
    #[token("top")]
    Top,
    #[token("bottom")]
    Bottom,
    #[token("center_x")]
    #[token("centerX")]
    CenterX,
    #[token("center_y")]
    #[token("centerY")]
    CenterY,

    #[token("-")]
    Minus,

    // Delimiters
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("=")]
    Equals,

    // Literals - identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"#[^\n]*", logos::skip)]
    HashComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    BlockComment,
}

/// Lex input string into tokens with spans.
///
/// Every run of unrecognised input is reported; nothing is skipped silently.
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, Vec<ParseError>> {
    let mut tokens = Vec::new();
    let mut errors: Vec<ParseError> = Vec::new();
    for (tok, span) in Token::lexer(input).spanned() {
        match tok {
            Ok(tok) => tokens.push((tok, span)),
            Err(()) => match errors.last_mut() {
                Some(ParseError::InvalidToken { span: last, text }) if last.end == span.start => {
                    text.push_str(&input[span.clone()]);
                    last.end = span.end;
                }
                _ => errors.push(ParseError::InvalidToken {
                    text: input[span.clone()].to_string(),
                    span,
                }),
            },
        }
    }
    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_statement_keywords() {
        assert_eq!(
            tokens("widget constrain unconstrain snap move resize align distribute settle remove"),
            vec![
                Token::Widget,
                Token::Constrain,
                Token::Unconstrain,
                Token::Snap,
                Token::Move,
                Token::Resize,
                Token::Align,
                Token::Distribute,
                Token::Settle,
                Token::Remove,
            ]
        );
    }

    #[test]
    fn test_anchor_keywords_both_spellings() {
        assert_eq!(
            tokens("left centerX center_x right top center_y centerY bottom"),
            vec![
                Token::Left,
                Token::CenterX,
                Token::CenterX,
                Token::Right,
                Token::Top,
                Token::CenterY,
                Token::CenterY,
                Token::Bottom,
            ]
        );
    }

    #[test]
    fn test_endpoint_reference() {
        assert_eq!(
            tokens("b.left = a.right"),
            vec![
                Token::Ident("b".to_string()),
                Token::Dot,
                Token::Left,
                Token::Equals,
                Token::Ident("a".to_string()),
                Token::Dot,
                Token::Right,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(
            tokens("topbar leftover"),
            vec![
                Token::Ident("topbar".to_string()),
                Token::Ident("leftover".to_string())
            ]
        );
    }

    #[test]
    fn test_numbers_and_minus() {
        assert_eq!(
            tokens("move a by 5, -3.5"),
            vec![
                Token::Move,
                Token::Ident("a".to_string()),
                Token::By,
                Token::Number(5.0),
                Token::Comma,
                Token::Minus,
                Token::Number(3.5),
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            tokens("settle // done\n# also a comment\n/* block */ settle"),
            vec![Token::Settle, Token::Settle]
        );
    }

    #[test]
    fn test_unrecognised_input_is_reported() {
        let errs = lex("move a to -$40, 12").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].span(), &(11..12));

        let errs = lex("settle @@ ok ~").unwrap_err();
        let spans: Vec<Span> = errs.iter().map(|e| e.span().clone()).collect();
        assert_eq!(spans, vec![7..9, 13..14]);
    }
}
