//! Error types for parsing gesture scripts

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::script::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("Unrecognised input '{text}' at {span:?}")]
    InvalidToken { span: Span, text: String },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. } | ParseError::InvalidToken { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (span, message, expected) = match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => (span, message.clone(), expected.as_slice()),
            ParseError::InvalidToken { span, text } => {
                (span, format!("Unrecognised input '{}'", text), &[][..])
            }
        };
        let expected_str = if expected.is_empty() {
            String::new()
        } else {
            format!("\nExpected: {}", expected.join(", "))
        };
        render_report(
            source,
            filename,
            span,
            &message,
            &format!("{}{}", message, expected_str),
        )
    }
}

/// Render a single-label ariadne report to a string
pub(crate) fn render_report(
    source: &str,
    filename: &str,
    span: &Span,
    message: &str,
    label: &str,
) -> String {
    let mut buf = Vec::new();
    let written = Report::build(ReportKind::Error, filename, span.start)
        .with_message(message)
        .with_label(
            Label::new((filename, span.clone()))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish()
        .write((filename, Source::from(source)), &mut buf);
    if written.is_err() {
        return format!("{}: {}", filename, message);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match found.as_deref() {
                Some(tok) if reserved_word(tok).is_some() => format!(
                    "Cannot use '{}' as a widget name - it's a reserved keyword",
                    reserved_word(tok).unwrap_or_default()
                ),
                Some(tok) => format!("Unexpected {}", format_token(tok)),
                None => "Unexpected end of input".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Keyword text for tokens that look like names but are reserved
fn reserved_word(tok: &Token) -> Option<&'static str> {
    match tok {
        Token::Left => Some("left"),
        Token::Right => Some("right"),
        Token::Top => Some("top"),
        Token::Bottom => Some("bottom"),
        Token::CenterX => Some("center_x"),
        Token::CenterY => Some("center_y"),
        Token::To => Some("to"),
        Token::By => Some("by"),
        Token::With => Some("with"),
        Token::On => Some("on"),
        Token::Off => Some("off"),
        _ => None,
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::Number(n) => format!("number {}", n),
        Token::BracketOpen => "'['".to_string(),
        Token::BracketClose => "']'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Colon => "':'".to_string(),
        Token::Dot => "'.'".to_string(),
        Token::Equals => "'='".to_string(),
        Token::Minus => "'-'".to_string(),
        other => match reserved_word(other) {
            Some(word) => format!("keyword '{}'", word),
            None => format!("{:?}", other).to_lowercase(),
        },
    }
}
