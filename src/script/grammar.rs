//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::geometry::{Anchor, Axis};

use super::ast::*;
use super::lexer::{lex, Token};

/// Parse gesture script source into an AST
pub fn parse(input: &str) -> Result<Script, Vec<crate::ParseError>> {
    let len = input.len();

    let token_iter = lex(input)?
        .into_iter()
        .map(|(tok, span)| (tok, span.into()));

    // Split (Token, SimpleSpan) into token and span parts
    let token_stream =
        Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    script_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn script_parser<'a, I>() -> impl Parser<'a, I, Script, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let name = select! {
        Token::Ident(s) => s,
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    let key = select! {
        Token::Ident(s) => s,
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    let number = select! {
        Token::Number(n) => n,
    };

    // Optional leading minus
    let signed = just(Token::Minus)
        .or_not()
        .then(number)
        .map(|(neg, n)| if neg.is_some() { -n } else { n });

    let anchor = select! {
        Token::Left => Anchor::LEFT,
        Token::CenterX => Anchor::CENTER_X,
        Token::Right => Anchor::RIGHT,
        Token::Top => Anchor::TOP,
        Token::CenterY => Anchor::CENTER_Y,
        Token::Bottom => Anchor::BOTTOM,
    };

    // Resize handles only exist on edges
    let edge = select! {
        Token::Left => Anchor::LEFT,
        Token::Right => Anchor::RIGHT,
        Token::Top => Anchor::TOP,
        Token::Bottom => Anchor::BOTTOM,
    }
    .map_with(|a, e| Spanned::new(a, span_range(&e.span())));

    let names = name
        .clone()
        .separated_by(just(Token::Comma))
        .at_least(1)
        .collect::<Vec<_>>();

    // a.left
    let anchor_ref = name
        .clone()
        .then_ignore(just(Token::Dot))
        .then(anchor.clone())
        .map(|(widget, anchor)| AnchorRef { widget, anchor });

    // b.left = a.right
    let link = anchor_ref
        .clone()
        .then_ignore(just(Token::Equals))
        .then(anchor_ref)
        .map(|(dependent, reference)| LinkDecl {
            dependent,
            reference,
        });

    // [x: 10, y: 20]
    let property_block = key
        .clone()
        .then_ignore(just(Token::Colon))
        .then(signed.clone())
        .map(|(key, value)| Property { key, value })
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    let snap_value = choice((
        just(Token::On).to(SnapValue::Switch(true)),
        just(Token::Off).to(SnapValue::Switch(false)),
        signed.clone().map(SnapValue::Number),
    ))
    .map_with(|v, e| Spanned::new(v, span_range(&e.span())));

    let snap_block = key
        .clone()
        .then_ignore(just(Token::Colon))
        .then(snap_value)
        .map(|(key, value)| SnapSetting { key, value })
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    let bypass = just(Token::Bypass).or_not().map(|b| b.is_some());

    let widget_decl = just(Token::Widget)
        .ignore_then(name.clone())
        .then(property_block)
        .map(|(name, properties)| Statement::Widget(WidgetDecl { name, properties }));

    let constrain_decl = just(Token::Constrain)
        .ignore_then(link.clone())
        .map(Statement::Constrain);

    let unconstrain_decl = just(Token::Unconstrain)
        .ignore_then(link)
        .map(Statement::Unconstrain);

    let snap_decl = just(Token::Snap).ignore_then(snap_block).map(Statement::Snap);

    let mode = choice((
        just(Token::To).to(MoveMode::To),
        just(Token::By).to(MoveMode::By),
    ));

    // move a [with b, c] to|by x, y [bypass]
    let move_step = just(Token::Move)
        .ignore_then(name.clone())
        .then(just(Token::With).ignore_then(names.clone()).or_not())
        .then(mode)
        .then(signed.clone())
        .then_ignore(just(Token::Comma))
        .then(signed.clone())
        .then(bypass.clone())
        .map(|(((((widget, with), mode), x), y), bypass)| {
            Statement::Move(MoveStep {
                widget,
                with: with.unwrap_or_default(),
                mode,
                x,
                y,
                bypass,
            })
        });

    // resize a [right: 20, bottom: -5] [bypass]
    let resize_step = just(Token::Resize)
        .ignore_then(name.clone())
        .then(
            edge.then_ignore(just(Token::Colon))
                .then(signed)
                .separated_by(just(Token::Comma))
                .allow_trailing()
                .at_least(1)
                .collect::<Vec<_>>()
                .delimited_by(just(Token::BracketOpen), just(Token::BracketClose)),
        )
        .then(bypass)
        .map(|((widget, edges), bypass)| {
            Statement::Resize(ResizeStep {
                widget,
                edges,
                bypass,
            })
        });

    let align_decl = just(Token::Align)
        .ignore_then(anchor)
        .then(names.clone())
        .map(|(anchor, widgets)| Statement::Align { anchor, widgets });

    let axis = choice((
        just(Token::Horizontal).to(Axis::X),
        just(Token::Vertical).to(Axis::Y),
    ));

    let distribute_decl = just(Token::Distribute)
        .ignore_then(axis)
        .then(names)
        .map(|(axis, widgets)| Statement::Distribute { axis, widgets });

    let settle = just(Token::Settle).to(Statement::Settle);

    let remove = just(Token::Remove).ignore_then(name).map(Statement::Remove);

    let statement = choice((
        widget_decl,
        constrain_decl,
        unconstrain_decl,
        snap_decl,
        move_step,
        resize_step,
        align_decl,
        distribute_decl,
        settle,
        remove,
    ))
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())))
    .boxed();

    statement
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|statements| Script { statements })
}
