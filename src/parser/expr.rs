use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{
        ast::{Expression, SyntaxNode},
        expressions::{PostfixExpression, PrimaryExpression},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Symbol, Token, TokenKind},
    Span,
};

use super::{lookups::POSTFIX_LOOKUP, parser::Parser};

pub fn parse_expr(parser: &mut Parser) -> Result<Option<Expression>, Error> {
    parser.enter()?;
    let result = parse_postfix_expr(parser);
    parser.leave();
    result
}

fn primary(children: Vec<SyntaxNode>, span: Span) -> Expression {
    let mut expression = PrimaryExpression::new(children);
    expression.set_span(span);
    Expression::Primary(expression)
}

fn postfix(children: Vec<SyntaxNode>, span: Span) -> Expression {
    let mut expression = PostfixExpression::new(children);
    expression.set_span(span);
    Expression::Postfix(expression)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Option<Expression>, Error> {
    let token = parser.current_token();

    match &token.kind {
        TokenKind::Identifier(_) | TokenKind::NumericLiteral(_) | TokenKind::StringLiteral(_) => {
            let token = parser.advance();
            let span = token.span.clone();
            Ok(Some(primary(vec![token.into()], span)))
        }
        TokenKind::Symbol(Symbol::LParen) => parse_grouping_expr(parser),
        _ => Ok(None),
    }
}

/// `( expression )`, or nothing at all.
///
/// Any failure inside the parentheses rewinds to before the `(` so a later
/// grammar stage can read the same tokens as something else, e.g. a cast.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Option<Expression>, Error> {
    let mark = parser.mark();
    let lparen = parser.advance();

    let outcome = parse_expr(parser);
    let closed = parser.at_symbol(Symbol::RParen);

    let inner = match outcome {
        Ok(Some(inner)) if closed => inner,
        Ok(_) => {
            debug!(offset = lparen.span.start.0, "not a parenthesized expression, backtracking");
            parser.rewind(mark);
            return Ok(None);
        }
        Err(error) if matches!(error.get_kind(), ErrorImpl::NestingTooDeep { .. }) => {
            return Err(error);
        }
        Err(error) => {
            debug!(offset = lparen.span.start.0, %error, "not a parenthesized expression, backtracking");
            parser.rewind(mark);
            return Ok(None);
        }
    };

    let rparen = parser.advance();
    let span = Span::between(&lparen.span, &rparen.span);

    Ok(Some(primary(
        vec![lparen.into(), inner.into(), rparen.into()],
        span,
    )))
}

pub fn parse_postfix_expr(parser: &mut Parser) -> Result<Option<Expression>, Error> {
    let Some(mut left) = parse_primary_expr(parser)? else {
        return Ok(None);
    };

    // Each operator wraps everything parsed so far, so chains nest to the left.
    loop {
        let handler = match &parser.current_token().kind {
            TokenKind::Symbol(symbol) => POSTFIX_LOOKUP.get(symbol).copied(),
            _ => None,
        };

        let Some(handler) = handler else {
            return Ok(Some(left));
        };

        left = handler(parser, left)?;
    }
}

fn expected_expression(parser: &mut Parser, after: &Token) -> Error {
    parser.error(ErrorImpl::ExpectedExpression {
        after: after.to_string(),
    })
}

pub fn parse_array_access_expr(parser: &mut Parser, left: Expression) -> Result<Expression, Error> {
    let lbracket = parser.advance();

    let Some(index) = parse_expr(parser)? else {
        return Err(expected_expression(parser, &lbracket));
    };

    let rbracket = parser.expect(Symbol::RBracket)?;
    let span = Span::between(left.span(), &rbracket.span);

    Ok(postfix(
        vec![left.into(), lbracket.into(), index.into(), rbracket.into()],
        span,
    ))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expression) -> Result<Expression, Error> {
    let start = left.span().clone();
    let lparen = parser.advance();
    let mut children: Vec<SyntaxNode> = vec![left.into(), Rc::clone(&lparen).into()];

    if !parser.at_symbol(Symbol::RParen) {
        let mut previous = lparen;

        loop {
            let Some(argument) = parse_expr(parser)? else {
                return Err(expected_expression(parser, &previous));
            };
            children.push(argument.into());

            if !parser.at_symbol(Symbol::Comma) {
                break;
            }

            previous = parser.advance();
            children.push(Rc::clone(&previous).into());
        }
    }

    let rparen = parser.expect(Symbol::RParen)?;
    let span = Span::between(&start, &rparen.span);
    children.push(rparen.into());

    Ok(postfix(children, span))
}

/// `base . member` and `base -> member`.
pub fn parse_member_expr(parser: &mut Parser, left: Expression) -> Result<Expression, Error> {
    let operator = parser.advance();
    let member = parser.expect_identifier(&operator)?;
    let span = Span::between(left.span(), &member.span);

    Ok(postfix(vec![left.into(), operator.into(), member.into()], span))
}

/// `base ++` and `base --`.
pub fn parse_step_expr(parser: &mut Parser, left: Expression) -> Result<Expression, Error> {
    let operator = parser.advance();
    let span = Span::between(left.span(), &operator.span);

    Ok(postfix(vec![left.into(), operator.into()], span))
}
