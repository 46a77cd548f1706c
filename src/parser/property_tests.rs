//! Property-based tests for the expression parser.
//!
//! These tests use `proptest` to check parser invariants over generated inputs:
//!
//! 1. **Parser never panics**: arbitrary source text always yields a result
//! 2. **No expression consumes nothing**: `Ok(None)` leaves the cursor where it was
//! 3. **Every tree is well formed**: each node matches exactly one form
//! 4. **Spans stay inside the input**: token spans are ordered and in bounds

use proptest::prelude::*;

use crate::{
    ast::ast::{Expression, SyntaxNode},
    lexer::{
        backtracking::BacktrackingLexer,
        lexer::{tokenize, Lexer},
    },
};

use super::parser::parse_expression;

/// Postfix-expression fragments for composing near-valid inputs.
const FRAGMENTS: &[&str] = &[
    "x",
    "42",
    "0x1Ful",
    "1.5e3f",
    "\"hello\"",
    "'c'",
    "(x)",
    "((x))",
    "a[1]",
    "a[1][2]",
    "s.x",
    "p->next->next",
    "i++",
    "i--",
    "f()",
    "f(a, b)",
    "(p)->items[i].next(x)++",
    "a[(]",
    "f(a,)",
    "(",
    "x +",
];

fn valid_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(FRAGMENTS).prop_map(std::string::ToString::to_string)
}

/// Cuts a fragment short at a random point.
fn truncated_fragment() -> impl Strategy<Value = String> {
    valid_fragment().prop_flat_map(|s| {
        let len = s.len();
        (0..=len).prop_map(move |cut| s[..cut].to_string())
    })
}

/// Glues two fragments together with an arbitrary postfix operator.
fn joined_fragments() -> impl Strategy<Value = String> {
    (
        valid_fragment(),
        prop::sample::select(&["", ".", "->", "[", "]", "(", ")", ",", "++"][..]),
        valid_fragment(),
    )
        .prop_map(|(left, glue, right)| format!("{left}{glue}{right}"))
}

fn near_valid_source() -> impl Strategy<Value = String> {
    prop_oneof![valid_fragment(), truncated_fragment(), joined_fragments()]
}

fn tree_is_valid(expression: &Expression) -> bool {
    expression.is_valid()
        && expression.children().iter().all(|child| match child {
            SyntaxNode::Expression(inner) => tree_is_valid(inner),
            _ => true,
        })
}

/// Default is 512 cases; `PROPTEST_CASES` can raise it.
fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// The lexer and parser always return, whatever the input.
    #[test]
    fn parser_never_panics(input in "\\PC{0,200}") {
        let mut lexer = BacktrackingLexer::new(Lexer::new(input, None));
        let _ = parse_expression(&mut lexer);
    }

    /// Finding no expression consumes no tokens.
    #[test]
    fn no_expression_leaves_cursor(input in near_valid_source()) {
        let mut lexer = BacktrackingLexer::new(Lexer::new(input.clone(), None));
        if let Ok(None) = parse_expression(&mut lexer) {
            prop_assert_eq!(lexer.cursor(), 0, "cursor moved for input {:?}", input);
        }
    }

    /// Every expression the parser builds satisfies exactly one form, all the way down.
    #[test]
    fn parsed_trees_are_valid(input in near_valid_source()) {
        let mut lexer = BacktrackingLexer::new(Lexer::new(input.clone(), None));
        if let Ok(Some(expression)) = parse_expression(&mut lexer) {
            prop_assert!(tree_is_valid(&expression), "invalid tree for input {:?}", input);
        }
    }

    /// Tokens come back in source order, inside the input, ending with one EOF.
    #[test]
    fn token_spans_within_input(input in "\\PC{0,200}") {
        let tokens = tokenize(input.clone(), None);
        let input_len = u32::try_from(input.len()).unwrap_or(u32::MAX);

        prop_assert!(tokens.last().is_some_and(|token| token.is_eof()));
        prop_assert_eq!(tokens.iter().filter(|token| token.is_eof()).count(), 1);

        let mut previous_end = 0;
        for token in &tokens {
            prop_assert!(token.span.start.0 >= previous_end, "overlapping token {} in {:?}", token, input);
            prop_assert!(token.span.start.0 <= token.span.end.0);
            prop_assert!(token.span.end.0 <= input_len);
            previous_end = token.span.end.0;
        }
    }
}
