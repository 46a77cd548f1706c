//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals split into prefix, whole, fraction and suffix
//! - String and character literals with escape sequences
//! - Punctuators, comments and preprocessor directives
//! - Line-start flags and stray characters
//! - Token buffering with mark and rewind

use std::{cell::Cell, rc::Rc};

use super::{
    backtracking::BacktrackingLexer,
    lexer::{tokenize, unescape, Lexer, TokenList, TokenSource},
    tokens::{NumericLiteral, StringLiteral, Symbol, Token, TokenKind},
};

fn lex(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("test.c".to_string()))
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).into_iter().map(|token| token.kind).collect()
}

fn numeric(token: &Token) -> &NumericLiteral {
    match &token.kind {
        TokenKind::NumericLiteral(literal) => literal,
        other => panic!("expected numeric literal, got {:?}", other),
    }
}

fn string(token: &Token) -> &StringLiteral {
    match &token.kind {
        TokenKind::StringLiteral(literal) => literal,
        other => panic!("expected string literal, got {:?}", other),
    }
}

#[test]
fn test_tokenize_keywords() {
    let tokens = kinds("int while sizeof struct _Bool return");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Symbol(Symbol::Int),
            TokenKind::Symbol(Symbol::While),
            TokenKind::Symbol(Symbol::Sizeof),
            TokenKind::Symbol(Symbol::Struct),
            TokenKind::Symbol(Symbol::Bool),
            TokenKind::Symbol(Symbol::Return),
            TokenKind::EOF,
        ]
    );
    assert!(Symbol::Sizeof.is_keyword());
    assert!(!Symbol::Arrow.is_keyword());
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = lex("foo _bar baz_123 integer");

    assert_eq!(tokens[0].name(), Some("foo"));
    assert_eq!(tokens[1].name(), Some("_bar"));
    assert_eq!(tokens[2].name(), Some("baz_123"));
    assert_eq!(tokens[3].name(), Some("integer"));
    assert!(tokens[4].is_eof());
}

#[test]
fn test_tokenize_decimal_numbers() {
    let tokens = lex("42 3.14 100u 1.5e3f .5");

    assert_eq!(numeric(&tokens[0]), &NumericLiteral::whole("42"));

    let float = numeric(&tokens[1]);
    assert_eq!(float.whole, "3");
    assert_eq!(float.dot, ".");
    assert_eq!(float.fractional, "14");
    assert_eq!(float.suffix, "");

    assert_eq!(numeric(&tokens[2]).suffix, "u");

    let exponent = numeric(&tokens[3]);
    assert_eq!(exponent.fractional, "5");
    assert_eq!(exponent.suffix, "e3f");
    assert_eq!(exponent.to_string(), "1.5e3f");

    let leading_dot = numeric(&tokens[4]);
    assert_eq!(leading_dot.whole, "");
    assert_eq!(leading_dot.fractional, "5");
}

#[test]
fn test_tokenize_prefixed_numbers() {
    let tokens = lex("0x1Ful 0b101");

    let hex = numeric(&tokens[0]);
    assert_eq!(hex.prefix, "0x");
    assert_eq!(hex.whole, "1F");
    assert_eq!(hex.suffix, "ul");

    let binary = numeric(&tokens[1]);
    assert_eq!(binary.prefix, "0b");
    assert_eq!(binary.whole, "101");
}

#[test]
fn test_tokenize_strings() {
    let tokens = lex(r#""hello" "a\tb\n" 'c' '\''"#);

    let plain = string(&tokens[0]);
    assert_eq!(plain.value, "hello");
    assert_eq!(plain.opening_quote, '"');
    assert_eq!(plain.closing_quote, '"');

    assert_eq!(string(&tokens[1]).value, "a\tb\n");

    let character = string(&tokens[2]);
    assert_eq!(character.value, "c");
    assert_eq!(character.opening_quote, '\'');

    assert_eq!(string(&tokens[3]).value, "'");
}

#[test]
fn test_unescape() {
    assert_eq!(unescape(r"\x41\\\0"), "A\\\0");
    assert_eq!(unescape(r"\q"), "\\q");
    assert_eq!(unescape("trailing\\"), "trailing\\");
}

#[test]
fn test_tokenize_punctuators_longest_first() {
    let tokens = kinds("->++--<<=...a.b");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Symbol(Symbol::Arrow),
            TokenKind::Symbol(Symbol::PlusPlus),
            TokenKind::Symbol(Symbol::MinusMinus),
            TokenKind::Symbol(Symbol::LtLtEq),
            TokenKind::Symbol(Symbol::Ellipsis),
            TokenKind::Identifier("a".to_string()),
            TokenKind::Symbol(Symbol::Dot),
            TokenKind::Identifier("b".to_string()),
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let tokens = lex("a // line\n/* block */ b /* open");

    assert_eq!(tokens[0].name(), Some("a"));
    match &tokens[1].kind {
        TokenKind::Comment(comment) => {
            assert_eq!(comment.opening, "//");
            assert_eq!(comment.contents, " line");
        }
        other => panic!("expected comment, got {:?}", other),
    }
    match &tokens[2].kind {
        TokenKind::Comment(comment) => {
            assert_eq!(comment.contents, " block ");
            assert_eq!(comment.closing, "*/");
        }
        other => panic!("expected comment, got {:?}", other),
    }
    assert_eq!(tokens[3].name(), Some("b"));
    match &tokens[4].kind {
        TokenKind::Comment(comment) => {
            assert_eq!(comment.contents, " open");
            assert_eq!(comment.closing, "");
        }
        other => panic!("expected comment, got {:?}", other),
    }
    assert!(tokens[5].is_eof());
}

#[test]
fn test_beginning_of_line_flag() {
    let tokens = lex("a b\n  c /* x */ d\n/* y */ e");

    assert!(tokens[0].begins_line());
    assert!(!tokens[1].begins_line());
    assert!(tokens[2].begins_line());
    assert!(!tokens[3].begins_line()); // comment
    assert!(!tokens[4].begins_line());
    assert!(tokens[5].begins_line()); // comment
    assert!(tokens[6].begins_line()); // `e` still starts the line
}

#[test]
fn test_tokenize_directives() {
    let tokens = kinds("#define X\n  # ifdef Y\n#bogus\na # b ## c");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Symbol(Symbol::DirectiveDefine),
            TokenKind::Identifier("X".to_string()),
            TokenKind::Symbol(Symbol::DirectiveIfdef),
            TokenKind::Identifier("Y".to_string()),
            TokenKind::InvalidDirective("bogus".to_string()),
            TokenKind::Identifier("a".to_string()),
            TokenKind::Symbol(Symbol::Hash),
            TokenKind::Identifier("b".to_string()),
            TokenKind::Symbol(Symbol::HashHash),
            TokenKind::Identifier("c".to_string()),
            TokenKind::EOF,
        ]
    );
    assert!(Symbol::DirectiveDefine.is_directive());
    assert!(!Symbol::Hash.is_directive());
}

#[test]
fn test_tokenize_include_header_name() {
    let tokens = lex("#include <stdio.h>\na < b");

    assert!(tokens[0].kind.is_symbol(Symbol::DirectiveInclude));
    let header = string(&tokens[1]);
    assert_eq!(header.value, "stdio.h");
    assert_eq!(header.opening_quote, '<');
    assert_eq!(header.closing_quote, '>');

    // Outside `#include`, `<` is an operator.
    assert!(tokens[3].kind.is_symbol(Symbol::Lt));
}

#[test]
fn test_tokenize_stray_characters() {
    let tokens = kinds("a @ `");

    assert_eq!(tokens[1], TokenKind::Stray('@'));
    assert_eq!(tokens[2], TokenKind::Stray('`'));
    assert_eq!(tokens[3], TokenKind::EOF);
}

#[test]
fn test_token_spans() {
    let tokens = lex("ab  ->");

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 2);
    assert_eq!(tokens[1].span.start.0, 4);
    assert_eq!(tokens[1].span.end.0, 6);
    assert_eq!(tokens[1].span.start.1.as_str(), "test.c");
}

#[test]
fn test_default_file_name() {
    let mut lexer = Lexer::new("x".to_string(), None);

    assert_eq!(lexer.read_token().span.start.1.as_str(), "shell");
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new("x".to_string(), None);

    lexer.read_token();
    assert!(lexer.read_token().is_eof());
    assert!(lexer.read_token().is_eof());
}

#[test]
fn test_token_list_repeats_last_token() {
    let mut list = TokenList::new(vec![Token::identifier("a")]);

    assert_eq!(list.read_token().name(), Some("a"));
    assert!(list.read_token().is_eof());
    assert!(list.read_token().is_eof());
}

/// Counts how many tokens the backtracking lexer pulls from its source.
struct CountingSource {
    inner: TokenList,
    reads: Rc<Cell<usize>>,
}

impl TokenSource for CountingSource {
    fn read_token(&mut self) -> Token {
        self.reads.set(self.reads.get() + 1);
        self.inner.read_token()
    }
}

fn counting(tokens: Vec<Token>) -> (BacktrackingLexer, Rc<Cell<usize>>) {
    let reads = Rc::new(Cell::new(0));
    let source = CountingSource {
        inner: TokenList::new(tokens),
        reads: Rc::clone(&reads),
    };
    (BacktrackingLexer::new(source), reads)
}

fn abc() -> Vec<Token> {
    vec![
        Token::identifier("a"),
        Token::identifier("b"),
        Token::identifier("c"),
        Token::eof(),
    ]
}

#[test]
fn test_peek_does_not_consume() {
    let (mut lexer, reads) = counting(abc());

    assert_eq!(lexer.peek(2).name(), Some("c"));
    assert_eq!(lexer.cursor(), 0);
    assert_eq!(reads.get(), 3);
    assert_eq!(lexer.read_token().name(), Some("a"));
}

#[test]
fn test_peek_past_end_is_eof() {
    let (mut lexer, reads) = counting(abc());

    assert!(lexer.peek(10).is_eof());
    assert_eq!(reads.get(), 4);
    assert!(lexer.peek(20).is_eof());
    assert_eq!(reads.get(), 4);
}

#[test]
fn test_read_never_passes_eof() {
    let (mut lexer, _) = counting(vec![Token::eof()]);

    assert!(lexer.read_token().is_eof());
    assert!(lexer.read_token().is_eof());
    assert_eq!(lexer.cursor(), 0);
}

#[test]
fn test_rewind_replays_same_tokens() {
    let (mut lexer, reads) = counting(abc());

    let mark = lexer.mark();
    let first = lexer.read_token();
    let second = lexer.read_token();
    lexer.rewind(mark);

    assert!(Rc::ptr_eq(&first, &lexer.read_token()));
    assert!(Rc::ptr_eq(&second, &lexer.read_token()));
    assert_eq!(reads.get(), 2);
}

#[test]
fn test_nested_marks() {
    let (mut lexer, _) = counting(abc());

    let outer = lexer.mark();
    lexer.read_token();
    let inner = lexer.mark();
    lexer.read_token();
    lexer.read_token();

    lexer.rewind(inner);
    assert_eq!(lexer.peek(0).name(), Some("b"));
    lexer.rewind(outer);
    assert_eq!(lexer.peek(0).name(), Some("a"));

    // A mark may be reused while it is behind the cursor.
    lexer.read_token();
    lexer.read_token();
    lexer.rewind(inner);
    assert_eq!(lexer.cursor(), 1);
}

#[test]
fn test_commit_drops_consumed_tokens() {
    let (mut lexer, _) = counting(abc());

    lexer.read_token();
    lexer.read_token();
    lexer.peek(0);
    assert_eq!(lexer.buffered_len(), 3);

    lexer.commit();
    assert_eq!(lexer.cursor(), 0);
    assert_eq!(lexer.buffered_len(), 1);
    assert_eq!(lexer.read_token().name(), Some("c"));
}

#[test]
#[should_panic(expected = "different lexer")]
fn test_rewind_foreign_mark_panics() {
    let (first, _) = counting(abc());
    let (mut second, _) = counting(abc());

    let mark = first.mark();
    second.rewind(mark);
}

#[test]
#[should_panic(expected = "committed epoch")]
fn test_rewind_stale_mark_panics() {
    let (mut lexer, _) = counting(abc());

    let mark = lexer.mark();
    lexer.read_token();
    lexer.commit();
    lexer.rewind(mark);
}

#[test]
#[should_panic(expected = "ahead of the cursor")]
fn test_rewind_forward_panics() {
    let (mut lexer, _) = counting(abc());

    let origin = lexer.mark();
    lexer.read_token();
    let ahead = lexer.mark();
    lexer.rewind(origin);
    lexer.rewind(ahead);
}
