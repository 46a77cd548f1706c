use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{
    Comment, NumericLiteral, StringLiteral, Symbol, Token, TokenFlags, TokenKind,
    DIRECTIVE_LOOKUP, RESERVED_LOOKUP,
};

/// Anything that hands out tokens one at a time.
///
/// Implementations never fail: unscannable input comes back as
/// `TokenKind::Stray`, and once the input is exhausted every call returns an
/// EOF token.
pub trait TokenSource {
    fn read_token(&mut self) -> Token;
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn read_token(&mut self) -> Token {
        (**self).read_token()
    }
}

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Tried in order; the first pattern matching at the cursor wins, so
    // longer spellings come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^//[^\n]*").unwrap(), handler: line_comment_handler },
        RegexPattern { regex: Regex::new(r"^/\*(?s:.*?)\*/").unwrap(), handler: block_comment_handler },
        RegexPattern { regex: Regex::new(r"^/\*(?s:.*)").unwrap(), handler: block_comment_handler },
        RegexPattern { regex: Regex::new(r"^#[ \t]*[A-Za-z_][A-Za-z0-9_]*").unwrap(), handler: directive_handler },
        RegexPattern { regex: Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^(?P<prefix>0[xX])(?P<whole>[0-9A-Fa-f]+)(?P<suffix>[A-Za-z0-9_]*)").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r"^(?P<prefix>0[bB])(?P<whole>[01]+)(?P<suffix>[A-Za-z0-9_]*)").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r"^(?P<whole>[0-9]+)(?:(?P<dot>\.)(?P<fractional>[0-9]*))?(?P<suffix>(?:[eE][+-]?[0-9]+)?[A-Za-z0-9_]*)").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r"^(?P<dot>\.)(?P<fractional>[0-9]+)(?P<suffix>(?:[eE][+-]?[0-9]+)?[A-Za-z0-9_]*)").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r#"^"(?P<body>(?:[^"\\\n]|\\.)*)""#).unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r"^'(?P<body>(?:[^'\\\n]|\\.)*)'").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r"^\.\.\.").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Ellipsis, "...") },
        RegexPattern { regex: Regex::new(r"^<<=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::LtLtEq, "<<=") },
        RegexPattern { regex: Regex::new(r"^>>=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::GtGtEq, ">>=") },
        RegexPattern { regex: Regex::new(r"^->").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Arrow, "->") },
        RegexPattern { regex: Regex::new(r"^\+\+").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::PlusPlus, "++") },
        RegexPattern { regex: Regex::new(r"^--").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::MinusMinus, "--") },
        RegexPattern { regex: Regex::new(r"^<<").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::LtLt, "<<") },
        RegexPattern { regex: Regex::new(r"^>>").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::GtGt, ">>") },
        RegexPattern { regex: Regex::new(r"^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::LtEq, "<=") },
        RegexPattern { regex: Regex::new(r"^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::GtEq, ">=") },
        RegexPattern { regex: Regex::new(r"^==").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::EqEq, "==") },
        RegexPattern { regex: Regex::new(r"^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::BangEq, "!=") },
        RegexPattern { regex: Regex::new(r"^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::AmpAmp, "&&") },
        RegexPattern { regex: Regex::new(r"^\|\|").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::PipePipe, "||") },
        RegexPattern { regex: Regex::new(r"^\*=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::StarEq, "*=") },
        RegexPattern { regex: Regex::new(r"^/=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::SlashEq, "/=") },
        RegexPattern { regex: Regex::new(r"^%=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::PercentEq, "%=") },
        RegexPattern { regex: Regex::new(r"^\+=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::PlusEq, "+=") },
        RegexPattern { regex: Regex::new(r"^-=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::MinusEq, "-=") },
        RegexPattern { regex: Regex::new(r"^&=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::AmpEq, "&=") },
        RegexPattern { regex: Regex::new(r"^\^=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::CaretEq, "^=") },
        RegexPattern { regex: Regex::new(r"^\|=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::PipeEq, "|=") },
        RegexPattern { regex: Regex::new(r"^##").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::HashHash, "##") },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::LBracket, "[") },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::RBracket, "]") },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::LParen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::RParen, ")") },
        RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::LBrace, "{") },
        RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::RBrace, "}") },
        RegexPattern { regex: Regex::new(r"^\.").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Dot, ".") },
        RegexPattern { regex: Regex::new(r"^&").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Amp, "&") },
        RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Star, "*") },
        RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Plus, "+") },
        RegexPattern { regex: Regex::new(r"^-").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Minus, "-") },
        RegexPattern { regex: Regex::new(r"^~").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Tilde, "~") },
        RegexPattern { regex: Regex::new(r"^!").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Bang, "!") },
        RegexPattern { regex: Regex::new(r"^/").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Slash, "/") },
        RegexPattern { regex: Regex::new(r"^%").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Percent, "%") },
        RegexPattern { regex: Regex::new(r"^<").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Lt, "<") },
        RegexPattern { regex: Regex::new(r"^>").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Gt, ">") },
        RegexPattern { regex: Regex::new(r"^=").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Eq, "=") },
        RegexPattern { regex: Regex::new(r"^\^").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Caret, "^") },
        RegexPattern { regex: Regex::new(r"^\|").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Pipe, "|") },
        RegexPattern { regex: Regex::new(r"^\?").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Question, "?") },
        RegexPattern { regex: Regex::new(r"^:").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Colon, ":") },
        RegexPattern { regex: Regex::new(r"^;").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Semicolon, ";") },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Comma, ",") },
        RegexPattern { regex: Regex::new(r"^#").unwrap(), handler: MK_DEFAULT_HANDLER!(Symbol::Hash, "#") },
    ];

    /// `<stdio.h>`, only recognized right after `#include`.
    static ref HEADER_NAME: Regex = Regex::new(r"^<(?P<body>[^>\n]*)>").unwrap();
}

/// Scans C source text one token at a time.
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
    /// No token has been produced on the current line yet.
    line_start: bool,
    /// The previous token was `#include`.
    header_name_allowed: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            file: file_name,
            line_start: true,
            header_name_allowed: false,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Builds a token covering the next `len` bytes and moves past them.
    pub fn emit(&mut self, kind: TokenKind, len: usize) -> Token {
        let mut flags = TokenFlags::empty();
        if self.line_start {
            flags.insert(TokenFlags::BEGINNING_OF_LINE);
        }

        let start = self.position();
        let text_has_newline = self.source[self.pos..self.pos + len].contains('\n');
        self.advance_n(len);
        let span = Span {
            start,
            end: self.position(),
        };

        // Comments are transparent to line tracking and to `#include <...>`.
        if let TokenKind::Comment(_) = kind {
            if text_has_newline {
                self.line_start = true;
            }
        } else {
            self.line_start = false;
            self.header_name_allowed = kind == TokenKind::Symbol(Symbol::DirectiveInclude);
        }

        MK_TOKEN!(kind, span, flags)
    }

    fn stray(&mut self) -> Token {
        let ch = self.remainder().chars().next().unwrap_or('\0');
        trace!(offset = self.pos, character = ?ch, "stray character");
        self.emit(TokenKind::Stray(ch), ch.len_utf8())
    }

    fn header_name(&mut self) -> Option<Token> {
        let captures = HEADER_NAME.captures(self.remainder())?;
        let len = captures.get(0)?.len();
        let value = captures.name("body")?.as_str().to_string();

        Some(self.emit(
            TokenKind::StringLiteral(StringLiteral {
                value,
                opening_quote: '<',
                closing_quote: '>',
            }),
            len,
        ))
    }
}

impl TokenSource for Lexer {
    fn read_token(&mut self) -> Token {
        loop {
            if self.at_eof() {
                return self.emit(TokenKind::EOF, 0);
            }

            if self.header_name_allowed {
                if let Some(token) = self.header_name() {
                    return token;
                }
            }

            let pattern = PATTERNS
                .iter()
                .find(|pattern| pattern.regex.is_match(self.remainder()));

            match pattern {
                Some(pattern) => {
                    if let Some(token) = (pattern.handler)(self, &pattern.regex) {
                        return token;
                    }
                }
                None => return self.stray(),
            }
        }
    }
}

fn matched_len(lexer: &Lexer, regex: &Regex) -> usize {
    regex.find(lexer.remainder()).map_or(0, |m| m.len())
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let len = matched_len(lexer, regex);
    if lexer.remainder()[..len].contains('\n') {
        lexer.line_start = true;
    }
    lexer.advance_n(len);
    None
}

fn line_comment_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let len = matched_len(lexer, regex);
    let contents = lexer.remainder()[2..len].to_string();

    Some(lexer.emit(
        TokenKind::Comment(Comment {
            contents,
            opening: String::from("//"),
            closing: String::new(),
        }),
        len,
    ))
}

fn block_comment_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let len = matched_len(lexer, regex);
    let text = &lexer.remainder()[..len];
    // An unterminated comment runs to the end of input.
    let (contents, closing) = match text.strip_suffix("*/") {
        Some(inner) if len >= 4 => (inner[2..].to_string(), String::from("*/")),
        _ => (text[2..].to_string(), String::new()),
    };

    Some(lexer.emit(
        TokenKind::Comment(Comment {
            contents,
            opening: String::from("/*"),
            closing,
        }),
        len,
    ))
}

fn directive_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    if !lexer.line_start {
        let (symbol, len) = if lexer.remainder().starts_with("##") {
            (Symbol::HashHash, 2)
        } else {
            (Symbol::Hash, 1)
        };
        return Some(lexer.emit(TokenKind::Symbol(symbol), len));
    }

    let len = matched_len(lexer, regex);
    let name = lexer.remainder()[1..len]
        .trim_start_matches([' ', '\t'])
        .to_string();

    if let Some(symbol) = DIRECTIVE_LOOKUP.get(name.as_str()) {
        Some(lexer.emit(TokenKind::Symbol(*symbol), len))
    } else {
        trace!(directive = %name, "invalid directive");
        Some(lexer.emit(TokenKind::InvalidDirective(name), len))
    }
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let len = matched_len(lexer, regex);
    let value = lexer.remainder()[..len].to_string();

    if let Some(symbol) = RESERVED_LOOKUP.get(value.as_str()) {
        Some(lexer.emit(TokenKind::Symbol(*symbol), len))
    } else {
        Some(lexer.emit(TokenKind::Identifier(value), len))
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let captures = regex.captures(lexer.remainder())?;
    let len = captures.get(0)?.len();
    let part = |name: &str| {
        captures
            .name(name)
            .map_or_else(String::new, |m| m.as_str().to_string())
    };

    let literal = NumericLiteral {
        prefix: part("prefix"),
        whole: part("whole"),
        dot: part("dot"),
        fractional: part("fractional"),
        suffix: part("suffix"),
    };

    Some(lexer.emit(TokenKind::NumericLiteral(literal), len))
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let captures = regex.captures(lexer.remainder())?;
    let len = captures.get(0)?.len();
    let quote = lexer.remainder().chars().next()?;
    let value = unescape(captures.name("body")?.as_str());

    Some(lexer.emit(
        TokenKind::StringLiteral(StringLiteral {
            value,
            opening_quote: quote,
            closing_quote: quote,
        }),
        len,
    ))
}

/// Decodes C escape sequences. Unknown escapes keep their backslash.
pub fn unescape(literal: &str) -> String {
    let mut result = String::new();
    let mut chars = literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch); // Keep non-escape characters
            continue;
        }

        let Some(&next_ch) = chars.peek() else {
            result.push(ch); // Keep the lone backslash
            continue;
        };

        let decoded = match next_ch {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'a' => Some('\x07'),
            'b' => Some('\x08'),
            'f' => Some('\x0c'),
            'v' => Some('\x0b'),
            '0' => Some('\0'),
            '\\' | '"' | '\'' | '?' => Some(next_ch),
            _ => None,
        };

        if let Some(decoded) = decoded {
            result.push(decoded);
            chars.next();
        } else if next_ch == 'x' {
            chars.next();
            let mut hex = String::new();

            while hex.len() < 2 {
                match chars.peek() {
                    Some(ch) if ch.is_ascii_hexdigit() => {
                        hex.push(*ch);
                        chars.next();
                    }
                    _ => break,
                }
            }

            match u8::from_str_radix(&hex, 16) {
                Ok(byte) => result.push(byte as char),
                Err(_) => result.push_str("\\x"),
            }
        } else {
            result.push(ch); // Keep the backslash
        }
    }

    result
}

/// Replays a fixed list of tokens.
///
/// The final token is repeated forever; an EOF is appended when the list
/// does not already end with one.
#[derive(Debug, Clone)]
pub struct TokenList {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenList {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            tokens.push(Token::eof());
        }

        TokenList { tokens, pos: 0 }
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        TokenList::new(tokens)
    }
}

impl TokenSource for TokenList {
    fn read_token(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }
}

/// Scans all of `source`, returning every token up to and including EOF.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.read_token();
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
