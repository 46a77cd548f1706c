use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, Symbol> = {
        let mut map = HashMap::new();
        map.insert("auto", Symbol::Auto);
        map.insert("break", Symbol::Break);
        map.insert("case", Symbol::Case);
        map.insert("char", Symbol::Char);
        map.insert("const", Symbol::Const);
        map.insert("continue", Symbol::Continue);
        map.insert("default", Symbol::Default);
        map.insert("do", Symbol::Do);
        map.insert("double", Symbol::Double);
        map.insert("else", Symbol::Else);
        map.insert("enum", Symbol::Enum);
        map.insert("extern", Symbol::Extern);
        map.insert("float", Symbol::Float);
        map.insert("for", Symbol::For);
        map.insert("goto", Symbol::Goto);
        map.insert("if", Symbol::If);
        map.insert("inline", Symbol::Inline);
        map.insert("int", Symbol::Int);
        map.insert("long", Symbol::Long);
        map.insert("register", Symbol::Register);
        map.insert("restrict", Symbol::Restrict);
        map.insert("return", Symbol::Return);
        map.insert("short", Symbol::Short);
        map.insert("signed", Symbol::Signed);
        map.insert("sizeof", Symbol::Sizeof);
        map.insert("static", Symbol::Static);
        map.insert("struct", Symbol::Struct);
        map.insert("switch", Symbol::Switch);
        map.insert("typedef", Symbol::Typedef);
        map.insert("union", Symbol::Union);
        map.insert("unsigned", Symbol::Unsigned);
        map.insert("void", Symbol::Void);
        map.insert("volatile", Symbol::Volatile);
        map.insert("while", Symbol::While);
        map.insert("_Bool", Symbol::Bool);
        map
    };

    /// Preprocessor directive names, looked up after a line-initial `#`.
    pub static ref DIRECTIVE_LOOKUP: HashMap<&'static str, Symbol> = {
        let mut map = HashMap::new();
        map.insert("include", Symbol::DirectiveInclude);
        map.insert("define", Symbol::DirectiveDefine);
        map.insert("undef", Symbol::DirectiveUndef);
        map.insert("if", Symbol::DirectiveIf);
        map.insert("ifdef", Symbol::DirectiveIfdef);
        map.insert("ifndef", Symbol::DirectiveIfndef);
        map.insert("elif", Symbol::DirectiveElif);
        map.insert("else", Symbol::DirectiveElse);
        map.insert("endif", Symbol::DirectiveEndif);
        map.insert("line", Symbol::DirectiveLine);
        map.insert("error", Symbol::DirectiveError);
        map.insert("pragma", Symbol::DirectivePragma);
        map
    };
}

/// The fixed table of punctuation, keyword and directive tokens.
///
/// These carry no data: the parser only ever compares them for identity.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Symbol {
    LBracket,
    RBracket,
    LParen,
    RParen,
    LBrace,
    RBrace,

    Dot,
    Ellipsis,
    Arrow, // ->

    PlusPlus,
    MinusMinus,

    Amp,
    Star,
    Plus,
    Minus,
    Tilde,
    Bang,
    Slash,
    Percent,
    LtLt,
    GtGt,
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    BangEq,
    Caret,
    Pipe,
    AmpAmp,
    PipePipe,
    Question,
    Colon,
    Semicolon,
    Comma,

    Eq,
    StarEq,
    SlashEq,
    PercentEq,
    PlusEq,
    MinusEq,
    LtLtEq,
    GtGtEq,
    AmpEq,
    CaretEq,
    PipeEq,

    Hash,
    HashHash,

    // Reserved
    Auto,
    Break,
    Case,
    Char,
    Const,
    Continue,
    Default,
    Do,
    Double,
    Else,
    Enum,
    Extern,
    Float,
    For,
    Goto,
    If,
    Inline,
    Int,
    Long,
    Register,
    Restrict,
    Return,
    Short,
    Signed,
    Sizeof,
    Static,
    Struct,
    Switch,
    Typedef,
    Union,
    Unsigned,
    Void,
    Volatile,
    While,
    Bool,

    // Directives
    DirectiveInclude,
    DirectiveDefine,
    DirectiveUndef,
    DirectiveIf,
    DirectiveIfdef,
    DirectiveIfndef,
    DirectiveElif,
    DirectiveElse,
    DirectiveEndif,
    DirectiveLine,
    DirectiveError,
    DirectivePragma,
}

impl Symbol {
    /// How the symbol is spelled in source.
    pub fn spelling(&self) -> &'static str {
        match self {
            Symbol::LBracket => "[",
            Symbol::RBracket => "]",
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::LBrace => "{",
            Symbol::RBrace => "}",
            Symbol::Dot => ".",
            Symbol::Ellipsis => "...",
            Symbol::Arrow => "->",
            Symbol::PlusPlus => "++",
            Symbol::MinusMinus => "--",
            Symbol::Amp => "&",
            Symbol::Star => "*",
            Symbol::Plus => "+",
            Symbol::Minus => "-",
            Symbol::Tilde => "~",
            Symbol::Bang => "!",
            Symbol::Slash => "/",
            Symbol::Percent => "%",
            Symbol::LtLt => "<<",
            Symbol::GtGt => ">>",
            Symbol::Lt => "<",
            Symbol::Gt => ">",
            Symbol::LtEq => "<=",
            Symbol::GtEq => ">=",
            Symbol::EqEq => "==",
            Symbol::BangEq => "!=",
            Symbol::Caret => "^",
            Symbol::Pipe => "|",
            Symbol::AmpAmp => "&&",
            Symbol::PipePipe => "||",
            Symbol::Question => "?",
            Symbol::Colon => ":",
            Symbol::Semicolon => ";",
            Symbol::Comma => ",",
            Symbol::Eq => "=",
            Symbol::StarEq => "*=",
            Symbol::SlashEq => "/=",
            Symbol::PercentEq => "%=",
            Symbol::PlusEq => "+=",
            Symbol::MinusEq => "-=",
            Symbol::LtLtEq => "<<=",
            Symbol::GtGtEq => ">>=",
            Symbol::AmpEq => "&=",
            Symbol::CaretEq => "^=",
            Symbol::PipeEq => "|=",
            Symbol::Hash => "#",
            Symbol::HashHash => "##",
            Symbol::Auto => "auto",
            Symbol::Break => "break",
            Symbol::Case => "case",
            Symbol::Char => "char",
            Symbol::Const => "const",
            Symbol::Continue => "continue",
            Symbol::Default => "default",
            Symbol::Do => "do",
            Symbol::Double => "double",
            Symbol::Else => "else",
            Symbol::Enum => "enum",
            Symbol::Extern => "extern",
            Symbol::Float => "float",
            Symbol::For => "for",
            Symbol::Goto => "goto",
            Symbol::If => "if",
            Symbol::Inline => "inline",
            Symbol::Int => "int",
            Symbol::Long => "long",
            Symbol::Register => "register",
            Symbol::Restrict => "restrict",
            Symbol::Return => "return",
            Symbol::Short => "short",
            Symbol::Signed => "signed",
            Symbol::Sizeof => "sizeof",
            Symbol::Static => "static",
            Symbol::Struct => "struct",
            Symbol::Switch => "switch",
            Symbol::Typedef => "typedef",
            Symbol::Union => "union",
            Symbol::Unsigned => "unsigned",
            Symbol::Void => "void",
            Symbol::Volatile => "volatile",
            Symbol::While => "while",
            Symbol::Bool => "_Bool",
            Symbol::DirectiveInclude => "#include",
            Symbol::DirectiveDefine => "#define",
            Symbol::DirectiveUndef => "#undef",
            Symbol::DirectiveIf => "#if",
            Symbol::DirectiveIfdef => "#ifdef",
            Symbol::DirectiveIfndef => "#ifndef",
            Symbol::DirectiveElif => "#elif",
            Symbol::DirectiveElse => "#else",
            Symbol::DirectiveEndif => "#endif",
            Symbol::DirectiveLine => "#line",
            Symbol::DirectiveError => "#error",
            Symbol::DirectivePragma => "#pragma",
        }
    }

    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP.get(self.spelling()) == Some(self)
    }

    pub fn is_directive(&self) -> bool {
        self.spelling().starts_with('#') && !matches!(self, Symbol::Hash | Symbol::HashHash)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spelling())
    }
}

/// A numeric literal kept exactly as spelled.
///
/// `0x1Ful` is prefix `0x`, whole `1F`, suffix `ul`; `1.5e3f` is whole `1`,
/// dot `.`, fractional `5`, suffix `e3f`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumericLiteral {
    pub prefix: String,
    pub whole: String,
    pub dot: String,
    pub fractional: String,
    pub suffix: String,
}

impl NumericLiteral {
    pub fn whole(whole: impl Into<String>) -> Self {
        NumericLiteral {
            whole: whole.into(),
            ..Default::default()
        }
    }
}

impl Display for NumericLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.prefix, self.whole, self.dot, self.fractional, self.suffix
        )
    }
}

/// A string literal with escapes already decoded.
///
/// Quotes are `"`/`"` for strings, `'`/`'` for character constants and
/// `<`/`>` for header names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub value: String,
    pub opening_quote: char,
    pub closing_quote: char,
}

impl StringLiteral {
    pub fn quoted(value: impl Into<String>) -> Self {
        StringLiteral {
            value: value.into(),
            opening_quote: '"',
            closing_quote: '"',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub contents: String,
    pub opening: String,
    pub closing: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    EOF,
    Symbol(Symbol),
    Identifier(String),
    NumericLiteral(NumericLiteral),
    StringLiteral(StringLiteral),
    Comment(Comment),
    /// A character that starts no valid token.
    Stray(char),
    /// A line-initial `#name` whose name is not a known directive.
    InvalidDirective(String),
}

impl TokenKind {
    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        matches!(self, TokenKind::Symbol(s) if *s == symbol)
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, TokenKind::Identifier(_))
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::EOF => write!(f, "EOF"),
            TokenKind::Symbol(symbol) => write!(f, "{}", symbol),
            TokenKind::Identifier(name) => write!(f, "{}", name),
            TokenKind::NumericLiteral(literal) => write!(f, "{}", literal),
            TokenKind::StringLiteral(literal) => write!(
                f,
                "{}{}{}",
                literal.opening_quote, literal.value, literal.closing_quote
            ),
            TokenKind::Comment(comment) => {
                write!(f, "{}{}{}", comment.opening, comment.contents, comment.closing)
            }
            TokenKind::Stray(ch) => write!(f, "{}", ch),
            TokenKind::InvalidDirective(name) => write!(f, "#{}", name),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenFlags(u32);

impl TokenFlags {
    /// The token is the first on its source line.
    pub const BEGINNING_OF_LINE: TokenFlags = TokenFlags(1);

    pub const fn empty() -> Self {
        TokenFlags(0)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, other: TokenFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: TokenFlags) {
        self.0 |= other.0;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub flags: TokenFlags,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Token {
    /// A token with no source location, for tests and synthesized input.
    pub fn new(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::null(),
            flags: TokenFlags::empty(),
        }
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::EOF)
    }

    pub fn symbol(symbol: Symbol) -> Self {
        Token::new(TokenKind::Symbol(symbol))
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Token::new(TokenKind::Identifier(name.into()))
    }

    pub fn numeric(whole: impl Into<String>) -> Self {
        Token::new(TokenKind::NumericLiteral(NumericLiteral::whole(whole)))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Token::new(TokenKind::StringLiteral(StringLiteral::quoted(value)))
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EOF
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::Comment(_))
    }

    pub fn begins_line(&self) -> bool {
        self.flags.contains(TokenFlags::BEGINNING_OF_LINE)
    }

    /// Name of an identifier token.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            _ => None,
        }
    }
}
