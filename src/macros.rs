//! Utility macros for the front-end.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed-spelling symbols
//!
//! These macros keep the lexer's pattern table to one line per symbol.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$span` - The source span
/// * `$flags` - The TokenFlags (defaults to empty)
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Identifier("x".to_string()), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            span: $span,
            flags: $crate::lexer::tokens::TokenFlags::empty(),
        }
    };
    ($kind:expr, $span:expr, $flags:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            span: $span,
            flags: $flags,
        }
    };
}

/// Creates a default lexer handler for a symbol with a fixed spelling.
///
/// Generates a handler function that emits a `TokenKind::Symbol` token and
/// advances the lexer position by the spelling's length.
///
/// # Arguments
///
/// * `$symbol` - The Symbol to emit
/// * `$value` - The literal spelling (used for length calculation)
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(Symbol::PlusPlus, "++"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($symbol:expr, $value:literal) => {
        |lexer: &mut $crate::lexer::lexer::Lexer, _regex: &::regex::Regex| {
            Some(lexer.emit(
                $crate::lexer::tokens::TokenKind::Symbol($symbol),
                $value.len(),
            ))
        }
    };
}
