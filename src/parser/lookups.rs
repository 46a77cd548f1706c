use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{ast::ast::Expression, errors::errors::Error, lexer::tokens::Symbol};

use super::{expr::*, parser::Parser};

/// Extends an already-parsed operand with the postfix operator under the cursor.
pub type PostfixHandler = fn(&mut Parser, Expression) -> Result<Expression, Error>;

lazy_static! {
    pub static ref POSTFIX_LOOKUP: HashMap<Symbol, PostfixHandler> = {
        let mut map: HashMap<Symbol, PostfixHandler> = HashMap::new();
        map.insert(Symbol::LBracket, parse_array_access_expr);
        map.insert(Symbol::LParen, parse_call_expr);

        // Member
        map.insert(Symbol::Dot, parse_member_expr);
        map.insert(Symbol::Arrow, parse_member_expr);

        // Increment and decrement
        map.insert(Symbol::PlusPlus, parse_step_expr);
        map.insert(Symbol::MinusMinus, parse_step_expr);
        map
    };
}
