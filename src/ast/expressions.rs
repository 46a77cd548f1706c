use crate::{lexer::tokens::Symbol, Span};

use super::ast::{is_base_of_syntax_node, NodeCategory, NodeKind, SyntaxNode};

const EXPRESSION: NodeCategory = NodeCategory::Expression;
const IDENTIFIER: NodeCategory = NodeCategory::Kind(NodeKind::Identifier);

const fn symbol_of(symbol: Symbol) -> NodeCategory {
    NodeCategory::Kind(NodeKind::Symbol(symbol))
}

/// True when `children` has exactly one node per entry of `shape`, each
/// falling in the matching category.
fn matches_shape(children: &[SyntaxNode], shape: &[NodeCategory]) -> bool {
    children.len() == shape.len()
        && children
            .iter()
            .zip(shape)
            .all(|(child, category)| is_base_of_syntax_node(child, *category))
}

// PRIMARY

/// Primary Expression
/// An identifier, a literal or a parenthesized expression: the operand every
/// other expression form is built on.
#[derive(Debug, PartialEq)]
pub struct PrimaryExpression {
    children: Vec<SyntaxNode>,
    span: Span,
}

impl PrimaryExpression {
    pub fn new(children: Vec<SyntaxNode>) -> Self {
        PrimaryExpression {
            children,
            span: Span::null(),
        }
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<SyntaxNode> {
        &mut self.children
    }

    pub fn set_children(&mut self, children: Vec<SyntaxNode>) {
        self.children = children;
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    /// `[identifier]`
    pub fn is_identifier(&self) -> bool {
        matches_shape(&self.children, &[IDENTIFIER])
    }

    /// `[numeric-literal]`
    pub fn is_numeric_literal(&self) -> bool {
        matches_shape(&self.children, &[NodeKind::NumericLiteral.into()])
    }

    /// `[string-literal]`
    pub fn is_string_literal(&self) -> bool {
        matches_shape(&self.children, &[NodeKind::StringLiteral.into()])
    }

    /// `[ ( , expression , ) ]`
    pub fn is_parenthesized_expression(&self) -> bool {
        matches_shape(
            &self.children,
            &[symbol_of(Symbol::LParen), EXPRESSION, symbol_of(Symbol::RParen)],
        )
    }

    /// Exactly one form matches.
    pub fn is_valid(&self) -> bool {
        [
            self.is_identifier(),
            self.is_numeric_literal(),
            self.is_string_literal(),
            self.is_parenthesized_expression(),
        ]
        .iter()
        .filter(|form| **form)
        .count()
            == 1
    }
}

// POSTFIX

/// Postfix Expression
/// An expression followed by one postfix operator. Chains nest to the left,
/// so the first child of `a.b.c` is the postfix expression `a.b`.
#[derive(Debug, PartialEq)]
pub struct PostfixExpression {
    children: Vec<SyntaxNode>,
    span: Span,
}

impl PostfixExpression {
    pub fn new(children: Vec<SyntaxNode>) -> Self {
        PostfixExpression {
            children,
            span: Span::null(),
        }
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<SyntaxNode> {
        &mut self.children
    }

    pub fn set_children(&mut self, children: Vec<SyntaxNode>) {
        self.children = children;
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    /// The operand the operator applies to.
    pub fn base(&self) -> Option<&SyntaxNode> {
        self.children.first()
    }

    /// `[expression]`
    pub fn is_passthrough(&self) -> bool {
        matches_shape(&self.children, &[EXPRESSION])
    }

    /// `[expression, [, expression, ]]`
    pub fn is_array_accessor(&self) -> bool {
        matches_shape(
            &self.children,
            &[
                EXPRESSION,
                symbol_of(Symbol::LBracket),
                EXPRESSION,
                symbol_of(Symbol::RBracket),
            ],
        )
    }

    /// `[expression, (, (expression (, expression)*)?, )]`
    pub fn is_function_call(&self) -> bool {
        let children = &self.children;
        if children.len() < 3
            || !matches_shape(&children[..2], &[EXPRESSION, symbol_of(Symbol::LParen)])
            || !is_base_of_syntax_node(&children[children.len() - 1], symbol_of(Symbol::RParen))
        {
            return false;
        }

        // Arguments alternate with commas: even offsets are expressions.
        let arguments = &children[2..children.len() - 1];
        (arguments.is_empty() || arguments.len() % 2 == 1)
            && arguments.iter().enumerate().all(|(i, argument)| {
                if i % 2 == 0 {
                    is_base_of_syntax_node(argument, EXPRESSION)
                } else {
                    is_base_of_syntax_node(argument, symbol_of(Symbol::Comma))
                }
            })
    }

    /// Call arguments, without the separating commas.
    pub fn arguments(&self) -> Vec<&SyntaxNode> {
        if !self.is_function_call() {
            return vec![];
        }

        self.children[2..self.children.len() - 1]
            .iter()
            .step_by(2)
            .collect()
    }

    /// `[expression, ., identifier]`
    pub fn is_structure_reference(&self) -> bool {
        matches_shape(&self.children, &[EXPRESSION, symbol_of(Symbol::Dot), IDENTIFIER])
    }

    /// `[expression, ->, identifier]`
    pub fn is_structure_dereference(&self) -> bool {
        matches_shape(&self.children, &[EXPRESSION, symbol_of(Symbol::Arrow), IDENTIFIER])
    }

    /// `[expression, ++]`
    pub fn is_post_increment(&self) -> bool {
        matches_shape(&self.children, &[EXPRESSION, symbol_of(Symbol::PlusPlus)])
    }

    /// `[expression, --]`
    pub fn is_post_decrement(&self) -> bool {
        matches_shape(&self.children, &[EXPRESSION, symbol_of(Symbol::MinusMinus)])
    }

    /// Exactly one form matches.
    pub fn is_valid(&self) -> bool {
        [
            self.is_passthrough(),
            self.is_array_accessor(),
            self.is_function_call(),
            self.is_structure_reference(),
            self.is_structure_dereference(),
            self.is_post_increment(),
            self.is_post_decrement(),
        ]
        .iter()
        .filter(|form| **form)
        .count()
            == 1
    }
}
