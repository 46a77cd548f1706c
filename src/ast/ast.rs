use std::rc::Rc;

use crate::{
    lexer::tokens::{Comment, NumericLiteral, StringLiteral, Symbol, Token, TokenKind},
    Span,
};

use super::expressions::{PostfixExpression, PrimaryExpression};

/// Any element of the syntax tree.
///
/// Tokens are shared with the lexer's buffer through `Rc`; every other node
/// is owned by exactly one parent.
#[derive(Debug, PartialEq)]
pub enum SyntaxNode {
    Token(Rc<Token>),
    Expression(Expression),
    Declaration(Declaration),
    Statement(Statement),
}

impl SyntaxNode {
    /// Dispatches to the visitor method for this node's kind.
    pub fn accept<V: SyntaxNodeVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            SyntaxNode::Token(token) => accept_token(token, visitor),
            SyntaxNode::Expression(expression) => expression.accept(visitor),
            SyntaxNode::Declaration(declaration) => visitor.visit_declaration(declaration),
            SyntaxNode::Statement(statement) => visitor.visit_statement(statement),
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            SyntaxNode::Token(token) => &token.span,
            SyntaxNode::Expression(expression) => expression.span(),
            SyntaxNode::Declaration(declaration) => &declaration.span,
            SyntaxNode::Statement(statement) => &statement.span,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.accept(&mut NodeKindVisitor)
    }

    pub fn as_token(&self) -> Option<&Rc<Token>> {
        match self {
            SyntaxNode::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            SyntaxNode::Expression(expression) => Some(expression),
            _ => None,
        }
    }
}

impl From<Rc<Token>> for SyntaxNode {
    fn from(token: Rc<Token>) -> Self {
        SyntaxNode::Token(token)
    }
}

impl From<Expression> for SyntaxNode {
    fn from(expression: Expression) -> Self {
        SyntaxNode::Expression(expression)
    }
}

pub fn accept_token<V: SyntaxNodeVisitor + ?Sized>(token: &Token, visitor: &mut V) -> V::Output {
    match &token.kind {
        TokenKind::EOF => visitor.visit_eof(token),
        TokenKind::Symbol(symbol) => visitor.visit_symbol(token, *symbol),
        TokenKind::Identifier(name) => visitor.visit_identifier(token, name),
        TokenKind::NumericLiteral(literal) => visitor.visit_numeric_literal(token, literal),
        TokenKind::StringLiteral(literal) => visitor.visit_string_literal(token, literal),
        TokenKind::Comment(comment) => visitor.visit_comment(token, comment),
        TokenKind::Stray(ch) => visitor.visit_stray(token, *ch),
        TokenKind::InvalidDirective(name) => visitor.visit_invalid_directive(token, name),
    }
}

#[derive(Debug, PartialEq)]
pub enum Expression {
    Primary(PrimaryExpression),
    Postfix(PostfixExpression),
}

impl Expression {
    pub fn accept<V: SyntaxNodeVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expression::Primary(primary) => visitor.visit_primary_expression(primary),
            Expression::Postfix(postfix) => visitor.visit_postfix_expression(postfix),
        }
    }

    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            Expression::Primary(primary) => primary.children(),
            Expression::Postfix(postfix) => postfix.children(),
        }
    }

    /// Child at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is past the last child.
    pub fn child(&self, index: usize) -> &SyntaxNode {
        &self.children()[index]
    }

    pub fn span(&self) -> &Span {
        match self {
            Expression::Primary(primary) => primary.span(),
            Expression::Postfix(postfix) => postfix.span(),
        }
    }

    pub fn set_span(&mut self, span: Span) {
        match self {
            Expression::Primary(primary) => primary.set_span(span),
            Expression::Postfix(postfix) => postfix.set_span(span),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Expression::Primary(primary) => primary.is_valid(),
            Expression::Postfix(postfix) => postfix.is_valid(),
        }
    }

    pub fn as_primary(&self) -> Option<&PrimaryExpression> {
        match self {
            Expression::Primary(primary) => Some(primary),
            _ => None,
        }
    }

    pub fn as_postfix(&self) -> Option<&PostfixExpression> {
        match self {
            Expression::Postfix(postfix) => Some(postfix),
            _ => None,
        }
    }
}

/// Placeholder for declarations; later grammar stages give it children.
#[derive(Debug, PartialEq)]
pub struct Declaration {
    pub span: Span,
}

/// Placeholder for statements; later grammar stages give it children.
#[derive(Debug, PartialEq)]
pub struct Statement {
    pub span: Span,
}

/// One handler per node kind.
///
/// None of the methods have defaults, so adding a node kind breaks every
/// visitor until it handles the new kind.
pub trait SyntaxNodeVisitor {
    type Output;

    fn visit_eof(&mut self, token: &Token) -> Self::Output;
    fn visit_symbol(&mut self, token: &Token, symbol: Symbol) -> Self::Output;
    fn visit_identifier(&mut self, token: &Token, name: &str) -> Self::Output;
    fn visit_numeric_literal(&mut self, token: &Token, literal: &NumericLiteral) -> Self::Output;
    fn visit_string_literal(&mut self, token: &Token, literal: &StringLiteral) -> Self::Output;
    fn visit_comment(&mut self, token: &Token, comment: &Comment) -> Self::Output;
    fn visit_stray(&mut self, token: &Token, offending: char) -> Self::Output;
    fn visit_invalid_directive(&mut self, token: &Token, name: &str) -> Self::Output;
    fn visit_primary_expression(&mut self, expression: &PrimaryExpression) -> Self::Output;
    fn visit_postfix_expression(&mut self, expression: &PostfixExpression) -> Self::Output;
    fn visit_declaration(&mut self, declaration: &Declaration) -> Self::Output;
    fn visit_statement(&mut self, statement: &Statement) -> Self::Output;
}

/// The closed set of concrete node kinds.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum NodeKind {
    EOF,
    Symbol(Symbol),
    Identifier,
    NumericLiteral,
    StringLiteral,
    Comment,
    Stray,
    InvalidDirective,
    PrimaryExpression,
    PostfixExpression,
    Declaration,
    Statement,
}

/// A node kind or one of the grammatical categories above it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum NodeCategory {
    /// Every node.
    SyntaxNode,
    Token,
    /// Any punctuation, keyword or directive token.
    Symbol,
    Expression,
    Kind(NodeKind),
}

impl NodeCategory {
    pub fn contains(&self, kind: NodeKind) -> bool {
        match self {
            NodeCategory::SyntaxNode => true,
            NodeCategory::Token => !matches!(
                kind,
                NodeKind::PrimaryExpression
                    | NodeKind::PostfixExpression
                    | NodeKind::Declaration
                    | NodeKind::Statement
            ),
            NodeCategory::Symbol => matches!(kind, NodeKind::Symbol(_)),
            NodeCategory::Expression => {
                matches!(kind, NodeKind::PrimaryExpression | NodeKind::PostfixExpression)
            }
            NodeCategory::Kind(exact) => *exact == kind,
        }
    }
}

impl From<NodeKind> for NodeCategory {
    fn from(kind: NodeKind) -> Self {
        NodeCategory::Kind(kind)
    }
}

struct NodeKindVisitor;

impl SyntaxNodeVisitor for NodeKindVisitor {
    type Output = NodeKind;

    fn visit_eof(&mut self, _token: &Token) -> NodeKind {
        NodeKind::EOF
    }
    fn visit_symbol(&mut self, _token: &Token, symbol: Symbol) -> NodeKind {
        NodeKind::Symbol(symbol)
    }
    fn visit_identifier(&mut self, _token: &Token, _name: &str) -> NodeKind {
        NodeKind::Identifier
    }
    fn visit_numeric_literal(&mut self, _token: &Token, _literal: &NumericLiteral) -> NodeKind {
        NodeKind::NumericLiteral
    }
    fn visit_string_literal(&mut self, _token: &Token, _literal: &StringLiteral) -> NodeKind {
        NodeKind::StringLiteral
    }
    fn visit_comment(&mut self, _token: &Token, _comment: &Comment) -> NodeKind {
        NodeKind::Comment
    }
    fn visit_stray(&mut self, _token: &Token, _offending: char) -> NodeKind {
        NodeKind::Stray
    }
    fn visit_invalid_directive(&mut self, _token: &Token, _name: &str) -> NodeKind {
        NodeKind::InvalidDirective
    }
    fn visit_primary_expression(&mut self, _expression: &PrimaryExpression) -> NodeKind {
        NodeKind::PrimaryExpression
    }
    fn visit_postfix_expression(&mut self, _expression: &PostfixExpression) -> NodeKind {
        NodeKind::PostfixExpression
    }
    fn visit_declaration(&mut self, _declaration: &Declaration) -> NodeKind {
        NodeKind::Declaration
    }
    fn visit_statement(&mut self, _statement: &Statement) -> NodeKind {
        NodeKind::Statement
    }
}

/// Answers "is this node exactly of kind `kind`?".
pub struct IsSyntaxNodeVisitor {
    kind: NodeKind,
    result: bool,
}

impl IsSyntaxNodeVisitor {
    pub fn new(kind: NodeKind) -> Self {
        IsSyntaxNodeVisitor {
            kind,
            result: false,
        }
    }

    pub fn get_result(&self) -> bool {
        self.result
    }

    fn check(&mut self, kind: NodeKind) {
        self.result = self.kind == kind;
    }
}

impl SyntaxNodeVisitor for IsSyntaxNodeVisitor {
    type Output = ();

    fn visit_eof(&mut self, _token: &Token) {
        self.check(NodeKind::EOF)
    }
    fn visit_symbol(&mut self, _token: &Token, symbol: Symbol) {
        self.check(NodeKind::Symbol(symbol))
    }
    fn visit_identifier(&mut self, _token: &Token, _name: &str) {
        self.check(NodeKind::Identifier)
    }
    fn visit_numeric_literal(&mut self, _token: &Token, _literal: &NumericLiteral) {
        self.check(NodeKind::NumericLiteral)
    }
    fn visit_string_literal(&mut self, _token: &Token, _literal: &StringLiteral) {
        self.check(NodeKind::StringLiteral)
    }
    fn visit_comment(&mut self, _token: &Token, _comment: &Comment) {
        self.check(NodeKind::Comment)
    }
    fn visit_stray(&mut self, _token: &Token, _offending: char) {
        self.check(NodeKind::Stray)
    }
    fn visit_invalid_directive(&mut self, _token: &Token, _name: &str) {
        self.check(NodeKind::InvalidDirective)
    }
    fn visit_primary_expression(&mut self, _expression: &PrimaryExpression) {
        self.check(NodeKind::PrimaryExpression)
    }
    fn visit_postfix_expression(&mut self, _expression: &PostfixExpression) {
        self.check(NodeKind::PostfixExpression)
    }
    fn visit_declaration(&mut self, _declaration: &Declaration) {
        self.check(NodeKind::Declaration)
    }
    fn visit_statement(&mut self, _statement: &Statement) {
        self.check(NodeKind::Statement)
    }
}

/// Answers "is this node of kind `category` or a kind beneath it?".
pub struct IsBaseOfSyntaxNodeVisitor {
    category: NodeCategory,
    result: bool,
}

impl IsBaseOfSyntaxNodeVisitor {
    pub fn new(category: impl Into<NodeCategory>) -> Self {
        IsBaseOfSyntaxNodeVisitor {
            category: category.into(),
            result: false,
        }
    }

    pub fn get_result(&self) -> bool {
        self.result
    }

    fn check(&mut self, kind: NodeKind) {
        self.result = self.category.contains(kind);
    }
}

impl SyntaxNodeVisitor for IsBaseOfSyntaxNodeVisitor {
    type Output = ();

    fn visit_eof(&mut self, _token: &Token) {
        self.check(NodeKind::EOF)
    }
    fn visit_symbol(&mut self, _token: &Token, symbol: Symbol) {
        self.check(NodeKind::Symbol(symbol))
    }
    fn visit_identifier(&mut self, _token: &Token, _name: &str) {
        self.check(NodeKind::Identifier)
    }
    fn visit_numeric_literal(&mut self, _token: &Token, _literal: &NumericLiteral) {
        self.check(NodeKind::NumericLiteral)
    }
    fn visit_string_literal(&mut self, _token: &Token, _literal: &StringLiteral) {
        self.check(NodeKind::StringLiteral)
    }
    fn visit_comment(&mut self, _token: &Token, _comment: &Comment) {
        self.check(NodeKind::Comment)
    }
    fn visit_stray(&mut self, _token: &Token, _offending: char) {
        self.check(NodeKind::Stray)
    }
    fn visit_invalid_directive(&mut self, _token: &Token, _name: &str) {
        self.check(NodeKind::InvalidDirective)
    }
    fn visit_primary_expression(&mut self, _expression: &PrimaryExpression) {
        self.check(NodeKind::PrimaryExpression)
    }
    fn visit_postfix_expression(&mut self, _expression: &PostfixExpression) {
        self.check(NodeKind::PostfixExpression)
    }
    fn visit_declaration(&mut self, _declaration: &Declaration) {
        self.check(NodeKind::Declaration)
    }
    fn visit_statement(&mut self, _statement: &Statement) {
        self.check(NodeKind::Statement)
    }
}

pub fn is_syntax_node(node: &SyntaxNode, kind: NodeKind) -> bool {
    let mut visitor = IsSyntaxNodeVisitor::new(kind);
    node.accept(&mut visitor);
    visitor.get_result()
}

pub fn is_base_of_syntax_node(node: &SyntaxNode, category: impl Into<NodeCategory>) -> bool {
    let mut visitor = IsBaseOfSyntaxNodeVisitor::new(category);
    node.accept(&mut visitor);
    visitor.get_result()
}
