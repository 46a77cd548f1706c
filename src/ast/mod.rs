/// Syntax tree module
/// Contains all definitions related to the syntax tree structure
///
/// Submodules:
/// - ast: Node model, visitor trait and kind predicates
/// - expressions: Primary and postfix expression forms
pub mod ast;
pub mod expressions;
