//! Source printer for syntax trees.
//!
//! `pretty_print` output parses back to a structurally identical tree:
//! infix expressions are fully parenthesized and operands that would otherwise
//! capture their surroundings (definitions, statements) are wrapped.
//! `pretty_print_typed` additionally tags literals and calls with `@type`;
//! that form is for reading, not re-parsing.

use crate::type_checker::context::Context;

use super::ast::{Node, NodeKind, NodeType};

const INDENT: &str = "    ";

pub fn pretty_print(node: &Node) -> String {
    let mut printer = Printer {
        out: String::new(),
        depth: 0,
        context: None,
    };
    printer.print(node);
    printer.out
}

pub fn pretty_print_typed(node: &Node, context: &Context) -> String {
    let mut printer = Printer {
        out: String::new(),
        depth: 0,
        context: Some(context),
    };
    printer.print(node);
    printer.out
}

struct Printer<'a> {
    out: String,
    depth: usize,
    context: Option<&'a Context>,
}

impl Printer<'_> {
    fn print(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Literal(token) => {
                self.out.push_str(&token.lexeme());
                self.print_type(node);
            }
            NodeKind::PrefixOp { operator, operand } => {
                self.out.push_str(operator.kind.symbol());
                self.print_operand(operand);
            }
            NodeKind::InfixOp {
                operator,
                left,
                right,
            } => {
                self.out.push('(');
                self.print_operand(left);
                self.out.push_str(&format!(" {} ", operator.kind.symbol()));
                self.print_operand(right);
                self.out.push(')');
            }
            NodeKind::Statement(inner) => {
                self.print(inner);
                self.out.push(';');
            }
            NodeKind::Block {
                statements,
                trailing,
            } => {
                if statements.is_empty() && trailing.is_none() {
                    self.out.push_str("{ }");
                    return;
                }

                self.out.push_str("{\n");
                self.depth += 1;
                for statement in statements.iter().chain(trailing.as_deref()) {
                    self.indent();
                    self.print(statement);
                    self.out.push('\n');
                }
                self.depth -= 1;
                self.indent();
                self.out.push('}');
            }
            NodeKind::FunctionDef {
                name,
                params,
                return_type,
                body,
            } => {
                self.out.push_str(&format!("fn {}(", name.lexeme()));
                for (index, param) in params.iter().enumerate() {
                    if index > 0 {
                        self.out.push_str(", ");
                    }
                    self.print(&param.name);
                    self.out.push_str(": ");
                    self.print(&param.type_expr);
                }
                self.out.push_str(") -> ");
                self.print(return_type);
                if let Some(body) = body {
                    self.out.push(' ');
                    self.print(body);
                }
            }
            NodeKind::FunctionCall { callee, arguments } => {
                if callee.get_node_type() == NodeType::PrefixOp {
                    self.out.push('(');
                    self.print(callee);
                    self.out.push(')');
                } else {
                    self.print_operand(callee);
                }
                self.out.push('(');
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        self.out.push_str(", ");
                    }
                    self.print_operand(argument);
                }
                self.out.push(')');
                self.print_type(node);
            }
            NodeKind::VariableDef {
                name,
                type_expr,
                initializer,
            } => {
                self.out.push_str("let ");
                self.print(name);
                self.out.push_str(": ");
                self.print(type_expr);
                if let Some(initializer) = initializer {
                    self.out.push_str(" = ");
                    self.print(initializer);
                }
            }
            NodeKind::Root(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        self.out.push('\n');
                    }
                    self.print(item);
                }
            }
        }
    }

    /// Prints a sub-expression, parenthesizing forms that would swallow the
    /// tokens after them.
    fn print_operand(&mut self, node: &Node) {
        match node.get_node_type() {
            NodeType::VariableDef | NodeType::Statement => {
                self.out.push('(');
                self.print(node);
                self.out.push(')');
            }
            _ => self.print(node),
        }
    }

    fn print_type(&mut self, node: &Node) {
        if let (Some(context), Some(ty)) = (self.context, node.data.ty) {
            self.out.push_str(&format!("@{}", context.display_type(ty)));
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }
}
