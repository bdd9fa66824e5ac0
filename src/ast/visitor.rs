//! Traversal protocol shared by every analysis pass.
//!
//! `Node::dispatch` calls the handler for the node's kind, and
//! `Node::traverse_inner` dispatches to the node's children in a fixed order.
//! Every per-kind handler defaults to `visit_node`, which defaults to
//! `traverse_inner`. A pass that attaches the same data to every node
//! overrides `visit_node`; a pass that cares about a few kinds overrides just
//! those handlers.

use crate::errors::errors::Error;

use super::ast::{Node, NodeKind, NodeType};

pub trait Visitor {
    /// Catch-all hook every per-kind handler falls back to.
    fn visit_node(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)
    }

    fn visit_literal(&mut self, node: &mut Node) -> Result<(), Error> {
        self.visit_node(node)
    }

    fn visit_prefix_op(&mut self, node: &mut Node) -> Result<(), Error> {
        self.visit_node(node)
    }

    fn visit_infix_op(&mut self, node: &mut Node) -> Result<(), Error> {
        self.visit_node(node)
    }

    fn visit_statement(&mut self, node: &mut Node) -> Result<(), Error> {
        self.visit_node(node)
    }

    fn visit_block(&mut self, node: &mut Node) -> Result<(), Error> {
        self.visit_node(node)
    }

    fn visit_function_def(&mut self, node: &mut Node) -> Result<(), Error> {
        self.visit_node(node)
    }

    fn visit_function_call(&mut self, node: &mut Node) -> Result<(), Error> {
        self.visit_node(node)
    }

    fn visit_variable_def(&mut self, node: &mut Node) -> Result<(), Error> {
        self.visit_node(node)
    }

    fn visit_root(&mut self, node: &mut Node) -> Result<(), Error> {
        self.visit_node(node)
    }
}

impl Node {
    /// Invokes the visitor's handler for this node's kind.
    pub fn dispatch<V: Visitor + ?Sized>(&mut self, visitor: &mut V) -> Result<(), Error> {
        match self.get_node_type() {
            NodeType::Literal => visitor.visit_literal(self),
            NodeType::PrefixOp => visitor.visit_prefix_op(self),
            NodeType::InfixOp => visitor.visit_infix_op(self),
            NodeType::Statement => visitor.visit_statement(self),
            NodeType::Block => visitor.visit_block(self),
            NodeType::FunctionDef => visitor.visit_function_def(self),
            NodeType::FunctionCall => visitor.visit_function_call(self),
            NodeType::VariableDef => visitor.visit_variable_def(self),
            NodeType::Root => visitor.visit_root(self),
        }
    }

    /// Dispatches to each structural child.
    ///
    /// Function definitions visit their parameter pairs, then the body, then
    /// the return type.
    pub fn traverse_inner<V: Visitor + ?Sized>(&mut self, visitor: &mut V) -> Result<(), Error> {
        match &mut self.kind {
            NodeKind::Literal(_) => Ok(()),
            NodeKind::PrefixOp { operand, .. } => operand.dispatch(visitor),
            NodeKind::InfixOp { left, right, .. } => {
                left.dispatch(visitor)?;
                right.dispatch(visitor)
            }
            NodeKind::Statement(inner) => inner.dispatch(visitor),
            NodeKind::Block {
                statements,
                trailing,
            } => {
                for statement in statements.iter_mut() {
                    statement.dispatch(visitor)?;
                }
                if let Some(trailing) = trailing {
                    trailing.dispatch(visitor)?;
                }
                Ok(())
            }
            NodeKind::FunctionDef {
                params,
                return_type,
                body,
                ..
            } => {
                for param in params.iter_mut() {
                    param.name.dispatch(visitor)?;
                    param.type_expr.dispatch(visitor)?;
                }
                if let Some(body) = body {
                    body.dispatch(visitor)?;
                }
                return_type.dispatch(visitor)
            }
            NodeKind::FunctionCall { callee, arguments } => {
                callee.dispatch(visitor)?;
                for argument in arguments.iter_mut() {
                    argument.dispatch(visitor)?;
                }
                Ok(())
            }
            NodeKind::VariableDef {
                name,
                type_expr,
                initializer,
            } => {
                name.dispatch(visitor)?;
                type_expr.dispatch(visitor)?;
                if let Some(initializer) = initializer {
                    initializer.dispatch(visitor)?;
                }
                Ok(())
            }
            NodeKind::Root(items) => {
                for item in items.iter_mut() {
                    item.dispatch(visitor)?;
                }
                Ok(())
            }
        }
    }
}
