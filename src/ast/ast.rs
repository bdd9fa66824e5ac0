use crate::{
    lexer::tokens::Token,
    type_checker::context::{ScopeId, TypeId},
    Span,
};

/// Per-node slot filled in by the analysis passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SemanticData {
    /// Scope the node was found in. Set by the scope pass.
    pub scope: Option<ScopeId>,
    /// Resolved type. Set by materialization, rewritten by promotion.
    pub ty: Option<TypeId>,
}

/// A function parameter: the name as an identifier literal and its type expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Node,
    pub type_expr: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Literal(Token),
    PrefixOp {
        operator: Token,
        operand: Box<Node>,
    },
    InfixOp {
        operator: Token,
        left: Box<Node>,
        right: Box<Node>,
    },
    Statement(Box<Node>),
    Block {
        statements: Vec<Node>,
        trailing: Option<Box<Node>>,
    },
    FunctionDef {
        name: Token,
        params: Vec<Param>,
        return_type: Box<Node>,
        body: Option<Box<Node>>,
    },
    FunctionCall {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    VariableDef {
        name: Box<Node>,
        type_expr: Box<Node>,
        initializer: Option<Box<Node>>,
    },
    Root(Vec<Node>),
}

/// Node Types
///
/// Payload-free tag of a `NodeKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Literal,
    PrefixOp,
    InfixOp,
    Statement,
    Block,
    FunctionDef,
    FunctionCall,
    VariableDef,
    Root,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub data: SemanticData,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node {
            kind,
            span,
            data: SemanticData::default(),
        }
    }

    pub fn literal(token: Token) -> Self {
        let span = token.span;
        Node::new(NodeKind::Literal(token), span)
    }

    pub fn get_node_type(&self) -> NodeType {
        match &self.kind {
            NodeKind::Literal(_) => NodeType::Literal,
            NodeKind::PrefixOp { .. } => NodeType::PrefixOp,
            NodeKind::InfixOp { .. } => NodeType::InfixOp,
            NodeKind::Statement(_) => NodeType::Statement,
            NodeKind::Block { .. } => NodeType::Block,
            NodeKind::FunctionDef { .. } => NodeType::FunctionDef,
            NodeKind::FunctionCall { .. } => NodeType::FunctionCall,
            NodeKind::VariableDef { .. } => NodeType::VariableDef,
            NodeKind::Root(_) => NodeType::Root,
        }
    }

    /// Name of an identifier literal.
    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Literal(token) => token.identifier(),
            _ => None,
        }
    }

    /// Whether this node can be a block's trailing value, i.e. it is a bare
    /// expression rather than a statement or a definition.
    pub fn is_expression(&self) -> bool {
        !matches!(
            self.get_node_type(),
            NodeType::Statement | NodeType::FunctionDef | NodeType::VariableDef | NodeType::Root
        )
    }

    /// Structural children, in the order `traverse_inner` visits them.
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::Literal(_) => vec![],
            NodeKind::PrefixOp { operand, .. } => vec![operand.as_ref()],
            NodeKind::InfixOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            NodeKind::Statement(inner) => vec![inner.as_ref()],
            NodeKind::Block {
                statements,
                trailing,
            } => statements.iter().chain(trailing.as_deref()).collect(),
            NodeKind::FunctionDef {
                params,
                return_type,
                body,
                ..
            } => params
                .iter()
                .flat_map(|param| [&param.name, &param.type_expr])
                .chain(body.as_deref())
                .chain(std::iter::once(return_type.as_ref()))
                .collect(),
            NodeKind::FunctionCall { callee, arguments } => {
                std::iter::once(callee.as_ref()).chain(arguments).collect()
            }
            NodeKind::VariableDef {
                name,
                type_expr,
                initializer,
            } => [name.as_ref(), type_expr.as_ref()]
                .into_iter()
                .chain(initializer.as_deref())
                .collect(),
            NodeKind::Root(items) => items.iter().collect(),
        }
    }

    /// Pre-order list of node tags, the structural fingerprint of a tree.
    pub fn node_types(&self) -> Vec<NodeType> {
        let mut out = vec![self.get_node_type()];
        for child in self.children() {
            out.extend(child.node_types());
        }
        out
    }

    /// First node in pre-order matching `predicate`.
    pub fn find(&self, predicate: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        if predicate(self) {
            return Some(self);
        }
        self.children()
            .into_iter()
            .find_map(|child| child.find(predicate))
    }
}
