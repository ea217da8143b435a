//! Tree builders for tests, standing in for parsed source.

use crate::{
    ast::{
        ArmNode, Block, Define, Dot, Expr, ExprKind, Ident, If, Lit, Match, MatchArm, Node, Program,
        TypeCheck, Update, VariantLit, While,
    },
    span::{Span, Spanned},
    types::Type,
};

pub const MAIN: &str = "main.brie";

pub fn name(s: &str) -> Ident {
    Ident::new(s)
}

pub fn program(stmts: Vec<Node>) -> Program {
    Program::new(stmts)
}

pub fn node(kind: ExprKind) -> Node {
    Spanned::new(Expr::new(kind), Span::default())
}

/// Moves a node to the given source range
pub fn at(mut node: Node, start: usize, end: usize) -> Node {
    node.span = Span::new(start, end);
    node
}

/// Type assigned to a visited node
#[track_caller]
pub fn ty(node: &Node) -> Type {
    match node.node.ty() {
        Some(ty) => ty.clone(),
        None => panic!("node {} was never typed", node.node.kind.name()),
    }
}

pub fn int(value: i64) -> Node {
    node(ExprKind::Lit(Lit::Int(value)))
}

pub fn float(value: f64) -> Node {
    node(ExprKind::Lit(Lit::Float(value)))
}

pub fn boolean(value: bool) -> Node {
    node(ExprKind::Lit(Lit::Bool(value)))
}

pub fn string(value: &str) -> Node {
    node(ExprKind::Lit(Lit::String(value.to_string())))
}

pub fn ident(s: &str) -> Node {
    node(ExprKind::Ident(name(s)))
}

pub fn define(s: &str, value: Node) -> Node {
    node(ExprKind::Define(Define {
        name: name(s),
        value: Box::new(value),
    }))
}

pub fn call(children: Vec<Node>) -> Node {
    node(ExprKind::Call(children))
}

pub fn block(params: &[&str], body: Vec<Node>) -> Node {
    node(ExprKind::Block(Block {
        params: params.iter().map(|p| name(p)).collect(),
        body,
    }))
}

pub fn if_else(cond: Node, then_body: Vec<Node>, else_body: Option<Vec<Node>>) -> Node {
    node(ExprKind::If(If {
        cond: Box::new(cond),
        then_body,
        else_body,
    }))
}

pub fn while_loop(cond: Node, body: Vec<Node>) -> Node {
    node(ExprKind::While(While {
        cond: Box::new(cond),
        body,
    }))
}

pub fn dot(target: Node, field: &str) -> Node {
    node(ExprKind::Dot(Dot {
        target: Box::new(target),
        field: name(field),
    }))
}

pub fn update(target: Node, value: Node) -> Node {
    node(ExprKind::Update(Update {
        target: Box::new(target),
        value: Box::new(value),
    }))
}

pub fn is(value: Node, annotation: Node) -> Node {
    node(ExprKind::TypeCheck(TypeCheck {
        value: Box::new(value),
        annotation: Box::new(annotation),
    }))
}

pub fn object(fields: Vec<(&str, Node)>) -> Node {
    node(ExprKind::Object(
        fields
            .into_iter()
            .map(|(field, value)| (name(field), value))
            .collect(),
    ))
}

pub fn tag(s: &str, args: Vec<Node>) -> Node {
    node(ExprKind::Variant(VariantLit { tag: name(s), args }))
}

pub fn require(s: &str) -> Node {
    node(ExprKind::Require(name(s)))
}

pub fn inlay(inner: Node) -> Node {
    node(ExprKind::Inlay(Box::new(inner)))
}

pub fn match_expr(scrutinee: Node, arms: Vec<ArmNode>) -> Node {
    node(ExprKind::Match(Match {
        scrutinee: Box::new(scrutinee),
        arms,
    }))
}

pub fn arm(s: &str, params: &[&str], body: Vec<Node>) -> ArmNode {
    arm_with(s, params.iter().map(|p| ident(p)).collect(), body)
}

/// Arm with arbitrary pattern argument nodes
pub fn arm_with(s: &str, args: Vec<Node>, body: Vec<Node>) -> ArmNode {
    Spanned::new(
        MatchArm {
            tag: name(s),
            args,
            body,
        },
        Span::default(),
    )
}
