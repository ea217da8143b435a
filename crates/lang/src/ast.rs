use crate::{span::Spanned, types::Type};
use internment::Intern;
use std::{cell::OnceCell, fmt::Display};

pub type Node = Spanned<Expr>;
pub type ArmNode = Spanned<MatchArm>;

#[derive(Debug, Clone, Default)]
pub struct Program {
    pub stmts: Vec<Node>,
}

impl Program {
    pub fn new(stmts: Vec<Node>) -> Self {
        Self { stmts }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Hash, Eq)]
pub struct Ident(pub Intern<String>);

impl Ident {
    pub fn new(name: &str) -> Self {
        Self(Intern::new(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identity of a source file, used as the key for its top level definitions
#[derive(Debug, Copy, Clone, PartialEq, Hash, Eq)]
pub struct FileId(pub Intern<String>);

impl FileId {
    pub fn new(path: &str) -> Self {
        Self(Intern::new(path.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Write-once type annotation of a node.
///
/// Cloning a slot yields an empty one, so cloning a tree always produces an
/// untyped copy that can be checked independently of the tree it came from.
#[derive(Debug, Default)]
pub struct TypeSlot(OnceCell<Type>);

impl Clone for TypeSlot {
    fn clone(&self) -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    ty: TypeSlot,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            ty: TypeSlot::default(),
        }
    }

    pub fn ty(&self) -> Option<&Type> {
        self.ty.0.get()
    }

    pub fn is_typed(&self) -> bool {
        self.ty.0.get().is_some()
    }

    /// Stores the type of this node, handing the type back if one was already assigned
    pub fn assign_type(&self, ty: Type) -> Result<(), Type> {
        self.ty.0.set(ty)
    }
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Ident(Ident),
    Lit(Lit),
    Call(Vec<Node>),
    Block(Block),
    If(If),
    While(While),
    Match(Match),
    Dot(Dot),
    Update(Update),
    TypeCheck(TypeCheck),
    Object(Vec<(Ident, Node)>),
    Variant(VariantLit),
    Define(Define),
    Require(Ident),
    Inlay(Box<Node>),
}

impl ExprKind {
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Ident(_) => "identifier",
            ExprKind::Lit(_) => "literal",
            ExprKind::Call(_) => "call",
            ExprKind::Block(_) => "block",
            ExprKind::If(_) => "if",
            ExprKind::While(_) => "while",
            ExprKind::Match(_) => "match",
            ExprKind::Dot(_) => "dot access",
            ExprKind::Update(_) => "update",
            ExprKind::TypeCheck(_) => "type check",
            ExprKind::Object(_) => "object literal",
            ExprKind::Variant(_) => "variant",
            ExprKind::Define(_) => "define",
            ExprKind::Require(_) => "require",
            ExprKind::Inlay(_) => "inlay",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Lit {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

/// A lambda: `{ a b -> body }`
#[derive(Debug, Clone)]
pub struct Block {
    pub params: Vec<Ident>,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone)]
pub struct If {
    pub cond: Box<Node>,
    pub then_body: Vec<Node>,
    pub else_body: Option<Vec<Node>>,
}

#[derive(Debug, Clone)]
pub struct While {
    pub cond: Box<Node>,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone)]
pub struct Match {
    pub scrutinee: Box<Node>,
    pub arms: Vec<ArmNode>,
}

#[derive(Debug, Clone)]
pub struct MatchArm {
    pub tag: Ident,
    /// Pattern arguments, each one has to be an identifier
    pub args: Vec<Node>,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone)]
pub struct Dot {
    pub target: Box<Node>,
    pub field: Ident,
}

#[derive(Debug, Clone)]
pub struct Update {
    pub target: Box<Node>,
    pub value: Box<Node>,
}

/// `value is annotation`
#[derive(Debug, Clone)]
pub struct TypeCheck {
    pub value: Box<Node>,
    pub annotation: Box<Node>,
}

#[derive(Debug, Clone)]
pub struct VariantLit {
    pub tag: Ident,
    pub args: Vec<Node>,
}

#[derive(Debug, Clone)]
pub struct Define {
    pub name: Ident,
    pub value: Box<Node>,
}
