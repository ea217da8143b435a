use crate::ast::Ident;
use indexmap::IndexMap;
use std::{
    cell::RefCell,
    collections::HashSet,
    fmt::{Debug, Display},
    rc::Rc,
};

pub type FieldMap = IndexMap<Ident, Type>;
pub type TagMap = IndexMap<Ident, Vec<Type>>;

// Records that contain themselves are cut off at this depth when rendered
const DISPLAY_DEPTH: usize = 8;

/// Pairs of shared maps currently being compared
type Seen = HashSet<(*const (), *const ())>;

/// Identity of a lambda literal, handed out by the binding table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClosureId(pub u32);

impl Display for ClosureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum Type {
    /// Result of statements without a value
    Unit,
    Bool,
    Integer,
    Float,
    String,
    /// Open record, shared by every alias of the same object
    Object(ObjectType),
    /// Possibly partially applied closure
    Function(FunctionType),
    /// Open tagged union, shared by every alias of the same value
    Variant(VariantType),
}

/// The kind of a type without its payload, what `is` annotations talk about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Unit,
    Bool,
    Integer,
    Float,
    String,
    Object,
    Function,
    Variant,
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeTag::Unit => "Unit",
            TypeTag::Bool => "Bool",
            TypeTag::Integer => "Integer",
            TypeTag::Float => "Float",
            TypeTag::String => "String",
            TypeTag::Object => "Object",
            TypeTag::Function => "Function",
            TypeTag::Variant => "Variant",
        };
        write!(f, "{name}")
    }
}

impl Type {
    pub fn tag(&self) -> TypeTag {
        match self {
            Type::Unit => TypeTag::Unit,
            Type::Bool => TypeTag::Bool,
            Type::Integer => TypeTag::Integer,
            Type::Float => TypeTag::Float,
            Type::String => TypeTag::String,
            Type::Object(_) => TypeTag::Object,
            Type::Function(_) => TypeTag::Function,
            Type::Variant(_) => TypeTag::Variant,
        }
    }

    pub fn object(fields: impl IntoIterator<Item = (Ident, Type)>) -> Self {
        Type::Object(ObjectType::new(fields))
    }

    pub fn variant(tag: Ident, args: Vec<Type>) -> Self {
        Type::Variant(VariantType::single(tag, args))
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Type::Unit)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Bool)
    }
}

#[derive(Clone, Default)]
pub struct ObjectType(Rc<RefCell<FieldMap>>);

impl ObjectType {
    pub fn new(fields: impl IntoIterator<Item = (Ident, Type)>) -> Self {
        Self(Rc::new(RefCell::new(fields.into_iter().collect())))
    }

    pub fn field(&self, name: Ident) -> Option<Type> {
        self.0.borrow().get(&name).cloned()
    }

    /// Adds or replaces a field, visible through every alias of this object
    pub fn set_field(&self, name: Ident, ty: Type) {
        self.0.borrow_mut().insert(name, ty);
    }

    pub fn fields(&self) -> Vec<(Ident, Type)> {
        self.0
            .borrow()
            .iter()
            .map(|(name, ty)| (*name, ty.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &ObjectType) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn eq_with(&self, other: &ObjectType, seen: &mut Seen) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        // a pair already under comparison is assumed equal
        let key = (Rc::as_ptr(&self.0) as *const (), Rc::as_ptr(&other.0) as *const ());
        if !seen.insert(key) {
            return true;
        }

        let (left, right) = (self.0.borrow(), other.0.borrow());
        left.len() == right.len()
            && left.iter().all(|(name, ty)| {
                right
                    .get(name)
                    .is_some_and(|other_ty| type_eq(ty, other_ty, seen))
            })
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, &mut Seen::new())
    }
}

impl Debug for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_type(f, &Type::Object(self.clone()), 0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub closure: ClosureId,
    /// Declared number of parameters of the block
    pub arity: usize,
    /// Arguments supplied by earlier partial applications
    pub bound: Vec<Type>,
}

impl FunctionType {
    pub fn new(closure: ClosureId, arity: usize) -> Self {
        Self {
            closure,
            arity,
            bound: vec![],
        }
    }

    pub fn remaining(&self) -> usize {
        self.arity.saturating_sub(self.bound.len())
    }

    pub fn with_arguments(&self, args: impl IntoIterator<Item = Type>) -> Self {
        let mut bound = self.bound.clone();
        bound.extend(args);
        Self {
            closure: self.closure,
            arity: self.arity,
            bound,
        }
    }
}

#[derive(Clone, Default)]
pub struct VariantType(Rc<RefCell<TagMap>>);

impl VariantType {
    pub fn single(tag: Ident, args: Vec<Type>) -> Self {
        let mut tags = TagMap::new();
        tags.insert(tag, args);
        Self(Rc::new(RefCell::new(tags)))
    }

    pub fn tag(&self, name: Ident) -> Option<Vec<Type>> {
        self.0.borrow().get(&name).cloned()
    }

    pub fn tags(&self) -> Vec<Ident> {
        self.0.borrow().keys().copied().collect()
    }

    pub fn ptr_eq(&self, other: &VariantType) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn eq_with(&self, other: &VariantType, seen: &mut Seen) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let key = (Rc::as_ptr(&self.0) as *const (), Rc::as_ptr(&other.0) as *const ());
        if !seen.insert(key) {
            return true;
        }

        let (left, right) = (self.0.borrow(), other.0.borrow());
        left.len() == right.len()
            && left.iter().all(|(tag, args)| {
                right
                    .get(tag)
                    .is_some_and(|other_args| args_eq(args, other_args, seen))
            })
    }

    /// Adds every tag of `other` to this union in place.
    ///
    /// Returns false, leaving this union untouched, when a tag known to both
    /// sides carries different argument types.
    pub fn absorb(&self, other: &VariantType) -> bool {
        if self.ptr_eq(other) {
            return true;
        }

        let incoming = other.0.borrow().clone();
        let conflicting = {
            let tags = self.0.borrow();
            incoming
                .iter()
                .any(|(tag, args)| tags.get(tag).is_some_and(|known| known != args))
        };
        if conflicting {
            return false;
        }

        let mut tags = self.0.borrow_mut();
        for (tag, args) in incoming {
            tags.entry(tag).or_insert(args);
        }
        true
    }
}

impl PartialEq for VariantType {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, &mut Seen::new())
    }
}

impl Debug for VariantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_type(f, &Type::Variant(self.clone()), 0)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        type_eq(self, other, &mut Seen::new())
    }
}

/// Structural equality that terminates on records reaching themselves
fn type_eq(left: &Type, right: &Type, seen: &mut Seen) -> bool {
    match (left, right) {
        (Type::Object(l), Type::Object(r)) => l.eq_with(r, seen),
        (Type::Variant(l), Type::Variant(r)) => l.eq_with(r, seen),
        (Type::Function(l), Type::Function(r)) => {
            l.closure == r.closure && l.arity == r.arity && args_eq(&l.bound, &r.bound, seen)
        }
        _ => std::mem::discriminant(left) == std::mem::discriminant(right),
    }
}

fn args_eq(left: &[Type], right: &[Type], seen: &mut Seen) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(l, r)| type_eq(l, r, seen))
}

/// Joins the types observed at a control flow join.
///
/// Equal types join to themselves, variants join to the union of their tags
/// (grown in place on `left`), anything else cannot be joined.
pub fn merge(left: &Type, right: &Type) -> Option<Type> {
    if left == right {
        return Some(left.clone());
    }

    match (left, right) {
        (Type::Variant(l), Type::Variant(r)) if l.absorb(r) => Some(left.clone()),
        _ => None,
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_type(f, self, 0)
    }
}

fn write_type(f: &mut std::fmt::Formatter<'_>, ty: &Type, depth: usize) -> std::fmt::Result {
    if depth > DISPLAY_DEPTH {
        return write!(f, "..");
    }

    match ty {
        Type::Unit => write!(f, "Unit"),
        Type::Bool => write!(f, "Bool"),
        Type::Integer => write!(f, "Integer"),
        Type::Float => write!(f, "Float"),
        Type::String => write!(f, "String"),
        Type::Object(object) => {
            write!(f, "{{")?;
            for (i, (name, field)) in object.fields().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{name}: ")?;
                write_type(f, field, depth + 1)?;
            }
            write!(f, "}}")
        }
        Type::Function(func) => {
            write!(f, "fn{}(", func.closure)?;
            for (i, arg) in func.bound.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_type(f, arg, depth + 1)?;
            }
            for i in 0..func.remaining() {
                if i > 0 || !func.bound.is_empty() {
                    write!(f, ", ")?;
                }
                write!(f, "_")?;
            }
            write!(f, ")")
        }
        Type::Variant(variant) => {
            let tags = variant.0.borrow().clone();
            for (i, (tag, args)) in tags.iter().enumerate() {
                if i > 0 {
                    write!(f, " | ")?;
                }
                write!(f, "{tag}")?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (j, arg) in args.iter().enumerate() {
                        if j > 0 {
                            write!(f, ", ")?;
                        }
                        write_type(f, arg, depth + 1)?;
                    }
                    write!(f, ")")?;
                }
            }
            Ok(())
        }
    }
}
