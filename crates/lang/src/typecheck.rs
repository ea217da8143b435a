use crate::{
    annotation::{AnnotationResolver, BuiltinAnnotations},
    ast::{
        ArmNode, Block, Define, Dot, ExprKind, FileId, Ident, If, Lit, Match, Node, Program,
        TypeCheck, Update, VariantLit,
    },
    config::{CheckerConfig, UnknownArmPolicy},
    modules::{MemoryLoader, SourceLoader, resolve_require},
    span::Span,
    table::{Binding, BindingTable, ClosureEntry, SpecLookup, Specialization},
    types::{ClosureId, FunctionType, ObjectType, Type, TypeTag, VariantType, merge},
};
use indexmap::IndexMap;

const UPDATE_REASON: &str = "updates must have the same type as the original";
const IF_REASON: &str = "if statement branches must have the same return type";
const MATCH_REASON: &str = "all arms of a match have to have the same type";

/// Type checks a single file with the default configuration.
///
/// Requires can only be satisfied through a loader, so use [`TypeChecker`]
/// directly for programs spanning several files.
pub fn check_program(program: &Program, file: &str) -> Result<TypeChecker, TypeErr> {
    let mut type_checker = TypeChecker::default();
    type_checker.check_file(FileId::new(file), program)?;
    Ok(type_checker)
}

/// Debug print recorded by an inlay node
#[derive(Debug, Clone, PartialEq)]
pub struct Inlay {
    pub file: FileId,
    pub span: Span,
    pub ty: Type,
}

pub struct TypeChecker {
    /// Scopes, module definitions, closures and specializations of this run
    table: BindingTable,

    /// File that unqualified names are resolved against
    file: FileId,

    config: CheckerConfig,

    loader: Box<dyn SourceLoader>,

    annotations: Box<dyn AnnotationResolver>,

    /// Typed trees of the files pulled in by `require`
    modules: IndexMap<FileId, Program>,

    inlays: Vec<Inlay>,

    /// Number of function bodies currently being typed inside each other
    call_depth: usize,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new(CheckerConfig::default())
    }
}

impl TypeChecker {
    pub fn new(config: CheckerConfig) -> Self {
        Self {
            table: BindingTable::default(),
            file: FileId::new(""),
            config,
            loader: Box::new(MemoryLoader::default()),
            annotations: Box::new(BuiltinAnnotations),
            modules: IndexMap::new(),
            inlays: vec![],
            call_depth: 0,
        }
    }

    pub fn with_loader(mut self, loader: impl SourceLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    pub fn with_annotations(mut self, resolver: impl AnnotationResolver + 'static) -> Self {
        self.annotations = Box::new(resolver);
        self
    }

    /// Types every statement of `program`, the root of a type check run
    pub fn check_file(&mut self, file: FileId, program: &Program) -> Result<(), TypeErr> {
        if self.table.is_file_in_progress(file) {
            return Err(self.err(Span::default(), TypeErrKind::CircularRequire { file }));
        }
        check_module(file, program, self)
    }

    /// Type of a top level definition of `file`
    pub fn definition(&self, file: &str, name: &str) -> Option<Type> {
        self.table
            .dump_definitions_for_file(FileId::new(file))
            .get(&Ident::new(name))
            .map(|binding| binding.ty.clone())
    }

    pub fn definitions(&self, file: &str) -> IndexMap<Ident, Binding> {
        self.table.dump_definitions_for_file(FileId::new(file))
    }

    pub fn specializations(&self, closure: ClosureId) -> &[Specialization] {
        self.table.specializations(closure)
    }

    pub fn specialization_count(&self) -> usize {
        self.table.specialization_count()
    }

    pub fn closure_count(&self) -> usize {
        self.table.closure_count()
    }

    /// Typed tree of a file that was pulled in by `require`
    pub fn module(&self, file: &str) -> Option<&Program> {
        self.modules.get(&FileId::new(file))
    }

    pub fn inlays(&self) -> &[Inlay] {
        &self.inlays
    }

    fn err(&self, span: Span, kind: TypeErrKind) -> TypeErr {
        TypeErr {
            file: self.file,
            span,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeErr {
    pub file: FileId,
    pub span: Span,
    pub kind: TypeErrKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeErrKind {
    UnknownVariable {
        name: Ident,
    },
    UnknownField {
        field: Ident,
        found: Type,
    },
    NotAnObject {
        found: Type,
    },
    NotAFunction {
        found: Type,
    },
    NotAVariant {
        found: Type,
    },
    ConditionNotBool {
        found: Type,
    },
    MismatchedTypes {
        expected: Type,
        found: Type,
        reason: &'static str,
    },
    ArityMismatch {
        expected: usize,
        found: usize,
    },
    InvalidAssignTarget,
    NestedFieldAssign {
        field: Ident,
    },
    AnnotationMismatch {
        expected: TypeTag,
        found: Type,
    },
    MissingAnnotatedField {
        field: Ident,
        found: Type,
    },
    UnknownAnnotation {
        name: Ident,
    },
    MalformedAnnotation,
    PatternNotIdent,
    TagArityMismatch {
        tag: Ident,
        expected: usize,
        found: usize,
    },
    UnknownTag {
        tag: Ident,
        found: Type,
    },
    NoMatchingArms {
        found: Type,
    },
    NoDefinitions {
        file: FileId,
    },
    CircularRequire {
        file: FileId,
    },
    ModuleLoad {
        file: FileId,
        message: String,
    },
    RecursiveSpecialization {
        closure: ClosureId,
        args: Vec<Type>,
    },
    SpecializationTooDeep {
        limit: usize,
    },
    AlreadyTyped {
        ty: Type,
    },
    Untyped,
    UnknownClosure {
        closure: ClosureId,
    },
}

fn check_module(file: FileId, program: &Program, type_checker: &mut TypeChecker) -> Result<(), TypeErr> {
    log::debug!("checking module {file}");

    type_checker.table.begin_file(file);
    let prev_file = std::mem::replace(&mut type_checker.file, file);
    let prev_scopes = type_checker.table.replace_scopes(Default::default());

    let result = program
        .stmts
        .iter()
        .try_for_each(|stmt| check_node_at(stmt, true, type_checker).map(drop));

    type_checker.table.replace_scopes(prev_scopes);
    type_checker.file = prev_file;
    type_checker.table.end_file(file);
    result
}

fn check_node(node: &Node, type_checker: &mut TypeChecker) -> Result<Type, TypeErr> {
    check_node_at(node, false, type_checker)
}

fn check_each(nodes: &[Node], type_checker: &mut TypeChecker) -> Result<(), TypeErr> {
    nodes
        .iter()
        .try_for_each(|node| check_node(node, type_checker).map(drop))
}

/// Visits the children of `node`, then types the node itself
fn check_node_at(node: &Node, toplevel: bool, type_checker: &mut TypeChecker) -> Result<Type, TypeErr> {
    let kind = &node.node.kind;
    log::trace!("visiting {} at {}..{}", kind.name(), node.span.start, node.span.end);

    if let Some(ty) = node.node.ty() {
        let ty = ty.clone();
        return Err(type_checker.err(node.span, TypeErrKind::AlreadyTyped { ty }));
    }

    check_children(kind, type_checker)?;

    let ty = match kind {
        ExprKind::Ident(name) => check_ident(*name, node.span, type_checker)?,
        ExprKind::Lit(lit) => type_from_lit(lit),
        ExprKind::Call(children) => check_call(children, node.span, type_checker)?,
        ExprKind::Block(block) => check_block(block, node.span, type_checker),
        ExprKind::If(if_expr) => check_if(if_expr, node.span, type_checker)?,
        ExprKind::While(_) => Type::Unit,
        ExprKind::Match(match_expr) => check_match(match_expr, node.span, type_checker)?,
        ExprKind::Dot(dot) => check_dot(dot, type_checker)?,
        ExprKind::Update(update) => check_update(update, type_checker)?,
        ExprKind::TypeCheck(check) => check_type_assertion(check, type_checker)?,
        ExprKind::Object(fields) => check_object(fields, type_checker)?,
        ExprKind::Variant(variant) => check_variant(variant, type_checker)?,
        ExprKind::Define(define) => check_define(define, toplevel, node.span, type_checker)?,
        ExprKind::Require(name) => check_require(*name, node.span, type_checker)?,
        ExprKind::Inlay(inner) => check_inlay(inner, node.span, type_checker)?,
    };

    assign_type(node, ty.clone(), type_checker)?;
    Ok(ty)
}

/// Children typed before their parent. Block bodies, match arms, update
/// targets and annotations are left to the handler of their parent.
fn check_children(kind: &ExprKind, type_checker: &mut TypeChecker) -> Result<(), TypeErr> {
    match kind {
        ExprKind::Ident(_) | ExprKind::Lit(_) | ExprKind::Block(_) | ExprKind::Require(_) => Ok(()),
        ExprKind::Call(children) => check_each(children, type_checker),
        ExprKind::If(if_expr) => {
            check_node(&if_expr.cond, type_checker)?;
            check_each(&if_expr.then_body, type_checker)?;
            match &if_expr.else_body {
                Some(else_body) => check_each(else_body, type_checker),
                None => Ok(()),
            }
        }
        ExprKind::While(while_expr) => {
            check_node(&while_expr.cond, type_checker)?;
            check_each(&while_expr.body, type_checker)
        }
        ExprKind::Match(match_expr) => check_node(&match_expr.scrutinee, type_checker).map(drop),
        ExprKind::Dot(dot) => check_node(&dot.target, type_checker).map(drop),
        ExprKind::Update(update) => check_node(&update.value, type_checker).map(drop),
        ExprKind::TypeCheck(check) => check_node(&check.value, type_checker).map(drop),
        ExprKind::Object(fields) => fields
            .iter()
            .try_for_each(|(_, value)| check_node(value, type_checker).map(drop)),
        ExprKind::Variant(variant) => check_each(&variant.args, type_checker),
        ExprKind::Define(define) => check_node(&define.value, type_checker).map(drop),
        ExprKind::Inlay(inner) => check_node(inner, type_checker).map(drop),
    }
}

fn assign_type(node: &Node, ty: Type, type_checker: &TypeChecker) -> Result<(), TypeErr> {
    node.node
        .assign_type(ty)
        .map_err(|ty| type_checker.err(node.span, TypeErrKind::AlreadyTyped { ty }))
}

/// Type of an already visited node
fn type_of(node: &Node, type_checker: &TypeChecker) -> Result<Type, TypeErr> {
    node.node
        .ty()
        .cloned()
        .ok_or_else(|| type_checker.err(node.span, TypeErrKind::Untyped))
}

/// Type of the last statement of a visited body, unit when it is empty
fn last_type(body: &[Node], type_checker: &TypeChecker) -> Result<Type, TypeErr> {
    match body.last() {
        Some(last) => type_of(last, type_checker),
        None => Ok(Type::Unit),
    }
}

fn merge_types(
    left: &Type,
    right: &Type,
    reason: &'static str,
    span: Span,
    type_checker: &TypeChecker,
) -> Result<Type, TypeErr> {
    merge(left, right).ok_or_else(|| {
        type_checker.err(
            span,
            TypeErrKind::MismatchedTypes {
                expected: left.clone(),
                found: right.clone(),
                reason,
            },
        )
    })
}

fn type_from_lit(lit: &Lit) -> Type {
    match lit {
        Lit::Int(_) => Type::Integer,
        Lit::Float(_) => Type::Float,
        Lit::Bool(_) => Type::Bool,
        Lit::String(_) => Type::String,
    }
}

fn check_ident(name: Ident, span: Span, type_checker: &mut TypeChecker) -> Result<Type, TypeErr> {
    type_checker
        .table
        .lookup(type_checker.file, name)
        .ok_or_else(|| type_checker.err(span, TypeErrKind::UnknownVariable { name }))
}

fn check_object(fields: &[(Ident, Node)], type_checker: &TypeChecker) -> Result<Type, TypeErr> {
    let fields = fields
        .iter()
        .map(|(name, value)| Ok((*name, type_of(value, type_checker)?)))
        .collect::<Result<Vec<_>, TypeErr>>()?;
    Ok(Type::object(fields))
}

fn check_variant(variant: &VariantLit, type_checker: &TypeChecker) -> Result<Type, TypeErr> {
    let args = variant
        .args
        .iter()
        .map(|arg| type_of(arg, type_checker))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Type::Variant(VariantType::single(variant.tag, args)))
}

fn check_dot(dot: &Dot, type_checker: &TypeChecker) -> Result<Type, TypeErr> {
    let target_ty = type_of(&dot.target, type_checker)?;
    let Type::Object(object) = &target_ty else {
        return Err(type_checker.err(dot.target.span, TypeErrKind::NotAnObject { found: target_ty }));
    };

    object.field(dot.field).ok_or_else(|| {
        type_checker.err(
            dot.target.span,
            TypeErrKind::UnknownField {
                field: dot.field,
                found: target_ty.clone(),
            },
        )
    })
}

fn check_define(
    define: &Define,
    toplevel: bool,
    span: Span,
    type_checker: &mut TypeChecker,
) -> Result<Type, TypeErr> {
    let binding = Binding::new(type_of(&define.value, type_checker)?, span);
    if toplevel {
        let file = type_checker.file;
        type_checker.table.insert_toplevel(file, define.name, binding);
    } else {
        type_checker.table.insert(define.name, binding);
    }

    Ok(Type::Unit)
}

fn check_update(update: &Update, type_checker: &mut TypeChecker) -> Result<Type, TypeErr> {
    let new_ty = type_of(&update.value, type_checker)?;
    let target = update.target.as_ref();

    let merged = match &target.node.kind {
        ExprKind::Ident(name) => {
            let file = type_checker.file;
            let Some(prev) = type_checker.table.lookup(file, *name) else {
                return Err(type_checker.err(target.span, TypeErrKind::UnknownVariable { name: *name }));
            };

            // variants widen here, so the binding has to take the merged type
            let merged = merge_types(&prev, &new_ty, UPDATE_REASON, update.value.span, type_checker)?;
            type_checker.table.rebind(file, *name, merged.clone());
            merged
        }
        ExprKind::Dot(dot) => {
            if !matches!(dot.target.node.kind, ExprKind::Ident(_)) {
                return Err(type_checker.err(target.span, TypeErrKind::NestedFieldAssign { field: dot.field }));
            }

            let base_ty = check_node(&dot.target, type_checker)?;
            let Type::Object(object) = &base_ty else {
                return Err(type_checker.err(dot.target.span, TypeErrKind::NotAnObject { found: base_ty }));
            };

            let merged = match object.field(dot.field) {
                Some(prev) => merge_types(&prev, &new_ty, UPDATE_REASON, update.value.span, type_checker)?,
                None => new_ty,
            };

            // every alias of the object sees the new field
            object.set_field(dot.field, merged.clone());
            merged
        }
        _ => return Err(type_checker.err(target.span, TypeErrKind::InvalidAssignTarget)),
    };

    assign_type(target, merged.clone(), type_checker)?;
    Ok(merged)
}

fn check_if(if_expr: &If, span: Span, type_checker: &TypeChecker) -> Result<Type, TypeErr> {
    let cond_ty = type_of(&if_expr.cond, type_checker)?;
    if !cond_ty.is_bool() {
        return Err(type_checker.err(if_expr.cond.span, TypeErrKind::ConditionNotBool { found: cond_ty }));
    }

    // without an else branch the value of the body is thrown away
    let Some(else_body) = &if_expr.else_body else {
        return Ok(Type::Unit);
    };

    let then_ty = last_type(&if_expr.then_body, type_checker)?;
    let else_ty = last_type(else_body, type_checker)?;
    merge_types(&then_ty, &else_ty, IF_REASON, span, type_checker)
}

fn check_type_assertion(check: &TypeCheck, type_checker: &TypeChecker) -> Result<Type, TypeErr> {
    let checked = type_of(&check.value, type_checker)?;
    check_annotation(&check.value, &checked, &check.annotation, type_checker)?;
    Ok(checked)
}

fn check_annotation(
    checked: &Node,
    checked_ty: &Type,
    annotation: &Node,
    type_checker: &TypeChecker,
) -> Result<(), TypeErr> {
    match &annotation.node.kind {
        ExprKind::Object(fields) => {
            let Type::Object(object) = checked_ty else {
                return Err(type_checker.err(
                    checked.span,
                    TypeErrKind::AnnotationMismatch {
                        expected: TypeTag::Object,
                        found: checked_ty.clone(),
                    },
                ));
            };

            for (name, field_annotation) in fields {
                let Some(field_ty) = object.field(*name) else {
                    return Err(type_checker.err(
                        checked.span,
                        TypeErrKind::MissingAnnotatedField {
                            field: *name,
                            found: checked_ty.clone(),
                        },
                    ));
                };
                check_annotation(checked, &field_ty, field_annotation, type_checker)?;
            }

            Ok(())
        }
        ExprKind::Ident(name) => {
            let Some(expected) = type_checker.annotations.resolve(name.as_str()) else {
                return Err(type_checker.err(annotation.span, TypeErrKind::UnknownAnnotation { name: *name }));
            };

            if checked_ty.tag() != expected {
                return Err(type_checker.err(
                    checked.span,
                    TypeErrKind::AnnotationMismatch {
                        expected,
                        found: checked_ty.clone(),
                    },
                ));
            }

            Ok(())
        }
        _ => Err(type_checker.err(annotation.span, TypeErrKind::MalformedAnnotation)),
    }
}

fn check_block(block: &Block, span: Span, type_checker: &mut TypeChecker) -> Type {
    let id = type_checker.table.fresh_closure_id();
    let entry = ClosureEntry {
        params: block.params.clone(),
        body: block.body.clone(),
        span,
        file: type_checker.file,
        scopes: type_checker.table.scopes().clone(),
    };
    type_checker.table.insert_block(id, entry);

    Type::Function(FunctionType::new(id, block.params.len()))
}

fn check_call(children: &[Node], span: Span, type_checker: &mut TypeChecker) -> Result<Type, TypeErr> {
    let Some((callee, args)) = children.split_first() else {
        return Ok(Type::Unit);
    };

    // a single parenthesized expression is just grouping
    let callee_ty = type_of(callee, type_checker)?;
    if args.is_empty() {
        return Ok(callee_ty);
    }

    let Type::Function(func) = callee_ty else {
        return Err(type_checker.err(callee.span, TypeErrKind::NotAFunction { found: callee_ty }));
    };

    let mut arg_types = args
        .iter()
        .map(|arg| type_of(arg, type_checker))
        .collect::<Result<Vec<_>, _>>()?;

    let remaining = func.remaining();
    if arg_types.len() < remaining {
        return Ok(Type::Function(func.with_arguments(arg_types)));
    }

    if arg_types.len() > remaining {
        // `f ()` runs a block that takes no arguments
        let unit_call = remaining == 0 && arg_types.len() == 1 && arg_types[0].is_unit();
        if !unit_call {
            return Err(type_checker.err(
                callee.span,
                TypeErrKind::ArityMismatch {
                    expected: remaining,
                    found: arg_types.len(),
                },
            ));
        }
        arg_types.clear();
    }

    execute_function(&func.with_arguments(arg_types), span, type_checker)
}

/// Types the body of a saturated function for its argument types, at most
/// once per distinct signature, and returns the type of its last statement
fn execute_function(func: &FunctionType, call_span: Span, type_checker: &mut TypeChecker) -> Result<Type, TypeErr> {
    let closure = func.closure;
    match type_checker.table.begin_specialization(closure, &func.bound) {
        SpecLookup::Cached(ret) => {
            log::debug!("specialization cache hit for {closure}");
            return Ok(ret);
        }
        SpecLookup::InProgress => {
            return Err(type_checker.err(
                call_span,
                TypeErrKind::RecursiveSpecialization {
                    closure,
                    args: func.bound.clone(),
                },
            ));
        }
        SpecLookup::Started => {}
    }

    let limit = type_checker.config.max_specialization_depth;
    if type_checker.call_depth >= limit {
        type_checker.table.abandon_specialization(closure, &func.bound);
        return Err(type_checker.err(call_span, TypeErrKind::SpecializationTooDeep { limit }));
    }

    let Some(entry) = type_checker.table.closure(closure).cloned() else {
        type_checker.table.abandon_specialization(closure, &func.bound);
        return Err(type_checker.err(call_span, TypeErrKind::UnknownClosure { closure }));
    };

    log::debug!(
        "specializing {closure} for ({})",
        func.bound
            .iter()
            .map(|ty| ty.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    // the body runs in the file and scopes the block literal was typed in
    let prev_scopes = type_checker.table.replace_scopes(entry.scopes);
    let prev_file = std::mem::replace(&mut type_checker.file, entry.file);
    type_checker.table.enter();
    for (param, ty) in entry.params.iter().zip(&func.bound) {
        type_checker
            .table
            .insert(*param, Binding::new(ty.clone(), entry.span));
    }

    type_checker.call_depth += 1;
    let body = entry.body;
    let result = check_each(&body, type_checker).and_then(|_| last_type(&body, type_checker));
    type_checker.call_depth -= 1;

    type_checker.table.exit();
    type_checker.file = prev_file;
    type_checker.table.replace_scopes(prev_scopes);

    match result {
        Ok(ret) => {
            type_checker
                .table
                .finish_specialization(closure, &func.bound, ret.clone(), body);
            Ok(ret)
        }
        Err(err) => {
            type_checker.table.abandon_specialization(closure, &func.bound);
            Err(err)
        }
    }
}

fn check_match(match_expr: &Match, span: Span, type_checker: &mut TypeChecker) -> Result<Type, TypeErr> {
    let scrutinee_ty = type_of(&match_expr.scrutinee, type_checker)?;
    let Type::Variant(variant) = &scrutinee_ty else {
        return Err(type_checker.err(
            match_expr.scrutinee.span,
            TypeErrKind::NotAVariant { found: scrutinee_ty },
        ));
    };

    // only the arms for tags this value is known to carry get checked
    let mut arms = vec![];
    for arm in &match_expr.arms {
        let tag = arm.node.tag;
        let Some(expected) = variant.tag(tag) else {
            match type_checker.config.unknown_arms {
                UnknownArmPolicy::Skip => {
                    log::debug!("skipping match arm {tag}, not a tag of {scrutinee_ty}");
                    continue;
                }
                UnknownArmPolicy::Reject => {
                    return Err(type_checker.err(
                        arm.span,
                        TypeErrKind::UnknownTag {
                            tag,
                            found: scrutinee_ty.clone(),
                        },
                    ));
                }
            }
        };

        if expected.len() != arm.node.args.len() {
            return Err(type_checker.err(
                arm.span,
                TypeErrKind::TagArityMismatch {
                    tag,
                    expected: expected.len(),
                    found: arm.node.args.len(),
                },
            ));
        }

        arms.push((arm, expected));
    }

    let mut result: Option<Type> = None;
    for (arm, expected) in arms {
        type_checker.table.enter();
        let arm_ty = check_arm(arm, &expected, type_checker);
        type_checker.table.exit();

        let arm_ty = arm_ty?;
        result = Some(match result {
            Some(prev) => merge_types(&prev, &arm_ty, MATCH_REASON, span, type_checker)?,
            None => arm_ty,
        });
    }

    result.ok_or_else(|| type_checker.err(span, TypeErrKind::NoMatchingArms { found: scrutinee_ty.clone() }))
}

fn check_arm(arm: &ArmNode, expected: &[Type], type_checker: &mut TypeChecker) -> Result<Type, TypeErr> {
    for (arg, ty) in arm.node.args.iter().zip(expected) {
        let ExprKind::Ident(name) = &arg.node.kind else {
            return Err(type_checker.err(arg.span, TypeErrKind::PatternNotIdent));
        };

        assign_type(arg, ty.clone(), type_checker)?;
        type_checker
            .table
            .insert(*name, Binding::new(ty.clone(), arg.span));
    }

    check_each(&arm.node.body, type_checker)?;
    last_type(&arm.node.body, type_checker)
}

fn check_require(name: Ident, span: Span, type_checker: &mut TypeChecker) -> Result<Type, TypeErr> {
    let file = resolve_require(type_checker.file, name.as_str(), &type_checker.config.source_extension);

    if type_checker.table.is_file_in_progress(file) {
        return Err(type_checker.err(span, TypeErrKind::CircularRequire { file }));
    }

    // a file that already produced definitions was fully checked before
    if !type_checker.table.has_definitions(file) {
        let program = type_checker
            .loader
            .load(file)
            .map_err(|message| type_checker.err(span, TypeErrKind::ModuleLoad { file, message }))?;

        check_module(file, &program, type_checker)?;
        type_checker.modules.insert(file, program);
    } else {
        log::debug!("module {file} already checked");
    }

    let defs = type_checker.table.dump_definitions_for_file(file);
    if defs.is_empty() {
        return Err(type_checker.err(span, TypeErrKind::NoDefinitions { file }));
    }

    let module = Type::Object(ObjectType::new(
        defs.into_iter().map(|(def_name, binding)| (def_name, binding.ty)),
    ));

    let current = type_checker.file;
    type_checker
        .table
        .insert_toplevel(current, name, Binding::new(module.clone(), span));
    Ok(module)
}

fn check_inlay(inner: &Node, span: Span, type_checker: &mut TypeChecker) -> Result<Type, TypeErr> {
    let ty = type_of(inner, type_checker)?;
    log::debug!("inlay at {}:{}..{}: {ty}", type_checker.file, span.start, span.end);
    type_checker.inlays.push(Inlay {
        file: type_checker.file,
        span,
        ty,
    });
    Ok(Type::Unit)
}
