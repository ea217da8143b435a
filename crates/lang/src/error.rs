use std::{fmt::Display, ops::Range};

use crate::typecheck::{TypeErr, TypeErrKind};
use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

/// Prints a report for `err` against the source of the file it points into
pub fn report_type_error(src: &str, err: &TypeErr) {
    let (title, body) = describe(&err.kind);
    let _ = build_report(err.span.range(), title, body, true).print(Source::from(src));
}

/// Same report as [`report_type_error`], rendered without colors
pub fn render_type_error(src: &str, err: &TypeErr) -> String {
    let (title, body) = describe(&err.kind);
    let mut out = Vec::new();
    match build_report(err.span.range(), title.clone(), body.clone(), false).write(Source::from(src), &mut out) {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(_) => format!("{}: {title}: {body}", err.file),
    }
}

pub fn describe(kind: &TypeErrKind) -> (String, String) {
    match kind {
        TypeErrKind::UnknownVariable { name } => (
            format!("Unknown variable '{name}'"),
            "This variable is not in scope".to_string(),
        ),
        TypeErrKind::UnknownField { field, found } => (
            format!("Unknown field '{field}'"),
            format!("'{found}' has no field '{field}'"),
        ),
        TypeErrKind::NotAnObject { found } => (
            "Not an object".to_string(),
            format!("expression of type '{found}' has no fields"),
        ),
        TypeErrKind::NotAFunction { found } => (
            "Not a function".to_string(),
            format!("expression of type '{found}' is not callable"),
        ),
        TypeErrKind::NotAVariant { found } => (
            "Not a variant".to_string(),
            format!("cannot match on a value of type '{found}'"),
        ),
        TypeErrKind::ConditionNotBool { found } => (
            "Condition is not a boolean".to_string(),
            format!("expected 'Bool', found '{found}'"),
        ),
        TypeErrKind::MismatchedTypes {
            expected,
            found,
            reason,
        } => (
            format!("Mismatched types, {reason}"),
            format!("expected '{expected}', found '{found}'"),
        ),
        TypeErrKind::ArityMismatch { expected, found } => (
            "Wrong number of arguments".to_string(),
            format!("expected at most {expected} arguments, found {found}"),
        ),
        TypeErrKind::InvalidAssignTarget => (
            "Invalid assignment target".to_string(),
            "only variables and fields can be updated".to_string(),
        ),
        TypeErrKind::NestedFieldAssign { field } => (
            "Nested field assignment".to_string(),
            format!("'{field}' can only be assigned on a variable"),
        ),
        TypeErrKind::AnnotationMismatch { expected, found } => (
            "Type check failed".to_string(),
            format!("expected '{expected}', found '{found}'"),
        ),
        TypeErrKind::MissingAnnotatedField { field, found } => (
            format!("Missing field '{field}'"),
            format!("'{found}' has no field '{field}'"),
        ),
        TypeErrKind::UnknownAnnotation { name } => (
            format!("Unknown annotation '{name}'"),
            "this name does not describe a type".to_string(),
        ),
        TypeErrKind::MalformedAnnotation => (
            "Malformed annotation".to_string(),
            "annotations are type names or objects of annotations".to_string(),
        ),
        TypeErrKind::PatternNotIdent => (
            "Invalid pattern".to_string(),
            "match arm arguments have to be identifiers".to_string(),
        ),
        TypeErrKind::TagArityMismatch {
            tag,
            expected,
            found,
        } => (
            format!("Wrong number of arguments for '{tag}'"),
            format!("expected {expected}, found {found}"),
        ),
        TypeErrKind::UnknownTag { tag, found } => (
            format!("Unknown tag '{tag}'"),
            format!("'{found}' never carries '{tag}'"),
        ),
        TypeErrKind::NoMatchingArms { found } => (
            "No matching arms".to_string(),
            format!("no arm handles a tag of '{found}'"),
        ),
        TypeErrKind::NoDefinitions { file } => (
            format!("Nothing to require from '{file}'"),
            "the required file has no definitions".to_string(),
        ),
        TypeErrKind::CircularRequire { file } => (
            "Circular require".to_string(),
            format!("'{file}' is still being checked"),
        ),
        TypeErrKind::ModuleLoad { file, message } => (
            format!("Could not load '{file}'"),
            message.clone(),
        ),
        TypeErrKind::RecursiveSpecialization { closure, args } => (
            "Recursive call with identical argument types".to_string(),
            format!(
                "function {closure} calls itself with ({})",
                args.iter().map(|arg| arg.to_string()).collect::<Vec<_>>().join(", ")
            ),
        ),
        TypeErrKind::SpecializationTooDeep { limit } => (
            "Specialization too deep".to_string(),
            format!("more than {limit} nested function bodies"),
        ),
        TypeErrKind::AlreadyTyped { ty } => (
            "Node typed twice".to_string(),
            format!("this node already has type '{ty}'"),
        ),
        TypeErrKind::Untyped => (
            "Untyped node".to_string(),
            "this node was never visited".to_string(),
        ),
        TypeErrKind::UnknownClosure { closure } => (
            "Unknown function".to_string(),
            format!("no block literal registered as {closure}"),
        ),
    }
}

fn build_report(range: Range<usize>, title: String, body: String, color: bool) -> Report<'static, Range<usize>> {
    Report::build(ReportKind::Error, range.clone())
        .with_config(
            Config::default()
                .with_color(color)
                .with_index_type(IndexType::Byte),
        )
        .with_message(title)
        .with_label(Label::new(range).with_color(Color::Red).with_message(body))
        .finish()
}

impl Display for TypeErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (title, body) = describe(&self.kind);
        write!(
            f,
            "{}:{}..{}: {title}: {body}",
            self.file, self.span.start, self.span.end
        )
    }
}

impl std::error::Error for TypeErr {}
