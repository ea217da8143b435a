use crate::types::TypeTag;

/// Maps the name used in an `is` annotation to the kind of type it asserts
pub trait AnnotationResolver {
    fn resolve(&self, name: &str) -> Option<TypeTag>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinAnnotations;

impl AnnotationResolver for BuiltinAnnotations {
    fn resolve(&self, name: &str) -> Option<TypeTag> {
        let tag = match name {
            "Unit" => TypeTag::Unit,
            "Bool" => TypeTag::Bool,
            "Integer" | "Int" => TypeTag::Integer,
            "Float" => TypeTag::Float,
            "String" => TypeTag::String,
            "Object" => TypeTag::Object,
            "Function" => TypeTag::Function,
            "Variant" => TypeTag::Variant,
            _ => return None,
        };
        Some(tag)
    }
}
