pub mod annotation;
pub mod ast;
pub mod config;
pub mod error;
pub mod modules;
pub mod span;
pub mod table;
pub mod typecheck;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use typecheck::{TypeChecker, TypeErr, TypeErrKind, check_program};

/// Type checks `program`, printing a report against `src` when it fails
pub fn check_source(src: &str, program: &ast::Program, file: &str) -> Result<TypeChecker, String> {
    match check_program(program, file) {
        Ok(type_checker) => Ok(type_checker),
        Err(err) => {
            error::report_type_error(src, &err);
            Err(format!("Failed to type check {}", err.file))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn check_source_returns_the_checker() {
        let prog = program(vec![define("x", int(1))]);
        match check_source("x = 1\n", &prog, MAIN) {
            Ok(type_checker) => assert!(type_checker.definition(MAIN, "x").is_some()),
            Err(err) => panic!("Expected Ok, got error: {err}"),
        }
    }

    #[test]
    fn check_source_reports_failures_as_strings() {
        let prog = program(vec![at(ident("nope"), 0, 4)]);
        match check_source("nope\n", &prog, MAIN) {
            Ok(_) => panic!("Expected Err, got Ok"),
            Err(err) => assert_eq!(err, "Failed to type check main.brie"),
        }
    }
}
