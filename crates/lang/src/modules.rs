use crate::ast::{FileId, Program};
use std::{collections::HashMap, path::Path};

/// Produces parsed trees for the files pulled in by `require`
pub trait SourceLoader {
    fn load(&mut self, file: FileId) -> Result<Program, String>;
}

/// Serves trees that were parsed ahead of time
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    sources: HashMap<FileId, Program>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str, program: Program) {
        self.sources.insert(FileId::new(path), program);
    }

    pub fn with(mut self, path: &str, program: Program) -> Self {
        self.insert(path, program);
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&mut self, file: FileId) -> Result<Program, String> {
        // cloning hands out an untyped copy of the tree
        self.sources
            .get(&file)
            .cloned()
            .ok_or_else(|| format!("no source registered for '{file}'"))
    }
}

/// Resolves `require name` issued from `from` to a file next to it
pub fn resolve_require(from: FileId, name: &str, extension: &str) -> FileId {
    let dir = Path::new(from.as_str())
        .parent()
        .unwrap_or_else(|| Path::new(""));
    let path = dir.join(format!("{name}.{extension}"));
    FileId::new(&path.to_string_lossy())
}
