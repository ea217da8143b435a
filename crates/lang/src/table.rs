use crate::{
    ast::{FileId, Ident, Node},
    span::Span,
    types::{ClosureId, Type},
};
use indexmap::IndexMap;
use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    rc::Rc,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub ty: Type,
    /// Where the name was introduced
    pub span: Span,
}

impl Binding {
    pub fn new(ty: Type, span: Span) -> Self {
        Self { ty, span }
    }
}

type Frame = Rc<RefCell<HashMap<Ident, Binding>>>;

/// Stack of lexical frames.
///
/// Frames are shared handles: a copy of the stack taken when a block literal
/// is typed keeps observing definitions made later in the same frames.
#[derive(Debug, Clone)]
pub struct Scopes {
    frames: Vec<Frame>,
}

impl Default for Scopes {
    fn default() -> Self {
        Self::root()
    }
}

impl Scopes {
    pub fn root() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    fn push(&mut self) {
        self.frames.push(Frame::default());
    }

    fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    fn insert(&mut self, name: Ident, binding: Binding) {
        if let Some(frame) = self.frames.last() {
            frame.borrow_mut().insert(name, binding);
        }
    }

    fn get(&self, name: Ident) -> Option<Type> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.borrow().get(&name).map(|binding| binding.ty.clone()))
    }

    fn set(&self, name: Ident, ty: Type) -> bool {
        for frame in self.frames.iter().rev() {
            if let Some(binding) = frame.borrow_mut().get_mut(&name) {
                binding.ty = ty;
                return true;
            }
        }
        false
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

/// Everything needed to run the body of a lambda later on
#[derive(Debug, Clone)]
pub struct ClosureEntry {
    pub params: Vec<Ident>,
    /// Pristine body, copied for every specialization
    pub body: Vec<Node>,
    pub span: Span,
    /// File whose top level definitions the body resolves against
    pub file: FileId,
    /// Lexical scopes at the point the block literal was typed
    pub scopes: Scopes,
}

#[derive(Debug)]
pub enum SpecState {
    InProgress,
    Done { ret: Type, body: Vec<Node> },
}

/// One instantiation of a closure body for concrete argument types
#[derive(Debug)]
pub struct Specialization {
    pub args: Vec<Type>,
    pub state: SpecState,
}

impl Specialization {
    pub fn return_type(&self) -> Option<&Type> {
        match &self.state {
            SpecState::Done { ret, .. } => Some(ret),
            SpecState::InProgress => None,
        }
    }

    /// The typed copy of the body for this signature
    pub fn body(&self) -> Option<&[Node]> {
        match &self.state {
            SpecState::Done { body, .. } => Some(body),
            SpecState::InProgress => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpecLookup {
    /// Body already typed for these arguments
    Cached(Type),
    /// Body is being typed for these arguments further up the stack
    InProgress,
    /// A marker was inserted, the caller has to type the body
    Started,
}

#[derive(Debug, Default)]
pub struct BindingTable {
    scopes: Scopes,
    toplevel: HashMap<FileId, IndexMap<Ident, Binding>>,
    closures: HashMap<ClosureId, ClosureEntry>,
    next_closure: u32,
    specializations: HashMap<ClosureId, Vec<Specialization>>,
    files_in_progress: HashSet<FileId>,
}

impl BindingTable {
    pub fn enter(&mut self) {
        self.scopes.push();
    }

    pub fn exit(&mut self) {
        self.scopes.pop();
    }

    pub fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Installs another scope stack, returning the one that was active
    pub fn replace_scopes(&mut self, scopes: Scopes) -> Scopes {
        std::mem::replace(&mut self.scopes, scopes)
    }

    pub fn insert(&mut self, name: Ident, binding: Binding) {
        self.scopes.insert(name, binding);
    }

    pub fn insert_toplevel(&mut self, file: FileId, name: Ident, binding: Binding) {
        self.toplevel.entry(file).or_default().insert(name, binding);
    }

    /// Resolves a name innermost scope first, then against the top level of `file`
    pub fn lookup(&self, file: FileId, name: Ident) -> Option<Type> {
        self.scopes.get(name).or_else(|| {
            self.toplevel
                .get(&file)
                .and_then(|defs| defs.get(&name))
                .map(|binding| binding.ty.clone())
        })
    }

    /// Replaces the type of an existing binding, false if the name is unbound
    pub fn rebind(&mut self, file: FileId, name: Ident, ty: Type) -> bool {
        if self.scopes.set(name, ty.clone()) {
            return true;
        }

        match self
            .toplevel
            .get_mut(&file)
            .and_then(|defs| defs.get_mut(&name))
        {
            Some(binding) => {
                binding.ty = ty;
                true
            }
            None => false,
        }
    }

    pub fn dump_definitions_for_file(&self, file: FileId) -> IndexMap<Ident, Binding> {
        self.toplevel.get(&file).cloned().unwrap_or_default()
    }

    pub fn has_definitions(&self, file: FileId) -> bool {
        self.toplevel.get(&file).is_some_and(|defs| !defs.is_empty())
    }

    pub fn begin_file(&mut self, file: FileId) -> bool {
        self.files_in_progress.insert(file)
    }

    pub fn end_file(&mut self, file: FileId) {
        self.files_in_progress.remove(&file);
    }

    pub fn is_file_in_progress(&self, file: FileId) -> bool {
        self.files_in_progress.contains(&file)
    }

    pub fn fresh_closure_id(&mut self) -> ClosureId {
        let id = ClosureId(self.next_closure);
        self.next_closure += 1;
        id
    }

    pub fn insert_block(&mut self, id: ClosureId, entry: ClosureEntry) {
        self.closures.insert(id, entry);
    }

    pub fn closure(&self, id: ClosureId) -> Option<&ClosureEntry> {
        self.closures.get(&id)
    }

    pub fn closure_count(&self) -> usize {
        self.closures.len()
    }

    /// Looks up the specialization cache, inserting an in-progress marker on a miss
    pub fn begin_specialization(&mut self, closure: ClosureId, args: &[Type]) -> SpecLookup {
        let entries = self.specializations.entry(closure).or_default();
        if let Some(spec) = entries.iter().find(|spec| spec.args == args) {
            return match &spec.state {
                SpecState::Done { ret, .. } => SpecLookup::Cached(ret.clone()),
                SpecState::InProgress => SpecLookup::InProgress,
            };
        }

        entries.push(Specialization {
            args: args.to_vec(),
            state: SpecState::InProgress,
        });
        SpecLookup::Started
    }

    /// Position of the in-progress marker for `args`
    fn in_progress(&self, closure: ClosureId, args: &[Type]) -> Option<usize> {
        self.specializations.get(&closure).and_then(|entries| {
            entries
                .iter()
                .position(|spec| matches!(spec.state, SpecState::InProgress) && spec.args == args)
        })
    }

    pub fn finish_specialization(
        &mut self,
        closure: ClosureId,
        args: &[Type],
        ret: Type,
        body: Vec<Node>,
    ) {
        let Some(index) = self.in_progress(closure, args) else {
            return;
        };
        if let Some(spec) = self
            .specializations
            .get_mut(&closure)
            .and_then(|entries| entries.get_mut(index))
        {
            spec.state = SpecState::Done { ret, body };
        }
    }

    /// Drops the marker of a specialization whose body failed to type
    pub fn abandon_specialization(&mut self, closure: ClosureId, args: &[Type]) {
        let Some(index) = self.in_progress(closure, args) else {
            return;
        };
        if let Some(entries) = self.specializations.get_mut(&closure) {
            entries.remove(index);
        }
    }

    pub fn specializations(&self, closure: ClosureId) -> &[Specialization] {
        self.specializations
            .get(&closure)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn specialization_count(&self) -> usize {
        self.specializations.values().map(Vec::len).sum()
    }
}
