use std::ops::Range;

/// Byte offsets into the source a node was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[derive(Debug, Clone)]
pub struct Spanned<T>
where
    T: Clone,
{
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T>
where
    T: Clone,
{
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}
