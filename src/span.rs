use codespan_reporting::diagnostic::{Label, LabelStyle};

/// A byte range within a single input line.
///
/// Inputs are one expression long, so there is no notion of files or line
/// numbers here; byte offsets are all a diagnostic renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    pub fn extend(&self, other: &Span) -> Span {
        Span {
            start: std::cmp::min(self.start, other.start),
            end: std::cmp::max(self.end, other.end),
        }
    }

    pub fn diagnostic_label(&self, style: LabelStyle) -> Label<()> {
        Label::new(style, (), (self.start as usize)..(self.end as usize))
    }

    #[cfg(test)]
    pub fn dummy() -> Span {
        Span { start: 0, end: 0 }
    }
}
