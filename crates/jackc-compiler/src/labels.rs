//! Label id sources for control-flow labels.
//!
//! Every `if` and `while` takes one id and embeds it in all of its label
//! names. Ids must stay unique across every class whose output ends up in the
//! same VM program, so a source is owned by the caller and lent to each
//! class compilation instead of being reset per class.

use std::fmt;

/// An id embedded in generated label names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(pub u32);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supplies label ids. Implementations must never repeat an id.
pub trait LabelSource {
    fn next_id(&mut self) -> LabelId;
}

/// Monotonically increasing ids.
#[derive(Debug, Clone, Default)]
pub struct SequentialLabels {
    next: u32,
}

impl SequentialLabels {
    /// Ids starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids starting at `first`.
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// How many ids have been handed out since zero.
    pub fn peek(&self) -> u32 {
        self.next
    }
}

impl LabelSource for SequentialLabels {
    fn next_id(&mut self) -> LabelId {
        let id = LabelId(self.next);
        self.next += 1;
        id
    }
}

impl<T: LabelSource + ?Sized> LabelSource for &mut T {
    fn next_id(&mut self) -> LabelId {
        (**self).next_id()
    }
}

/// Label names for one `if` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfLabels {
    pub on_true: String,
    pub on_false: String,
    pub end: String,
}

impl IfLabels {
    pub fn new(id: LabelId) -> Self {
        Self {
            on_true: format!("IF_TRUE{id}"),
            on_false: format!("IF_FALSE{id}"),
            end: format!("IF_END{id}"),
        }
    }
}

/// Label names for one `while` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileLabels {
    pub condition: String,
    pub end: String,
}

impl WhileLabels {
    pub fn new(id: LabelId) -> Self {
        Self {
            condition: format!("WHILE_EXP{id}"),
            end: format!("WHILE_END{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_increase() {
        let mut labels = SequentialLabels::new();
        assert_eq!(labels.next_id(), LabelId(0));
        assert_eq!(labels.next_id(), LabelId(1));
        assert_eq!(labels.peek(), 2);
    }

    #[test]
    fn starting_offset() {
        let mut labels = SequentialLabels::starting_at(40);
        assert_eq!(labels.next_id(), LabelId(40));
    }

    #[test]
    fn borrowed_source_advances_owner() {
        fn take_two(mut source: impl LabelSource) {
            source.next_id();
            source.next_id();
        }

        let mut labels = SequentialLabels::new();
        take_two(&mut labels);
        assert_eq!(labels.next_id(), LabelId(2));
    }

    #[test]
    fn label_names_embed_id() {
        let labels = IfLabels::new(LabelId(3));
        assert_eq!(labels.on_true, "IF_TRUE3");
        assert_eq!(labels.on_false, "IF_FALSE3");
        assert_eq!(labels.end, "IF_END3");

        let labels = WhileLabels::new(LabelId(0));
        assert_eq!(labels.condition, "WHILE_EXP0");
        assert_eq!(labels.end, "WHILE_END0");
    }
}
