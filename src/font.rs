//! # Font Selector
//!
//! Resolves which font backs every scalar in a paragraph. Fonts are opaque,
//! cheaply-cloned handles (`Rc<Font>` rather than the reference-counted C
//! struct the reference implementation manages by hand) wrapping the raw
//! bytes a shaper backend parses on demand.

use std::rc::Rc;

/// A loaded font face. Holds owned bytes rather than a parsed face so the
/// shaper driver (`shape` module) can construct a `rustybuzz::Face` borrowing
/// from it without this module depending on `rustybuzz` itself.
#[derive(Debug)]
pub struct Font {
    data: Vec<u8>,
    index: u32,
}

impl Font {
    /// Wrap raw font bytes. `index` selects a face within a font collection
    /// (TTC/OTC); pass 0 for ordinary single-face fonts.
    pub fn new(data: Vec<u8>, index: u32) -> Rc<Font> {
        Rc::new(Font { data, index })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Per-scalar font assignment, built incrementally by [`FontAssignments::set_range`]
/// and consulted by the run splitter's font-boundary pass.
#[derive(Default)]
pub struct FontAssignments {
    slots: Vec<Option<Rc<Font>>>,
}

impl FontAssignments {
    /// Create assignments for a paragraph of `len` scalars, all initially
    /// unassigned.
    pub fn new(len: usize) -> Self {
        FontAssignments {
            slots: vec![None; len],
        }
    }

    /// Assign `font` to every scalar in `start..start+len`, overriding any
    /// prior assignment in that range. Ranges are typically applied in the
    /// order the caller declared them, so a later call narrows or overrides
    /// an earlier, wider one.
    pub fn set_range(&mut self, start: usize, len: usize, font: Rc<Font>) {
        let end = (start + len).min(self.slots.len());
        for slot in &mut self.slots[start.min(end)..end] {
            *slot = Some(Rc::clone(&font));
        }
    }

    /// Assign `font` to every scalar that has no assignment yet. Used to
    /// apply a paragraph-wide default font after all explicit ranges have
    /// been declared.
    pub fn fill_default(&mut self, font: Rc<Font>) {
        for slot in &mut self.slots {
            if slot.is_none() {
                *slot = Some(Rc::clone(&font));
            }
        }
    }

    /// The font assigned to scalar `i`, if any.
    pub fn get(&self, i: usize) -> Option<&Rc<Font>> {
        self.slots[i].as_ref()
    }

    /// `true` if at least one scalar has no font assigned.
    pub fn has_unassigned(&self) -> bool {
        self.slots.iter().any(Option::is_none)
    }

    /// `true` if every scalar resolves to the exact same font instance,
    /// letting callers skip the boundary-splitting walk entirely.
    pub fn is_uniform(&self) -> bool {
        match self.slots.first() {
            None => true,
            Some(first) => self
                .slots
                .iter()
                .all(|s| matches!((s, first), (Some(a), Some(b)) if Rc::ptr_eq(a, b))),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_font() -> Rc<Font> {
        Font::new(vec![0u8; 4], 0)
    }

    #[test]
    fn unassigned_paragraph_reports_uniform() {
        let assignments = FontAssignments::new(3);
        assert!(assignments.is_uniform());
        assert!(assignments.get(0).is_none());
    }

    #[test]
    fn fill_default_only_touches_unassigned_slots() {
        let mut assignments = FontAssignments::new(3);
        let a = dummy_font();
        let b = dummy_font();
        assignments.set_range(1, 1, Rc::clone(&a));
        assignments.fill_default(Rc::clone(&b));
        assert!(Rc::ptr_eq(assignments.get(0).unwrap(), &b));
        assert!(Rc::ptr_eq(assignments.get(1).unwrap(), &a));
        assert!(Rc::ptr_eq(assignments.get(2).unwrap(), &b));
    }

    #[test]
    fn mixed_fonts_are_not_uniform() {
        let mut assignments = FontAssignments::new(2);
        assignments.set_range(0, 1, dummy_font());
        assignments.set_range(1, 1, dummy_font());
        assert!(!assignments.is_uniform());
    }

    #[test]
    fn later_range_overrides_earlier_one() {
        let mut assignments = FontAssignments::new(3);
        let a = dummy_font();
        let b = dummy_font();
        assignments.set_range(0, 3, Rc::clone(&a));
        assignments.set_range(1, 1, Rc::clone(&b));
        assert!(Rc::ptr_eq(assignments.get(0).unwrap(), &a));
        assert!(Rc::ptr_eq(assignments.get(1).unwrap(), &b));
        assert!(Rc::ptr_eq(assignments.get(2).unwrap(), &a));
    }
}
