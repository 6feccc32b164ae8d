//! # Output Assembler
//!
//! Flattens the glyphs produced per shape run into one paragraph-wide glyph
//! list in final visual order, rebasing each glyph's cluster from a
//! run-local byte offset (as `rustybuzz` reports them) to a paragraph-
//! absolute scalar index.

use crate::runs::ShapeRun;
use crate::shape::RawGlyph;

/// A single positioned glyph, ready to be drawn.
#[derive(Debug, Clone)]
pub struct Glyph {
    pub glyph_id: u32,
    /// Index into the paragraph's scalar sequence of the first scalar this
    /// glyph was shaped from.
    pub cluster: usize,
    pub x_advance: i32,
    pub y_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
}

/// Byte-offset prefix table for the chars of a single run, used to turn a
/// rustybuzz cluster (a byte offset into the run's own UTF-8 text) back into
/// a char index within the run.
fn run_byte_offsets(text: &[char], run: &ShapeRun) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(run.len + 1);
    let mut acc = 0usize;
    offsets.push(0);
    for ch in &text[run.start..run.start + run.len] {
        acc += ch.len_utf8();
        offsets.push(acc);
    }
    offsets
}

/// Rebase `raw` glyphs shaped from `run` into paragraph-absolute clusters
/// and append them to `out`, preserving the order the shaper returned them
/// in (already the correct visual order for the run's direction).
pub fn append_run(out: &mut Vec<Glyph>, text: &[char], run: &ShapeRun, raw: &[RawGlyph]) {
    let offsets = run_byte_offsets(text, run);
    for g in raw {
        let char_index_in_run = match offsets.binary_search(&(g.cluster as usize)) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        out.push(Glyph {
            glyph_id: g.glyph_id,
            cluster: run.start + char_index_in_run,
            x_advance: g.x_advance,
            y_advance: g.y_advance,
            x_offset: g.x_offset,
            y_offset: g.y_offset,
        });
    }
}

/// Remap every glyph's cluster from a scalar index into `text` to the
/// corresponding UTF-8 byte index, in place. Used by the byte-oriented
/// one-shot entry point (`shape_str`); the scalar-sequence entry point
/// (`shape_chars`) leaves clusters as scalar indices.
pub fn remap_clusters_to_utf8(glyphs: &mut [Glyph], text: &[char]) {
    let mut byte_offset = Vec::with_capacity(text.len() + 1);
    let mut acc = 0usize;
    byte_offset.push(0);
    for ch in text {
        acc += ch.len_utf8();
        byte_offset.push(acc);
    }
    for glyph in glyphs {
        glyph.cluster = byte_offset[glyph.cluster];
    }
}

/// Assemble the full glyph list for a paragraph from its shape runs, each
/// already shaped into a `Vec<RawGlyph>` by the caller. Runs must already be
/// in final visual order; this function does no reordering of its own.
pub fn assemble(text: &[char], runs: &[ShapeRun], shaped: &[Vec<RawGlyph>]) -> Vec<Glyph> {
    let mut out = Vec::new();
    for (run, raw) in runs.iter().zip(shaped.iter()) {
        append_run(&mut out, text, run, raw);
    }
    out
}
