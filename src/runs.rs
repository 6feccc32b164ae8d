//! # Run Splitter
//!
//! Subdivides each visual-order bidi run on script boundaries, producing
//! [`ScriptRun`]s that are still contiguous in visual order. The Font
//! Selector (`font` module) performs an identical boundary-splitting pass
//! keyed by font identity instead of script, so the direction-aware walk
//! itself lives in [`split_contiguous`] and is shared by both.

use crate::bidi::BidiRun;
use crate::font::Font;
use crate::script::Script;
use std::rc::Rc;

/// Direction a shape run should be handed to the shaper with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunDirection {
    Ltr,
    Rtl,
    Ttb,
}

/// A run with uniform direction and script, not yet assigned a font.
#[derive(Debug, Clone)]
pub struct ScriptRun {
    pub start: usize,
    pub len: usize,
    pub direction: RunDirection,
    pub script: Script,
}

/// A run with uniform direction, script, and font — ready for shaping.
#[derive(Debug, Clone)]
pub struct ShapeRun {
    pub start: usize,
    pub len: usize,
    pub direction: RunDirection,
    pub script: Script,
    pub font: Rc<Font>,
}

/// Walk `start..start+len` in the traversal order implied by `direction`
/// (backward for RTL, forward otherwise), grouping maximal spans that share
/// a key, and calling `emit(start, len, key)` for each span in the order it
/// closes. Used to split on script boundaries and again, with a different
/// key function, to split on font boundaries.
pub(crate) fn split_contiguous<T: PartialEq + Copy>(
    direction: RunDirection,
    start: usize,
    len: usize,
    key_at: impl Fn(usize) -> T,
    mut emit: impl FnMut(usize, usize, T),
) {
    if len == 0 {
        return;
    }

    if direction == RunDirection::Rtl {
        let mut j = len - 1;
        let mut cur_start = start + j;
        let mut cur_len = 1usize;
        let mut cur_key = key_at(cur_start);
        while j > 0 {
            j -= 1;
            let pos = start + j;
            let key = key_at(pos);
            if key == cur_key {
                cur_start = pos;
                cur_len += 1;
            } else {
                emit(cur_start, cur_len, cur_key);
                cur_start = pos;
                cur_len = 1;
                cur_key = key;
            }
        }
        emit(cur_start, cur_len, cur_key);
    } else {
        let mut cur_start = start;
        let mut cur_len = 1usize;
        let mut cur_key = key_at(start);
        for j in 1..len {
            let pos = start + j;
            let key = key_at(pos);
            if key == cur_key {
                cur_len += 1;
            } else {
                emit(cur_start, cur_len, cur_key);
                cur_start = pos;
                cur_len = 1;
                cur_key = key;
            }
        }
        emit(cur_start, cur_len, cur_key);
    }
}

fn run_direction(run: &BidiRun, force_ttb: bool) -> RunDirection {
    if force_ttb {
        RunDirection::Ttb
    } else if run.level.is_rtl() {
        RunDirection::Rtl
    } else {
        RunDirection::Ltr
    }
}

/// Split every bidi run on script boundaries, preserving visual order.
pub fn split(bidi_runs: &[BidiRun], scripts: &[Script], force_ttb: bool) -> Vec<ScriptRun> {
    let mut out = Vec::new();
    for run in bidi_runs {
        if run.len == 0 {
            continue;
        }
        let direction = run_direction(run, force_ttb);
        split_contiguous(
            direction,
            run.start,
            run.len,
            |pos| scripts[pos],
            |start, len, script| {
                out.push(ScriptRun {
                    start,
                    len,
                    direction,
                    script,
                });
            },
        );
    }
    out
}

/// Further split each script run on font boundaries, assigning every
/// resulting run the font recorded in `fonts`. A scalar with no recorded
/// font assignment is a caller bug (every paragraph fills a default before
/// calling this) and is skipped rather than propagated as an error.
pub fn assign_fonts(script_runs: &[ScriptRun], fonts: &crate::font::FontAssignments) -> Vec<ShapeRun> {
    let mut out = Vec::new();
    for run in script_runs {
        if fonts.is_uniform() {
            if let Some(font) = fonts.get(run.start) {
                out.push(ShapeRun {
                    start: run.start,
                    len: run.len,
                    direction: run.direction,
                    script: run.script,
                    font: Rc::clone(font),
                });
            }
            continue;
        }

        split_contiguous(
            run.direction,
            run.start,
            run.len,
            |pos| fonts.get(pos).map(Rc::as_ptr),
            |start, len, key| {
                if key.is_none() {
                    return;
                }
                if let Some(font) = fonts.get(start) {
                    out.push(ShapeRun {
                        start,
                        len,
                        direction: run.direction,
                        script: run.script,
                        font: Rc::clone(font),
                    });
                }
            },
        );
    }
    out
}
