//! # Bidi Engine Adapter
//!
//! Wraps `unicode-bidi` to turn a scalar sequence and a paragraph direction
//! into visual-order bidi runs. For vertical (TTB) paragraphs the Unicode
//! Bidirectional Algorithm is skipped entirely and a single level-0 run is
//! synthesized, per the reference implementation's treatment of vertical
//! text as "everything is LTR".

use crate::error::LayoutError;
use crate::Direction;
use unicode_bidi::{BidiInfo, Level};

/// A maximal span of scalars at a single embedding level, in *visual* order.
#[derive(Debug, Clone, Copy)]
pub struct BidiRun {
    pub start: usize,
    pub len: usize,
    pub level: Level,
}

/// Output of [`resolve`].
pub struct BidiResult {
    /// Per-scalar embedding level, in logical order.
    pub levels: Vec<Level>,
    /// Bidi runs, already reordered into visual (left-to-right) order.
    pub runs: Vec<BidiRun>,
    /// The paragraph direction the algorithm actually resolved to. Only
    /// meaningful when the caller passed [`Direction::Default`].
    pub resolved_direction: Direction,
}

/// Build a char-index → byte-offset prefix table for `text`. Index N holds
/// the total byte length, so both char and byte ranges can be looked up by
/// binary search against this single table.
fn char_byte_offsets(text: &[char]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(text.len() + 1);
    let mut acc = 0usize;
    offsets.push(0);
    for ch in text {
        acc += ch.len_utf8();
        offsets.push(acc);
    }
    offsets
}

/// Resolve bidi levels and visual runs for `text` under `base_direction`.
pub fn resolve(text: &[char], base_direction: Direction) -> Result<BidiResult, LayoutError> {
    let n = text.len();

    if n == 0 {
        return Ok(BidiResult {
            levels: Vec::new(),
            runs: Vec::new(),
            resolved_direction: Direction::Ltr,
        });
    }

    if base_direction == Direction::Ttb {
        return Ok(BidiResult {
            levels: vec![Level::ltr(); n],
            runs: vec![BidiRun {
                start: 0,
                len: n,
                level: Level::ltr(),
            }],
            resolved_direction: Direction::Ttb,
        });
    }

    let offsets = char_byte_offsets(text);
    let joined: String = text.iter().collect();

    let para_level_override = match base_direction {
        Direction::Ltr => Some(Level::ltr()),
        Direction::Rtl => Some(Level::rtl()),
        Direction::Default | Direction::Ttb => None,
    };

    let bidi_info = BidiInfo::new(&joined, para_level_override);
    let paragraph = bidi_info
        .paragraphs
        .first()
        .ok_or(LayoutError::BidiResolutionFailed)?;

    let resolved_direction = if paragraph.level.is_rtl() {
        Direction::Rtl
    } else {
        Direction::Ltr
    };

    let mut levels = Vec::with_capacity(n);
    for i in 0..n {
        levels.push(bidi_info.levels[offsets[i]]);
    }

    let (run_levels, run_byte_ranges) = bidi_info.visual_runs(paragraph, paragraph.range.clone());

    let mut runs = Vec::with_capacity(run_byte_ranges.len());
    for (byte_range, level) in run_byte_ranges.iter().zip(run_levels.iter()) {
        if byte_range.is_empty() {
            continue;
        }
        let start = offsets
            .binary_search(&byte_range.start)
            .expect("visual run boundary must fall on a char boundary");
        let end = offsets
            .binary_search(&byte_range.end)
            .expect("visual run boundary must fall on a char boundary");
        runs.push(BidiRun {
            start,
            len: end - start,
            level: *level,
        });
    }

    Ok(BidiResult {
        levels,
        runs,
        resolved_direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_ltr_single_run() {
        let text: Vec<char> = "Hello".chars().collect();
        let result = resolve(&text, Direction::Ltr).unwrap();
        assert_eq!(result.runs.len(), 1);
        assert!(!result.runs[0].level.is_rtl());
        assert_eq!(result.runs[0].start, 0);
        assert_eq!(result.runs[0].len, 5);
    }

    #[test]
    fn pure_rtl_single_run() {
        let text: Vec<char> = "\u{0627}\u{0644}\u{0633}\u{0644}\u{0627}\u{0645}"
            .chars()
            .collect();
        let result = resolve(&text, Direction::Default).unwrap();
        assert_eq!(result.runs.len(), 1);
        assert!(result.runs[0].level.is_rtl());
        assert_eq!(result.resolved_direction, Direction::Rtl);
    }

    #[test]
    fn mixed_bidi_three_runs_in_visual_order() {
        // "abc" + Arabic "لام" + "xyz", base LTR.
        let text: Vec<char> = "abc\u{0644}\u{0627}\u{0645}xyz".chars().collect();
        let result = resolve(&text, Direction::Ltr).unwrap();
        assert_eq!(result.runs.len(), 3);
        assert!(!result.runs[0].level.is_rtl());
        assert!(result.runs[1].level.is_rtl());
        assert!(!result.runs[2].level.is_rtl());
        assert_eq!(result.runs[0].start, 0);
        assert_eq!(result.runs[1].start, 3);
        assert_eq!(result.runs[2].start, 6);
    }

    #[test]
    fn ttb_forces_single_zero_level_run() {
        let text: Vec<char> = "abc".chars().collect();
        let result = resolve(&text, Direction::Ttb).unwrap();
        assert_eq!(result.runs.len(), 1);
        assert!(result.levels.iter().all(|l| l.number() == 0));
    }

    #[test]
    fn empty_text_yields_no_runs() {
        let result = resolve(&[], Direction::Ltr).unwrap();
        assert!(result.runs.is_empty());
    }
}
