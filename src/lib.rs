//! # itemize
//!
//! Turns a paragraph of text into a sequence of positioned glyphs, ready to
//! draw. A paragraph is resolved in four stages, each in its own module:
//!
//! ```text
//! text + base direction
//!       ↓
//!   [bidi]    — UAX#9 embedding levels, reordered into visual runs
//!       ↓
//!   [script]  — per-scalar script resolution (bracket-pair aware)
//!       ↓
//!   [runs]    — split runs on script and font boundaries
//!       ↓
//!   [shape]   — drive an OpenType shaper over each run
//!       ↓
//!   [glyph]   — flatten into one paragraph-wide glyph list
//! ```
//!
//! [`Paragraph`] drives the whole pipeline; the stage modules are public so
//! callers needing finer control (a custom run splitter, a different
//! shaper) can drop down to them directly.

pub mod bidi;
pub mod error;
pub mod font;
pub mod glyph;
pub mod runs;
pub mod script;
pub mod shape;

pub use error::LayoutError;
pub use font::Font;
pub use glyph::Glyph;

use font::FontAssignments;
use std::rc::Rc;

/// Paragraph base direction. Numbered to match the reference C API's
/// `raqm_direction_t` so callers porting constants over get the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Resolve direction from the text itself (the Unicode Bidirectional
    /// Algorithm's own paragraph-level rule).
    Default = 0,
    Ltr = 1,
    Rtl = 2,
    /// Top-to-bottom: bidi resolution is skipped and every scalar is
    /// treated as level 0.
    Ttb = 3,
}

struct FontRange {
    start: usize,
    len: usize,
    font: Rc<Font>,
}

/// A unit of text to be laid out: scalars, a base direction, font and
/// feature assignments, and (after [`Paragraph::layout`]) the resulting
/// glyphs.
#[derive(Default)]
pub struct Paragraph {
    text: Vec<char>,
    base_direction: Direction,
    font_ranges: Vec<FontRange>,
    default_font: Option<Rc<Font>>,
    features: Vec<rustybuzz::Feature>,
    language: Option<rustybuzz::Language>,
    glyphs: Vec<Glyph>,
    resolved_direction: Direction,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Default
    }
}

impl Paragraph {
    pub fn new() -> Self {
        Paragraph::default()
    }

    /// Set (or replace) the paragraph's text. Resets the font assignment
    /// and any previously computed glyphs, since both are only meaningful
    /// relative to a specific text length.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().collect();
        self.reset_for_new_text();
    }

    /// Set the paragraph's text from an already-split scalar sequence.
    pub fn set_text_chars(&mut self, text: &[char]) {
        self.text = text.to_vec();
        self.reset_for_new_text();
    }

    fn reset_for_new_text(&mut self) {
        self.font_ranges.clear();
        self.default_font = None;
        self.glyphs.clear();
    }

    pub fn set_paragraph_direction(&mut self, direction: Direction) {
        self.base_direction = direction;
    }

    pub fn set_language(&mut self, language: rustybuzz::Language) {
        self.language = Some(language);
    }

    /// Add an OpenType feature override (e.g. `"liga" 0`, `-kern`) applied
    /// across the whole paragraph. Returns `false` without effect if `spec`
    /// does not parse as a feature.
    pub fn add_feature(&mut self, spec: &str) -> bool {
        match shape::parse_feature(spec) {
            Some(feature) => {
                self.features.push(feature);
                true
            }
            None => false,
        }
    }

    /// Assign `font` to every scalar in `start..start+len`. Ranges set
    /// later override earlier, overlapping ones.
    pub fn set_font_range(&mut self, start: usize, len: usize, font: Rc<Font>) {
        self.font_ranges.push(FontRange { start, len, font });
    }

    /// Assign `font` as the paragraph-wide default, used for any scalar no
    /// [`set_font_range`](Self::set_font_range) call has covered.
    pub fn set_font(&mut self, font: Rc<Font>) {
        self.default_font = Some(font);
    }

    /// Run the full itemization pipeline: bidi resolution, script
    /// resolution, run splitting, shaping, and glyph assembly.
    pub fn layout(&mut self) -> Result<(), LayoutError> {
        if self.text.is_empty() {
            return Err(LayoutError::EmptyParagraph);
        }

        let bidi_result = bidi::resolve(&self.text, self.base_direction)?;
        let scripts = script::resolve_scripts(&self.text);
        let force_ttb = self.base_direction == Direction::Ttb;
        let script_runs = runs::split(&bidi_result.runs, &scripts, force_ttb);

        let mut fonts = FontAssignments::new(self.text.len());
        for range in &self.font_ranges {
            fonts.set_range(range.start, range.len, Rc::clone(&range.font));
        }
        if let Some(font) = &self.default_font {
            fonts.fill_default(Rc::clone(font));
        }

        // Scalars left unassigned (no default font, no covering range) are
        // dropped by `assign_fonts` rather than treated as an error.
        let shape_runs = runs::assign_fonts(&script_runs, &fonts);

        let mut shaped = Vec::with_capacity(shape_runs.len());
        for run in &shape_runs {
            shaped.push(shape::shape_run(
                run,
                &self.text,
                &self.features,
                self.language.as_ref(),
            )?);
        }

        self.glyphs = glyph::assemble(&self.text, &shape_runs, &shaped);
        self.resolved_direction = bidi_result.resolved_direction;
        Ok(())
    }

    /// The glyphs produced by the last successful [`layout`](Self::layout)
    /// call, in final visual order.
    pub fn get_glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// The direction the Unicode Bidirectional Algorithm actually resolved
    /// to. Only informative when [`set_paragraph_direction`](Self::set_paragraph_direction)
    /// was called with [`Direction::Default`].
    pub fn resolved_direction(&self) -> Direction {
        self.resolved_direction
    }
}

/// Shape `text` in one call: a paragraph with a single font and no
/// per-range overrides. Cluster fields in the result are UTF-8 byte
/// indices into `text`, not scalar indices — see [`shape_chars`] for the
/// scalar-indexed equivalent. Feature strings that fail to parse are
/// silently dropped, same as a rejected [`Paragraph::add_feature`] call.
pub fn shape_str(
    text: &str,
    direction: Direction,
    font: Rc<Font>,
    features: &[&str],
) -> Result<Vec<Glyph>, LayoutError> {
    let mut paragraph = Paragraph::new();
    paragraph.set_text(text);
    paragraph.set_paragraph_direction(direction);
    paragraph.set_font(font);
    for feature in features {
        paragraph.add_feature(feature);
    }
    paragraph.layout()?;
    let mut glyphs = paragraph.get_glyphs().to_vec();
    glyph::remap_clusters_to_utf8(&mut glyphs, &paragraph.text);
    Ok(glyphs)
}

/// Shape an already-split scalar sequence in one call.
pub fn shape_chars(
    text: &[char],
    direction: Direction,
    font: Rc<Font>,
    features: &[&str],
) -> Result<Vec<Glyph>, LayoutError> {
    let mut paragraph = Paragraph::new();
    paragraph.set_text_chars(text);
    paragraph.set_paragraph_direction(direction);
    paragraph.set_font(font);
    for feature in features {
        paragraph.add_feature(feature);
    }
    paragraph.layout()?;
    Ok(paragraph.get_glyphs().to_vec())
}
