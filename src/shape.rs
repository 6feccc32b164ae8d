//! # Shaper Driver
//!
//! Drives `rustybuzz` over each [`ShapeRun`], translating our script/direction
//! types into the shaper's own and applying paragraph-wide OpenType feature
//! overrides. One `rustybuzz::Face` is parsed per distinct font per call;
//! callers that shape the same paragraph repeatedly should cache fonts
//! upstream rather than through this module.

use crate::error::LayoutError;
use crate::runs::{RunDirection, ShapeRun};
use crate::script::Script;
use rustybuzz::{Face, UnicodeBuffer};

/// One glyph produced by the shaper for a single run, in shaper-local
/// (buffer) index space. The glyph assembler (`glyph` module) rebases
/// `cluster` into paragraph-absolute scalar indices.
#[derive(Debug, Clone)]
pub struct RawGlyph {
    pub glyph_id: u32,
    pub cluster: u32,
    pub x_advance: i32,
    pub y_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
}

fn to_rustybuzz_direction(direction: RunDirection) -> rustybuzz::Direction {
    match direction {
        RunDirection::Ltr => rustybuzz::Direction::LeftToRight,
        RunDirection::Rtl => rustybuzz::Direction::RightToLeft,
        RunDirection::Ttb => rustybuzz::Direction::TopToBottom,
    }
}

/// Map a resolved script to its ISO 15924 tag for `rustybuzz::Script`.
/// Scripts with no entry here are left unset on the buffer and resolved by
/// `guess_segment_properties` instead, which is good enough for scripts rare
/// enough that OpenType shaping rarely depends on knowing them precisely.
fn iso15924_tag(script: Script) -> Option<&'static [u8; 4]> {
    use Script::*;
    let tag: &'static [u8; 4] = match script {
        Latin => b"Latn",
        Arabic => b"Arab",
        Hebrew => b"Hebr",
        Cyrillic => b"Cyrl",
        Greek => b"Grek",
        Han => b"Hani",
        Hiragana => b"Hira",
        Katakana => b"Kana",
        Hangul => b"Hang",
        Devanagari => b"Deva",
        Bengali => b"Beng",
        Tamil => b"Taml",
        Thai => b"Thai",
        Armenian => b"Armn",
        Georgian => b"Geor",
        Common => b"Zyyy",
        Inherited => b"Zinh",
        Unknown => b"Zzzz",
        _ => return None,
    };
    Some(tag)
}

fn rustybuzz_script(script: Script) -> Option<rustybuzz::Script> {
    let tag = iso15924_tag(script)?;
    let tag = rustybuzz::Tag::from_bytes(tag);
    rustybuzz::Script::from_iso15924_tag(tag)
}

/// The paragraph's effective language when the caller never set one:
/// the `LANG` environment variable's primary subtag (e.g. `"en"` out of
/// `"en_US.UTF-8"`), falling back to `"en"` if `LANG` is unset or
/// unparseable.
fn default_language() -> rustybuzz::Language {
    std::env::var("LANG")
        .ok()
        .and_then(|lang| {
            let primary = lang.split(['_', '.']).next()?.to_string();
            primary.parse().ok()
        })
        .unwrap_or_else(|| "en".parse().expect("\"en\" is always a valid language tag"))
}

/// Shape one run against its assigned font, applying `features` (already
/// parsed paragraph-wide OpenType feature overrides).
///
/// The buffer only contains the run's own scalars, but `set_pre_context`/
/// `set_post_context` hand the shaper the neighboring text on either side so
/// contextual shaping (Arabic joining, ligatures that straddle a run
/// boundary) still sees the scalars a single-run buffer would otherwise
/// hide.
pub fn shape_run(
    run: &ShapeRun,
    text: &[char],
    features: &[rustybuzz::Feature],
    language: Option<&rustybuzz::Language>,
) -> Result<Vec<RawGlyph>, LayoutError> {
    let face = Face::from_slice(run.font.data(), run.font.index())
        .ok_or_else(|| LayoutError::ShapingFailed("font data could not be parsed".into()))?;

    let run_end = run.start + run.len;
    let pre_context: String = text[..run.start].iter().collect();
    let run_text: String = text[run.start..run_end].iter().collect();
    let post_context: String = text[run_end..].iter().collect();

    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(&run_text);
    if !pre_context.is_empty() {
        buffer.set_pre_context(&pre_context);
    }
    if !post_context.is_empty() {
        buffer.set_post_context(&post_context);
    }
    buffer.guess_segment_properties();

    buffer.set_direction(to_rustybuzz_direction(run.direction));
    if let Some(script) = rustybuzz_script(run.script) {
        buffer.set_script(script);
    }
    match language {
        Some(lang) => buffer.set_language(lang.clone()),
        None => buffer.set_language(default_language()),
    }

    let glyph_buffer = rustybuzz::shape(&face, features, buffer);

    let infos = glyph_buffer.glyph_infos();
    let positions = glyph_buffer.glyph_positions();

    let mut glyphs = Vec::with_capacity(infos.len());
    for (info, pos) in infos.iter().zip(positions.iter()) {
        glyphs.push(RawGlyph {
            glyph_id: info.glyph_id,
            cluster: info.cluster,
            x_advance: pos.x_advance,
            y_advance: pos.y_advance,
            x_offset: pos.x_offset,
            y_offset: pos.y_offset,
        });
    }

    Ok(glyphs)
}

/// Parse a CSS-style font-feature string (e.g. `"liga" 0` or `+kern`) into a
/// `rustybuzz::Feature`. Returns `None` rather than an error on malformed
/// input: an unparseable feature is dropped from the paragraph rather than
/// aborting layout, matching how the reference implementation treats a
/// rejected `raqm_add_font_feature` call.
pub fn parse_feature(spec: &str) -> Option<rustybuzz::Feature> {
    spec.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_scripts_resolve_to_a_rustybuzz_script() {
        assert!(iso15924_tag(Script::Unknown).is_some());
        assert!(rustybuzz_script(Script::Common).is_some());
    }

    #[test]
    fn direction_mapping_is_total() {
        assert_eq!(
            to_rustybuzz_direction(RunDirection::Ltr),
            rustybuzz::Direction::LeftToRight
        );
        assert_eq!(
            to_rustybuzz_direction(RunDirection::Rtl),
            rustybuzz::Direction::RightToLeft
        );
        assert_eq!(
            to_rustybuzz_direction(RunDirection::Ttb),
            rustybuzz::Direction::TopToBottom
        );
    }

    #[test]
    fn default_language_is_always_resolvable() {
        // Whatever LANG happens to be in the test process's environment,
        // this must never panic and must produce some language tag.
        let _ = default_language();
    }

    #[test]
    fn malformed_feature_spec_is_rejected() {
        assert!(parse_feature("not a feature!!").is_none());
    }

    #[test]
    fn well_formed_feature_spec_parses() {
        assert!(parse_feature("liga").is_some());
        assert!(parse_feature("-kern").is_some());
    }
}
