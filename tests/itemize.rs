//! Integration tests exercising the bidi → script → run-splitting pipeline
//! end to end. Shaping itself needs a real OpenType font on disk, so it is
//! left to `shape`/`glyph`'s own unit tests, which only need to be
//! confident about cluster bookkeeping, not about a specific font's glyph
//! table.

use itemize::bidi::resolve;
use itemize::runs::split;
use itemize::script::resolve_scripts;
use itemize::Direction;

fn itemize(text: &str, direction: Direction) -> Vec<(usize, usize, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let bidi_result = resolve(&chars, direction).unwrap();
    let scripts = resolve_scripts(&chars);
    let force_ttb = direction == Direction::Ttb;
    split(&bidi_result.runs, &scripts, force_ttb)
        .into_iter()
        .map(|run| (run.start, run.len, run.direction == itemize::runs::RunDirection::Rtl))
        .collect()
}

#[test]
fn pure_latin_paragraph_is_one_run() {
    let runs = itemize("Hello, world!", Direction::Ltr);
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0], (0, 13, false));
}

#[test]
fn latin_word_parenthesized_inside_arabic_keeps_brackets_with_arabic() {
    // Scenario: Arabic text with a parenthesized Latin aside.
    let text = "\u{0627}\u{0644}\u{0633}\u{0644}\u{0627}\u{0645} (OK) \u{0645}\u{0631}\u{062D}\u{0628}\u{0627}";
    let chars: Vec<char> = text.chars().collect();
    let bidi_result = resolve(&chars, Direction::Default).unwrap();
    let scripts = resolve_scripts(&chars);
    assert_eq!(bidi_result.resolved_direction, Direction::Rtl);
    // The parenthesized Latin span still carries its own script even
    // though the paragraph resolves RTL; only the brackets around it track
    // the surrounding Arabic script.
    let open_paren = chars.iter().position(|&c| c == '(').unwrap();
    assert_eq!(scripts[open_paren], itemize::script::Script::Arabic);
}

#[test]
fn mixed_ltr_rtl_ltr_splits_into_three_visual_runs() {
    let runs = itemize("abc\u{0644}\u{0627}\u{0645}xyz", Direction::Ltr);
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].2, false);
    assert_eq!(runs[1].2, true);
    assert_eq!(runs[2].2, false);
}

#[test]
fn script_change_within_a_single_bidi_run_adds_a_split() {
    // Latin then Han, both LTR: one bidi run, two script runs.
    let runs = itemize("abc\u{6F22}\u{5B57}", Direction::Ltr);
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0], (0, 3, false));
    assert_eq!(runs[1], (3, 2, false));
}

#[test]
fn ttb_direction_forces_single_run_regardless_of_script_mix() {
    let runs = itemize("abc\u{0644}\u{0627}\u{0645}", Direction::Ttb);
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0], (0, 6, false));
}

#[test]
fn empty_paragraph_itemizes_to_no_runs() {
    let runs = itemize("", Direction::Ltr);
    assert!(runs.is_empty());
}

proptest::proptest! {
    #[test]
    fn itemization_never_panics_on_arbitrary_text(text in ".{0,40}") {
        let chars: Vec<char> = text.chars().collect();
        if let Ok(bidi_result) = resolve(&chars, Direction::Default) {
            let scripts = resolve_scripts(&chars);
            let _ = split(&bidi_result.runs, &scripts, false);
        }
    }

    #[test]
    fn script_runs_cover_every_scalar_exactly_once(text in "[a-zA-Z0-9\u{0600}-\u{06FF} ]{1,40}") {
        let chars: Vec<char> = text.chars().collect();
        let bidi_result = resolve(&chars, Direction::Ltr).unwrap();
        let scripts = resolve_scripts(&chars);
        let script_runs = split(&bidi_result.runs, &scripts, false);
        let total: usize = script_runs.iter().map(|r| r.len).sum();
        proptest::prop_assert_eq!(total, chars.len());
    }
}
