//! Edit gating tests: admission, rejection, length limits and line shifting

mod common;

use common::{
    editable, editor, editor_with, line, lines, pos, replace, TWO_BLOCKS, TWO_LINE_BLOCK,
};
use editlock::config::EditorConfig;
use editlock::region::{LineDelta, Origin, RejectReason, Section, Verdict};

// ========================================================================
// Admission
// ========================================================================

#[test]
fn test_typing_on_locked_line_is_rejected() {
    let mut ed = editor(TWO_LINE_BLOCK);
    let before = ed.session().regions().clone();

    let verdict = ed.insert(pos(2, 0), "x");

    assert_eq!(verdict, Verdict::Rejected(RejectReason::OutsideEditableRegion));
    assert_eq!(ed.text(), "foo\nbar\nbaz");
    assert_eq!(ed.session().regions(), &before);
}

#[test]
fn test_typing_on_editable_line() {
    let mut ed = editor(TWO_LINE_BLOCK);
    let verdict = ed.insert(pos(1, 3), "!");
    assert_eq!(verdict, Verdict::Accepted { lines: LineDelta::Unchanged });
    assert_eq!(ed.text(), "foo\nbar!\nbaz");
}

#[test]
fn test_delete_across_block_edge_is_judged_by_to_line() {
    let mut ed = editor(TWO_LINE_BLOCK);
    // `to` on the locked line
    let verdict = ed.delete(pos(1, 3), pos(2, 0));
    assert!(verdict.is_rejected());
    assert_eq!(ed.text(), "foo\nbar\nbaz");
}

// ========================================================================
// Line shifting
// ========================================================================

#[test]
fn test_paste_at_block_end_grows_block() {
    let mut ed = editor(TWO_LINE_BLOCK);
    let verdict = ed.insert(pos(1, 3), "\nx\ny");

    assert!(verdict.is_accepted());
    assert_eq!(ed.text(), "foo\nbar\nx\ny\nbaz");
    assert_eq!(editable(&ed), lines(&[0, 1, 2, 3]));
}

#[test]
fn test_paste_shifts_later_block() {
    let mut ed = editor(TWO_BLOCKS);
    assert_eq!(editable(&ed), lines(&[0, 1, 5]));

    ed.insert(pos(1, 3), "\nx\ny");

    assert_eq!(editable(&ed), lines(&[0, 1, 2, 3, 7]));
    assert_eq!(line(&ed, 7), "q");
}

#[test]
fn test_enter_mid_block_extends_block_end() {
    let mut ed = editor(TWO_BLOCKS);
    ed.insert(pos(0, 1), "\n");
    assert_eq!(ed.text().lines().next(), Some("f"));
    assert_eq!(editable(&ed), lines(&[0, 1, 2, 6]));
}

#[test]
fn test_multi_line_delete_shrinks_block() {
    let mut ed = editor(TWO_BLOCKS);
    ed.insert(pos(1, 3), "\nx\ny");

    let verdict = ed.delete(pos(1, 3), pos(3, 1));

    assert_eq!(
        verdict,
        Verdict::Accepted {
            lines: LineDelta::Removed {
                count: 2,
                segment_end: 3
            }
        }
    );
    assert_eq!(ed.text(), "foo\nbar\nl2\nl3\nl4\nq\ntail");
    assert_eq!(editable(&ed), lines(&[0, 1, 5]));
}

#[test]
fn test_joining_lines_pulls_later_block_up() {
    let mut ed = editor(TWO_BLOCKS);
    ed.delete(pos(0, 3), pos(1, 3));
    assert_eq!(ed.text(), "foo\nl2\nl3\nl4\nq\ntail");
    assert_eq!(editable(&ed), lines(&[0, 4]));
    assert_eq!(line(&ed, 4), "q");
}

// ========================================================================
// Length enforcement
// ========================================================================

#[test]
fn test_insert_truncated_to_limit() {
    let config = EditorConfig {
        char_limit: 5,
        ..Default::default()
    };
    let mut ed = editor_with("#BEGIN_EDITABLE#\nabc\n#END_EDITABLE#", config);

    let verdict = ed.insert(pos(0, 3), "12345");

    assert_eq!(
        verdict,
        Verdict::Truncated {
            lines: LineDelta::Unchanged,
            dropped: 3
        }
    );
    assert_eq!(ed.text(), "abc12");
}

#[test]
fn test_full_line_accepts_nothing() {
    let config = EditorConfig {
        char_limit: 3,
        ..Default::default()
    };
    let mut ed = editor_with("#BEGIN_EDITABLE#\nabc\n#END_EDITABLE#", config);
    ed.insert(pos(0, 1), "zz");
    assert_eq!(ed.text(), "abc");
}

#[test]
fn test_replacement_counts_removed_chars() {
    let config = EditorConfig {
        char_limit: 5,
        ..Default::default()
    };
    let mut ed = editor_with("#BEGIN_EDITABLE#\nabcde\n#END_EDITABLE#", config);
    let verdict = ed.apply(replace(Origin::Input, pos(0, 1), pos(0, 4), "XYZ"));
    assert!(verdict.is_accepted());
    assert_eq!(ed.text(), "aXYZe");
}

#[test]
fn test_line_length_never_exceeds_limit() {
    let mut ed = editor("#BEGIN_EDITABLE#\n\n#END_EDITABLE#");
    for _ in 0..10 {
        let end = line(&ed, 0).chars().count();
        ed.insert(pos(0, end), "0123456789abc");
    }
    assert_eq!(line(&ed, 0).chars().count(), 80);
}

// ========================================================================
// Inline sections
// ========================================================================

#[test]
fn test_typing_inside_section_moves_end() {
    let mut ed = editor("x = #{#50#}#;");
    let verdict = ed.insert(pos(0, 5), "0");

    assert!(verdict.is_accepted());
    assert_eq!(ed.text(), "x = 500;");
    assert_eq!(
        ed.session().regions().sections_on(0),
        Some(&[Section::new(4, 7)][..])
    );
    assert_eq!(ed.export_player_contributions(), "500\n");
}

#[test]
fn test_section_boundary_is_outside() {
    let mut ed = editor("x = #{#50#}#;");
    assert!(ed.insert(pos(0, 4), "1").is_rejected());
    assert!(ed.insert(pos(0, 6), "1").is_rejected());
    assert_eq!(ed.text(), "x = 50;");
}

#[test]
fn test_edit_in_first_section_shifts_second() {
    let mut ed = editor("f(#{#ab#}#, #{#cd#}#)");
    ed.apply(replace(Origin::Input, pos(0, 3), pos(0, 3), "xyz"));
    assert_eq!(ed.text(), "f(axyzb, cd)");
    assert_eq!(
        ed.session().regions().sections_on(0),
        Some(&[Section::new(2, 7), Section::new(9, 11)][..])
    );
}

#[test]
fn test_multi_line_paste_into_section_rejected() {
    let mut ed = editor("x = #{#50#}#;");
    let verdict = ed.insert(pos(0, 5), "1\n2");
    assert_eq!(verdict, Verdict::Rejected(RejectReason::MultiLineInSection));
    assert_eq!(ed.text(), "x = 50;");
}

#[test]
fn test_section_line_follows_inserted_lines() {
    let mut ed = editor("#BEGIN_EDITABLE#\na\n#END_EDITABLE#\nx = #{#5#}#;");
    ed.insert(pos(0, 1), "\nb");
    let regions = ed.session().regions();
    assert_eq!(regions.sections_on(1), None);
    assert_eq!(regions.sections_on(2), Some(&[Section::new(4, 5)][..]));
    assert_eq!(ed.export_player_contributions(), "a\nb\n5\n");
}

#[test]
fn test_pinned_sections_when_shift_disabled() {
    let config = EditorConfig {
        shift_sections: false,
        ..Default::default()
    };
    let mut ed = editor_with("#BEGIN_EDITABLE#\na\n#END_EDITABLE#\nx = #{#5#}#;", config);
    ed.insert(pos(0, 1), "\nb");
    assert_eq!(
        ed.session().regions().sections_on(1),
        Some(&[Section::new(4, 5)][..])
    );
}
