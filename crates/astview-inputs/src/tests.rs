use crate::{ContentChange, Document, LineCol, Position, Range, TextRange, TextSize};

fn document(text: &str) -> Document {
    Document::new("/workspace/main.ts", text.to_owned())
}

#[test]
fn positions_count_utf16_code_units() {
    let doc = document("let s = \"😀\";\nx;\n");

    let semicolon = TextSize::from(u32::try_from(doc.text().find(';').unwrap()).unwrap());
    assert_eq!(doc.position(semicolon), Position::new(0, 12));
    assert_eq!(doc.offset(Position::new(0, 12)), semicolon);

    assert_eq!(doc.position(TextSize::from(16)), Position::new(1, 0));
    assert_eq!(doc.offset(Position::new(1, 1)), TextSize::from(17));
}

#[test]
fn offsets_clamp_to_line_and_text_end() {
    let doc = document("ab\r\ncd");

    assert_eq!(doc.offset(Position::new(0, 40)), TextSize::from(2));
    assert_eq!(doc.offset(Position::new(1, 40)), TextSize::from(6));
    assert_eq!(doc.offset(Position::new(9, 0)), doc.len());
    assert_eq!(doc.position(TextSize::from(100)), Position::new(1, 2));
}

#[test]
fn offsets_inside_a_surrogate_pair_snap_to_the_char_start() {
    let mut doc = document("a😀b;\n");

    assert_eq!(doc.offset(Position::new(0, 2)), TextSize::from(1));
    assert_eq!(doc.offset(Position::new(0, 3)), TextSize::from(5));

    let inside = Position::new(0, 2);
    let edit = doc.apply_change(ContentChange::replace(Range::new(inside, inside), "x")).unwrap();

    assert_eq!(doc.text(), "ax😀b;\n");
    assert_eq!(edit.start, TextSize::from(1));
    assert_eq!(edit.start_point, LineCol { line: 0, col: 1 });
    assert_eq!(edit.new_end_point, LineCol { line: 0, col: 2 });
}

#[test]
fn range_maps_both_ends() {
    let doc = document("const x = 1;\nconst y = 2;\n");
    let range = doc.range(TextRange::new(19.into(), 20.into()));

    assert_eq!(range, Range::new(Position::new(1, 6), Position::new(1, 7)));
}

#[test]
fn span_change_reports_edit_points() {
    let mut doc = document("const x = 1;\nlet y;\n");

    let edit = doc
        .apply_change(ContentChange::replace(
            Range::new(Position::new(0, 10), Position::new(0, 11)),
            "42 +\n 1",
        ))
        .unwrap();

    assert_eq!(doc.text(), "const x = 42 +\n 1;\nlet y;\n");
    assert_eq!(edit.start, TextSize::from(10));
    assert_eq!(edit.old_end, TextSize::from(11));
    assert_eq!(edit.new_end, TextSize::from(17));
    assert_eq!(edit.start_point, LineCol { line: 0, col: 10 });
    assert_eq!(edit.old_end_point, LineCol { line: 0, col: 11 });
    assert_eq!(edit.new_end_point, LineCol { line: 1, col: 2 });
    assert_eq!(doc.position(TextSize::from(25)), Position::new(2, 6));
}

#[test]
fn deletion_collapses_to_start() {
    let mut doc = document("foo(bar);");

    let edit = doc
        .apply_change(ContentChange::replace(
            Range::new(Position::new(0, 4), Position::new(0, 7)),
            "",
        ))
        .unwrap();

    assert_eq!(doc.text(), "foo();");
    assert_eq!(edit.new_end, edit.start);
    assert_eq!(edit.old_end, TextSize::from(7));
}

#[test]
fn changes_apply_against_the_previous_result() {
    let mut doc = document("a\nb\n");

    doc.apply_change(ContentChange::replace(
        Range::new(Position::new(0, 0), Position::new(0, 0)),
        "x\n",
    ));
    let edit = doc
        .apply_change(ContentChange::replace(
            Range::new(Position::new(2, 0), Position::new(2, 1)),
            "c",
        ))
        .unwrap();

    assert_eq!(doc.text(), "x\na\nc\n");
    assert_eq!(edit.start, TextSize::from(4));
}

#[test]
fn full_change_replaces_text() {
    let mut doc = document("old");

    assert_eq!(doc.apply_change(ContentChange::full("new text\n")), None);
    assert_eq!(doc.text(), "new text\n");
    assert_eq!(doc.position(doc.len()), Position::new(1, 0));
}
