use astview_inputs::{ContentChange, Document, Position, Range};
use camino::Utf8Path;
use expect_test::expect;

use crate::{ChangeBridge, Collapsible, NodePath, ReparsePolicy, TreeAdapter, TreeUpdate};

const MAIN: &str = "main.ts";

fn adapter() -> TreeAdapter {
    TreeAdapter::new(astview_compiler::resolve("typescript").unwrap())
}

fn parsed(text: &str) -> TreeAdapter {
    let mut tree = adapter();
    tree.parse(text, Utf8Path::new(MAIN));
    tree
}

fn replace(start: (u32, u32), end: (u32, u32), text: &str) -> ContentChange {
    let range = Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1));
    ContentChange::replace(range, text)
}

fn fresh_dump(text: &str) -> String {
    parsed(text).dump(text)
}

#[test]
fn dump_variable_declaration() {
    let text = "const x = 1;";

    expect![[r#"
        program [0, 12)
          lexical_declaration [0, 12)
            const [0, 5)
            variable_declarator [6, 11)
              identifier [6, 7) "x"
              = [8, 9)
              number [10, 11)
            ; [11, 12)
    "#]]
    .assert_eq(&fresh_dump(text));
}

#[test]
fn root_children_span_the_statement() {
    let text = "const x = 1;";
    let tree = parsed(text);

    let roots = tree.children(None);
    assert_eq!(roots, vec![NodePath::from(vec![0])]);

    let item = tree.describe(&roots[0], text).unwrap();
    assert_eq!(item.label, "lexical_declaration [0, 12)");
    assert_eq!(item.kind, "lexical_declaration");
    assert_eq!(u32::from(item.range.start()), 0);
    assert_eq!(u32::from(item.range.end()), text.len() as u32);
    assert_eq!(item.description, None);
    assert_eq!(item.collapsible, Collapsible::Collapsed);
    assert!(!item.error);
}

#[test]
fn identifiers_describe_their_text() {
    let text = "const x = 1;";
    let tree = parsed(text);

    let identifier = tree.describe(&NodePath::from(vec![0, 1, 0]), text).unwrap();
    assert_eq!(identifier.kind, "identifier");
    assert_eq!(identifier.description.as_deref(), Some("x"));
    assert_eq!(identifier.collapsible, Collapsible::None);

    let keyword = tree.describe(&NodePath::from(vec![0, 0]), text).unwrap();
    assert_eq!(keyword.label, "const [0, 5)");
    assert_eq!(keyword.description, None);
}

#[test]
fn collapsible_iff_node_has_children() {
    let text = "class A { private b = this.c; }\nfoo(a, { d });\n";
    let tree = parsed(text);

    let mut pending = vec![NodePath::root()];
    while let Some(path) = pending.pop() {
        let children = tree.children(Some(&path));
        let item = tree.describe(&path, text).unwrap();
        let expected =
            if children.is_empty() { Collapsible::None } else { Collapsible::Collapsed };
        assert_eq!(item.collapsible, expected, "{}", item.label);
        pending.extend(children);
    }
}

#[test]
fn root_children_are_ordered_and_disjoint() {
    let text = "\n// header\nimport { a } from \"./a\";\n\nexport function f() {\n  return a;\n}\n";
    let tree = parsed(text);

    let ranges: Vec<_> =
        tree.children(None).iter().map(|path| tree.range(path).unwrap()).collect();

    assert_eq!(ranges.len(), 3);
    for pair in ranges.windows(2) {
        assert!(pair[0].end() <= pair[1].start(), "{pair:?}");
    }
    let first = text.len() - text.trim_start().len();
    assert_eq!(usize::from(ranges[0].start()), first);
    assert_eq!(usize::from(ranges[2].end()), text.trim_end().len());
}

#[test]
fn reparse_of_identical_text_is_stable() {
    let text = "type P = { x: number };\nconst p: P = { x: 1 };\n";
    let mut tree = parsed(text);
    let first: Vec<_> = tree
        .children(None)
        .iter()
        .map(|path| tree.describe(path, text).unwrap())
        .collect();

    tree.parse(text, Utf8Path::new(MAIN));
    let second: Vec<_> = tree
        .children(None)
        .iter()
        .map(|path| tree.describe(path, text).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn empty_without_tree() {
    let tree = adapter();

    assert!(tree.children(None).is_empty());
    assert!(tree.describe(&NodePath::root(), "").is_none());
    assert!(tree.syntax_errors().is_empty());
    assert_eq!(tree.dump(""), "");
}

#[test]
fn dangling_paths_resolve_to_nothing() {
    let text = "x;";
    let tree = parsed(text);

    assert!(tree.describe(&NodePath::from(vec![4]), text).is_none());
    assert!(tree.children(Some(&NodePath::from(vec![0, 9]))).is_empty());
    assert!(tree.range(&NodePath::from(vec![0, 0, 0, 0])).is_none());
}

#[test]
fn syntax_errors_are_nodes() {
    let valid = parsed("let a = [1, 2];");
    assert!(valid.syntax_errors().is_empty());

    let text = "let a = [1, 2;\nfunction (";
    let broken = parsed(text);
    let errors = broken.syntax_errors();
    assert!(!errors.is_empty());
    for error in &errors {
        assert!(usize::from(error.range().end()) <= text.len());
    }
    assert!(broken.dump(text).contains(" !\n"));
}

#[test]
fn single_edit_matches_fresh_parse() {
    let mut document = Document::new(MAIN, "let total = price * count;\n".to_owned());
    let mut tree = parsed(document.text());

    let edit = document
        .apply_change(replace((0, 20), (0, 25), "(count + 1)"))
        .unwrap();
    tree.apply_edit(&edit, document.text(), document.path());

    assert_eq!(document.text(), "let total = price * (count + 1);\n");
    assert_eq!(tree.dump(document.text()), fresh_dump(document.text()));
}

#[test]
fn edit_batch_matches_fresh_parse() {
    let mut document = Document::new(
        MAIN,
        "function add(a, b) {\n  return a + b;\n}\nadd(1, 2);\n".to_owned(),
    );
    let mut tree = parsed(document.text());
    let bridge = ChangeBridge::new(ReparsePolicy::Incremental);

    let update = bridge.apply(
        &mut document,
        vec![
            replace((1, 13), (1, 14), "b * 2"),
            replace((3, 4), (3, 5), "10"),
            replace((0, 0), (0, 0), "// math\n"),
        ],
        Some(&mut tree),
    );

    assert_eq!(update, TreeUpdate::Incremental { edits: 3 });
    assert_eq!(
        document.text(),
        "// math\nfunction add(a, b) {\n  return a + b * 2;\n}\nadd(10, 2);\n"
    );
    assert_eq!(tree.dump(document.text()), fresh_dump(document.text()));
}

#[test]
fn full_replacement_forces_reparse() {
    let mut document = Document::new(MAIN, "a;".to_owned());
    let mut tree = parsed(document.text());
    let bridge = ChangeBridge::new(ReparsePolicy::Incremental);

    let update = bridge.apply(
        &mut document,
        vec![ContentChange::full("let b = 2;"), replace((0, 4), (0, 5), "c")],
        Some(&mut tree),
    );

    assert_eq!(update, TreeUpdate::Reparsed);
    assert_eq!(tree.dump(document.text()), fresh_dump("let c = 2;"));
}

#[test]
fn full_policy_always_reparses() {
    let mut document = Document::new(MAIN, "a;".to_owned());
    let mut tree = parsed(document.text());
    let bridge = ChangeBridge::new(ReparsePolicy::Full);

    let update = bridge.apply(&mut document, vec![replace((0, 0), (0, 1), "b")], Some(&mut tree));

    assert_eq!(update, TreeUpdate::Reparsed);
    assert_eq!(tree.dump(document.text()), fresh_dump("b;"));
}

#[test]
fn edits_without_tree_only_touch_the_text() {
    let mut document = Document::new(MAIN, "a;".to_owned());
    let bridge = ChangeBridge::new(ReparsePolicy::Incremental);

    let update = bridge.apply(&mut document, vec![replace((0, 1), (0, 1), "b")], None);

    assert_eq!(update, TreeUpdate::Untouched);
    assert_eq!(document.text(), "ab;");
}

#[test]
fn first_edit_without_loaded_tree_parses() {
    let mut document = Document::new(MAIN, "a;".to_owned());
    let mut tree = adapter();

    let edit = document.apply_change(replace((0, 0), (0, 1), "b")).unwrap();
    tree.apply_edit(&edit, document.text(), document.path());

    assert!(tree.is_loaded());
    assert_eq!(tree.dump(document.text()), fresh_dump("b;"));
}
