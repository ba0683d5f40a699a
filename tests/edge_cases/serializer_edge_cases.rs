//! Edge cases for cell stringification, serialization and rendering

use sheetdiff::render::escape_html;
use sheetdiff::{diff, render_markup, render_plain_text, serialize, CellValue, DiffOp, Sheet};

#[test]
fn test_zero_row_sheet_is_empty_string() {
    assert_eq!(serialize(&Sheet::new("Empty", Vec::new())), "");
}

#[test]
fn test_empty_rows_and_cells() {
    let sheet = Sheet::new(
        "Sparse",
        vec![
            vec![],
            vec![CellValue::Empty, CellValue::Empty],
            vec![],
        ],
    );
    assert_eq!(serialize(&sheet), "\n'','',\n\n");
}

#[test]
fn test_numbers_and_booleans() {
    let sheet = Sheet::new(
        "Numbers",
        vec![vec![
            CellValue::Number(1.0),
            CellValue::Number(-2.5),
            CellValue::Number(1e21),
            CellValue::Number(0.1),
            CellValue::Bool(true),
        ]],
    );
    assert_eq!(
        serialize(&sheet),
        "'1','-2.5','1000000000000000000000','0.1','TRUE',\n"
    );
}

#[test]
fn test_non_finite_numbers_do_not_fail() {
    let sheet = Sheet::new(
        "Weird",
        vec![vec![
            CellValue::Number(f64::NAN),
            CellValue::Number(f64::INFINITY),
        ]],
    );
    assert_eq!(serialize(&sheet), "'NaN','inf',\n");
}

#[test]
fn test_delimiters_inside_cells_are_kept_verbatim() {
    let sheet = Sheet::from_text_rows("Quotes", &[&["it's", "a,b", "line\nbreak"]]);
    assert_eq!(serialize(&sheet), "'it's','a,b','line\nbreak',\n");
}

#[test]
fn test_formula_cells_keep_authored_text() {
    let sheet = Sheet::from_text_rows("F", &[&["=A1+B1", "=VLOOKUP(A2,Data!A:B,2,FALSE)"]]);
    assert_eq!(
        serialize(&sheet),
        "'=A1+B1','=VLOOKUP(A2,Data!A:B,2,FALSE)',\n"
    );
}

#[test]
fn test_markup_never_emits_raw_specials() {
    let old = "'<a href=\"x\">link</a>',\n";
    let new = "'<img src=x onerror=alert(1)>',\n";
    let markup = render_markup(&diff(old, new));

    // Only our own tags may appear
    let stripped = markup
        .replace("<span class=\"diff-equal\">", "")
        .replace("</span>", "")
        .replace("<ins class=\"diff-insert\">", "")
        .replace("</ins>", "")
        .replace("<del class=\"diff-delete\">", "")
        .replace("</del>", "")
        .replace("<br>", "");
    assert!(!stripped.contains('<'));
    assert!(!stripped.contains('>'));
    assert!(!stripped.contains('"'));
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html("a & b"), "a &amp; b");
    assert_eq!(escape_html("'x'"), "&#39;x&#39;");
    assert_eq!(escape_html("1\n2"), "1&para;<br>2");
    assert_eq!(escape_html("東京"), "東京");
}

#[test]
fn test_plain_text_with_only_changes() {
    let ops = vec![DiffOp::delete("old"), DiffOp::insert("new")];
    assert_eq!(render_plain_text(&ops), "[-old-]{+new+}");
}

#[test]
fn test_sheet_emptied() {
    let old = Sheet::from_text_rows("S", &[&["a"], &["b"]]);
    let new = Sheet::new("S", Vec::new());
    let ops = diff(&serialize(&old), &serialize(&new));
    assert_eq!(ops, vec![DiffOp::delete("'a',\n'b',\n")]);
}
