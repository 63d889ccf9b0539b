//! Integration tests for classification and table building.

use unpaste::detect::{classify, detect_delimiter, is_definite_data_table, table_stats};
use unpaste::render::{grid_to_node, structured_to_node, to_text};
use unpaste::table::{self, is_empty_cell, parse_first_table, HtmlNode, TableBuilder};
use unpaste::{ClipboardPayload, ContentCategory, Delimiter, Error, Inline};

// ==================== Classification Tests ====================

#[test]
fn test_classify_examples() {
    let tsv = ClipboardPayload::text("a\tb\nc\td\n");
    assert_eq!(classify(&tsv).category(), ContentCategory::TabularText);

    let prose = ClipboardPayload::text("one two three");
    assert_eq!(classify(&prose).category(), ContentCategory::ProseText);
}

#[test]
fn test_tabular_text_wins_over_html() {
    let payload = ClipboardPayload::text("a\tb\nc\td")
        .with_html("<table><tr><th>a</th><th>b</th></tr><tr><td>c</td><td>d</td></tr></table>");
    assert_eq!(classify(&payload).category(), ContentCategory::TabularText);
}

#[test]
fn test_spreadsheet_rows_with_leading_empty_cells() {
    let text = "\t\tQ1\tQ2\nNorth\t\t10\t12\nSouth\t\t8\t9\n";
    assert_eq!(detect_delimiter(text), Some(Delimiter::Tab));

    let grid = table::from_tsv(text).unwrap();
    assert_eq!(grid.column_count(), 4);
    assert_eq!(grid.cell(0, 0), Some(""));
    assert_eq!(grid.cell(0, 2), Some("Q1"));
}

#[test]
fn test_tab_only_paste_is_empty() {
    let payload = ClipboardPayload::text("\t\n\t\n");
    assert_eq!(classify(&payload).category(), ContentCategory::Empty);
    assert!(unpaste::paste_nodes(&payload).unwrap().is_empty());
}

#[test]
fn test_border_zero_single_cell_is_not_data() {
    let html = r#"<table border="0"><tr><td>Hello</td></tr></table>"#;
    assert!(!is_definite_data_table(html));

    let payload = ClipboardPayload::text("Hello").with_html(html);
    assert_eq!(classify(&payload).category(), ContentCategory::ProseText);
}

#[test]
fn test_table_stats_counts() {
    let html = "<table><thead><tr><th>A</th><th>B</th></tr></thead>\
                <tbody><tr><td>1</td><td>2</td></tr><tr><td>3</td><td>4</td></tr></tbody></table>";
    let stats = table_stats(html).unwrap();
    assert_eq!(stats.rows, 3);
    assert_eq!(stats.cells, 6);
    assert_eq!(stats.header_cells, 2);
    assert!(stats.is_definite());
}

// ==================== TSV Tests ====================

#[test]
fn test_tsv_grid_shape() {
    let text = "a\tb\tc\nd\ne\tf\n";
    let grid = table::from_tsv(text).unwrap();

    assert_eq!(grid.row_count(), 3);
    for row in grid.rows() {
        assert_eq!(row.len(), 3);
    }
    assert_eq!(grid.cell(1, 1), Some(""));
    assert_eq!(grid.cell(2, 2), Some(""));
}

#[test]
fn test_tsv_keeps_interior_blank_line() {
    let grid = table::from_tsv("a\tb\n\nc\td\n").unwrap();
    assert_eq!(grid.row_count(), 3);
    assert_eq!(grid.rows()[1], vec![String::new(), String::new()]);
}

#[test]
fn test_tsv_normalizes_cells() {
    let grid = table::from_tsv(" a\u{00A0}b \tc\u{200B}d\r\n").unwrap();
    assert_eq!(grid.cell(0, 0), Some("a b"));
    assert_eq!(grid.cell(0, 1), Some("cd"));
}

#[test]
fn test_limit_is_inclusive() {
    let line = vec!["x"; 40].join("\t");
    let text = vec![line; 50].join("\n");
    let grid = table::from_tsv(&text).unwrap();
    assert_eq!(grid.cell_count(), 2000);

    let builder = TableBuilder::new().with_max_cells(1999);
    assert!(matches!(
        builder.from_tsv(&text),
        Err(Error::TooManyCells {
            cells: 2000,
            limit: 1999
        })
    ));
}

// ==================== HTML Tests ====================

#[test]
fn test_from_html_to_node() {
    let html = "<table><tr><th>Name</th><th>Age</th></tr>\
                <tr><td>Alice</td><td>30</td></tr>\
                <tr><td></td><td> </td></tr></table>";
    let grid = table::from_html(html).unwrap();
    assert_eq!(grid.row_count(), 2);

    let node = grid_to_node(&grid);
    assert_eq!(to_text(&[node]), "Name\tAge\nAlice\t30");
}

#[test]
fn test_from_html_errors() {
    assert!(matches!(table::from_html("<p>text</p>"), Err(Error::NoTable)));
    assert!(matches!(
        table::from_html("<table><tr><td></td></tr></table>"),
        Err(Error::EmptyTable)
    ));
}

#[test]
fn test_sanitize_structured_keeps_spans() {
    let html = r#"<table class="report">
        <tr><th rowspan="2" style="width:10px">Region</th><th colspan="2">Sales</th></tr>
        <tr><td>Q1</td><td>Q2</td></tr>
        <tr><td><p>North</p><p>East</p></td><td><i>10</i></td><td><div><strong>12</strong></div></td></tr>
        <tr><td>&nbsp;</td><td><span></span></td><td></td></tr>
    </table>"#;
    let table = table::sanitize_structured(html).unwrap();

    assert_eq!(table.row_count(), 3);
    assert!(table.has_merged_cells());
    assert_eq!(table.rows[0].cells[0].rowspan, 2);
    assert_eq!(table.rows[0].cells[1].colspan, 2);
    assert_eq!(
        table.rows[2].cells[0].content,
        vec![
            Inline::Text("North".into()),
            Inline::LineBreak,
            Inline::Text("East".into())
        ]
    );
    assert_eq!(
        table.rows[2].cells[2].content,
        vec![Inline::Bold(vec![Inline::Text("12".into())])]
    );

    let node = structured_to_node(&table);
    assert_eq!(node.children().len(), 3);
}

#[test]
fn test_sanitized_html_output() {
    let html = r#"<table><tr><td colspan="2" class="x"><em>a</em> <u>b</u></td></tr></table>"#;
    let table = table::sanitize_structured(html).unwrap();
    assert_eq!(
        table.to_html(),
        r#"<table><tr><td colspan="2"><i>a</i> b</td></tr></table>"#
    );
}

#[test]
fn test_empty_cell_predicate_on_parsed_table() {
    let html = "<table><tr><td><b> </b></td><td><img src=\"a.png\"></td>\
                <td><a href=\"https://example.com\"></a></td><td>0</td></tr></table>";
    let parsed = parse_first_table(html).unwrap();
    let cells = &parsed.rows[0];

    assert!(is_empty_cell(&cells[0]));
    assert!(!is_empty_cell(&cells[1]));
    assert!(!is_empty_cell(&cells[2]));
    assert!(!is_empty_cell(&cells[3]));

    let detached = HtmlNode::element("td", &[], vec![HtmlNode::text("\u{200B}")]);
    assert!(is_empty_cell(&detached));
}
