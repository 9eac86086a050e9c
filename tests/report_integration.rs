use textbook_price_list::{
    ExtractedTable, ImportOptions, LineItem, RawDocument, ReportLayout, ReportOptions,
    ScanOptions, Session, TEMPLATE_CSV, grade_totals, grand_total, import_selection_matrix,
    publisher_totals, render_report,
};

fn sample_document() -> RawDocument {
    RawDocument::from_tables(vec![ExtractedTable::from_rows([
        vec!["年級", "科目", "冊別", "項目", "南一", "康軒", "翰林"],
        vec!["1", "國語", "2", "課本", "99", "102", "95"],
        vec!["1", "國語", "2", "習作", "40", "38", "36"],
        vec!["1", "數學", "2", "課本", "110", "98", "107"],
        vec!["1", "數學", "2", "習作", "45", "34", "41"],
        vec!["3", "數學", "5", "課本", "120", "115", "118"],
        vec!["3", "數學", "6", "課本", "122", "117", "119"],
        vec!["3", "數學", "6", "習作", "50", "47", "48"],
        vec!["3", "自然科學", "6", "課本", "130", "125", "128"],
        vec!["6", "健康與體育", "12", "課本", "88", "90", "86"],
    ])])
}

fn loaded_session() -> Session {
    let mut session = Session::new();
    session
        .load_document("prices.pdf", &sample_document())
        .expect("load sample");
    session
}

const MATRIX: &str = "\u{feff}教科書一覽表,,,
科目/年級,一年級,三年級,六年級
國語,康軒,,
數學,南一,翰林,
自然科學,,南一,
書法,南一,,
";

#[test]
fn importer_resolves_subjects_volumes_and_prices() {
    let mut session = loaded_session();
    let summary = session
        .import_matrix(MATRIX.as_bytes(), &ImportOptions::default())
        .expect("import");

    // 書法 has no match in the database for grade 1.
    assert_eq!(summary.added, 4);
    assert_eq!(summary.skipped, 1);

    let items = session.cart().items();
    assert_eq!(items[0].grade, "1年");
    assert_eq!(items[0].subject, "國語");
    assert_eq!(items[0].publisher, "康軒");
    assert_eq!(items[0].subtotal, 102 + 38);

    assert_eq!(items[1].subject, "數學");
    assert_eq!(items[1].grade, "1年");
    assert_eq!(items[1].subtotal, 110 + 45);

    // Grade 3 has volumes {5, 6}; 3 × 2 = 6 wins.
    assert_eq!(items[2].grade, "3年");
    assert_eq!(items[2].volume, "6");
    assert_eq!(items[2].publisher, "翰林");
    assert_eq!(items[2].subtotal, 119 + 48);

    assert_eq!(items[3].subject, "自然科學");
    assert_eq!(items[3].volume, "6");
}

#[test]
fn importer_volume_fallback_picks_the_first_sorted_volume() {
    let doc = RawDocument::from_tables(vec![ExtractedTable::from_rows([
        vec!["年級", "科目", "冊別", "項目", "南一"],
        vec!["3", "數學", "1", "課本", "100"],
        vec!["3", "數學", "3", "課本", "103"],
    ])]);
    let db = doc.parse_prices(&ScanOptions::default()).expect("parse");

    let matrix = "科目/年級,三年級\n數學,南一\n";
    let (items, summary) =
        import_selection_matrix(&db, matrix.as_bytes(), &ImportOptions::default())
            .expect("import");
    assert_eq!(summary.added, 1);
    // No volume contains "6", so the first of {1, 3} is taken.
    assert_eq!(items[0].volume, "1");
    assert_eq!(items[0].textbook_price, 100);
}

#[test]
fn fuzzy_matching_and_unpriced_cells_follow_the_options() {
    let db = sample_document()
        .parse_prices(&ScanOptions::default())
        .expect("parse");

    // 自然 only matches 自然科學 with fuzzy matching on.
    let matrix = "科目/年級,三年級\n自然,南一\n";
    let strict = import_selection_matrix(&db, matrix.as_bytes(), &ImportOptions::default())
        .expect("strict import");
    assert_eq!(strict.1.added, 0);
    assert_eq!(strict.1.skipped, 1);

    let fuzzy = ImportOptions {
        fuzzy_subjects: true,
        ..ImportOptions::default()
    };
    let (items, summary) =
        import_selection_matrix(&db, matrix.as_bytes(), &fuzzy).expect("fuzzy import");
    assert_eq!(summary.added, 1);
    assert_eq!(items[0].subject, "自然科學");
    assert_eq!(items[0].volume, "6");
    assert_eq!(items[0].subtotal, 130);

    // 育成 has no prices recorded: dropped by default, kept when permissive.
    let matrix = "科目/年級,一年級\n國語,育成\n";
    let default = import_selection_matrix(&db, matrix.as_bytes(), &ImportOptions::default())
        .expect("default import");
    assert_eq!(default.1.added, 0);

    let permissive = ImportOptions {
        require_priced: false,
        ..ImportOptions::default()
    };
    let (items, _) =
        import_selection_matrix(&db, matrix.as_bytes(), &permissive).expect("permissive import");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].subtotal, 0);
}

#[test]
fn matrix_without_a_grade_header_is_a_hard_error() {
    let db = sample_document()
        .parse_prices(&ScanOptions::default())
        .expect("parse");
    let matrix = "教科書一覽表,,,\n國語,康軒,,\n";
    assert!(import_selection_matrix(&db, matrix.as_bytes(), &ImportOptions::default()).is_err());
}

#[test]
fn template_round_trips_through_the_importer() {
    let mut session = loaded_session();
    let summary = session
        .import_matrix(TEMPLATE_CSV.as_bytes(), &ImportOptions::default())
        .expect("import template");
    // The sample database covers only a slice of the template, but the
    // template's shape must parse without a structural error.
    assert!(summary.added > 0);
    for item in session.cart().items() {
        assert_eq!(item.subtotal, item.textbook_price + item.workbook_price);
    }
}

fn manual_cart() -> Vec<LineItem> {
    vec![
        LineItem::new("1年", "國語", "康軒", "2", 102, 38),
        LineItem::new("1年", "數學", "南一", "2", 110, 45),
        LineItem::new("3年", "數學", "翰林", "6", 119, 48),
    ]
}

#[test]
fn totals_on_top_layout_is_pinned_and_aligned() {
    let items = manual_cart();
    let rows = render_report(&items, &ReportOptions::default());

    // 2 + 4 × (largest per-grade item count) rows.
    assert_eq!(rows.len(), 2 + 4 * 2);

    assert_eq!(
        rows[0],
        ["【1年】", "", "", "", "", "【3年】", "", "", "", ""]
    );
    assert_eq!(
        rows[1],
        ["★年級總計", "", "", "295", "", "★年級總計", "", "", "167", ""]
    );
    assert_eq!(rows[2], [""]);
    assert_eq!(
        rows[3],
        ["科目", "國語", "課本", "102", "", "科目", "數學", "課本", "119", ""]
    );
    assert_eq!(
        rows[4],
        ["版本", "康軒", "習作", "38", "", "版本", "翰林", "習作", "48", ""]
    );
    assert_eq!(
        rows[5],
        ["冊別", "2", "小計", "140", "", "冊別", "6", "小計", "167", ""]
    );
    // Second block: grade 3 ran out of items, so its column stays blank.
    assert_eq!(rows[6], [""]);
    assert_eq!(
        rows[7],
        ["科目", "數學", "課本", "110", "", "", "", "", "", ""]
    );
    assert_eq!(
        rows[9],
        ["冊別", "2", "小計", "155", "", "", "", "", "", ""]
    );
}

#[test]
fn spaced_blocks_layout_separates_grades_with_a_blank_column() {
    let items = manual_cart();
    let rows = render_report(
        &items,
        &ReportOptions {
            layout: ReportLayout::SpacedBlocks,
            include_summary: false,
        },
    );

    assert_eq!(rows[0], ["1年", "", "", "", "", "3年", "", "", ""]);
    assert_eq!(
        rows[1],
        ["科目", "國語", "課本價格", "102", "", "科目", "數學", "課本價格", "119"]
    );
    assert_eq!(
        rows[3],
        ["冊別", "2", "總計金額", "140", "", "冊別", "6", "總計金額", "167"]
    );
}

#[test]
fn summary_section_reports_grade_and_publisher_totals() {
    let items = manual_cart();
    let rows = render_report(
        &items,
        &ReportOptions {
            layout: ReportLayout::TotalsOnTop,
            include_summary: true,
        },
    );

    assert_eq!(rows[0], ["各年級總計"]);
    assert_eq!(rows[1], ["1年", "3年", "總計"]);
    assert_eq!(rows[2], ["295", "167", "462"]);
    assert_eq!(rows[3], ["各版本總計"]);
    assert_eq!(rows[4], ["康軒", "南一", "翰林"]);
    assert_eq!(rows[5], ["140", "155", "167"]);
    assert_eq!(rows[6], [""]);
    // The main layout follows unchanged.
    assert_eq!(rows[7][0], "【1年】");
}

#[test]
fn totals_agree_with_the_grand_total() {
    let items = manual_cart();
    let by_grade = grade_totals(&items);
    let by_publisher = publisher_totals(&items);
    let grand = grand_total(&items);

    assert_eq!(by_grade, [("1年".to_string(), 295), ("3年".to_string(), 167)]);
    assert_eq!(by_grade.iter().map(|(_, t)| t).sum::<u32>(), grand);
    assert_eq!(by_publisher.iter().map(|(_, t)| t).sum::<u32>(), grand);
}

#[test]
fn exported_csv_carries_a_byte_order_mark() {
    let mut session = loaded_session();
    session
        .add_selection("1", "數學", "2", "南一")
        .expect("select");
    let bytes = session
        .export_report(&ReportOptions::default())
        .expect("export")
        .expect("non-empty cart");
    assert_eq!(&bytes[..3], [0xef, 0xbb, 0xbf]);
    let text = std::str::from_utf8(&bytes[3..]).expect("utf-8 body");
    assert!(text.starts_with("【1年】"));
}

#[test]
fn exporting_an_empty_cart_is_a_no_op() {
    let session = Session::new();
    let result = session
        .export_report(&ReportOptions::default())
        .expect("export");
    assert!(result.is_none());
}

#[test]
fn cart_edits_are_bounded() {
    let mut session = loaded_session();
    session
        .add_selection("1", "數學", "2", "南一")
        .expect("select");
    assert!(session.remove_item(5).is_none());
    assert!(session.remove_item(0).is_some());
    assert!(session.cart().is_empty());
    // Clearing an already empty cart is fine.
    session.clear_cart();
}
