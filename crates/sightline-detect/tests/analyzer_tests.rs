//! End-to-end tests: markup in, records and verdict out.

use sightline_detect::{
    AnalysisRecord, DetectionConfig, DocumentAnalyzer, DocumentReport, RecordKind, analyze_html,
    build_tree, prune_tree,
};

/// Helper to get (text, reasons) for every text and link record
fn summarize(report: &DocumentReport) -> Vec<(String, Vec<String>)> {
    report
        .records
        .iter()
        .filter_map(|record| match record {
            AnalysisRecord::Text {
                text,
                hidden_reasons,
                ..
            }
            | AnalysisRecord::Link {
                text,
                hidden_reasons,
                ..
            } => Some((
                text.clone(),
                hidden_reasons.iter().map(ToString::to_string).collect(),
            )),
            _ => None,
        })
        .collect()
}

fn reasons_for(html: &str) -> Vec<String> {
    let report = analyze_html(html);
    let summary = summarize(&report);
    assert_eq!(summary.len(), 1, "expected a single record, got {summary:?}");
    summary.into_iter().next().map(|(_, r)| r).unwrap_or_default()
}

#[test]
fn test_same_color_text() {
    let report = analyze_html(r#"<p style="color:#fff;background-color:#fff">hello</p>"#);
    assert_eq!(
        summarize(&report),
        vec![("hello".to_string(), vec!["same_color".to_string()])]
    );
    assert!(!report.all_visible);
    assert!(!report.records[0].is_visible());
}

#[test]
fn test_near_zero_opacity() {
    assert_eq!(
        reasons_for(r#"<span style="opacity:0.005">x</span>"#),
        vec!["opacity:0.01"]
    );
}

#[test]
fn test_tiny_font() {
    assert_eq!(
        reasons_for(r#"<div style="font-size:1px">y</div>"#),
        vec!["font_too_small:1px"]
    );
}

#[test]
fn test_plain_link_is_visible() {
    let report = analyze_html(r#"<a href="http://x">click</a>"#);
    assert_eq!(report.records.len(), 1);
    match &report.records[0] {
        AnalysisRecord::Link {
            text,
            url,
            hidden_reasons,
            ..
        } => {
            assert_eq!(text, "click");
            assert_eq!(url, "http://x");
            assert!(hidden_reasons.is_empty());
        }
        other => panic!("Expected link record, got {other:?}"),
    }
    assert!(report.all_visible);
}

#[test]
fn test_link_text_spans_descendants_and_stops_the_path() {
    let report = analyze_html(
        r#"<body><a href="u" style="font-size:0px">t<b>u</b></a></body>"#,
    );
    assert_eq!(
        summarize(&report),
        vec![("t u".to_string(), vec!["font_too_small:0px".to_string()])]
    );
    assert!(!report.all_visible);
}

#[test]
fn test_split_conditional_blocks_become_hidden_records() {
    let html = "<body><!--[if mso]--><b>A</b><!--[endif]--><p>visible</p>\
                <!--[if mso]--><i>B</i><!--[endif]--></body>";
    let report = analyze_html(html);

    let conditional: Vec<&AnalysisRecord> = report
        .records
        .iter()
        .filter(|r| r.kind() == RecordKind::ConditionalComment)
        .collect();
    assert_eq!(conditional.len(), 2);
    assert_eq!(conditional[0].text(), "A");
    assert_eq!(conditional[1].text(), "B");
    assert!(conditional.iter().all(|r| !r.is_visible()));

    let json = serde_json::to_value(conditional[0]).unwrap();
    assert_eq!(json["type"], "conditional_comment");
    assert_eq!(json["visible"], false);
    assert_eq!(json["condition"], "mso");

    // Conditional content never affects the verdict
    assert!(report.all_visible);
}

#[test]
fn test_plain_comment_record() {
    let report = analyze_html("<body><!-- note --><p>x</p></body>");
    let last = report.records.last().unwrap();
    assert_eq!(
        last,
        &AnalysisRecord::Comment {
            text: "note".to_string()
        }
    );
    assert!(report.all_visible);
}

#[test]
fn test_important_does_not_save_hidden_text() {
    assert_eq!(
        reasons_for(r#"<body><div style="display:none !important">secret</div></body>"#),
        vec!["display:none"]
    );
}

#[test]
fn test_font_color_matching_table_background() {
    let html = r##"<body bgcolor="#000000"><p><font color="#000000">x</font></p></body>"##;
    assert_eq!(reasons_for(html), vec!["same_color"]);
}

#[test]
fn test_low_contrast_reports_ratio() {
    assert_eq!(
        reasons_for(r#"<p style="color:#fefefe">x</p>"#),
        vec!["low_contrast:1.01"]
    );
}

#[test]
fn test_transparent_background_compares_against_transparent_black() {
    // Known edge case: a transparent layer composites to transparent black,
    // so default black text reads as low contrast.
    assert_eq!(
        reasons_for(r#"<p style="background-color:transparent">x</p>"#),
        vec!["low_contrast:1"]
    );
}

#[test]
fn test_mixed_content_is_judged_at_the_text_owner() {
    let html = r#"<body><div style="color:#fff">a<span style="color:#000">b</span> c</div></body>"#;
    let report = analyze_html(html);
    assert_eq!(
        summarize(&report),
        vec![("a c".to_string(), vec!["same_color".to_string()])]
    );
}

#[test]
fn test_elements_inside_a_text_leaf_are_not_reported() {
    let html = r#"<body><div>visible<span style="display:none">secret</span></div></body>"#;
    let report = analyze_html(html);
    assert_eq!(summarize(&report), vec![("visible".to_string(), vec![])]);
    assert!(report.all_visible);
}

#[test]
fn test_link_shared_by_two_paths_is_reported_once() {
    let html = r#"<body><a href="u"><p>one</p><p>two</p></a></body>"#;
    let report = analyze_html(html);
    assert_eq!(summarize(&report), vec![("one two".to_string(), vec![])]);
}

#[test]
fn test_deeply_nested_document() {
    let html = format!("<body>{}x</body>", "<b>".repeat(50_000));
    let report = analyze_html(&html);
    assert_eq!(summarize(&report), vec![("x".to_string(), vec![])]);
    assert!(report.all_visible);
}

#[test]
fn test_hidden_ancestor_hides_descendants() {
    let html = r#"<body><div style="visibility:hidden"><p>one</p><p>two</p></div></body>"#;
    let report = analyze_html(html);
    assert_eq!(report.hidden().count(), 2);
}

#[test]
fn test_script_and_style_text_is_ignored() {
    let html = "<body><style>p{color:red}</style><script>var a = '<p>x</p>';</script><p>ok</p></body>";
    let report = analyze_html(html);
    assert_eq!(summarize(&report), vec![("ok".to_string(), vec![])]);
}

#[test]
fn test_config_thresholds_apply() {
    let analyzer = DocumentAnalyzer::new(DetectionConfig {
        min_font_size_px: 20.0,
        ..DetectionConfig::default()
    });
    let report = analyzer.analyze_html("<p>regular</p>");
    assert!(!report.all_visible);
}

#[test]
fn test_pruning_is_idempotent() {
    let html = "<body><div><span></span><br></div><table><tr><td> </td></tr></table><p>x</p></body>";
    let mut tree = build_tree(html);
    assert_eq!(prune_tree(&mut tree), 0);

    let mut raw = sightline_html::parse(html);
    assert!(prune_tree(&mut raw) > 0);
    assert_eq!(prune_tree(&mut raw), 0);
    let body = raw.content_root();
    assert_eq!(raw.children(body).len(), 1);
}

#[test]
fn test_empty_document() {
    let report = analyze_html("");
    assert!(report.records.is_empty());
    assert!(report.all_visible);
}
