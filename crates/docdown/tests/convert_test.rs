//! End-to-end conversion tests on document-export style markup.

use docdown::{convert, parse_html, MarkdownRenderer};

#[test]
fn test_basic_document() {
    assert_eq!(
        convert("<html><body><h1>Test</h1><p>This is a test.</p></body></html>"),
        "# Test\n\nThis is a test.\n"
    );
}

#[test]
fn test_word_export() {
    let html = r#"<html xmlns:o="urn:schemas-microsoft-com:office:office">
<head>
<meta http-equiv=Content-Type content="text/html; charset=utf-8">
<title>Report</title>
<style>
<!-- p.MsoNormal { margin: 0 } -->
</style>
</head>
<body lang=EN-US>
<div class=WordSection1>
<h2><span lang=EN>Overview</span></h2>
<p class=MsoNormal><b>Status:</b> on&nbsp;track<o:p></o:p></p>
<p class=MsoNormal><o:p>&nbsp;</o:p></p>
<ul>
 <li><b>Advanced Transcription:</b> Automatically transcribe media.</li>
 <li>Facial Recognition</li>
</ul>
</div>
</body>
</html>"#;

    assert_eq!(
        convert(html),
        "## Overview\n\n\
         **Status:** on track\n\n\
         - **Advanced Transcription:** Automatically transcribe media.\n\
         - Facial Recognition\n"
    );
}

#[test]
fn test_nested_list_indentation() {
    assert_eq!(
        convert("<ul><li>A<ul><li>B</li></ul></li></ul>"),
        "- A\n  - B\n"
    );
}

#[test]
fn test_list_directly_inside_list() {
    assert_eq!(
        convert("<ul><li>A</li><ul><li>B</li></ul></ul>"),
        "- A\n\n  - B\n"
    );
    assert_eq!(
        convert("<ol><li>a</li><ol><li>b</li><li>c</li></ol><li>d</li></ol>"),
        "1. a\n\n  1. b\n  2. c\n\n2. d\n"
    );
    assert_eq!(
        convert("<p>before</p><ul><ul><li>x</li></ul></ul>"),
        "before\n\n  - x\n"
    );
}

#[test]
fn test_entities_follow_browser_recovery() {
    assert_eq!(convert("<p>AT&amp T &copy 2020</p>"), "AT& T \u{a9} 2020\n");
    assert_eq!(convert("<p>&#147;quoted&#148; &#128;5</p>"), "\u{201c}quoted\u{201d} \u{20ac}5\n");
    assert_eq!(
        convert(r#"<a href="/s?q=1&copy=2">search</a>"#),
        "[search](/s?q=1&copy=2)\n"
    );
}

#[test]
fn test_deeply_nested_divs() {
    let depth = 100_000;
    let html = format!("{}deep{}", "<div>".repeat(depth), "</div>".repeat(depth));
    assert_eq!(convert(&html), "deep\n");
}

#[test]
fn test_deeply_nested_lists() {
    let html = format!("{}x", "<ul><li>".repeat(5_000));
    let out = convert(&html);
    assert!(out.lines().any(|line| line.trim_start() == "x"));
}

#[test]
fn test_sibling_ordered_lists_restart() {
    let out = convert("<ol><li>x</li><li>y</li></ol><p>between</p><ol><li>z</li></ol>");
    assert_eq!(out, "1. x\n2. y\n\nbetween\n\n1. z\n");
}

#[test]
fn test_stray_end_tag_keeps_content() {
    let out = convert("<p>a</div><b>b</b></p>");
    assert!(out.contains('b'));
    assert_eq!(out, "a**b**\n");
}

#[test]
fn test_table_padding_and_separator() {
    let out = convert("<table><tr><td>a</td><td>bb</td></tr><tr><td>ccc</td></tr></table>");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, vec!["a   | bb", "--- | ---", "ccc |"]);
}

#[test]
fn test_paragraph_break() {
    assert_eq!(convert("<p>a<br/>b</p>"), "a\nb\n");
}

#[test]
fn test_blank_lines_collapse() {
    let out = convert("<p>one</p>\n\n\n\n<div><br><br><br></div>\n\n<p>two</p>");
    assert_eq!(out, "one\n\ntwo\n");
}

#[test]
fn test_special_characters_unescaped() {
    assert_eq!(
        convert("<p>snake_case and *stars* and `ticks` and [brackets]</p>"),
        "snake_case and *stars* and `ticks` and [brackets]\n"
    );
}

#[test]
fn test_fragment_and_text_inputs() {
    assert_eq!(convert("plain words"), "plain words\n");
    assert_eq!(convert("<b>unterminated"), "**unterminated**\n");
    assert_eq!(convert("<p>broken <a href=\"x\""), "broken <a href=\"x\"\n");
    assert_eq!(convert(""), "");
    assert_eq!(convert("<head><title>only head</title></head>"), "");
}

#[test]
fn test_code_and_pre_preserve_text() {
    let out = convert("<p>Use <code>x&amp;y</code></p><pre>  a  &lt;\n  b</pre>");
    assert_eq!(out, "Use `x&amp;y`\n\n```\n  a  &lt;\n  b\n```\n");
}

#[test]
fn test_renderer_reuse_is_deterministic() {
    let root = parse_html("<ol><li>a</li><li>b<ol><li>c</li></ol></li></ol>");
    let renderer = MarkdownRenderer::new();
    let first = renderer.render(&root);
    assert_eq!(first, "1. a\n2. b\n  1. c\n");
    assert_eq!(renderer.render(&root), first);
}
