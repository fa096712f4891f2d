#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::{fs, io};

use docxide_enrich::{ContentKind, Paragraph, StyleAnnotation, StyleKind};
use proptest::prelude::*;

pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub fn group_name(fixture: &Path) -> String {
    fixture
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string()
}

/// Output directory: tests/output/<group>/<case>/
pub fn output_dir(fixture: &Path) -> PathBuf {
    let case = fixture.file_name().unwrap().to_string_lossy();
    PathBuf::from("tests/output")
        .join(group_name(fixture))
        .join(case.as_ref())
}

pub fn display_name(fixture: &Path) -> String {
    let case = fixture.file_name().unwrap().to_string_lossy();
    format!("{}/{}", group_name(fixture), case)
}

/// Discover fixtures. Filter with DOCXIDE_CASE (case name) and DOCXIDE_GROUP (folder name).
pub fn discover_fixtures() -> io::Result<Vec<PathBuf>> {
    let fixtures_dir = Path::new("tests/fixtures");
    let case_filter = std::env::var("DOCXIDE_CASE").ok();
    let group_filter = std::env::var("DOCXIDE_GROUP").ok();
    let mut fixtures: Vec<PathBuf> = Vec::new();
    for group_entry in fs::read_dir(fixtures_dir)? {
        let group = group_entry?.path();
        if !group.is_dir() {
            continue;
        }
        let gname = group.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if let Some(ref gf) = group_filter {
            if gname != gf.as_str() {
                continue;
            }
        }
        for entry in fs::read_dir(&group)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            match case_filter {
                Some(ref filter) if name != filter.as_str() => {}
                _ => fixtures.push(path),
            }
        }
    }
    fixtures.sort();
    Ok(fixtures)
}

/// The paragraph markup between the document-content wrapper tags.
pub fn body_fragment(html: &str) -> &str {
    let open = "<div class=\"document-content\">";
    let start = html.find(open).expect("document-content wrapper") + open.len();
    let end = html.rfind("</div></div>").expect("closing wrapper");
    &html[start..end]
}

pub fn para(text: &str) -> Paragraph {
    Paragraph::new("", ContentKind::Paragraph, text)
}

pub fn paras(texts: &[&str]) -> Vec<Paragraph> {
    texts.iter().map(|t| para(t)).collect()
}

pub fn ann(paragraph: i64, start: i64, end: i64, kind: StyleKind, color: &str) -> StyleAnnotation {
    StyleAnnotation::new(paragraph, start, end, kind, color)
}

pub fn arb_kind() -> impl Strategy<Value = StyleKind> {
    prop::sample::select(StyleKind::ALL.to_vec())
}

/// Annotation on paragraph 0 whose offsets reach a little past both ends
/// of a `len`-char text, so clamping and inverted ranges are exercised.
pub fn arb_annotation(len: usize) -> impl Strategy<Value = StyleAnnotation> {
    let len = len as i64;
    (-3..len + 4, -3..len + 4, arb_kind(), "#[0-9a-f]{3}")
        .prop_map(|(start, end, kind, color)| ann(0, start, end, kind, &color))
}

pub fn arb_annotations(len: usize, max: usize) -> impl Strategy<Value = Vec<StyleAnnotation>> {
    prop::collection::vec(arb_annotation(len), 0..=max)
}

/// A text together with annotations sized to its char count.
pub fn arb_annotated_text() -> impl Strategy<Value = (String, Vec<StyleAnnotation>)> {
    "[a-z <>&\"'\u{e9}\u{2615}]{0,30}".prop_flat_map(|text| {
        let len = text.chars().count();
        (Just(text), arb_annotations(len, 8))
    })
}

/// Several paragraphs with annotations spread across them, some pointing
/// past the last paragraph.
pub fn arb_document() -> impl Strategy<Value = (Vec<Paragraph>, Vec<StyleAnnotation>)> {
    prop::collection::vec(arb_annotated_text(), 1..4).prop_flat_map(|parts| {
        let count = parts.len();
        let paragraphs: Vec<Paragraph> = parts.iter().map(|(t, _)| para(t)).collect();
        let anns: Vec<(usize, StyleAnnotation)> = parts
            .into_iter()
            .enumerate()
            .flat_map(|(i, (_, anns))| anns.into_iter().map(move |a| (i, a)))
            .collect();
        let n = anns.len();
        (
            Just(paragraphs),
            Just(anns),
            prop::collection::vec(0..=count as i64, n),
        )
            .prop_map(move |(paragraphs, anns, targets)| {
                let anns = anns
                    .into_iter()
                    .zip(targets)
                    .map(|((i, mut a), target)| {
                        // Mostly the owning paragraph; `count` is out of range.
                        a.paragraph_index = if target == count as i64 { target } else { i as i64 };
                        a
                    })
                    .collect();
                (paragraphs, anns)
            })
    })
}

pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{WML_NS}"><w:body>{body}</w:body></w:document>"#
    )
}

/// Builds an in-memory DOCX holding only `word/document.xml`.
pub fn build_docx(document_xml: &str) -> Vec<u8> {
    build_zip(&[("word/document.xml", document_xml)])
}

pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Unique scratch path under the system temp dir.
pub fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("docxide-enrich-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}
