use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::Error;
use crate::model::{ContentKind, Paragraph};

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children().find(|n| is_wml(*n, name))
}

/// Direct WML children of `parent` named `name`. Content inside w:sdt
/// controls is not a direct child and so is not counted.
fn wml_children<'a>(
    parent: roxmltree::Node<'a, 'a>,
    name: &'a str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'a>> {
    parent.children().filter(move |n| is_wml(*n, name))
}

fn push_run_text(node: roxmltree::Node, out: &mut String) {
    for child in node.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "t" => out.push_str(child.text().unwrap_or("")),
            "tab" => out.push('\t'),
            "br" | "cr" => out.push('\n'),
            // Properties carry tab stops; text boxes belong to their own paragraphs.
            "pPr" | "rPr" | "txbxContent" => {}
            _ => push_run_text(child, out),
        }
    }
}

/// Plain text of a w:p: run text in document order, tabs and breaks kept.
fn paragraph_text(para: roxmltree::Node) -> String {
    let mut text = String::new();
    push_run_text(para, &mut text);
    text
}

fn cell_text(cell: roxmltree::Node) -> String {
    wml_children(cell, "p")
        .map(paragraph_text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts the annotatable text units of a WordprocessingML document:
/// non-blank body paragraphs first, then non-blank table cells. Only
/// direct children of w:body are numbered.
pub fn extract_xml(xml_content: &str) -> Result<Vec<Paragraph>, Error> {
    let xml = roxmltree::Document::parse(xml_content)?;
    let body = wml(xml.root_element(), "body")
        .ok_or_else(|| Error::InvalidDocx("missing w:body".into()))?;

    let mut content = Vec::new();
    for (i, para) in wml_children(body, "p").enumerate() {
        let text = paragraph_text(para);
        if !text.trim().is_empty() {
            content.push(Paragraph::new(format!("p-{i}"), ContentKind::Paragraph, text));
        }
    }

    for (ti, table) in wml_children(body, "tbl").enumerate() {
        for (ri, row) in wml_children(table, "tr").enumerate() {
            for (ci, cell) in wml_children(row, "tc").enumerate() {
                let text = cell_text(cell);
                if !text.trim().is_empty() {
                    content.push(Paragraph::new(
                        format!("t-{ti}-{ri}-{ci}"),
                        ContentKind::TableCell,
                        text,
                    ));
                }
            }
        }
    }

    log::debug!("Extracted {} text unit(s)", content.len());
    Ok(content)
}

fn extract_from<R: Read + Seek>(reader: R) -> Result<Vec<Paragraph>, Error> {
    let mut zip = zip::ZipArchive::new(reader)
        .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;

    let mut xml_content = String::new();
    zip.by_name("word/document.xml")
        .map_err(|_| Error::InvalidDocx("missing word/document.xml (is this a DOCX file?)".into()))?
        .read_to_string(&mut xml_content)?;

    extract_xml(&xml_content)
}

pub fn extract(path: &Path) -> Result<Vec<Paragraph>, Error> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })?;
    extract_from(file)
}

pub fn extract_bytes(data: &[u8]) -> Result<Vec<Paragraph>, Error> {
    extract_from(Cursor::new(data))
}
