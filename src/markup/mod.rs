pub mod compose;
pub mod segments;

use crate::model::{Paragraph, StyleAnnotation};

use compose::{compose, write_segment};
use segments::{is_effective, segments};

#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Link the Inter web font. Without it the stylesheet falls back to
    /// system fonts and the document has no external references.
    pub web_fonts: bool,
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            web_fonts: true,
            title: None,
        }
    }
}

const FONT_LINKS: &str = r#"<link rel="preconnect" href="https://fonts.googleapis.com">
<link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
<link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap" rel="stylesheet">
"#;

const STYLESHEET: &str = "*{box-sizing:border-box;margin:0;padding:0}
body{font-family:'Inter',-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;font-size:14px;line-height:1.5;color:#1a1a1a;background:#fafafa;-webkit-font-smoothing:antialiased}
.document-container{max-width:800px;margin:24px auto;background:#fff;border:1px solid #e0e0e0;border-radius:8px;box-shadow:0 1px 3px rgba(0,0,0,.05)}
.document-content{padding:32px 48px;font-size:15px;line-height:1.8;color:#1a1a1a}
.document-content p{margin-bottom:1em;position:relative}
.document-content p:last-child{margin-bottom:0}
.styled-text{position:relative;display:inline}
.styled-text.bold{font-weight:700}
.styled-text.italic{font-style:italic}
.styled-text.underline{text-decoration:underline;text-decoration-thickness:2px;text-underline-offset:2px}
.styled-text.strikethrough{text-decoration:line-through;text-decoration-thickness:2px}
.styled-text.highlight{padding:0 2px;border-radius:2px}
.styled-text.border{border:2px solid;border-radius:3px;padding:0 4px;margin:0 2px}
.styled-text.circle{border:2px solid;border-radius:100px;padding:0 6px;margin:0 2px}
";

/// Appends `s` with markup-reserved characters replaced by entities.
pub fn escape_into(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_into(&mut out, s);
    out
}

/// Groups annotations by the paragraph they target. Annotations pointing
/// outside `0..count` are dropped; order within a group is submission order.
fn group_by_paragraph(count: usize, annotations: &[StyleAnnotation]) -> Vec<Vec<&StyleAnnotation>> {
    let mut groups: Vec<Vec<&StyleAnnotation>> = vec![Vec::new(); count];
    let mut dropped = 0usize;
    for ann in annotations {
        match usize::try_from(ann.paragraph_index)
            .ok()
            .and_then(|i| groups.get_mut(i))
        {
            Some(group) => group.push(ann),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        log::warn!(
            "Ignoring {dropped} style annotation(s) outside the {count} available paragraph(s)"
        );
    }
    groups
}

/// Renders one paragraph's text as a `<p>` element.
pub fn render_paragraph(text: &str, annotations: &[&StyleAnnotation]) -> String {
    // Byte position of every char start, plus the end of the string.
    let byte_at: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let len = byte_at.len() - 1;

    let effective: Vec<&StyleAnnotation> = annotations
        .iter()
        .copied()
        .filter(|ann| is_effective(ann, len))
        .collect();

    let mut out = String::from("<p>");
    if effective.is_empty() {
        escape_into(&mut out, text);
    } else {
        let parts = segments(len, &effective);
        log::debug!(
            "{len} chars, {} annotation(s) -> {} segment(s)",
            effective.len(),
            parts.len()
        );
        for seg in &parts {
            let directive = compose(&seg.active);
            write_segment(&mut out, &directive, &text[byte_at[seg.start]..byte_at[seg.end]]);
        }
    }
    out.push_str("</p>");
    out
}

/// Renders the whole document with default options.
pub fn render(paragraphs: &[Paragraph], annotations: &[StyleAnnotation]) -> String {
    render_with(paragraphs, annotations, &RenderOptions::default())
}

pub fn render_with(
    paragraphs: &[Paragraph],
    annotations: &[StyleAnnotation],
    options: &RenderOptions,
) -> String {
    let groups = group_by_paragraph(paragraphs.len(), annotations);

    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    if let Some(title) = &options.title {
        out.push_str("<title>");
        escape_into(&mut out, title);
        out.push_str("</title>\n");
    }
    if options.web_fonts {
        out.push_str(FONT_LINKS);
    }
    out.push_str("<style>\n");
    out.push_str(STYLESHEET);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str("<div class=\"document-container\"><div class=\"document-content\">");
    for (para, group) in paragraphs.iter().zip(&groups) {
        out.push_str(&render_paragraph(&para.text, group));
    }
    out.push_str("</div></div>\n</body>\n</html>");
    out
}
