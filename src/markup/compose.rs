use crate::model::{StyleAnnotation, StyleKind};

use super::escape_into;

pub const BASE_CLASS: &str = "styled-text";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Declaration<'a> {
    pub property: &'static str,
    pub value: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive<'a> {
    Plain,
    Styled {
        classes: Vec<&'static str>,
        declarations: Vec<Declaration<'a>>,
    },
}

/// CSS property carrying the annotation's color, if the kind has one.
/// Bold and italic are expressed by their class alone.
pub fn css_property(kind: StyleKind) -> Option<&'static str> {
    match kind {
        StyleKind::Highlight => Some("background-color"),
        StyleKind::TextColor => Some("color"),
        StyleKind::Border | StyleKind::Circle => Some("border-color"),
        StyleKind::Underline | StyleKind::Strikethrough => Some("text-decoration-color"),
        StyleKind::Bold | StyleKind::Italic => None,
    }
}

/// Combines the active annotations of one segment.
///
/// Classes and declarations follow `active` order with duplicates kept, so
/// when two annotations set the same property the later one wins in the
/// browser's cascade.
pub fn compose<'a>(active: &[&'a StyleAnnotation]) -> Directive<'a> {
    if active.is_empty() {
        return Directive::Plain;
    }
    let mut classes = Vec::with_capacity(active.len() + 1);
    classes.push(BASE_CLASS);
    classes.extend(active.iter().map(|ann| ann.kind.name()));

    let declarations = active
        .iter()
        .copied()
        .filter_map(|ann| {
            Some(Declaration {
                property: css_property(ann.kind)?,
                value: ann.color.as_str(),
            })
        })
        .collect();

    Directive::Styled {
        classes,
        declarations,
    }
}

/// Appends `text` to `out`, escaped and wrapped per `directive`.
pub fn write_segment(out: &mut String, directive: &Directive, text: &str) {
    match directive {
        Directive::Plain => escape_into(out, text),
        Directive::Styled {
            classes,
            declarations,
        } => {
            out.push_str("<span class=\"");
            out.push_str(&classes.join(" "));
            out.push('"');
            if !declarations.is_empty() {
                let inline = declarations
                    .iter()
                    .map(|d| format!("{}:{}", d.property, d.value))
                    .collect::<Vec<_>>()
                    .join(";");
                out.push_str(" style=\"");
                escape_into(out, &inline);
                out.push('"');
            }
            out.push('>');
            escape_into(out, text);
            out.push_str("</span>");
        }
    }
}
