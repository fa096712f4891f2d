mod docx;
mod error;
pub mod markup;
pub mod model;
mod store;

pub use docx::{extract, extract_bytes, extract_xml};
pub use error::Error;
pub use markup::{RenderOptions, render, render_with};
pub use model::{
    ContentKind, LogAction, LogEntry, Paragraph, RawAnnotation, RawLogEntry, StyleAnnotation,
    StyleKind,
};
pub use store::{DocumentRecord, load_annotations, parse_annotations, parse_log_entry};

use std::path::Path;
use std::time::Instant;

/// Extracts `input`, applies `styles` and writes the styled HTML to `output`.
pub fn export_docx_to_html(
    input: &Path,
    styles: &[StyleAnnotation],
    output: &Path,
    options: &RenderOptions,
) -> Result<(), Error> {
    let t0 = Instant::now();

    let content = docx::extract(input)?;
    let t_extract = t0.elapsed();

    let html = markup::render_with(&content, styles, options);
    let t_render = t0.elapsed();

    std::fs::write(output, &html).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: extract={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms ({} paragraphs, {} styles, output {} bytes)",
        t_extract.as_secs_f64() * 1000.0,
        (t_render - t_extract).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        content.len(),
        styles.len(),
        html.len(),
    );

    Ok(())
}

/// Renders a stored document record to `output`.
pub fn render_record_to_html(
    record: &DocumentRecord,
    output: &Path,
    options: &RenderOptions,
) -> Result<(), Error> {
    let t0 = Instant::now();
    let html = markup::render_with(&record.content, &record.styles, options);
    std::fs::write(output, &html).map_err(Error::Io)?;
    log::info!(
        "Rendered {} in {:.1}ms (output {} bytes)",
        output.display(),
        t0.elapsed().as_secs_f64() * 1000.0,
        html.len(),
    );
    Ok(())
}
