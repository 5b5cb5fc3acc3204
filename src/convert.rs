//! Whole-document conversion: read, inline, write.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::dom::{parse_html, to_html_string, write_html};
use crate::error::{Error, Result};
use crate::inline::{InlineReport, inline_images};
use crate::util::decode_text;

/// Inline the images of an HTML string held in memory.
///
/// Relative `src` values are resolved against `base_dir`.
///
/// # Example
///
/// ```
/// use std::path::Path;
///
/// let (html, report) =
///     imginline::inline_html(r#"<img src="https://example.com/a.png">"#, Path::new(".")).unwrap();
/// assert!(html.contains(r#"src="https://example.com/a.png""#));
/// assert_eq!(report.skipped_remote, 1);
/// ```
pub fn inline_html(html: &str, base_dir: &Path) -> Result<(String, InlineReport)> {
    let mut dom = parse_html(html)?;
    let report = inline_images(&mut dom, base_dir);
    let output = to_html_string(&dom).map_err(Error::Serialize)?;
    Ok((output, report))
}

/// Directory against which the images of `input` are resolved.
pub fn base_dir(input: &Path) -> &Path {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Convert `input` into a self-contained `output` file.
///
/// Any failure to read, parse or write is fatal. Images that cannot be read
/// only show up in the returned report.
pub fn convert_file(input: &Path, output: &Path) -> Result<InlineReport> {
    let bytes = fs::read(input).map_err(|source| Error::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;
    let html = decode_text(&bytes);

    let mut dom = parse_html(&html)?;
    let report = inline_images(&mut dom, base_dir(input));

    let write_err = |source| Error::WriteOutput {
        path: output.to_path_buf(),
        source,
    };
    let file = File::create(output).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    write_html(&dom, &mut writer).map_err(write_err)?;
    // Surface buffered write errors here; dropping the writer would swallow them
    writer.flush().map_err(write_err)?;
    drop(writer);

    log::info!("wrote {} ({report})", output.display());
    Ok(report)
}
