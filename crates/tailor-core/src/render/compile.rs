//! Typst markup to PDF bytes, using typst-as-lib.

use tracing::debug;
use typst_as_lib::{typst_kit_options::TypstKitFontOptions, TypstEngine};

use crate::error::RenderError;

/// Compiled output of one template.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub pdf: Vec<u8>,
    pub pages: usize,
}

/// Compiles `markup` as the main file.
///
/// Only the bundled fonts are searched and the default PDF options carry no
/// timestamp, so identical markup compiles to identical bytes.
pub fn compile(markup: &str) -> Result<RenderedPdf, RenderError> {
    let fonts = TypstKitFontOptions::default()
        .include_system_fonts(false)
        .include_embedded_fonts(true);
    let engine = TypstEngine::builder()
        .main_file(markup.to_string())
        .search_fonts_with(fonts)
        .build();

    // compiled is Warned<Result<PagedDocument, _>>
    let compiled = engine.compile();
    let document = compiled
        .output
        .map_err(|e| RenderError::Compilation(format!("{e:?}")))?;

    let options = typst_pdf::PdfOptions::default();
    let pdf = typst_pdf::pdf(&document, &options)
        .map_err(|e| RenderError::Export(format!("{e:?}")))?;

    let pages = document.pages.len();
    debug!(
        pages,
        bytes = pdf.len(),
        warnings = compiled.warnings.len(),
        "compiled resume"
    );
    Ok(RenderedPdf {
        pdf: pdf.into(),
        pages,
    })
}
