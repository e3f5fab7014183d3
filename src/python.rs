//! Python bindings for the riscv_listing analyzer

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::classify::frequency::{self, SortOrder, WidthFilter};
use crate::classify;
use crate::format::{Report, ReportFormat};
use crate::pass::Pass;
use crate::tables::{ExtensionTable, PseudoTable};
use crate::tokenizer::LineTokenizer;

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(|l| l.to_string()).collect()
}

/// Rewrite pseudo-instructions in a whole listing, width-aware
#[pyfunction]
fn normalize_listing(text: &str) -> PyResult<String> {
    let lines = split_lines(text);
    let tokenizer = LineTokenizer::new();
    let rewritten = Pass::Normalize.run(&lines, &tokenizer, PseudoTable::builtin());
    Ok(rewritten.join("\n"))
}

/// Tag every narrow-encoding mnemonic with the compressed-form marker
#[pyfunction]
fn tag_listing(text: &str) -> PyResult<String> {
    let lines = split_lines(text);
    let tokenizer = LineTokenizer::new();
    let rewritten = Pass::CompressedTag.run(&lines, &tokenizer, PseudoTable::builtin());
    Ok(rewritten.join("\n"))
}

/// Classify a listing into extension buckets and render the report
#[pyfunction]
#[pyo3(signature = (text, output_format="text"))]
fn classify_listing(text: &str, output_format: &str) -> PyResult<String> {
    let format: ReportFormat = output_format
        .parse()
        .map_err(|e: String| PyValueError::new_err(e))?;

    let lines = split_lines(text);
    let report = classify::run(&lines, &LineTokenizer::new(), ExtensionTable::builtin());

    format
        .get_formatter(None)
        .format(&Report::Classification(report))
        .map_err(|e| PyValueError::new_err(format!("Failed to format report: {}", e)))
}

/// Count raw mnemonic frequency and render the report
#[pyfunction]
#[pyo3(signature = (text, output_format="text", width="any", sort="count"))]
fn count_mnemonics(text: &str, output_format: &str, width: &str, sort: &str) -> PyResult<String> {
    let format: ReportFormat = output_format
        .parse()
        .map_err(|e: String| PyValueError::new_err(e))?;

    let filter = match width.to_lowercase().as_str() {
        "any" => WidthFilter::Any,
        "narrow" => WidthFilter::Narrow,
        "normal" => WidthFilter::Normal,
        _ => return Err(PyValueError::new_err(format!("Unknown width filter: {}", width))),
    };

    let order = match sort.to_lowercase().as_str() {
        "count" => SortOrder::CountDescending,
        "alpha" | "alphabetical" => SortOrder::Alphabetical,
        _ => return Err(PyValueError::new_err(format!("Unknown sort order: {}", sort))),
    };

    let lines = split_lines(text);
    let report = frequency::run(&lines, &LineTokenizer::new(), filter);

    format
        .get_formatter(Some(order))
        .format(&Report::Frequency(report))
        .map_err(|e| PyValueError::new_err(format!("Failed to format report: {}", e)))
}

/// Python module initialization
#[pymodule]
fn riscv_listing(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(normalize_listing, m)?)?;
    m.add_function(wrap_pyfunction!(tag_listing, m)?)?;
    m.add_function(wrap_pyfunction!(classify_listing, m)?)?;
    m.add_function(wrap_pyfunction!(count_mnemonics, m)?)?;
    Ok(())
}
