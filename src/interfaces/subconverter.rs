use log::info;
use thiserror::Error;

use crate::generator::proxy_to_clash;
use crate::models::{ConfigOptions, Proxy};
use crate::parser::explode_sub;

/// File name offered for the generated configuration.
pub const OUTPUT_FILE_NAME: &str = "proxyforge_config.yaml";
/// MIME type of the generated configuration.
pub const OUTPUT_MIME_TYPE: &str = "text/yaml";

/// Batch-level failures. Per-line problems never surface here; bad lines
/// are simply dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Please enter some content to convert.")]
    EmptyInput,

    #[error("No valid proxies/nodes found in the input.")]
    NoValidRecords,
}

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Parsed nodes, in input order
    pub proxies: Vec<Proxy>,
    /// Generated configuration document
    pub config: String,
}

/// Converts subscription text into a Clash configuration using the built-in template.
pub fn convert(input: &str) -> Result<Conversion, ConvertError> {
    convert_with_options(input, &ConfigOptions::default())
}

/// Converts subscription text into a Clash configuration.
///
/// The input is either newline-separated share links or a Base64 blob that
/// decodes to them. Emptiness is checked here, before generation, so the
/// generator is never asked to render an empty node list.
pub fn convert_with_options(
    input: &str,
    options: &ConfigOptions,
) -> Result<Conversion, ConvertError> {
    let content = input.trim();
    if content.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let proxies = explode_sub(content);
    if proxies.is_empty() {
        return Err(ConvertError::NoValidRecords);
    }
    info!(
        "Parsed {} node(s) from {} input line(s)",
        proxies.len(),
        count_input_lines(input)
    );

    let config = proxy_to_clash(&proxies, options);
    Ok(Conversion { proxies, config })
}

/// Number of non-blank lines in the raw input.
pub fn count_input_lines(input: &str) -> usize {
    input.split('\n').filter(|line| !line.trim().is_empty()).count()
}
