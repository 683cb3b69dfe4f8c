//! Subcommand handlers.

pub use {embed::EmbedCmd, generate::GenerateCmd};

mod embed;
mod generate;

/// Parse a `key=value` parameter argument.
pub fn parse_param(raw: &str) -> Result<(String, client::ParamValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    if key.is_empty() {
        return Err(format!("empty parameter key in {raw:?}"));
    }
    Ok((key.to_owned(), client::ParamValue::parse(value)))
}
