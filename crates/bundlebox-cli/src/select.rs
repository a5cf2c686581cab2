/// Parses a `--select NAME=VALUE` argument.
///
/// Only the first `=` splits, so values may contain `=`. Surrounding
/// whitespace on the name is ignored; the value is kept verbatim.
pub(crate) fn parse_selection(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got \"{raw}\""))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("option name is empty in \"{raw}\""));
    }
    Ok((name.to_owned(), value.to_owned()))
}
