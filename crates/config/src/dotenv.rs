//! Parser for local `.env` defaults files.

use tracing::warn;

/// Parse `KEY=VALUE` lines.
///
/// Blank lines and `#` comments are ignored, an `export ` prefix is
/// accepted and matching single or double quotes around the value are
/// stripped. Lines without `=` or with an empty key are skipped.
/// Later assignments win.
pub fn parse(content: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            warn!(line = idx + 1, "skipping .env line without '='");
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            warn!(line = idx + 1, "skipping .env line with empty key");
            continue;
        }

        let value = unquote(value.trim());
        pairs.retain(|(k, _)| k != key);
        pairs.push((key.to_string(), value.to_string()));
    }

    pairs
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
