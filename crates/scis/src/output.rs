//! Response rendering for `--output raw|pretty`.

use std::io::{self, Write};

use crate::cli::OutputFormat;

/// Render a response body. `pretty` indents bodies that parse as JSON and
/// leaves anything else untouched.
pub fn render(format: OutputFormat, body: &str) -> String {
    match format {
        OutputFormat::Raw => body.to_owned(),
        OutputFormat::Pretty => serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
            .unwrap_or_else(|| body.to_owned()),
    }
}

/// Print rendered output to stdout.
pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_is_verbatim() {
        assert_eq!(render(OutputFormat::Raw, "{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn pretty_indents_json() {
        assert_eq!(render(OutputFormat::Pretty, "{\"a\":1}"), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn pretty_leaves_non_json_alone() {
        assert_eq!(render(OutputFormat::Pretty, "<html>"), "<html>");
    }
}
