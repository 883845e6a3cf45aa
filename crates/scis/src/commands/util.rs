//! Shared helpers for command handlers.

use std::io::Read;

use crate::cli::{GlobalOpts, PayloadArgs};
use crate::error::CliError;
use crate::output;

/// Resolve `--data` / `--data-file` into the request body text.
///
/// The body is forwarded as-is; it is not parsed or validated.
pub fn read_payload(args: &PayloadArgs) -> Result<String, CliError> {
    if let Some(data) = &args.data {
        return Ok(data.clone());
    }
    match args.data_file.as_deref() {
        Some(path) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => Err(CliError::MissingPayload),
    }
}

/// Render and print a response body.
pub fn emit(body: &str, global: &GlobalOpts) {
    output::print_output(&output::render(global.output, body));
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::io::Write;

    use super::*;

    #[test]
    fn inline_data_wins() {
        let args = PayloadArgs {
            data: Some("{\"a\":1}".into()),
            data_file: None,
        };
        assert_eq!(read_payload(&args).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn file_is_read_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[\"g1\",\"g2\"]\n").unwrap();
        let args = PayloadArgs {
            data: None,
            data_file: Some(file.path().to_path_buf()),
        };
        assert_eq!(read_payload(&args).unwrap(), "[\"g1\",\"g2\"]\n");
    }

    #[test]
    fn nothing_given_is_an_error() {
        let args = PayloadArgs {
            data: None,
            data_file: None,
        };
        assert!(matches!(read_payload(&args), Err(CliError::MissingPayload)));
    }
}
