//! JSON I/O handling for the calc command
//!
//! - Input: one JSON object on stdin (may span lines)
//! - Output: one pretty-printed JSON object on stdout
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde::Serialize;

use super::errors::{CliError, CliResult};

/// Read the whole of stdin
pub fn read_request() -> CliResult<Vec<u8>> {
    read_request_from(&mut io::stdin().lock())
}

pub fn read_request_from<R: Read>(reader: &mut R) -> CliResult<Vec<u8>> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;

    if input.iter().all(u8::is_ascii_whitespace) {
        return Err(CliError::io_error("Empty input"));
    }

    Ok(input)
}

/// Write a JSON response to stdout
pub fn write_response<T: Serialize>(response: &T) -> CliResult<()> {
    write_response_to(&mut io::stdout().lock(), response)
}

pub fn write_response_to<W: Write, T: Serialize>(writer: &mut W, response: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *writer, response)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_input_rejected() {
        let mut input: &[u8] = b"  \n ";
        assert!(read_request_from(&mut input).is_err());
    }

    #[test]
    fn test_multiline_input() {
        let mut input: &[u8] = b"{\n  \"a\": 1\n}\n";
        let bytes = read_request_from(&mut input).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["a"], json!(1));
    }

    #[test]
    fn test_write_response_keeps_unicode() {
        let mut out = Vec::new();
        write_response_to(&mut out, &json!({"error": "Отсутствуют поля: teeth"})).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Отсутствуют поля"));
        assert!(text.ends_with('\n'));
    }
}
