//! Document loading.
//!
//! Reading and parsing are the only fallible steps before navigation; once a
//! document parses, normalization absorbs whatever shape it has.

use crate::error::Result;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Parse a raw document from a reader.
pub fn from_reader<R: Read>(reader: R) -> Result<Value> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse a raw document from a string.
pub fn from_str(json: &str) -> Result<Value> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a raw document from a file.
pub fn from_path(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    log::debug!("Loading document {}", path.display());
    let file = std::fs::File::open(path)?;
    from_reader(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_from_str() {
        let value = from_str(r#"{"proyectos": []}"#).unwrap();
        assert!(value["proyectos"].is_array());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(from_str("{not json"), Err(Error::JsonError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = from_path("/definitely/not/here/data.json");
        assert!(matches!(result, Err(Error::IoError(_))));
    }

    #[test]
    fn test_from_reader() {
        let value = from_reader(&b"[1, 2]"[..]).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }
}
