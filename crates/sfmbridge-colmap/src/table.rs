use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::ColmapError;

/// Iterator over the data rows of a whitespace-delimited model table.
///
/// Each item is one line trimmed of surrounding whitespace. Blank lines and
/// comment lines (first non-whitespace character `#`) are skipped. Bytes
/// that are not valid UTF-8 are replaced during decoding, never fatal.
#[derive(Debug)]
pub struct TableRows<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> TableRows<R> {
    /// Creates a row iterator over any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for TableRows<R> {
    type Item = Result<String, std::io::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    // best-effort decoding, then strip surrounding whitespace
                    let line = String::from_utf8_lossy(&self.buf);
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    return Some(Ok(line.to_string()));
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Opens a model table and returns an iterator over its data rows.
///
/// Re-opening the same path yields the same sequence of rows. A missing file
/// maps to [`ColmapError::MissingTable`]; any other failure to open maps to
/// [`ColmapError::Io`].
pub fn open_table(path: impl AsRef<Path>) -> Result<TableRows<BufReader<File>>, ColmapError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ColmapError::MissingTable(path.to_path_buf())
        } else {
            ColmapError::Io(e)
        }
    })?;
    Ok(TableRows::new(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_rows_skip_comments_and_blanks() {
        let text = "# Camera list with one line of data per camera\n\n  1 2 3  \n   # indented comment\n4 5\n";
        let rows = TableRows::new(text.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(rows, vec!["1 2 3".to_string(), "4 5".to_string()]);
    }

    #[test]
    fn test_rows_without_trailing_newline() {
        let rows = TableRows::new("1 2\n3 4".as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(rows, vec!["1 2".to_string(), "3 4".to_string()]);
    }

    #[test]
    fn test_rows_decode_invalid_bytes_lossy() {
        let rows = TableRows::new(&b"1 \xff 2\n"[..])
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains('\u{FFFD}'));
        assert!(rows[0].starts_with("1 "));
    }

    #[test]
    fn test_rows_trim_carriage_returns() {
        let rows = TableRows::new("1 2\r\n3 4\r\n".as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(rows, vec!["1 2".to_string(), "3 4".to_string()]);
    }

    #[test]
    fn test_open_table_is_restartable() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"# header\n1 PINHOLE 640 480 500 500 320 240\n")
            .unwrap();

        let first = open_table(file.path())
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let second = open_table(file.path())
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec!["1 PINHOLE 640 480 500 500 320 240".to_string()]);
    }

    #[test]
    fn test_open_table_missing_file() {
        let err = open_table("/no/such/dir/cameras.txt").unwrap_err();
        assert!(matches!(err, ColmapError::MissingTable(_)));
    }
}
