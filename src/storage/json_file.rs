//! # JSON Document File

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::errors::{StorageError, StorageResult};

/// A container document read entry by entry
///
/// An entry that does not deserialize is skipped with a warning instead of
/// discarding its well-formed neighbours.
pub trait Document: Serialize + Default + Sized {
    /// `None` when the top-level value has the wrong JSON type
    fn from_value(value: Value, path: &Path) -> Option<Self>;
}

impl<E> Document for Vec<E>
where
    E: Serialize + DeserializeOwned,
{
    fn from_value(value: Value, path: &Path) -> Option<Self> {
        let Value::Array(items) = value else {
            return None;
        };

        let entries = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(path = %path.display(), index, error = %e, "skipping malformed entry");
                    None
                }
            })
            .collect();
        Some(entries)
    }
}

impl<E> Document for BTreeMap<String, E>
where
    E: Serialize + DeserializeOwned,
{
    fn from_value(value: Value, path: &Path) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };

        let entries = map
            .into_iter()
            .filter_map(|(key, item)| match serde_json::from_value(item) {
                Ok(entry) => Some((key, entry)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), key = %key, error = %e, "skipping malformed entry");
                    None
                }
            })
            .collect();
        Some(entries)
    }
}

/// A single JSON document stored at a fixed path
#[derive(Debug, Clone)]
pub struct JsonFile<T> {
    path: PathBuf,
    _document: PhantomData<fn() -> T>,
}

impl<T: Document> JsonFile<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _document: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document, reporting unreadable or malformed files
    ///
    /// A missing or blank file is the empty default.
    pub fn read(&self) -> StorageResult<T> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }

        let value: Value =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::malformed(&self.path, e))?;
        T::from_value(value, &self.path)
            .ok_or_else(|| StorageError::malformed(&self.path, "unexpected top-level JSON type"))
    }

    /// Read the document, falling back to `T::default()`
    ///
    /// Failures are logged; the caller never sees them.
    pub fn load(&self) -> T {
        self.read().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "data file unreadable");
            T::default()
        })
    }

    /// Overwrite the document, creating parent directories as needed
    pub fn save(&self, document: &T) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
        }

        let encoded =
            serde_json::to_vec_pretty(document).map_err(|e| StorageError::encode(&self.path, e))?;

        fs::write(&self.path, encoded).map_err(|e| StorageError::io(&self.path, e))
    }

    /// Read, modify and write back the document
    ///
    /// Fails without writing when the existing file cannot be read. Not
    /// atomic across processes: a concurrent writer between the read and the
    /// write is overwritten.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> StorageResult<R> {
        let mut document = self.read()?;
        let result = f(&mut document);
        self.save(&document)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_default() {
        let temp = TempDir::new().unwrap();
        let file: JsonFile<Vec<String>> = JsonFile::new(temp.path().join("absent.json"));

        assert!(file.load().is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let file: JsonFile<Vec<String>> = JsonFile::new(temp.path().join("db/nested/list.json"));

        file.save(&vec!["a".to_string()]).unwrap();
        assert_eq!(file.load(), vec!["a".to_string()]);
    }

    #[test]
    fn test_malformed_json_reads_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, b"{not json").unwrap();

        let file: JsonFile<BTreeMap<String, String>> = JsonFile::new(&path);
        assert!(file.load().is_empty());
    }

    #[test]
    fn test_wrong_shape_reads_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shape.json");
        fs::write(&path, br#"{"id": "1"}"#).unwrap();

        let file: JsonFile<Vec<String>> = JsonFile::new(&path);
        assert!(file.load().is_empty());
    }

    #[test]
    fn test_non_ascii_written_verbatim() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ru.json");
        let file: JsonFile<Vec<String>> = JsonFile::new(&path);

        file.save(&vec!["Без имени".to_string()]).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Без имени"));
        assert!(raw.contains("\n  \""));
    }

    #[test]
    fn test_update_round_trip() {
        let temp = TempDir::new().unwrap();
        let file: JsonFile<Vec<u32>> = JsonFile::new(temp.path().join("n.json"));

        let len = file
            .update(|v| {
                v.push(7);
                v.len()
            })
            .unwrap();
        assert_eq!(len, 1);
        assert_eq!(file.load(), vec![7]);
    }

    #[test]
    fn test_blank_file_reads_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blank.json");
        fs::write(&path, "  \n").unwrap();

        let file: JsonFile<Vec<u32>> = JsonFile::new(&path);
        assert!(file.read().unwrap().is_empty());
        assert_eq!(file.update(|v| v.push(1)).ok(), Some(()));
        assert_eq!(file.load(), vec![1]);
    }

    #[test]
    fn test_update_leaves_malformed_file_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, b"[1, 2,").unwrap();

        let file: JsonFile<Vec<u32>> = JsonFile::new(&path);
        let err = file.update(|v| v.push(3)).unwrap_err();

        assert!(matches!(err, StorageError::MalformedError { .. }));
        assert_eq!(fs::read(&path).unwrap(), b"[1, 2,");
    }

    #[test]
    fn test_update_leaves_wrong_shape_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shape.json");
        fs::write(&path, br#"{"id": "1"}"#).unwrap();

        let file: JsonFile<Vec<String>> = JsonFile::new(&path);
        assert!(file.update(|v| v.push("x".to_string())).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"id": "1"}"#);
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i32,
    }

    #[test]
    fn test_bad_list_entry_keeps_neighbours() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("points.json");
        fs::write(&path, r#"[{"x": 1}, null, {"x": "two"}, {"x": 3}]"#).unwrap();

        let file: JsonFile<Vec<Point>> = JsonFile::new(&path);
        assert_eq!(file.load(), vec![Point { x: 1 }, Point { x: 3 }]);

        file.update(|points| points.push(Point { x: 4 })).unwrap();
        assert_eq!(
            file.load(),
            vec![Point { x: 1 }, Point { x: 3 }, Point { x: 4 }]
        );
    }

    #[test]
    fn test_bad_map_entry_keeps_neighbours() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("points.json");
        fs::write(&path, r#"{"a": {"x": 1}, "b": null}"#).unwrap();

        let file: JsonFile<BTreeMap<String, Point>> = JsonFile::new(&path);
        file.update(|points| {
            points.insert("c".to_string(), Point { x: 3 });
        })
        .unwrap();

        let points = file.load();
        assert_eq!(points.len(), 2);
        assert_eq!(points["a"], Point { x: 1 });
        assert_eq!(points["c"], Point { x: 3 });
    }
}
