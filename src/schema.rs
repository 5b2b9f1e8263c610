//! The external schema interface.
//!
//! Data shapes and field layouts are defined by an external
//! schema/dimension service, not by this crate. Template generation
//! only needs two lookups from it, expressed by the
//! [`SchemaResolver`] trait: the shape and element kind of a named
//! array, or the field layout of a named record list. Callers inject
//! a resolver per call, so this crate never holds global schema
//! state.
//!
//! A datum is addressed by a [`DataPath`], the ordered identifier
//! chain `model/package/block/field` used throughout the toolkit.
//!
//! ## Examples
//!
//! ```rust
//! use siminput::DataPath;
//!
//! let path = DataPath::new(["gwf6", "dis", "griddata", "botm"]);
//! assert_eq!(path.name(), Some("botm"));
//! assert_eq!(path.to_string(), "gwf6/dis/griddata/botm");
//! ```

use crate::Result;
use crate::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered identifier segments addressing one datum in the external
/// schema (`model/package/block/field`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataPath(Vec<String>);

impl DataPath {
    /// Builds a path from identifier segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DataPath(segments.into_iter().map(Into::into).collect())
    }

    /// The path segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The final segment, usually the field name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The path without its final segment.
    #[must_use]
    pub fn parent(&self) -> DataPath {
        let end = self.0.len().saturating_sub(1);
        DataPath(self.0[..end].to_vec())
    }

    /// A copy of this path with the final segment replaced.
    #[must_use]
    pub fn with_name(&self, name: &str) -> DataPath {
        let mut segments = self.0.clone();
        match segments.last_mut() {
            Some(last) => *last = name.to_string(),
            None => segments.push(name.to_string()),
        }
        DataPath(segments)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Element kind of a schema field.
///
/// The closed set of kinds a field can take in this toolkit; anything
/// that is not numeric is carried as opaque text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
}

impl FieldKind {
    /// The placeholder cell written into unpopulated template rows:
    /// `0` for integers, `NaN` for floats, null otherwise.
    #[must_use]
    pub fn placeholder(&self) -> Value {
        match self {
            FieldKind::Integer => Value::Int(0),
            FieldKind::Float => Value::Float(f64::NAN),
            FieldKind::Text => Value::Null,
        }
    }
}

/// How a data field is materialized in the input file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageKind {
    /// Values listed in the file itself, shaped as a dense array.
    DenseArray,
    /// A single constant fill value.
    Constant,
    /// A reference to a separate external file.
    ExternalFile,
}

/// Resolved shape description of an array-valued field.
///
/// For layered fields the first axis is the layer count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArraySpec {
    pub shape: Vec<usize>,
    pub kind: FieldKind,
    /// Whether the field varies over discrete simulation periods.
    pub transient: bool,
}

/// Resolved field layout of a list-valued (tabular) field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListSpec {
    /// Ordered `(field name, kind)` pairs.
    pub fields: Vec<(String, FieldKind)>,
    /// Whether the field varies over discrete simulation periods.
    pub transient: bool,
    /// Whether several independent instances of the list may exist.
    pub multiple: bool,
}

/// Access to the external schema/dimension service.
///
/// Implementations resolve a [`DataPath`] to the concrete shape or
/// layout the template generators need. Lookup failures propagate
/// unmodified as [`crate::Error::Schema`].
pub trait SchemaResolver {
    /// Resolves the shape and element kind of an array-valued field.
    fn array_spec(&self, path: &DataPath) -> Result<ArraySpec>;

    /// Resolves the field layout of a list-valued field. `nseg`
    /// forwards a segment count for layouts that depend on it.
    fn list_spec(&self, path: &DataPath, nseg: Option<usize>) -> Result<ListSpec>;
}

/// Yields `base`, `base_1`, `base_2`, ... (or `base_0`, `base_1`, ...
/// when the first name is numbered too).
///
/// Used to assign unique names to repeated package instances. The
/// iterator is infinite.
///
/// # Examples
///
/// ```rust
/// use siminput::NameIter;
///
/// let names: Vec<String> = NameIter::new("wel", true).take(3).collect();
/// assert_eq!(names, vec!["wel", "wel_1", "wel_2"]);
/// ```
pub struct NameIter {
    base: String,
    index: u64,
    first_unnumbered: bool,
}

impl NameIter {
    #[must_use]
    pub fn new(base: &str, first_unnumbered: bool) -> Self {
        NameIter {
            base: base.to_string(),
            index: 0,
            first_unnumbered,
        }
    }
}

impl Iterator for NameIter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let index = self.index;
        self.index += 1;
        if index == 0 && self.first_unnumbered {
            Some(self.base.clone())
        } else {
            Some(format!("{}_{}", self.base, index))
        }
    }
}

/// Yields copies of a [`DataPath`] with its final segment renamed
/// through a [`NameIter`].
pub struct PathIter {
    path: DataPath,
    names: NameIter,
}

impl PathIter {
    #[must_use]
    pub fn new(path: DataPath, first_unnumbered: bool) -> Self {
        let base = path.name().unwrap_or_default().to_string();
        PathIter {
            path,
            names: NameIter::new(&base, first_unnumbered),
        }
    }
}

impl Iterator for PathIter {
    type Item = DataPath;

    fn next(&mut self) -> Option<DataPath> {
        self.names.next().map(|name| self.path.with_name(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_accessors() {
        let path = DataPath::new(["gwf6", "npf", "griddata", "k"]);
        assert_eq!(path.len(), 4);
        assert_eq!(path.name(), Some("k"));
        assert_eq!(path.parent(), DataPath::new(["gwf6", "npf", "griddata"]));
        assert_eq!(path.with_name("k33").name(), Some("k33"));
        assert_eq!(path.to_string(), "gwf6/npf/griddata/k");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(FieldKind::Integer.placeholder(), Value::Int(0));
        assert!(matches!(
            FieldKind::Float.placeholder(),
            Value::Float(f) if f.is_nan()
        ));
        assert_eq!(FieldKind::Text.placeholder(), Value::Null);
    }

    #[test]
    fn test_name_iter_numbered_from_start() {
        let names: Vec<String> = NameIter::new("rch", false).take(2).collect();
        assert_eq!(names, vec!["rch_0", "rch_1"]);
    }

    #[test]
    fn test_path_iter() {
        let path = DataPath::new(["gwf6", "wel"]);
        let paths: Vec<DataPath> = PathIter::new(path, true).take(2).collect();
        assert_eq!(paths[0], DataPath::new(["gwf6", "wel"]));
        assert_eq!(paths[1], DataPath::new(["gwf6", "wel_1"]));
    }
}
