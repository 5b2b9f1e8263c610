//! # siminput
//!
//! Utility routines for building and parsing structured scientific
//! simulation input files.
//!
//! ## What is siminput?
//!
//! Simulation packages describe their input through an external
//! schema: named fields with shapes, element kinds, and period
//! structure. This crate is the glue between that schema and actual
//! input data. It builds correctly shaped empty templates, normalizes
//! the messy text lines found in real input files, and flattens the
//! ragged nested lists that gridded data arrives in.
//!
//! ## Key Features
//!
//! - **Template generation**: empty dense-array and record-table
//!   templates resolved through an injected [`SchemaResolver`],
//!   including per-layer storage kinds and period wrapping
//! - **Line tokenization**: quote-aware field splitting with
//!   automatic delimiter selection for files written by other tools
//! - **Ragged traversal**: depth-first iteration over arbitrarily
//!   nested value trees with structural metadata per leaf
//! - **Coordinate enumeration**: row-major iteration over rectangular
//!   N-dimensional shapes
//! - **Array diagnostics**: tolerance comparison and text dumps of
//!   dense arrays up to rank 4
//!
//! ## Quick Start
//!
//! Tokenizing input lines:
//!
//! ```rust
//! use siminput::split_data_line;
//!
//! let fields = split_data_line("chd 'river stage' 100.0", false);
//! assert_eq!(fields, vec!["chd", "river stage", "100.0"]);
//!
//! // comma-delimited external file: the comma split wins
//! let fields = split_data_line("10,20,30", true);
//! assert_eq!(fields, vec!["10", "20", "30"]);
//! ```
//!
//! Flattening ragged nested data:
//!
//! ```rust
//! use siminput::tree;
//!
//! let layers = tree!([[1.0, 2.0], [3.0]]);
//! assert_eq!(layers.leaf_count(), 3);
//! for record in layers.walk() {
//!     println!("{} (depth change {})", record.value, record.nesting_change);
//! }
//! ```
//!
//! Building an empty record-table template:
//!
//! ```rust
//! use siminput::{
//!     ArraySpec, DataPath, FieldKind, ListSpec, ListTemplateGenerator,
//!     ListTemplateOptions, Result, SchemaResolver,
//! };
//!
//! struct WellSchema;
//!
//! impl SchemaResolver for WellSchema {
//!     fn array_spec(&self, path: &DataPath) -> Result<ArraySpec> {
//!         Err(siminput::Error::schema(&path.to_string(), "no arrays here"))
//!     }
//!
//!     fn list_spec(&self, _path: &DataPath, _nseg: Option<usize>) -> Result<ListSpec> {
//!         Ok(ListSpec {
//!             fields: vec![
//!                 ("cellid".to_string(), FieldKind::Integer),
//!                 ("q".to_string(), FieldKind::Float),
//!             ],
//!             transient: false,
//!             multiple: false,
//!         })
//!     }
//! }
//!
//! let generator = ListTemplateGenerator::new(DataPath::new([
//!     "gwf6", "wel", "period", "stress_period_data",
//! ]));
//! let template = generator
//!     .empty(&WellSchema, &ListTemplateOptions::new().with_maxbound(2))
//!     .unwrap();
//! let table = template.as_static().unwrap();
//! assert_eq!(table.rows.len(), 2);
//! ```
//!
//! ## Error Handling
//!
//! Numeric classification never fails, it answers `false`. Template
//! construction fails fast with [`Error::StructureDefinition`] on
//! inconsistent requests, and schema lookup failures pass through
//! unmodified. Array diff dumps degrade to a logged `false` instead
//! of propagating I/O errors.

pub mod array;
pub mod docstring;
pub mod error;
pub mod macros;
pub mod schema;
pub mod template;
pub mod tokenize;
pub mod tree;
pub mod value;

pub use array::{layered_array, ArrayCompare};
pub use docstring::DocStringBuilder;
pub use error::{Error, Result};
pub use schema::{
    ArraySpec, DataPath, FieldKind, ListSpec, NameIter, PathIter, SchemaResolver, StorageKind,
};
pub use template::{
    ArrayTemplate, ArrayTemplateGenerator, ArrayTemplateOptions, LayerStorage,
    ListTemplateGenerator, ListTemplateOptions, NumericArray, RecordTable, Template,
};
pub use tokenize::{clean_numeric, find_keyword, is_float, is_int, split_data_line, TokenReader};
pub use tree::{IndexIter, TraversalRecord, TreeIter};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree;

    #[test]
    fn test_tokenize_then_classify() {
        let fields = split_data_line("CONSTANT 5.0", false);
        assert_eq!(fields.len(), 2);
        assert!(!is_int(&fields[0]));
        assert!(is_float(&fields[1]));
    }

    #[test]
    fn test_walk_matches_index_iter_for_rectangular_data() {
        // a rectangular tree visits leaves in the same order the
        // coordinate iterator enumerates cells
        let data = tree!([[1, 2, 3], [4, 5, 6]]);
        let leaves: Vec<i64> = data.leaves().filter_map(Value::as_i64).collect();
        let coords: Vec<Vec<usize>> = IndexIter::new(&[2, 3]).collect();
        assert_eq!(leaves.len(), coords.len());
        for (leaf, coord) in leaves.iter().zip(&coords) {
            assert_eq!(*leaf, (coord[0] * 3 + coord[1]) as i64 + 1);
        }
    }
}
