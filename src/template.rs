//! Empty data templates for simulation input.
//!
//! Before a model can be populated, each input field needs a
//! correctly shaped, placeholder-filled container. The two generators
//! here build those containers from an injected [`SchemaResolver`]:
//!
//! - [`ArrayTemplateGenerator`]: dense gridded fields, optionally one
//!   sub-template per layer, each with its own [`StorageKind`]
//! - [`ListTemplateGenerator`]: tabular record lists with placeholder
//!   rows
//!
//! Fields that vary over simulation periods come back wrapped in a
//! [`Template::Transient`] period map.
//!
//! ## Examples
//!
//! Both generators are configured through an options struct:
//!
//! ```rust,no_run
//! use siminput::{ArrayTemplateGenerator, ArrayTemplateOptions, DataPath};
//! # fn resolver() -> Box<dyn siminput::SchemaResolver> { unimplemented!() }
//!
//! let generator = ArrayTemplateGenerator::new(DataPath::new(["gwf6", "dis", "griddata", "botm"]));
//! let options = ArrayTemplateOptions::new().with_default_value(0.0);
//! let template = generator.empty(&*resolver(), &options)?;
//! # Ok::<(), siminput::Error>(())
//! ```

use crate::schema::{DataPath, FieldKind, SchemaResolver, StorageKind};
use crate::{Error, Result, Value};
use indexmap::IndexMap;
use ndarray::{ArrayD, IxDyn};

/// Dense numeric payload of an internally stored array template.
#[derive(Clone, Debug, PartialEq)]
pub enum NumericArray {
    Int(ArrayD<i64>),
    Float(ArrayD<f64>),
}

impl NumericArray {
    /// The dimension sizes of the payload.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        match self {
            NumericArray::Int(a) => a.shape(),
            NumericArray::Float(a) => a.shape(),
        }
    }

    fn filled(kind: FieldKind, shape: &[usize], default_value: Option<f64>) -> Result<Self> {
        match kind {
            FieldKind::Integer => Ok(NumericArray::Int(ArrayD::from_elem(
                IxDyn(shape),
                default_value.map_or(0, |v| v as i64),
            ))),
            FieldKind::Float => Ok(NumericArray::Float(ArrayD::from_elem(
                IxDyn(shape),
                default_value.unwrap_or(0.0),
            ))),
            FieldKind::Text => Err(Error::structure_definition(
                "array templates require a numeric field kind",
            )),
        }
    }
}

/// Storage wrapper around one layer (or a whole unlayered array).
///
/// Internal dense storage carries the standard scale factor and print
/// code alongside the data; constant storage is the bare fill value;
/// external storage is a yet-unnamed file reference.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerStorage {
    Internal {
        factor: f64,
        print_code: i32,
        data: NumericArray,
    },
    Constant(Value),
    External {
        filename: String,
        factor: f64,
        print_code: i32,
    },
}

/// An array template: one combined storage block, or one per layer.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayTemplate {
    Combined(LayerStorage),
    Layered(Vec<LayerStorage>),
}

/// A built template, possibly keyed by simulation period.
///
/// Non-transient data comes back as `Static`. Transient data is a
/// period-index map, insertion-ordered, with period `0` present when
/// no explicit period list was requested.
#[derive(Clone, Debug, PartialEq)]
pub enum Template<T> {
    Static(T),
    Transient(IndexMap<usize, T>),
}

impl<T> Template<T> {
    /// Returns the inner value of a `Static` template.
    #[must_use]
    pub fn as_static(&self) -> Option<&T> {
        match self {
            Template::Static(inner) => Some(inner),
            Template::Transient(_) => None,
        }
    }

    /// Returns the template stored for `period`, if transient.
    #[must_use]
    pub fn period(&self, period: usize) -> Option<&T> {
        match self {
            Template::Static(_) => None,
            Template::Transient(map) => map.get(&period),
        }
    }

    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Template::Transient(_))
    }
}

/// Options for [`ArrayTemplateGenerator::empty`].
///
/// # Examples
///
/// ```rust
/// use siminput::{ArrayTemplateOptions, StorageKind};
///
/// let options = ArrayTemplateOptions::new()
///     .with_layered(true)
///     .with_storage_kinds(vec![StorageKind::Constant, StorageKind::DenseArray])
///     .with_default_value(1.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ArrayTemplateOptions {
    pub layered: bool,
    pub storage_kinds: Option<Vec<StorageKind>>,
    pub default_value: Option<f64>,
}

impl ArrayTemplateOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests one sub-template per layer.
    #[must_use]
    pub fn with_layered(mut self, layered: bool) -> Self {
        self.layered = layered;
        self
    }

    /// Sets the storage kind per layer. When layered, the list length
    /// must equal the layer count.
    #[must_use]
    pub fn with_storage_kinds(mut self, kinds: Vec<StorageKind>) -> Self {
        self.storage_kinds = Some(kinds);
        self
    }

    /// Sets the fill value. Without it, dense data is zero-filled and
    /// constants default to the kind-typed zero.
    #[must_use]
    pub fn with_default_value(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// Builds empty templates for array-valued fields.
pub struct ArrayTemplateGenerator {
    path: DataPath,
}

impl ArrayTemplateGenerator {
    #[must_use]
    pub fn new(path: DataPath) -> Self {
        ArrayTemplateGenerator { path }
    }

    #[must_use]
    pub fn path(&self) -> &DataPath {
        &self.path
    }

    /// Builds an empty template for the field addressed by this
    /// generator's path.
    ///
    /// Layered fields with more than one layer produce one
    /// [`LayerStorage`] per layer over the per-layer shape, otherwise
    /// a single combined block over the full shape. Transient fields
    /// are wrapped in a period-0 map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructureDefinition`] when the storage-kind
    /// list length does not match the layer count, and propagates
    /// schema lookup failures unmodified.
    pub fn empty(
        &self,
        resolver: &dyn SchemaResolver,
        options: &ArrayTemplateOptions,
    ) -> Result<Template<ArrayTemplate>> {
        let spec = resolver.array_spec(&self.path)?;
        let layer_count = spec.shape.first().copied().unwrap_or(0);

        let template = if options.layered && layer_count > 1 {
            if let Some(kinds) = &options.storage_kinds {
                if kinds.len() != layer_count {
                    let msg = format!(
                        "storage kind list specified with the wrong size, {} but expected \
                         the same as the number of layers, {}",
                        kinds.len(),
                        layer_count
                    );
                    log::error!("{}", msg);
                    return Err(Error::structure_definition(msg));
                }
            }
            let mut layers = Vec::with_capacity(layer_count);
            for layer in 0..layer_count {
                let storage = options
                    .storage_kinds
                    .as_ref()
                    .map_or(StorageKind::DenseArray, |kinds| kinds[layer]);
                layers.push(build_layer(
                    spec.kind,
                    storage,
                    options.default_value,
                    &spec.shape[1..],
                )?);
            }
            ArrayTemplate::Layered(layers)
        } else {
            let storage = options
                .storage_kinds
                .as_ref()
                .and_then(|kinds| kinds.first().copied())
                .unwrap_or(StorageKind::DenseArray);
            ArrayTemplate::Combined(build_layer(
                spec.kind,
                storage,
                options.default_value,
                &spec.shape,
            )?)
        };

        if spec.transient {
            Ok(Template::Transient(IndexMap::from([(0, template)])))
        } else {
            Ok(Template::Static(template))
        }
    }
}

fn build_layer(
    kind: FieldKind,
    storage: StorageKind,
    default_value: Option<f64>,
    shape: &[usize],
) -> Result<LayerStorage> {
    match storage {
        StorageKind::DenseArray => Ok(LayerStorage::Internal {
            factor: 1.0,
            print_code: 1,
            data: NumericArray::filled(kind, shape, default_value)?,
        }),
        StorageKind::Constant => {
            let value = match kind {
                FieldKind::Integer => Value::Int(default_value.map_or(0, |v| v as i64)),
                _ => Value::Float(default_value.unwrap_or(0.0)),
            };
            Ok(LayerStorage::Constant(value))
        }
        StorageKind::ExternalFile => Ok(LayerStorage::External {
            filename: String::new(),
            factor: 1.0,
            print_code: 1,
        }),
    }
}

/// A tabular record template: ordered fields plus placeholder rows.
///
/// Every row starts out identical: `0` in integer cells, `NaN` in
/// float cells, null otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordTable {
    pub fields: Vec<(String, FieldKind)>,
    pub rows: Vec<Vec<Value>>,
}

impl RecordTable {
    /// The field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// The column position of `name`, if present.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(field, _)| field == name)
    }
}

/// Options for [`ListTemplateGenerator::empty`].
#[derive(Clone, Debug, Default)]
pub struct ListTemplateOptions {
    /// Number of placeholder rows. Unset means one row; an explicit
    /// zero means no rows.
    pub maxbound: Option<usize>,
    /// Auxiliary field names appended to the layout, typed as text.
    pub aux_fields: Vec<String>,
    /// Appends a `boundnames` text field.
    pub boundnames: bool,
    /// Segment count forwarded to the schema for layouts that need it.
    pub nseg: Option<usize>,
    /// Coerces every field to text for time-series compatibility.
    pub timeseries: bool,
    /// Explicit period indices; each gets an independent table copy.
    pub periods: Option<Vec<usize>>,
}

impl ListTemplateOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_maxbound(mut self, maxbound: usize) -> Self {
        self.maxbound = Some(maxbound);
        self
    }

    #[must_use]
    pub fn with_aux_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aux_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_boundnames(mut self, boundnames: bool) -> Self {
        self.boundnames = boundnames;
        self
    }

    #[must_use]
    pub fn with_nseg(mut self, nseg: usize) -> Self {
        self.nseg = Some(nseg);
        self
    }

    #[must_use]
    pub fn with_timeseries(mut self, timeseries: bool) -> Self {
        self.timeseries = timeseries;
        self
    }

    #[must_use]
    pub fn with_periods(mut self, periods: Vec<usize>) -> Self {
        self.periods = Some(periods);
        self
    }
}

/// Builds empty templates for list-valued (tabular) fields.
pub struct ListTemplateGenerator {
    path: DataPath,
}

impl ListTemplateGenerator {
    #[must_use]
    pub fn new(path: DataPath) -> Self {
        ListTemplateGenerator { path }
    }

    #[must_use]
    pub fn path(&self) -> &DataPath {
        &self.path
    }

    /// Builds an empty record table for the field addressed by this
    /// generator's path.
    ///
    /// Transient or multiple list data comes back as a period map:
    /// one independent table per requested period, or a single
    /// period-0 entry when no period list is given.
    ///
    /// # Errors
    ///
    /// Propagates schema lookup failures unmodified.
    pub fn empty(
        &self,
        resolver: &dyn SchemaResolver,
        options: &ListTemplateOptions,
    ) -> Result<Template<RecordTable>> {
        let spec = resolver.list_spec(&self.path, options.nseg)?;

        let mut fields = spec.fields;
        for aux in &options.aux_fields {
            fields.push((aux.clone(), FieldKind::Text));
        }
        if options.boundnames {
            fields.push(("boundnames".to_string(), FieldKind::Text));
        }
        if options.timeseries {
            for field in &mut fields {
                field.1 = FieldKind::Text;
            }
        }

        let row: Vec<Value> = fields.iter().map(|(_, kind)| kind.placeholder()).collect();
        let row_count = options.maxbound.unwrap_or(1);
        let table = RecordTable {
            fields,
            rows: vec![row; row_count],
        };

        if spec.transient || spec.multiple {
            let map: IndexMap<usize, RecordTable> = match &options.periods {
                Some(periods) => periods.iter().map(|&p| (p, table.clone())).collect(),
                None => IndexMap::from([(0, table)]),
            };
            Ok(Template::Transient(map))
        } else {
            Ok(Template::Static(table))
        }
    }
}
