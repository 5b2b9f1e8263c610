//! Array comparison and text persistence.
//!
//! Debugging a model run usually comes down to comparing two versions
//! of the same gridded dataset. [`ArrayCompare`] checks two dense
//! arrays for equality within a tolerance and can dump arrays of rank
//! 1 through 4 (and their difference) to a simple text format for
//! inspection.
//!
//! ## File Format
//!
//! The first line is the textual shape tuple, for example `(3, 4)`.
//! Each following line holds one row of scientific-notation numbers
//! with 3 fractional digits in 10-character right-justified fields.
//! Higher-dimension slices are separated by blank lines.
//!
//! ## Examples
//!
//! ```rust
//! use ndarray::ArrayD;
//! use siminput::ArrayCompare;
//!
//! let compare = ArrayCompare::default().with_tolerance(0.5);
//! let a = ArrayD::from_elem(ndarray::IxDyn(&[2, 2]), 1.0);
//! let b = ArrayD::from_elem(ndarray::IxDyn(&[2, 2]), 1.4);
//! assert!(compare.approx_eq(&a, &b));
//! ```

use crate::{Error, Result};
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

const DIFF_FILE: &str = "debug_array_diff.txt";

/// Formats a value the way the array dump format expects: three
/// fractional digits, two-digit signed exponent, 10-character field.
fn sci(value: f64) -> String {
    if !value.is_finite() {
        let text = if value.is_nan() {
            "nan"
        } else if value > 0.0 {
            "inf"
        } else {
            "-inf"
        };
        return format!("{:>10}", text);
    }
    let formatted = format!("{:.3e}", value);
    let (mantissa, exponent) = match formatted.split_once('e') {
        Some(parts) => parts,
        None => return format!("{:>10}", formatted),
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{:>10}", format!("{}e{}{:0>2}", mantissa, sign, digits))
}

fn shape_header(shape: &[usize]) -> String {
    match shape {
        [single] => format!("({},)", single),
        _ => format!(
            "({})",
            shape
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn write_slices<W: Write>(out: &mut W, view: ArrayViewD<'_, f64>) -> io::Result<()> {
    match view.ndim() {
        1 => {
            for &value in view.iter() {
                writeln!(out, "{}", sci(value))?;
            }
        }
        2 => {
            for row in view.outer_iter() {
                let line = row.iter().map(|&v| sci(v)).collect::<Vec<_>>().join(" ");
                writeln!(out, "{}", line)?;
            }
        }
        _ => {
            for slice in view.outer_iter() {
                write_slices(out, slice)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Tolerance-based comparison and text dumps of dense arrays.
///
/// Output files land in `out_dir`; comparisons accept a maximum
/// absolute element-wise difference of `tolerance` (default 0.01).
///
/// # Examples
///
/// ```rust
/// use siminput::ArrayCompare;
///
/// let compare = ArrayCompare::new("/tmp/debug").with_tolerance(1e-6);
/// assert_eq!(compare.tolerance(), 1e-6);
/// ```
#[derive(Clone, Debug)]
pub struct ArrayCompare {
    out_dir: PathBuf,
    tolerance: f64,
}

impl Default for ArrayCompare {
    fn default() -> Self {
        ArrayCompare {
            out_dir: PathBuf::from("."),
            tolerance: 0.01,
        }
    }
}

impl ArrayCompare {
    /// Creates a comparator writing its dumps into `out_dir`.
    pub fn new<P: Into<PathBuf>>(out_dir: P) -> Self {
        ArrayCompare {
            out_dir: out_dir.into(),
            ..Default::default()
        }
    }

    /// Sets the maximum acceptable absolute difference.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns `true` when the arrays share a shape and no element
    /// differs by more than the tolerance. A difference exactly equal
    /// to the tolerance still passes.
    #[must_use]
    pub fn approx_eq(&self, first: &ArrayD<f64>, second: &ArrayD<f64>) -> bool {
        if first.shape() != second.shape() {
            return false;
        }
        let max_diff = first
            .iter()
            .zip(second.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f64, f64::max);
        max_diff <= self.tolerance
    }

    /// Writes `array` to `filename` inside the output directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRank`] outside rank 1 through 4
    /// and [`Error::Io`] on write failures. The output handle is
    /// closed on every exit path.
    pub fn save(&self, filename: &str, array: &ArrayD<f64>) -> Result<()> {
        let rank = array.ndim();
        if !(1..=4).contains(&rank) {
            return Err(Error::unsupported_rank(rank));
        }
        let path = self.out_dir.join(filename);
        let file = File::create(&path).map_err(|e| Error::io(&e.to_string()))?;
        let mut out = BufWriter::new(file);
        writeln!(out, "{}", shape_header(array.shape())).map_err(|e| Error::io(&e.to_string()))?;
        write_slices(&mut out, array.view()).map_err(|e| Error::io(&e.to_string()))?;
        out.flush().map_err(|e| Error::io(&e.to_string()))?;
        Ok(())
    }

    /// Saves both arrays and their element-wise difference
    /// (`debug_array_diff.txt`) to the output directory.
    ///
    /// Failures never escape: a shape mismatch or write error is
    /// logged and reported as `false`.
    pub fn save_diff(
        &self,
        first: &ArrayD<f64>,
        second: &ArrayD<f64>,
        first_name: &str,
        second_name: &str,
    ) -> bool {
        if first.shape() != second.shape() {
            log::error!(
                "array difference could not be saved, shapes {:?} and {:?} do not match",
                first.shape(),
                second.shape()
            );
            return false;
        }
        let diff = first - second;
        let result = self
            .save(first_name, first)
            .and_then(|_| self.save(second_name, second))
            .and_then(|_| self.save(DIFF_FILE, &diff));
        match result {
            Ok(()) => true,
            Err(e) => {
                log::error!("an error occurred while outputting array differences: {}", e);
                false
            }
        }
    }
}

/// Builds a dense array of rank 1 to 3 where every cell of layer `i`
/// holds `layer_values[i]`.
///
/// # Errors
///
/// Returns [`Error::StructureDefinition`] when the rank is outside 1
/// to 3 or the value count does not match the first dimension.
pub fn layered_array(dims: &[usize], layer_values: &[f64]) -> Result<ArrayD<f64>> {
    if dims.is_empty() || dims.len() > 3 {
        return Err(Error::structure_definition(format!(
            "layered arrays support 1 to 3 dimensions, got {}",
            dims.len()
        )));
    }
    if dims[0] != layer_values.len() {
        return Err(Error::structure_definition(format!(
            "expected one value per layer, got {} values for {} layers",
            layer_values.len(),
            dims[0]
        )));
    }
    let mut array = ArrayD::zeros(IxDyn(dims));
    for (layer, mut slice) in array.axis_iter_mut(Axis(0)).enumerate() {
        slice.fill(layer_values[layer]);
    }
    Ok(array)
}
