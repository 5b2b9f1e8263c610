//! Formatted documentation blocks for generated reference material.
//!
//! Field descriptions in the upstream schema definitions carry LaTeX
//! markup and arrive unwrapped. [`DocStringBuilder`] collects a
//! description plus `(name, type, description)` parameter entries,
//! strips the markup, and renders one numpydoc-style block with every
//! line word-wrapped to 79 columns under hanging indents. Purely
//! textual, no I/O.
//!
//! ## Examples
//!
//! ```rust
//! use siminput::DocStringBuilder;
//!
//! let mut builder = DocStringBuilder::new("Well package input.");
//! builder.add_parameter("q", "double", "volumetric well rate");
//! let block = builder.build();
//! assert!(block.contains("q : double"));
//! ```

const WIDTH: usize = 79;
const INDENT: &str = "    ";

/// Strips the small fixed set of markup escapes carried over from the
/// upstream definition files.
fn resolve_markup(text: &str) -> String {
    text.replace("\\texttt{", "")
        .replace('}', "")
        .replace("~\\ref{table:", "")
        .replace("\\reftable:", "")
}

/// Accumulates a description and parameter entries, then renders one
/// wrapped documentation block.
pub struct DocStringBuilder {
    description: String,
    parameters: Vec<String>,
}

impl DocStringBuilder {
    /// Starts a block with the given description. Markup escapes are
    /// stripped immediately.
    #[must_use]
    pub fn new(description: &str) -> Self {
        DocStringBuilder {
            description: resolve_markup(description),
            parameters: Vec::new(),
        }
    }

    /// Adds one parameter entry.
    ///
    /// The `name : type` line wraps at 79 columns; the description
    /// wraps below it with a deeper hanging indent, one paragraph per
    /// input line.
    pub fn add_parameter(&mut self, name: &str, kind: &str, description: &str) {
        let double_indent = format!("{}{}", INDENT, INDENT);
        let hanging = format!("  {}", double_indent);
        let wrapped_description = description
            .split('\n')
            .map(|line| {
                textwrap::fill(
                    line,
                    textwrap::Options::new(WIDTH)
                        .initial_indent(&double_indent)
                        .subsequent_indent(&hanging),
                )
            })
            .filter(|chunk| !chunk.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        let name_line = textwrap::fill(
            &format!("{} : {}", name, kind),
            textwrap::Options::new(WIDTH)
                .initial_indent("")
                .subsequent_indent(&format!("  {}", INDENT)),
        );

        let entry = if wrapped_description.is_empty() {
            name_line
        } else {
            format!("{}\n{}", name_line, wrapped_description)
        };
        self.parameters.push(resolve_markup(&entry));
    }

    /// Renders the accumulated block.
    #[must_use]
    pub fn build(&self) -> String {
        let mut block = format!(
            "{}{}\n\n{}Attributes\n{}----------\n",
            INDENT, self.description, INDENT, INDENT
        );
        for parameter in &self.parameters {
            block.push_str(INDENT);
            block.push_str(parameter);
            block.push('\n');
        }
        block
    }
}
