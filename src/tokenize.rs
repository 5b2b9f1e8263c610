//! Line tokenization for structured input files.
//!
//! Input files in this domain are nominally whitespace-delimited, but
//! files produced by other tools arrive comma- or tab-delimited, mix
//! delimiters with quoting, and pad fields inconsistently. This
//! module normalizes such lines into clean field lists:
//!
//! - [`split_data_line`]: field splitting with quote handling and,
//!   for external files, automatic delimiter selection
//! - [`clean_numeric`]: strips non-numeric clutter from both ends of
//!   a token
//! - [`find_keyword`]: longest-prefix keyword recognition against a
//!   keyword dictionary
//! - [`is_int`] / [`is_float`]: non-panicking numeric classification
//! - [`TokenReader`]: token-at-a-time iteration over a whole file
//!
//! ## Examples
//!
//! ```rust
//! use siminput::split_data_line;
//!
//! let fields = split_data_line("a 'hello world' b", false);
//! assert_eq!(fields, vec!["a", "hello world", "b"]);
//!
//! // Comma-delimited external file: comma wins over whitespace
//! let fields = split_data_line("1,2,,3", true);
//! assert_eq!(fields, vec!["1", "2", "", "3"]);
//! ```

use crate::{Error, Result};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Candidate delimiters tried for external files, in priority order.
const DELIMITERS: [char; 3] = [',', '\t', ' '];

fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '"')
}

fn parse_int(token: &str) -> Option<i64> {
    token.trim().parse::<i64>().ok()
}

fn parse_float(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok()
}

/// Returns `true` if `token` parses as an integer literal.
///
/// Never panics; malformed input is simply `false`.
///
/// # Examples
///
/// ```rust
/// use siminput::is_int;
///
/// assert!(is_int("42"));
/// assert!(is_int(" -7 "));
/// assert!(!is_int("4.2"));
/// assert!(!is_int("layer"));
/// ```
#[must_use]
pub fn is_int(token: &str) -> bool {
    parse_int(token).is_some()
}

/// Returns `true` if `token` parses as a floating-point literal.
///
/// Integer literals qualify too, since every integer is a valid
/// float.
///
/// # Examples
///
/// ```rust
/// use siminput::is_float;
///
/// assert!(is_float("4.2"));
/// assert!(is_float("-1e30"));
/// assert!(is_float("42"));
/// assert!(!is_float("wel"));
/// ```
#[must_use]
pub fn is_float(token: &str) -> bool {
    parse_float(token).is_some()
}

/// Splits a raw input-file line into fields.
///
/// The trimmed line is split on whitespace. With `external_file` set,
/// each candidate delimiter (comma, tab, single space) is tried as
/// well and the one producing strictly the most fields wins; this
/// recovers usable fields from files written by other tools with
/// unknown conventions.
///
/// A post-pass then drops tokens that are a bare delimiter character
/// and merges quoted spans: a field opened by `'` or `"` absorbs
/// following tokens (joined with single spaces) until one ends in a
/// quote, or to the end of the line if the quote is never closed.
/// Quote characters themselves are removed.
///
/// # Examples
///
/// ```rust
/// use siminput::split_data_line;
///
/// let fields = split_data_line("  chd  'river stage'  100.0 ", false);
/// assert_eq!(fields, vec!["chd", "river stage", "100.0"]);
/// ```
#[must_use]
pub fn split_data_line(line: &str, external_file: bool) -> Vec<String> {
    let trimmed = line.trim();
    let mut tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if external_file {
        let mut best_len = tokens.len();
        let mut best_delim = None;
        for delim in DELIMITERS {
            let count = trimmed.split(delim).count();
            if count > best_len {
                best_len = count;
                best_delim = Some(delim);
            }
        }
        if let Some(delim) = best_delim {
            tokens = trimmed.split(delim).collect();
        }
    }

    let mut fields: Vec<String> = Vec::with_capacity(tokens.len());
    let mut index = 0;
    while index < tokens.len() {
        let item = tokens[index];
        let is_bare_delimiter = matches!(item, "," | "\t" | " ");
        if !is_bare_delimiter {
            match item.chars().next() {
                Some(first) if is_quote(first) => {
                    // quote characters are one byte, slicing below is safe
                    if item.chars().last().is_some_and(is_quote) {
                        let inner = if item.len() > 1 {
                            &item[1..item.len() - 1]
                        } else {
                            ""
                        };
                        fields.push(inner.to_string());
                    } else {
                        // open quoted span, absorb until a closing quote
                        let mut field = item[1..].to_string();
                        loop {
                            index += 1;
                            if index >= tokens.len() {
                                break;
                            }
                            let part = tokens[index];
                            match part.chars().last() {
                                Some(last) if is_quote(last) => {
                                    field.push(' ');
                                    field.push_str(&part[..part.len() - 1]);
                                    break;
                                }
                                _ => {
                                    field.push(' ');
                                    field.push_str(part);
                                }
                            }
                        }
                        fields.push(field);
                    }
                }
                _ => fields.push(item.to_string()),
            }
        }
        index += 1;
    }
    fields
}

/// Strips leading and trailing characters that are not ASCII digits,
/// `.`, or `-`, repeatedly from both ends.
///
/// Stops once both ends are numeric-safe or the string is exhausted.
/// Interior clutter is left alone.
///
/// # Examples
///
/// ```rust
/// use siminput::clean_numeric;
///
/// assert_eq!(clean_numeric("  -12.5xyz"), "-12.5");
/// assert_eq!(clean_numeric("(3.0)"), "3.0");
/// assert_eq!(clean_numeric("abc"), "");
/// ```
#[must_use]
pub fn clean_numeric(text: &str) -> &str {
    fn numeric(c: char) -> bool {
        c.is_ascii_digit() || c == '.' || c == '-'
    }

    let mut text = text;
    while let (Some(first), Some(last)) = (text.chars().next(), text.chars().last()) {
        if numeric(first) && numeric(last) {
            break;
        }
        if !numeric(first) {
            text = &text[first.len_utf8()..];
        }
        if let Some(last) = text.chars().last() {
            if !numeric(last) {
                text = &text[..text.len() - last.len_utf8()];
            }
        }
    }
    text
}

/// Finds the longest keyword at the start of a tokenized line.
///
/// All non-numeric tokens are lower-cased, then prefixes are looked
/// up in `keywords` from the full token count down to a single token.
/// The first (longest) hit is returned. Numeric tokens are excluded
/// from matching entirely, so a keyword can never contain a number.
///
/// # Examples
///
/// ```rust
/// use indexmap::IndexMap;
/// use siminput::find_keyword;
///
/// let mut keywords: IndexMap<Vec<String>, u32> = IndexMap::new();
/// keywords.insert(vec!["constant".to_string()], 1);
///
/// let key = find_keyword(&["CONSTANT", "1.0"], &keywords);
/// assert_eq!(key, Some(&vec!["constant".to_string()]));
/// ```
#[must_use]
pub fn find_keyword<'a, S, V>(
    tokens: &[S],
    keywords: &'a IndexMap<Vec<String>, V>,
) -> Option<&'a Vec<String>>
where
    S: AsRef<str>,
{
    let lowered: Vec<String> = tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|token| !is_int(token) && !is_float(token))
        .map(str::to_lowercase)
        .collect();
    for count in (1..=lowered.len()).rev() {
        if let Some((_, key, _)) = keywords.get_full(&lowered[..count]) {
            return Some(key);
        }
    }
    None
}

/// Iterates the tokens of a text file, one field at a time across
/// line boundaries.
///
/// Each line is tokenized with [`split_data_line`]; blank lines are
/// skipped. Read failures surface as `Err` items. The underlying
/// file handle is released when the reader is dropped.
///
/// # Examples
///
/// ```rust,no_run
/// use siminput::TokenReader;
///
/// let reader = TokenReader::open("sim.nam")?;
/// for token in reader {
///     println!("{}", token?);
/// }
/// # Ok::<(), siminput::Error>(())
/// ```
pub struct TokenReader {
    lines: Lines<BufReader<File>>,
    current: std::vec::IntoIter<String>,
}

impl TokenReader {
    /// Opens `path` for token iteration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(&e.to_string()))?;
        Ok(TokenReader {
            lines: BufReader::new(file).lines(),
            current: Vec::new().into_iter(),
        })
    }
}

impl Iterator for TokenReader {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Result<String>> {
        loop {
            if let Some(token) = self.current.next() {
                return Some(Ok(token));
            }
            match self.lines.next() {
                Some(Ok(line)) => {
                    self.current = split_data_line(&line, false).into_iter();
                }
                Some(Err(e)) => return Some(Err(Error::io(&e.to_string()))),
                None => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_classifiers() {
        assert!(is_int("0"));
        assert!(is_int("-15"));
        assert!(!is_int("1.5"));
        assert!(!is_int(""));
        assert!(is_float("1.5"));
        assert!(is_float("-3e-4"));
        assert!(is_float("7"));
        assert!(!is_float("chd"));
        assert!(!is_float(""));
    }

    #[test]
    fn test_split_whitespace_baseline() {
        assert_eq!(split_data_line("  1   2\t3 ", false), vec!["1", "2", "3"]);
        assert!(split_data_line("", false).is_empty());
        assert!(split_data_line("   ", false).is_empty());
    }

    #[test]
    fn test_split_quoted_field() {
        assert_eq!(
            split_data_line("a \"hello world\" b", false),
            vec!["a", "hello world", "b"]
        );
        assert_eq!(
            split_data_line("a 'one two three' b", false),
            vec!["a", "one two three", "b"]
        );
    }

    #[test]
    fn test_split_mixed_quote_characters() {
        // a span opened with one quote closes on either quote character
        assert_eq!(
            split_data_line("'mixed close\" next", false),
            vec!["mixed close", "next"]
        );
    }

    #[test]
    fn test_split_unterminated_quote_absorbs_rest() {
        assert_eq!(
            split_data_line("a 'no closing quote here", false),
            vec!["a", "no closing quote here"]
        );
    }

    #[test]
    fn test_split_external_prefers_comma() {
        assert_eq!(
            split_data_line("1,2,,3", true),
            vec!["1", "2", "", "3"]
        );
    }

    #[test]
    fn test_split_external_keeps_whitespace_when_not_beaten() {
        // two fields either way, whitespace split stands
        assert_eq!(split_data_line("1 2", true), vec!["1", "2"]);
    }

    #[test]
    fn test_split_external_tab_delimited() {
        assert_eq!(
            split_data_line("a\tb\tc\td", true),
            vec!["a", "b", "c", "d"]
        );
    }

    #[test]
    fn test_split_drops_bare_delimiter_tokens() {
        // comma split of "1, ,2" leaves a lone-space token behind
        assert_eq!(split_data_line("1, ,2", true), vec!["1", "2"]);
    }

    #[test]
    fn test_clean_numeric() {
        assert_eq!(clean_numeric("  -12.5xyz"), "-12.5");
        assert_eq!(clean_numeric("12"), "12");
        assert_eq!(clean_numeric("[1.0]"), "1.0");
        assert_eq!(clean_numeric(""), "");
        assert_eq!(clean_numeric("abc"), "");
    }

    #[test]
    fn test_find_keyword_longest_prefix_wins() {
        let mut keywords: IndexMap<Vec<String>, u32> = IndexMap::new();
        keywords.insert(vec!["open".to_string()], 1);
        keywords.insert(vec!["open".to_string(), "close".to_string()], 2);

        let key = find_keyword(&["OPEN", "CLOSE", "extra"], &keywords);
        assert_eq!(
            key,
            Some(&vec!["open".to_string(), "close".to_string()])
        );
    }

    #[test]
    fn test_find_keyword_skips_numeric_tokens() {
        let mut keywords: IndexMap<Vec<String>, u32> = IndexMap::new();
        keywords.insert(vec!["constant".to_string()], 1);

        let key = find_keyword(&["CONSTANT", "1.0"], &keywords);
        assert_eq!(key, Some(&vec!["constant".to_string()]));
    }

    #[test]
    fn test_find_keyword_no_match() {
        let keywords: IndexMap<Vec<String>, u32> = IndexMap::new();
        assert_eq!(find_keyword(&["internal"], &keywords), None);
    }
}
