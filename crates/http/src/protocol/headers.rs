//! Case-normalized header storage shared by requests, responses and trailers.
//!
//! [`Headers`] keeps one combined value per lower-cased name. Setting a name that
//! is already present appends the new value joined by `", "`, which is the
//! simplified list-header combination used throughout this crate (it is applied
//! to every header, including single-valued ones such as `Content-Length`).
//!
//! Header lines are parsed one at a time through [`Headers::parse`], which is
//! re-entrant across partial reads: it consumes nothing until a full line is
//! available in the buffer.

use std::collections::HashMap;
use std::collections::hash_map;

use tracing::trace;

use crate::ensure;
use crate::protocol::ParseError;

const CRLF: &[u8] = b"\r\n";

/// Separator used when a second value is set on an existing name
const VALUE_SEPARATOR: &str = ", ";

/// A collection of header fields keyed by lower-cased name.
///
/// Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, combining with any existing value.
    ///
    /// The name is lower-cased and must be a token (`[A-Za-z0-9-]+`). The value is
    /// trimmed of surrounding whitespace. If the name already has a value, the new
    /// one is appended as `"<old>, <new>"`.
    ///
    /// # Errors
    ///
    /// - [`ParseError::InvalidHeaderToken`] if the name is not a valid token
    /// - [`ParseError::InvalidHeaderValue`] if the value contains `\r` or `\n`
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), ParseError> {
        let name = normalize_name(name)?;
        let value = checked_value(&name, value)?;
        self.append_normalized(name, value.trim());
        Ok(())
    }

    /// Replaces any existing value of `name` with `value`.
    ///
    /// Used for single-valued headers such as `Content-Type`.
    ///
    /// # Errors
    ///
    /// - [`ParseError::InvalidHeaderToken`] if the name is not a valid token
    /// - [`ParseError::InvalidHeaderValue`] if the value contains `\r` or `\n`
    pub fn replace(&mut self, name: &str, value: &str) -> Result<(), ParseError> {
        let name = normalize_name(name)?;
        let value = checked_value(&name, value)?;
        self.inner.insert(name, value.to_string());
        Ok(())
    }

    /// Case-insensitive lookup of the combined value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.inner.contains_key(&name.to_ascii_lowercase())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.inner.remove(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over `(name, value)` pairs in no particular order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.inner.iter() }
    }

    /// Attempts to consume exactly one header line from the front of `src`.
    ///
    /// # Returns
    ///
    /// - `Ok((0, false))` if `src` holds no complete line yet; call again once more
    ///   bytes have been appended
    /// - `Ok((2, true))` if `src` starts with the empty line ending the section
    /// - `Ok((n, false))` if one header line of `n` bytes (terminator included) was
    ///   consumed and merged into this collection
    ///
    /// # Errors
    ///
    /// - [`ParseError::MalformedHeaderName`] if the line has no colon or there is
    ///   whitespace between the name and the colon
    /// - [`ParseError::InvalidHeaderToken`] if the name is not a token
    /// - [`ParseError::InvalidHeaderValue`] if the value is not valid UTF-8
    pub fn parse(&mut self, src: &[u8]) -> Result<(usize, bool), ParseError> {
        let Some(line_end) = find_crlf(src) else {
            return Ok((0, false));
        };

        if line_end == 0 {
            return Ok((CRLF.len(), true));
        }

        let line = &src[..line_end];
        let Some(colon) = line.iter().position(|b| *b == b':') else {
            return Err(ParseError::malformed_header_name(String::from_utf8_lossy(line)));
        };

        let (raw_name, raw_value) = (&line[..colon], &line[colon + 1..]);
        ensure!(
            !raw_name.last().is_some_and(u8::is_ascii_whitespace),
            ParseError::malformed_header_name(String::from_utf8_lossy(raw_name))
        );

        let name = std::str::from_utf8(raw_name.trim_ascii_start())
            .map_err(|_| ParseError::invalid_header_token(String::from_utf8_lossy(raw_name)))?;
        let name = normalize_name(name)?;

        let value = std::str::from_utf8(raw_value.trim_ascii()).map_err(|e| ParseError::invalid_header_value(&name, e))?;

        trace!(name = %name, value, "parsed header line");
        self.append_normalized(name, value);

        Ok((line_end + CRLF.len(), false))
    }

    /// Merges an already normalized name, used where the name is known to be a token.
    pub(crate) fn append_normalized(&mut self, name: String, value: &str) {
        match self.inner.entry(name) {
            hash_map::Entry::Occupied(mut entry) => {
                let combined = entry.get_mut();
                combined.push_str(VALUE_SEPARATOR);
                combined.push_str(value);
            }
            hash_map::Entry::Vacant(entry) => {
                entry.insert(value.to_string());
            }
        }
    }
}

/// Iterator over the entries of a [`Headers`] collection.
#[derive(Debug)]
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Returns the index of the first `CRLF` in `src`, if any.
pub(crate) fn find_crlf(src: &[u8]) -> Option<usize> {
    src.windows(CRLF.len()).position(|window| window == CRLF)
}

/// Returns true if `name` is a non-empty run of `[A-Za-z0-9-]`.
pub(crate) fn is_token(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

fn normalize_name(name: &str) -> Result<String, ParseError> {
    let name = name.to_ascii_lowercase();
    ensure!(is_token(&name), ParseError::invalid_header_token(name));
    Ok(name)
}

/// Line breaks in a value would end the header line early when encoded.
fn checked_value<'v>(name: &str, value: &'v str) -> Result<&'v str, ParseError> {
    ensure!(
        !value.bytes().any(|b| b == b'\r' || b == b'\n'),
        ParseError::invalid_header_value(name, "line break in value")
    );
    Ok(value)
}
