//! MIME envelope extraction.
//!
//! Word and Confluence "doc" exports are usually MHTML: a MIME message whose
//! first `text/html` part holds the document, often quoted-printable encoded
//! and in a legacy charset. This module finds that part and hands back plain
//! UTF-8 HTML for [`convert`](crate::convert).

use std::borrow::Cow;

use base64::Engine as _;
use encoding_rs::{Encoding, UTF_8};
use memchr::memchr;

use crate::{DocdownError, Result};

/// Nesting limit for multipart containers
const MAX_DEPTH: usize = 32;

/// Extract the HTML document from a MIME message.
///
/// A top-level `text/html` message yields its own body. A `multipart/*`
/// message is searched depth-first for the first `text/html` part whose
/// payload decodes. Returns `Ok(None)` when there is no HTML part, which
/// includes input without MIME headers at all.
///
/// # Example
///
/// ```rust
/// let message = b"Content-Type: text/html; charset=utf-8\r\n\r\n<p>Hi</p>";
/// assert_eq!(
///     docdown::extract_html(message).unwrap().as_deref(),
///     Some("<p>Hi</p>")
/// );
/// ```
pub fn extract_html(bytes: &[u8]) -> Result<Option<String>> {
    find_html(&Part::parse(bytes), 0)
}

/// Decode a document export to HTML text, never failing.
///
/// Falls back to reading the whole input as UTF-8 (malformed sequences
/// replaced) when no HTML part is found or the envelope is broken.
pub fn decode_document(bytes: &[u8]) -> String {
    match extract_html(bytes) {
        Ok(Some(html)) => html,
        Ok(None) => {
            log::debug!("no text/html part found, reading input as UTF-8");
            String::from_utf8_lossy(bytes).into_owned()
        }
        Err(err) => {
            log::warn!("{err}; reading input as UTF-8");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

/// Decode a document export and convert it to Markdown.
pub fn convert_document(bytes: &[u8]) -> String {
    crate::convert(&decode_document(bytes))
}

fn find_html(part: &Part<'_>, depth: usize) -> Result<Option<String>> {
    let content_type = part.content_type();

    if content_type.mime == "text/html" {
        let payload = part.payload()?;
        return Ok(Some(decode_text(&payload, content_type.param("charset"))));
    }

    if !content_type.mime.starts_with("multipart/") {
        return Ok(None);
    }
    if depth >= MAX_DEPTH {
        log::debug!("multipart nesting deeper than {MAX_DEPTH}, not descending");
        return Ok(None);
    }

    let boundary = content_type
        .param("boundary")
        .ok_or_else(|| DocdownError::MissingBoundary {
            content_type: content_type.mime.clone(),
        })?;

    let mut first_error = None;
    for raw in split_multipart(part.body, boundary) {
        match find_html(&Part::parse(raw), depth + 1) {
            Ok(Some(html)) => return Ok(Some(html)),
            Ok(None) => {}
            Err(err) => {
                log::debug!("skipping undecodable part: {err}");
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(None),
    }
}

/// One MIME entity: its headers and the raw bytes of its body.
struct Part<'a> {
    /// Lowercased names, unfolded values, in message order
    headers: Vec<(String, String)>,
    body: &'a [u8],
}

impl<'a> Part<'a> {
    /// Split `raw` into headers and body at the first blank line.
    ///
    /// Input that does not start with a header line has no headers and is all
    /// body.
    fn parse(raw: &'a [u8]) -> Self {
        let mut headers: Vec<(String, String)> = Vec::new();
        let mut pos = 0;

        while pos < raw.len() {
            let end = line_end(raw, pos);
            let line = trim_newline(&raw[pos..end]);

            if line.is_empty() {
                return Self {
                    headers,
                    body: &raw[end..],
                };
            }

            if matches!(line[0], b' ' | b'\t') {
                if let Some((_, value)) = headers.last_mut() {
                    value.push(' ');
                    value.push_str(String::from_utf8_lossy(line).trim());
                    pos = end;
                    continue;
                }
            }

            match header_name_end(line) {
                Some(colon) => {
                    let name = String::from_utf8_lossy(&line[..colon]).to_ascii_lowercase();
                    let value = String::from_utf8_lossy(&line[colon + 1..]).trim().to_string();
                    headers.push((name, value));
                }
                // not a header block at all
                None if headers.is_empty() => return Self { headers, body: raw },
                None => {
                    return Self {
                        headers,
                        body: &raw[pos..],
                    }
                }
            }

            pos = end;
        }

        Self {
            headers,
            body: &raw[raw.len()..],
        }
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn content_type(&self) -> ContentType {
        self.header("content-type")
            .map(ContentType::parse)
            .unwrap_or_default()
    }

    /// Body with the transfer encoding removed
    fn payload(&self) -> Result<Cow<'a, [u8]>> {
        let encoding = self
            .header("content-transfer-encoding")
            .map(|value| value.trim().to_ascii_lowercase());

        match encoding.as_deref() {
            Some("quoted-printable") => Ok(Cow::Owned(decode_quoted_printable(self.body))),
            Some("base64") => Ok(Cow::Owned(decode_base64(self.body)?)),
            _ => Ok(Cow::Borrowed(self.body)),
        }
    }
}

/// A parsed `Content-Type` value.
#[derive(Debug, PartialEq, Eq)]
struct ContentType {
    /// Lowercased `type/subtype`
    mime: String,
    /// Lowercased parameter names with unquoted values
    params: Vec<(String, String)>,
}

impl Default for ContentType {
    fn default() -> Self {
        Self {
            mime: "text/plain".to_string(),
            params: Vec::new(),
        }
    }
}

impl ContentType {
    fn parse(value: &str) -> Self {
        let mut segments = split_params(value).into_iter();
        let mime = segments
            .next()
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| s.contains('/'))
            .unwrap_or_else(|| "text/plain".to_string());

        let params = segments
            .filter_map(|segment| {
                let (key, value) = segment.split_once('=')?;
                Some((key.trim().to_ascii_lowercase(), unquote(value.trim())))
            })
            .collect();

        Self { mime, params }
    }

    fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Split on `;` outside double quotes
fn split_params(value: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                segments.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&value[start..]);
    segments
}

fn unquote(value: &str) -> String {
    match value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => {
            let mut out = String::with_capacity(inner.len());
            let mut chars = inner.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                } else {
                    out.push(c);
                }
            }
            out
        }
        None => value.to_string(),
    }
}

/// Bodies of a multipart entity, preamble and epilogue excluded.
///
/// A body missing its closing delimiter still yields its last part.
fn split_multipart<'a>(body: &'a [u8], boundary: &str) -> Vec<&'a [u8]> {
    let delimiter = format!("--{boundary}");
    let mut parts = Vec::new();
    let mut start: Option<usize> = None;
    let mut pos = 0;

    while pos < body.len() {
        let end = line_end(body, pos);
        let line = trim_trailing_space(trim_newline(&body[pos..end]));

        if let Some(rest) = line.strip_prefix(delimiter.as_bytes()) {
            if rest.is_empty() || rest == b"--" {
                if let Some(s) = start {
                    parts.push(trim_newline(&body[s..pos]));
                }
                if rest == b"--" {
                    return parts;
                }
                start = Some(end);
            }
        }

        pos = end;
    }

    if let Some(s) = start {
        parts.push(&body[s.min(body.len())..]);
    }
    parts
}

/// Decode a quoted-printable body.
///
/// Soft line breaks (`=` at end of line, trailing blanks allowed) are removed
/// and `=XX` escapes decoded. Any other `=` is kept literally.
fn decode_quoted_printable(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        let byte = input[i];
        if byte != b'=' {
            out.push(byte);
            i += 1;
            continue;
        }

        let rest = &input[i + 1..];
        let blanks = rest
            .iter()
            .take_while(|b| matches!(b, b' ' | b'\t'))
            .count();
        let after = &rest[blanks..];
        if after.starts_with(b"\r\n") {
            i += 1 + blanks + 2;
        } else if after.starts_with(b"\n") {
            i += 1 + blanks + 1;
        } else if after.is_empty() {
            i = input.len();
        } else if let (Some(hi), Some(lo)) = (
            rest.first().and_then(|b| hex_value(*b)),
            rest.get(1).and_then(|b| hex_value(*b)),
        ) {
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(b'=');
            i += 1;
        }
    }

    out
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

fn decode_base64(input: &[u8]) -> Result<Vec<u8>> {
    let compact: Vec<u8> = input
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    Ok(base64::engine::general_purpose::STANDARD.decode(compact)?)
}

/// Decode `bytes` in the named charset, UTF-8 when the label is missing or
/// unknown. Malformed sequences become U+FFFD.
fn decode_text(bytes: &[u8], charset: Option<&str>) -> String {
    let encoding = match charset {
        Some(label) => Encoding::for_label(label.trim().as_bytes()).unwrap_or_else(|| {
            log::debug!("unknown charset {label:?}, decoding as UTF-8");
            UTF_8
        }),
        None => UTF_8,
    };

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::debug!("malformed {} sequences replaced", used.name());
    }
    text.into_owned()
}

fn line_end(bytes: &[u8], pos: usize) -> usize {
    memchr(b'\n', &bytes[pos..]).map_or(bytes.len(), |i| pos + i + 1)
}

fn trim_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn trim_trailing_space(line: &[u8]) -> &[u8] {
    let keep = line
        .iter()
        .rposition(|b| !matches!(b, b' ' | b'\t'))
        .map_or(0, |i| i + 1);
    &line[..keep]
}

/// Position of the colon ending a header name, if `line` starts a header
fn header_name_end(line: &[u8]) -> Option<usize> {
    let colon = memchr(b':', line)?;
    let name = &line[..colon];
    (!name.is_empty() && name.iter().all(u8::is_ascii_graphic)).then_some(colon)
}
