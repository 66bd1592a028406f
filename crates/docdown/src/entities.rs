//! Character reference decoding with the HTML5 recovery rules.
//!
//! Named references are looked up through `html-escape`. On top of that:
//! - the legacy names (`&amp`, `&copy`, `&nbsp` ...) decode without a semicolon,
//!   using the longest legacy name that prefixes the run;
//! - numeric references decode without a semicolon too;
//! - `&#0;`, surrogates and values above U+10FFFF become U+FFFD, and
//!   0x80..=0x9F map through windows-1252 the way browsers do.
//!
//! In attribute values a semicolon-less legacy name followed by `=` or an
//! alphanumeric stays literal, so query strings like `?a=1&copy=2` survive.

use std::borrow::Cow;

use memchr::memchr;

/// Longest name in the legacy table
const MAX_LEGACY_LEN: usize = 6;

/// Longest named reference worth looking up
const MAX_NAME_LEN: usize = 32;

/// Names that decode even without a terminating semicolon
const LEGACY_NAMES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// windows-1252 characters for references to 0x80..=0x9F; `None` keeps the C1 code
const WINDOWS_1252: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// Decode character references in text content
pub fn decode_text(text: &str) -> Cow<'_, str> {
    decode(text, false)
}

/// Decode character references in an attribute value
pub fn decode_attribute(value: &str) -> Cow<'_, str> {
    decode(value, true)
}

fn decode(s: &str, in_attribute: bool) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut i = first;
    while i < bytes.len() {
        if bytes[i] != b'&' {
            let next = memchr(b'&', &bytes[i..]).map_or(bytes.len(), |n| i + n);
            out.push_str(&s[i..next]);
            i = next;
            continue;
        }

        let consumed = if bytes.get(i + 1) == Some(&b'#') {
            numeric_reference(bytes, i, &mut out)
        } else {
            named_reference(s, i, in_attribute, &mut out)
        };
        match consumed {
            Some(len) => i += len,
            None => {
                out.push('&');
                i += 1;
            }
        }
    }
    Cow::Owned(out)
}

/// Decode `&#...` at `start`, returning the number of bytes consumed
fn numeric_reference(bytes: &[u8], start: usize, out: &mut String) -> Option<usize> {
    let mut j = start + 2;
    let hex = matches!(bytes.get(j), Some(b'x' | b'X'));
    if hex {
        j += 1;
    }

    let digits_start = j;
    let mut value: u32 = 0;
    while let Some(&b) = bytes.get(j) {
        let digit = if hex {
            (b as char).to_digit(16)
        } else {
            (b as char).to_digit(10)
        };
        let Some(digit) = digit else { break };
        // Saturate past the last scalar so long digit runs stay invalid
        value = value
            .saturating_mul(if hex { 16 } else { 10 })
            .saturating_add(digit)
            .min(0x11_0000);
        j += 1;
    }
    if j == digits_start {
        return None;
    }
    if bytes.get(j) == Some(&b';') {
        j += 1;
    }

    if let Some(ch) = numeric_char(value) {
        out.push(ch);
    }
    Some(j - start)
}

/// Character for a numeric reference, `None` for codes that are dropped
fn numeric_char(value: u32) -> Option<char> {
    if (0x80..=0x9F).contains(&value) {
        if let Some(ch) = WINDOWS_1252[(value - 0x80) as usize] {
            return Some(ch);
        }
    }
    match char::from_u32(value) {
        None | Some('\0') => Some('\u{FFFD}'),
        Some(ch) if ch.is_control() && !ch.is_ascii_whitespace() => None,
        Some(ch) => Some(ch),
    }
}

/// Decode `&name` at `start`, returning the number of bytes consumed
fn named_reference(s: &str, start: usize, in_attribute: bool, out: &mut String) -> Option<usize> {
    let bytes = s.as_bytes();
    let name_start = start + 1;
    let name_len = bytes[name_start..]
        .iter()
        .take(MAX_NAME_LEN)
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if name_len == 0 {
        return None;
    }
    let name = &s[name_start..name_start + name_len];

    if bytes.get(name_start + name_len) == Some(&b';') {
        if let Some(decoded) = lookup(name) {
            out.push_str(&decoded);
            return Some(name_len + 2);
        }
    }

    let legacy = (1..=name_len.min(MAX_LEGACY_LEN))
        .rev()
        .map(|len| &name[..len])
        .find(|prefix| LEGACY_NAMES.contains(prefix))?;
    if in_attribute {
        let following = bytes.get(name_start + legacy.len()).copied();
        if following.is_some_and(|b| b == b'=' || b.is_ascii_alphanumeric()) {
            return None;
        }
    }
    out.push_str(&lookup(legacy)?);
    Some(legacy.len() + 1)
}

/// Resolve a semicolon-terminated named reference
fn lookup(name: &str) -> Option<String> {
    let reference = format!("&{name};");
    match html_escape::decode_html_entities(&reference) {
        Cow::Owned(decoded) if decoded != reference => Some(decoded),
        _ => None,
    }
}
