//! Tag-soup tokenizer.
//!
//! This is deliberately not the HTML5 tokenizer state machine. It splits the
//! input into start tags, end tags, text and comments the way a permissive
//! lexer does, and leaves every structural decision to the tree builder.
//!
//! Known limitations:
//! - Text is emitted raw. Entity decoding happens during rendering, because
//!   whitespace handling needs to see the text before it is decoded.
//! - Declarations (`<!DOCTYPE>`, `<![CDATA[`) and processing instructions are
//!   dropped without being reported.
//! - A tag still open at end of input is emitted as literal text.

use std::fmt;

use memchr::memchr;

use crate::entities;
use crate::utilities::is_raw_text;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

/// One lexical unit of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<name attr=value ...>` or `<name/>`
    StartTag {
        /// Lowercased tag name
        name: String,
        /// Lowercased attribute names with entity-decoded values
        attributes: Vec<(String, String)>,
        /// Written with a trailing `/>`
        self_closing: bool,
    },
    /// `</name>`
    EndTag(String),
    /// Raw character data
    Text(String),
    /// `<!-- ... -->` body, or the body of a bogus comment
    Comment(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::StartTag {
                name, self_closing, ..
            } => {
                if *self_closing {
                    write!(f, "<{name}/>")
                } else {
                    write!(f, "<{name}>")
                }
            }
            Token::EndTag(name) => write!(f, "</{name}>"),
            Token::Text(text) => write!(f, "#text({text:?})"),
            Token::Comment(text) => write!(f, "<!--{text}-->"),
        }
    }
}

/// Streaming tokenizer over a borrowed input string.
///
/// Slices are only ever cut at ASCII structural bytes or at the end of input,
/// so every slice boundary is a UTF-8 char boundary.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    /// Set after a `script`/`style` start tag: the next text runs until its end tag
    raw_text: Option<String>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer positioned at the start of `input`
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            raw_text: None,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    /// Emit the remainder of the input as text
    fn rest_as_text(&mut self) -> Token {
        let text = &self.input[self.pos..];
        self.pos = self.input.len();
        Token::Text(text.to_string())
    }

    /// Whether the `<` at `at` opens markup rather than being a literal
    fn starts_markup(&self, at: usize) -> bool {
        match self.bytes().get(at + 1) {
            Some(b) => b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'),
            None => false,
        }
    }

    fn lex_text(&mut self) -> Token {
        let bytes = self.bytes();
        let start = self.pos;
        let mut i = start;
        loop {
            match memchr(b'<', &bytes[i..]) {
                Some(rel) if self.starts_markup(i + rel) && i + rel > start => {
                    i += rel;
                    break;
                }
                Some(rel) => i += rel + 1,
                None => {
                    i = bytes.len();
                    break;
                }
            }
        }
        self.pos = i;
        Token::Text(self.input[start..i].to_string())
    }

    fn lex_raw_text(&mut self, tag: &str) -> Option<Token> {
        let haystack = &self.input[self.pos..];
        match find_raw_text_close(haystack, tag) {
            Some(0) => None,
            Some(end) => {
                let text = &haystack[..end];
                self.pos += end;
                Some(Token::Text(text.to_string()))
            }
            None if haystack.is_empty() => None,
            None => Some(self.rest_as_text()),
        }
    }

    /// Comment, declaration, processing instruction or bogus comment: skip
    /// `skip` bytes of opener and run to `terminator`. Unterminated bodies run
    /// to end of input.
    fn lex_comment_like(&mut self, skip: usize, terminator: &str) -> Token {
        let body_start = self.pos + skip;
        let rest = &self.input[body_start..];
        match rest.find(terminator) {
            Some(end) => {
                self.pos = body_start + end + terminator.len();
                Token::Comment(rest[..end].to_string())
            }
            None => {
                self.pos = self.input.len();
                Token::Comment(rest.to_string())
            }
        }
    }

    fn lex_end_tag(&mut self) -> Option<Token> {
        let bytes = self.bytes();
        let name_start = self.pos + 2;
        match bytes.get(name_start) {
            Some(b'>') => {
                // `</>` is dropped outright
                self.pos = name_start + 1;
                None
            }
            Some(b) if b.is_ascii_alphabetic() => {
                let name_end = scan_name(bytes, name_start);
                let Some(close) = memchr(b'>', &bytes[name_end..]) else {
                    return Some(self.rest_as_text());
                };
                let name = self.input[name_start..name_end].to_ascii_lowercase();
                self.pos = name_end + close + 1;
                Some(Token::EndTag(name))
            }
            _ => Some(self.lex_comment_like(2, ">")),
        }
    }

    fn lex_start_tag(&mut self) -> Token {
        let bytes = self.bytes();
        let len = bytes.len();
        let name_start = self.pos + 1;
        let name_end = scan_name(bytes, name_start);
        let name = self.input[name_start..name_end].to_ascii_lowercase();

        let mut attributes: Vec<(String, String)> = Vec::new();
        let mut self_closing = false;
        let mut i = name_end;

        loop {
            i = skip_whitespace(bytes, i);
            if i >= len {
                return self.rest_as_text();
            }
            match bytes[i] {
                b'>' => {
                    i += 1;
                    break;
                }
                b'/' => {
                    if bytes.get(i + 1) == Some(&b'>') {
                        self_closing = true;
                        i += 2;
                        break;
                    }
                    i += 1;
                    continue;
                }
                _ => {}
            }

            // The first byte is taken as-is so that a stray `=` still forms a name
            let attr_start = i;
            i += 1;
            while i < len && !is_attr_name_end(bytes[i]) {
                i += 1;
            }
            let attr_name = self.input[attr_start..i].to_ascii_lowercase();

            let after_name = skip_whitespace(bytes, i);
            let mut value = String::new();
            if after_name < len && bytes[after_name] == b'=' {
                i = skip_whitespace(bytes, after_name + 1);
                match bytes.get(i).copied() {
                    Some(quote @ (b'"' | b'\'')) => {
                        let Some(close) = memchr(quote, &bytes[i + 1..]) else {
                            return self.rest_as_text();
                        };
                        value = decode_attribute(&self.input[i + 1..i + 1 + close]);
                        i += close + 2;
                    }
                    Some(_) => {
                        let value_start = i;
                        while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                            i += 1;
                        }
                        value = decode_attribute(&self.input[value_start..i]);
                    }
                    None => return self.rest_as_text(),
                }
            }
            attributes.push((attr_name, value));
        }

        self.pos = i;
        if !self_closing && is_raw_text(&name) {
            self.raw_text = Some(name.clone());
        }
        Token::StartTag {
            name,
            attributes,
            self_closing,
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(tag) = self.raw_text.take() {
                if let Some(token) = self.lex_raw_text(&tag) {
                    return Some(token);
                }
            }
            if self.pos >= self.input.len() {
                return None;
            }

            let bytes = self.bytes();
            if bytes[self.pos] != b'<' || !self.starts_markup(self.pos) {
                return Some(self.lex_text());
            }

            let rest = &self.input[self.pos..];
            let token = if rest.starts_with(COMMENT_START) {
                Some(self.lex_comment_like(COMMENT_START.len(), COMMENT_END))
            } else {
                match bytes[self.pos + 1] {
                    b'!' | b'?' => Some(self.lex_comment_like(2, ">")),
                    b'/' => self.lex_end_tag(),
                    _ => Some(self.lex_start_tag()),
                }
            };
            if token.is_some() {
                return token;
            }
        }
    }
}

/// Tokenize a whole string
pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).collect()
}

fn scan_name(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'/' | b'>') {
        i += 1;
    }
    i
}

fn skip_whitespace(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn is_attr_name_end(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'/' | b'=' | b'>')
}

fn decode_attribute(raw: &str) -> String {
    entities::decode_attribute(raw).into_owned()
}

/// Offset of the `</tag` that closes a raw text element, if any.
///
/// The close tag must be followed by whitespace, `/` or `>`, so `</scripts>`
/// does not end a script.
fn find_raw_text_close(haystack: &str, tag: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let tag = tag.as_bytes();
    let mut i = 0;
    while let Some(rel) = memchr(b'<', &bytes[i..]) {
        let at = i + rel;
        let name_start = at + 2;
        let name_end = name_start + tag.len();
        if bytes.get(at + 1) == Some(&b'/')
            && name_end <= bytes.len()
            && bytes[name_start..name_end].eq_ignore_ascii_case(tag)
            && bytes
                .get(name_end)
                .map_or(true, |b| b.is_ascii_whitespace() || matches!(b, b'/' | b'>'))
        {
            return Some(at);
        }
        i = at + 1;
    }
    None
}
