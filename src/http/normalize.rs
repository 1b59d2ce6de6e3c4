// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response body normalization
//!
//! Two independent steps run on textual bodies before they reach the XML parser:
//!
//! 1. [`extract_envelope`] cuts the SOAP envelope (with its optional XML
//!    declaration) out of whatever surrounds it.
//! 2. [`repair_logical_address_block`] moves a misplaced `itr:LogicalAddress`
//!    part behind the rest of its WSDL message, undoing a known server bug.
//!
//! Neither step can fail. When nothing matches the body is left untouched.

use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use super::response::ResponseBody;

/// Line terminator used when splitting bodies into lines
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator used when splitting bodies into lines
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

const LOGICAL_ADDRESS_MARKER: &str = r#"element="itr:LogicalAddress""#;
const PART_END_MARKER: &str = "</wsdl:part>";
const MESSAGE_END_MARKER: &str = "</wsdl:message>";

const ENVELOPE: &[u8] = b"envelope";
const CLOSING_TAIL: &[u8] = b":envelope>";

lazy_static! {
    static ref XML_COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
}

/// Normalizes raw response bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseNormalizer {
    /// Cut the SOAP envelope out of the body
    pub extract_envelope: bool,
    /// Reorder the misplaced logical address block
    pub repair_logical_address: bool,
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self {
            extract_envelope: true,
            repair_logical_address: true,
        }
    }
}

impl ResponseNormalizer {
    /// Create a normalizer with both steps enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizer that returns every body unchanged
    pub fn disabled() -> Self {
        Self {
            extract_envelope: false,
            repair_logical_address: false,
        }
    }

    /// Enable/disable envelope extraction
    pub fn extract_envelope(mut self, enabled: bool) -> Self {
        self.extract_envelope = enabled;
        self
    }

    /// Enable/disable the logical address block repair
    pub fn repair_logical_address(mut self, enabled: bool) -> Self {
        self.repair_logical_address = enabled;
        self
    }

    /// Normalize a response body. Binary bodies pass through unchanged.
    pub fn normalize(&self, body: ResponseBody) -> ResponseBody {
        match body {
            ResponseBody::Text(text) => ResponseBody::Text(self.normalize_text(text)),
            binary => binary,
        }
    }

    /// Normalize a textual body
    pub fn normalize_text(&self, body: String) -> String {
        tracing::debug!(body = %body, "Http response body");

        let mut body = body;
        if self.extract_envelope {
            if let Some(envelope) = extract_envelope(&body) {
                tracing::trace!(
                    dropped = body.len() - envelope.len(),
                    "Extracted SOAP envelope"
                );
                body = envelope;
            }
        }
        if self.repair_logical_address {
            if let Some(repaired) = repair_logical_address_block(&body) {
                tracing::trace!("Reordered logical address block");
                body = repaired;
            }
        }
        body
    }
}

/// Normalize a body with both steps enabled
pub fn normalize(body: ResponseBody) -> ResponseBody {
    ResponseNormalizer::default().normalize(body)
}

/// Remove the first XML comment, if any
pub fn strip_first_comment(body: &str) -> Cow<'_, str> {
    XML_COMMENT.replace(body, "")
}

/// Extract the SOAP envelope from a body
///
/// The first XML comment is removed, then the leftmost
/// `[<?...?>]<PREFIX:Envelope ...> ... </PREFIX:Envelope>` is returned, where the
/// closing tag is the last one carrying the same prefix. `Envelope` matches
/// ASCII case-insensitively, the prefix with simple Unicode case folding.
/// Returns `None` when no envelope is present.
pub fn extract_envelope(body: &str) -> Option<String> {
    let stripped = strip_first_comment(body);
    let range = EnvelopeScanner::new(&stripped).find()?;
    Some(stripped[range].to_string())
}

/// Sorted offsets of the bytes matching a predicate
struct Offsets(Vec<usize>);

impl Offsets {
    fn of(bytes: &[u8], matches: impl Fn(u8) -> bool) -> Self {
        Offsets(
            bytes
                .iter()
                .enumerate()
                .filter(|&(_, &b)| matches(b))
                .map(|(i, _)| i)
                .collect(),
        )
    }

    /// First offset at or after `from`
    fn next(&self, from: usize) -> Option<usize> {
        let i = self.0.partition_point(|&offset| offset < from);
        self.0.get(i).copied()
    }

    /// Number of offsets inside `range`
    fn count(&self, range: Range<usize>) -> usize {
        self.0.partition_point(|&offset| offset < range.end)
            - self.0.partition_point(|&offset| offset < range.start)
    }
}

/// Envelope search over one body
///
/// Delimiter offsets and closing tags are indexed up front, so each `<` costs a
/// few binary searches instead of a scan of the rest of the body. Closing tags
/// are grouped by prefix length; a prefix is only folded when a closing tag of
/// the same length exists, and each distinct prefix is resolved once.
struct EnvelopeScanner<'a> {
    body: &'a str,
    colons: Offsets,
    questions: Offsets,
    // UTF-8 continuation bytes, to count chars in a byte range
    continuations: Offsets,
    // prefix length in chars -> (tag start, colon) of each closing tag, ascending
    closings: HashMap<usize, Vec<(usize, usize)>>,
    // folded prefix -> (start, end) of its last closing tag
    resolved: HashMap<String, Option<(usize, usize)>>,
}

impl<'a> EnvelopeScanner<'a> {
    fn new(body: &'a str) -> Self {
        let bytes = body.as_bytes();
        let colons = Offsets::of(bytes, |b| b == b':');
        let continuations = Offsets::of(bytes, |b| b & 0xc0 == 0x80);

        let mut closings: HashMap<usize, Vec<(usize, usize)>> = HashMap::new();
        for (start, _) in body.match_indices("</") {
            let Some(colon) = colons.next(start + 2) else {
                break;
            };
            let tail = bytes.get(colon..colon + CLOSING_TAIL.len());
            if tail.map_or(false, |tail| tail.eq_ignore_ascii_case(CLOSING_TAIL)) {
                let chars = char_count(&continuations, start + 2..colon);
                closings.entry(chars).or_default().push((start, colon));
            }
        }

        Self {
            body,
            colons,
            questions: Offsets::of(bytes, |b| b == b'?'),
            continuations,
            closings,
            resolved: HashMap::new(),
        }
    }

    fn find(&mut self) -> Option<Range<usize>> {
        let body = self.body;
        let bytes = body.as_bytes();
        for start in (0..bytes.len()).filter(|&i| bytes[i] == b'<') {
            if let Some(open) = self.skip_xml_declaration(start) {
                if let Some(end) = self.envelope_end(open) {
                    return Some(start..end);
                }
            }
            if let Some(end) = self.envelope_end(start) {
                return Some(start..end);
            }
        }
        None
    }

    /// If an XML declaration starts at `at`, return the index past it and any
    /// trailing whitespace.
    fn skip_xml_declaration(&self, at: usize) -> Option<usize> {
        let bytes = self.body.as_bytes();
        if !bytes[at..].starts_with(b"<?") {
            return None;
        }
        let question = self.questions.next(at + 2)?;
        if bytes.get(question + 1) != Some(&b'>') {
            return None;
        }
        let after = question + 2;
        let rest = &self.body[after..];
        let skipped = rest
            .find(|c: char| !is_xml_space(c))
            .unwrap_or(rest.len());
        Some(after + skipped)
    }

    /// If `<PREFIX:Envelope` opens at `open`, return the end index of the last
    /// matching `</PREFIX:Envelope>`.
    fn envelope_end(&mut self, open: usize) -> Option<usize> {
        let body = self.body;
        let bytes = body.as_bytes();
        if bytes.get(open) != Some(&b'<') {
            return None;
        }
        let colon = self.colons.next(open + 1)?;
        let content_start = colon + 1 + ENVELOPE.len();
        if !bytes
            .get(colon + 1..content_start)?
            .eq_ignore_ascii_case(ENVELOPE)
        {
            return None;
        }

        let chars = char_count(&self.continuations, open + 1..colon);
        let candidates = self.closings.get(&chars)?;
        let prefix: String = body[open + 1..colon].chars().map(fold_case).collect();
        let &(start, end) = self
            .resolved
            .entry(prefix)
            .or_insert_with_key(|prefix| {
                candidates
                    .iter()
                    .rev()
                    .find(|&&(tag, tag_colon)| folds_to(&body[tag + 2..tag_colon], prefix))
                    .map(|&(tag, tag_colon)| (tag, tag_colon + CLOSING_TAIL.len()))
            })
            .as_ref()?;
        (start >= content_start).then_some(end)
    }
}

fn char_count(continuations: &Offsets, range: Range<usize>) -> usize {
    range.len() - continuations.count(range)
}

fn folds_to(text: &str, folded: &str) -> bool {
    text.chars().map(fold_case).eq(folded.chars())
}

/// Simple case folding: single-char uppercase mapping, never folding a
/// non-ASCII char onto ASCII
fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if c.is_ascii() || !u.is_ascii() => u,
        _ => c,
    }
}

/// Whitespace allowed between the XML declaration and the envelope
fn is_xml_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Move a misplaced logical address block behind the rest of its message
///
/// Lines are split on [`LINE_ENDING`]. With `adr_start` the first line holding
/// `element="itr:LogicalAddress"`, `adr_end` the first `</wsdl:part>` line at or
/// after it and `msg_end` the first `</wsdl:message>` line at or after that,
/// the lines are reassembled as
/// `[..adr_start] ++ (adr_end..msg_end) ++ [adr_start..=adr_end] ++ [msg_end..]`
/// and concatenated without separators. Returns `None` when a marker is missing.
pub fn repair_logical_address_block(body: &str) -> Option<String> {
    let rows: Vec<&str> = body.split(LINE_ENDING).collect();

    let mut adr_start = None;
    let mut adr_end = None;
    let mut msg_end = None;
    for (i, row) in rows.iter().enumerate() {
        if adr_start.is_none() && row.contains(LOGICAL_ADDRESS_MARKER) {
            adr_start = Some(i);
        }
        if adr_start.is_some() && adr_end.is_none() && row.contains(PART_END_MARKER) {
            adr_end = Some(i);
        }
        if adr_end.is_some() && msg_end.is_none() && row.contains(MESSAGE_END_MARKER) {
            msg_end = Some(i);
        }
    }
    let (adr_start, adr_end, msg_end) = (adr_start?, adr_end?, msg_end?);

    let head = &rows[..adr_start];
    // empty when the part and the message close on the same line
    let rest = rows.get(adr_end + 1..msg_end).unwrap_or(&[]);
    let address = &rows[adr_start..=adr_end];
    let tail = &rows[msg_end..];

    Some(
        head.iter()
            .chain(rest)
            .chain(address)
            .chain(tail)
            .copied()
            .collect(),
    )
}
