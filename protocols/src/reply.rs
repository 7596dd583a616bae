//! # Discovery Reply Classification
//!
//! Replies to a probe are treated as free-form text. Nothing is validated against a
//! schema; a payload is accepted when it mentions one of the [`DEVICE_MARKERS`] and
//! its fields are pulled out by ordered [`FieldRule`] chains.

use std::sync::OnceLock;

/// Substrings (matched case-insensitively) that mark a reply as coming from a device.
pub const DEVICE_MARKERS: [&str; 3] = ["NetworkVideoTransmitter", "onvif", "Device"];

/// Vendors recognised by name when a reply carries no manufacturer tag.
pub const KNOWN_VENDORS: [&str; 4] = ["Hikvision", "Dahua", "Axis", "Reolink"];

/// A single way of finding a field inside a reply payload.
///
/// Returns the matched text borrowed from `payload`, or `None` when the rule does
/// not apply so the next rule in the chain gets a chance.
pub trait FieldRule: Send + Sync {
    fn apply<'a>(&self, payload: &'a str) -> Option<&'a str>;
}

/// Captures the text between `<prefix:Tag>` (or `<Tag>`) and the next `<`.
///
/// Any namespace prefix is accepted because only the `Tag>` suffix is matched.
#[derive(Debug, Clone, Copy)]
pub struct TagRule {
    tag: &'static str,
}

impl TagRule {
    pub const fn new(tag: &'static str) -> Self {
        Self { tag }
    }
}

impl FieldRule for TagRule {
    fn apply<'a>(&self, payload: &'a str) -> Option<&'a str> {
        let needle = format!("{}>", self.tag.to_ascii_lowercase());
        let haystack = payload.to_ascii_lowercase();

        let mut from = 0;
        while let Some(pos) = haystack[from..].find(&needle) {
            let value_start = from + pos + needle.len();
            match payload[value_start..].find('<') {
                Some(0) => from = value_start,
                Some(len) => return Some(&payload[value_start..value_start + len]),
                None => return None,
            }
        }
        None
    }
}

/// Matches a vendor name anywhere in the payload and returns it as written there.
#[derive(Debug, Clone, Copy)]
pub struct LiteralRule {
    literal: &'static str,
}

impl LiteralRule {
    pub const fn new(literal: &'static str) -> Self {
        Self { literal }
    }
}

impl FieldRule for LiteralRule {
    fn apply<'a>(&self, payload: &'a str) -> Option<&'a str> {
        let start = find_ignore_case(payload, self.literal)?;
        Some(&payload[start..start + self.literal.len()])
    }
}

/// An ordered chain of rules; the first one that matches wins.
#[derive(Default)]
pub struct FieldExtractor {
    rules: Vec<Box<dyn FieldRule>>,
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: impl FieldRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn extract<'a>(&self, payload: &'a str) -> Option<&'a str> {
        self.rules.iter().find_map(|rule| rule.apply(payload))
    }
}

fn manufacturer_extractor() -> &'static FieldExtractor {
    static EXTRACTOR: OnceLock<FieldExtractor> = OnceLock::new();
    EXTRACTOR.get_or_init(|| {
        KNOWN_VENDORS.iter().fold(
            FieldExtractor::new()
                .with_rule(TagRule::new("Manufacturer"))
                .with_rule(TagRule::new("mfr")),
            |chain, vendor| chain.with_rule(LiteralRule::new(vendor)),
        )
    })
}

fn model_extractor() -> &'static FieldExtractor {
    static EXTRACTOR: OnceLock<FieldExtractor> = OnceLock::new();
    EXTRACTOR.get_or_init(|| {
        FieldExtractor::new()
            .with_rule(TagRule::new("Model"))
            .with_rule(TagRule::new("mdl"))
    })
}

/// Whether `payload` looks like it came from a camera-like device.
pub fn is_device_reply(payload: &str) -> bool {
    DEVICE_MARKERS
        .iter()
        .any(|marker| find_ignore_case(payload, marker).is_some())
}

pub fn manufacturer(payload: &str) -> Option<String> {
    manufacturer_extractor().extract(payload).map(str::to_string)
}

pub fn model(payload: &str) -> Option<String> {
    model_extractor().extract(payload).map(str::to_string)
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
