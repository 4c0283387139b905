//! Character reference decoding
//!
//! Named references cover the full HTML5 table from the `entities` crate.
//! Numeric references to code points that are not allowed in documents
//! decode to U+FFFD.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;

const REPLACEMENT: &str = "\u{FFFD}";

lazy_static! {
    static ref NAMED: HashMap<&'static str, &'static str> = entities::ENTITIES
        .iter()
        .filter_map(|e| {
            let name = e.entity.strip_prefix('&')?.strip_suffix(';')?;
            Some((name, e.characters))
        })
        .collect();
    static ref REFERENCE: Regex =
        Regex::new(r"&(#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[A-Za-z][A-Za-z0-9]{0,31});")
            .expect("character reference pattern is valid");
}

/// Decode a named character reference (without the `&` and `;`)
///
/// Returns `None` for names not in the table.
///
/// # Examples
/// ```
/// use docsite::helpers::decode_named;
/// assert_eq!(decode_named("amp"), Some("&"));
/// assert_eq!(decode_named("notanentity"), None);
/// ```
pub fn decode_named(name: &str) -> Option<&'static str> {
    NAMED.get(name).copied()
}

/// Decode a numeric character reference body such as `#123` or `#x7B`
pub fn decode_numeric(value: &str) -> Option<String> {
    let digits = value.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };

    if !is_allowed_code_point(code) {
        return Some(REPLACEMENT.to_string());
    }
    Some(char::from_u32(code).map_or_else(|| REPLACEMENT.to_string(), String::from))
}

/// Controls (except tab, line feed, form feed and carriage return),
/// surrogates, noncharacters and values past U+10FFFF are not allowed
fn is_allowed_code_point(code: u32) -> bool {
    !(code < 0x09
        || code == 0x0B
        || (0x0E..0x20).contains(&code)
        || (0x7F..0xA0).contains(&code)
        || (0xD800..0xE000).contains(&code)
        || (0xFDD0..0xFDF0).contains(&code)
        || code & 0xFFFF == 0xFFFE
        || code & 0xFFFF == 0xFFFF
        || code > 0x10FFFF)
}

/// Replace every known `&name;`, `&#N;` and `&#xH;` reference in `text`
///
/// Unknown names are left as written.
pub fn decode_references(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    REFERENCE.replace_all(text, |caps: &Captures| {
        let body = &caps[1];
        let decoded = if body.starts_with('#') {
            decode_numeric(body)
        } else {
            decode_named(body).map(str::to_string)
        };
        decoded.unwrap_or_else(|| caps[0].to_string())
    })
}
