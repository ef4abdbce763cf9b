//! Extraction of place identifiers and business names from maps URLs.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

static PLACE_ID_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&](?:query_)?place_id=([^&#]+)").expect("valid regex"));

static CHIJ_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(ChIJ[A-Za-z0-9_-]+)").expect("valid regex"));

/// `!1s0x<feature>:0x<cid>` inside a `data=` blob; the second half is the
/// customer id in hex.
static HEX_FEATURE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!1s0x[0-9a-fA-F]+:0x([0-9a-fA-F]+)").expect("valid regex")
});

static CID_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]cid=(\d+)").expect("valid regex"));

static NAME_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/maps/(?:place|search)/([^/?#@]+)").expect("valid regex")
});

/// What could be recovered from a maps URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub place_identifier: Option<String>,
    pub business_name: Option<String>,
}

/// `true` if `input` looks like a link rather than a business name.
#[must_use]
pub fn looks_like_url(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("www.")
        || lower.contains("google.com/maps")
        || lower.contains("goo.gl/")
}

/// Pulls a place identifier and, independently, a business name out of a
/// maps URL. Either may be absent.
#[must_use]
pub fn parse_maps_url(url: &str) -> UrlParts {
    UrlParts {
        place_identifier: extract_place_identifier(url),
        business_name: extract_business_name(url),
    }
}

fn extract_place_identifier(url: &str) -> Option<String> {
    if let Some(caps) = PLACE_ID_PARAM.captures(url) {
        return Some(decode(&caps[1]));
    }
    if let Some(caps) = CHIJ_ID.captures(url) {
        return Some(caps[1].to_owned());
    }
    if let Some(caps) = HEX_FEATURE_ID.captures(url) {
        if let Ok(cid) = u64::from_str_radix(&caps[1], 16) {
            return Some(cid.to_string());
        }
    }
    CID_PARAM.captures(url).map(|caps| caps[1].to_owned())
}

fn extract_business_name(url: &str) -> Option<String> {
    let caps = NAME_SEGMENT.captures(url)?;
    let name = decode(&caps[1]);
    let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn decode(segment: &str) -> String {
    percent_decode_str(&segment.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}
