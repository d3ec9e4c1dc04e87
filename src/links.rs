//! URIs derived from stored phone numbers and map links.

use std::sync::OnceLock;

use regex::Regex;

pub fn tel_uri(mobile: &str) -> String {
    format!("tel:{mobile}")
}

/// Messaging link; every non-digit character is stripped from the number.
pub fn whatsapp_uri(mobile: &str) -> String {
    let digits: String = mobile.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://wa.me/{digits}")
}

fn coordinates_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"q=(-?\d+(?:\.\d+)?),\s*(-?\d+(?:\.\d+)?)").expect("coordinate pattern is valid")
    })
}

/// Extracts the `q=lat,lng` pair from a stored map link.
pub fn coordinates(link: &str) -> Option<(String, String)> {
    let caps = coordinates_pattern().captures(link)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Embeddable map URL, or `None` when the link carries no coordinates.
pub fn map_embed_url(link: &str, api_key: Option<&str>) -> Option<String> {
    let (lat, lng) = coordinates(link)?;
    Some(match api_key {
        Some(key) => format!("https://www.google.com/maps/embed/v1/place?key={key}&q={lat},{lng}"),
        None => format!("https://maps.google.com/maps?q={lat},{lng}&z=15&output=embed"),
    })
}
