//! Cleaning helpers for free-form tag values.
//!
//! OSM contributors write URLs and prices in many shapes: scheme-relative
//! image links, bare host names, prices with currency suffixes or thousands
//! separators. These functions are total; malformed input yields `None`.

const SECURE_SCHEME: &str = "https://";
const WEB_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Normalise an `image` tag value into an absolute URL.
///
/// Blank input yields `None`. Scheme-relative values (`//host/path`) are
/// completed with `https:`; anything else is returned trimmed.
///
/// # Examples
/// ```
/// use campground_core::normalise_image_url;
///
/// assert_eq!(
///     normalise_image_url(Some("//x.org/f.jpg")).as_deref(),
///     Some("https://x.org/f.jpg"),
/// );
/// assert_eq!(normalise_image_url(None), None);
/// ```
#[must_use]
pub fn normalise_image_url(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("//") {
        Some(format!("https:{trimmed}"))
    } else {
        Some(trimmed.to_owned())
    }
}

/// Normalise a website tag value into an absolute URL.
///
/// Blank input yields `None`. Values without an `http://` or `https://`
/// prefix (compared case-insensitively) gain `https://`.
///
/// # Examples
/// ```
/// use campground_core::normalise_website_url;
///
/// assert_eq!(
///     normalise_website_url(Some("example.com")).as_deref(),
///     Some("https://example.com"),
/// );
/// assert_eq!(
///     normalise_website_url(Some("http://example.com")).as_deref(),
///     Some("http://example.com"),
/// );
/// ```
#[must_use]
pub fn normalise_website_url(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if has_web_scheme(trimmed) {
        Some(trimmed.to_owned())
    } else {
        Some(format!("{SECURE_SCHEME}{trimmed}"))
    }
}

fn has_web_scheme(value: &str) -> bool {
    WEB_SCHEMES.iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Extract a price from a free-text `charge` or `fee` value.
///
/// The first run of ASCII digits, commas and dots is taken, commas are
/// dropped and the remainder parsed. Returns `None` when the text holds no
/// digits or the run does not form a finite number.
///
/// # Examples
/// ```
/// use campground_core::parse_price;
///
/// assert_eq!(parse_price("1,500 JPY"), Some(1500.0));
/// assert_eq!(parse_price("yes"), None);
/// ```
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    let token: String = raw
        .chars()
        .skip_while(|ch| !ch.is_ascii_digit())
        .take_while(|ch| ch.is_ascii_digit() || matches!(ch, ',' | '.'))
        .filter(|ch| *ch != ',')
        .collect();
    if token.is_empty() {
        return None;
    }
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}
