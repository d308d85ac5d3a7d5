//! Text cleanup for posted values and outgoing notices.

/// Remove markup tags from a string.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Decode the HTML entities that show up in posted free-text values.
pub fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let Some(end) = rest.find(';') else {
            out.push_str(rest);
            return out;
        };
        let entity = &rest[..=end];
        match entity {
            "&amp;" => out.push('&'),
            "&lt;" => out.push('<'),
            "&gt;" => out.push('>'),
            "&quot;" => out.push('"'),
            "&#39;" | "&#039;" => out.push('\''),
            "&hellip;" => out.push('\u{2026}'),
            _ => {
                // Numeric entities; anything unrecognized passes through.
                let decoded = entity
                    .strip_prefix("&#")
                    .and_then(|e| e.strip_suffix(';'))
                    .and_then(|digits| digits.parse::<u32>().ok())
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => out.push(ch),
                    None => out.push_str(entity),
                }
            }
        }
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    out
}

/// Clean a posted free-text value: markup stripped, whitespace collapsed.
pub fn clean(input: &str) -> String {
    strip_tags(input)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a value to slug form: lowercase ascii, digits, and dashes.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            if !out.ends_with('-') {
                out.push('-');
            }
        }
    }
    out.trim_matches('-').to_string()
}

/// Join human-readable items: "A", "A and B", "A, B and C".
pub fn format_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_tags("<a href=\"/cart\">View Cart</a> Could not add."),
            "View Cart Could not add."
        );
        assert_eq!(strip_tags("plain"), "plain");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(decode_entities("&#39;s"), "'s");
        assert_eq!(decode_entities("&#8212;"), "\u{2014}");
        assert_eq!(decode_entities("&bogus; stays"), "&bogus; stays");
        assert_eq!(decode_entities("no entities"), "no entities");
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean("  <b>bold</b>   text \n here "), "bold text here");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Dark Blue"), "dark-blue");
        assert_eq!(slugify("  Red_Wine -- 2024 "), "red-wine-2024");
        assert_eq!(slugify("crème"), "crme");
    }

    #[test]
    fn test_format_list() {
        let items = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(format_list(&items(&["Color"])), "Color");
        assert_eq!(format_list(&items(&["Color", "Size"])), "Color and Size");
        assert_eq!(
            format_list(&items(&["Color", "Size", "Fit"])),
            "Color, Size and Fit"
        );
    }
}
