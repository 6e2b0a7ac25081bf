//! Typed fragment extraction from raw argument text.
//!
//! Pure functions mapping an argument string to its typed parts. Category
//! selection happens upstream; each extractor fails only on syntactically
//! malformed input for its own category.

use uuid::Uuid;

use crate::error::{FilterError, FilterResult};

/// Whether a tag argument asserts presence or absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSense {
    /// `+name`: the tag must be present.
    Present,
    /// `-name`: the tag must be absent.
    Absent,
}

/// Every attribute modifier the grammar recognizes.
pub const MODIFIERS: &[&str] = &[
    "before", "under", "below", "after", "over", "above", "none", "any", "is", "equals", "isnt",
    "not", "has", "contains", "hasnt", "startswith", "left", "endswith", "right", "word", "noword",
];

/// Extracts a set of ids from a sequence like `1,3-5,7`.
///
/// Ranges expand into individual ids; nothing is merged or deduplicated.
pub fn extract_ids(input: &str) -> FilterResult<Vec<u64>> {
    let mut ids = Vec::new();

    for piece in input.split(',') {
        match piece.split_once('-') {
            Some((low, high)) => {
                let low = parse_id(input, low)?;
                let high = parse_id(input, high)?;
                if low > high {
                    return Err(FilterError::malformed_fragment(
                        input,
                        format!("id range {}-{} is inverted", low, high),
                    ));
                }
                ids.extend(low..=high);
            }
            None => ids.push(parse_id(input, piece)?),
        }
    }

    Ok(ids)
}

fn parse_id(input: &str, piece: &str) -> FilterResult<u64> {
    piece.parse::<u64>().map_err(|_| {
        FilterError::malformed_fragment(input, format!("'{}' is not a valid id", piece))
    })
}

/// Extracts a list of canonical UUIDs from `u1,u2,...`.
pub fn extract_uuids(input: &str) -> FilterResult<Vec<Uuid>> {
    input
        .split(',')
        .map(|piece| {
            Uuid::parse_str(piece.trim()).map_err(|_| {
                FilterError::malformed_fragment(input, format!("'{}' is not a valid uuid", piece))
            })
        })
        .collect()
}

/// Extracts the sense and name from tag syntax `+name` / `-name`.
pub fn extract_tag(input: &str) -> FilterResult<(TagSense, String)> {
    let mut chars = input.chars();
    let sense = match chars.next() {
        Some('+') => TagSense::Present,
        Some('-') => TagSense::Absent,
        _ => {
            return Err(FilterError::malformed_fragment(
                input,
                "tag must start with '+' or '-'",
            ))
        }
    };

    let name: String = chars.collect();
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(FilterError::malformed_fragment(input, "invalid tag name"));
    }

    Ok((sense, name))
}

/// Extracts (name, value) from attribute syntax `name:value` or `name=value`.
pub fn extract_attr(input: &str) -> FilterResult<(String, String)> {
    let split = input
        .char_indices()
        .find(|&(_, c)| c == ':' || c == '=')
        .map(|(i, _)| i);

    let Some(pos) = split else {
        return Err(FilterError::malformed_fragment(
            input,
            "expected name:value or name=value",
        ));
    };

    let name = &input[..pos];
    let value = &input[pos + 1..];
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(FilterError::malformed_fragment(input, "invalid attribute name"));
    }

    Ok((name.to_string(), value.to_string()))
}

/// Extracts (name, modifier, value) from modifier syntax `name.mod:value`.
///
/// The modifier must be one of [`MODIFIERS`]; whether it has evaluation
/// semantics is decided later, during category expansion.
pub fn extract_attmod(input: &str) -> FilterResult<(String, String, String)> {
    let (name_mod, value) = input
        .split_once(|c: char| c == ':' || c == '=')
        .ok_or_else(|| {
            FilterError::malformed_fragment(input, "expected name.mod:value")
        })?;

    let (name, modifier) = name_mod.split_once('.').ok_or_else(|| {
        FilterError::malformed_fragment(input, "expected name.mod:value")
    })?;

    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(FilterError::malformed_fragment(input, "invalid attribute name"));
    }
    if !MODIFIERS.contains(&modifier) {
        return Err(FilterError::malformed_fragment(
            input,
            format!("unknown modifier '{}'", modifier),
        ));
    }

    Ok((name.to_string(), modifier.to_string(), value.to_string()))
}

/// Extracts the text of a delimited pattern `/text/`.
pub fn extract_pattern(input: &str) -> FilterResult<String> {
    if input.len() >= 2 && input.starts_with('/') && input.ends_with('/') {
        Ok(input[1..input.len() - 1].to_string())
    } else {
        Err(FilterError::malformed_fragment(
            input,
            "pattern must be delimited by '/'",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ids_list() {
        assert_eq!(extract_ids("1,3,4,5").unwrap(), vec![1, 3, 4, 5]);
        assert_eq!(extract_ids("7").unwrap(), vec![7]);
    }

    #[test]
    fn test_extract_ids_ranges_expand() {
        assert_eq!(extract_ids("1,3-5").unwrap(), vec![1, 3, 4, 5]);
        assert_eq!(extract_ids("2-2").unwrap(), vec![2]);
    }

    #[test]
    fn test_extract_ids_malformed() {
        assert!(extract_ids("abc").is_err());
        assert!(extract_ids("1,,3").is_err());
        assert!(extract_ids("5-3").is_err());
    }

    #[test]
    fn test_extract_uuids() {
        let uuids = extract_uuids("00000000-0000-0000-0000-000000000000").unwrap();
        assert_eq!(uuids.len(), 1);
        assert!(uuids[0].is_nil());

        assert!(extract_uuids("not-a-uuid").is_err());
    }

    #[test]
    fn test_extract_tag() {
        assert_eq!(
            extract_tag("+urgent").unwrap(),
            (TagSense::Present, "urgent".to_string())
        );
        assert_eq!(
            extract_tag("-blocked").unwrap(),
            (TagSense::Absent, "blocked".to_string())
        );
        assert!(extract_tag("urgent").is_err());
        assert!(extract_tag("+").is_err());
        assert!(extract_tag("+bad tag").is_err());
    }

    #[test]
    fn test_extract_attr() {
        assert_eq!(
            extract_attr("project:home").unwrap(),
            ("project".to_string(), "home".to_string())
        );
        assert_eq!(
            extract_attr("priority=H").unwrap(),
            ("priority".to_string(), "H".to_string())
        );
        // Empty value is allowed
        assert_eq!(
            extract_attr("project:").unwrap(),
            ("project".to_string(), String::new())
        );
        assert!(extract_attr("noseparator").is_err());
        assert!(extract_attr(":value").is_err());
    }

    #[test]
    fn test_extract_attmod() {
        assert_eq!(
            extract_attmod("due.before:2024-01-01").unwrap(),
            (
                "due".to_string(),
                "before".to_string(),
                "2024-01-01".to_string()
            )
        );
        assert_eq!(
            extract_attmod("priority.none:").unwrap(),
            ("priority".to_string(), "none".to_string(), String::new())
        );
        assert!(extract_attmod("due.sometime:x").is_err());
        assert!(extract_attmod("due:x").is_err());
    }

    #[test]
    fn test_extract_pattern() {
        assert_eq!(extract_pattern("/report/").unwrap(), "report");
        assert!(extract_pattern("report").is_err());
        assert!(extract_pattern("/half").is_err());
    }
}
