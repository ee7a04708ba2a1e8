//! Command-line forms of suppression rules.
//!
//! - `--skip VALUE=ANCHOR[:N]`
//! - `--collapse VALUE[:N]`
//!
//! Values may themselves contain `:` (inline styles do), so a trailing
//! `:N` is only taken as a count when `N` is all digits. A value that ends in
//! `:digits` therefore needs an explicit count after it.

use sieve_html::{SuppressionAction, SuppressionRule};

/// Split an optional trailing `:N` count off `spec`.
fn split_count(spec: &str) -> Result<(&str, Option<usize>), String> {
    match spec.rsplit_once(':') {
        Some((head, tail)) if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) => {
            let count = tail
                .parse()
                .map_err(|e| format!("invalid count '{tail}': {e}"))?;
            Ok((head, Some(count)))
        }
        _ => Ok((spec, None)),
    }
}

/// Parse `VALUE=ANCHOR[:N]`. Without `N` the skip is unbounded.
///
/// # Errors
///
/// Returns a message for clap if a part is missing or the count is invalid.
pub fn parse_skip(spec: &str) -> Result<SuppressionRule, String> {
    let (value, rest) = spec
        .rsplit_once('=')
        .ok_or_else(|| format!("expected VALUE=ANCHOR[:N], got '{spec}'"))?;
    let (anchor, count) = split_count(rest)?;
    if value.is_empty() || anchor.is_empty() {
        return Err(format!("expected VALUE=ANCHOR[:N], got '{spec}'"));
    }
    Ok(SuppressionRule {
        value: value.to_owned(),
        action: SuppressionAction::SkipTo {
            anchor: anchor.to_owned(),
        },
        max_applications: count,
    })
}

/// Parse `VALUE[:N]`. Without `N` every repeat is collapsed.
///
/// # Errors
///
/// Returns a message for clap if the value is empty or the count is invalid.
pub fn parse_collapse(spec: &str) -> Result<SuppressionRule, String> {
    let (value, count) = split_count(spec)?;
    if value.is_empty() {
        return Err(format!("expected VALUE[:N], got '{spec}'"));
    }
    let rule = SuppressionRule::collapse(value);
    Ok(match count {
        Some(max) => rule.with_max_applications(max),
        None => rule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_with_count() {
        assert_eq!(
            parse_skip("my-infolist-body=table:2").unwrap(),
            SuppressionRule::skip_to("my-infolist-body", "table", 2)
        );
    }

    #[test]
    fn test_skip_without_count_is_unbounded() {
        let rule = parse_skip("ad=section").unwrap();
        assert_eq!(rule.max_applications, None);
        assert_eq!(
            rule.action,
            SuppressionAction::SkipTo {
                anchor: "section".to_owned()
            }
        );
    }

    #[test]
    fn test_skip_rejects_missing_parts() {
        assert!(parse_skip("ad").is_err());
        assert!(parse_skip("=table").is_err());
        assert!(parse_skip("ad=").is_err());
    }

    #[test]
    fn test_collapse_keeps_colons_in_value() {
        assert_eq!(
            parse_collapse("text-align:right;margin-top:5px;").unwrap(),
            SuppressionRule::collapse("text-align:right;margin-top:5px;")
        );
        assert_eq!(
            parse_collapse("text-align:right;margin-top:5px;:3").unwrap(),
            SuppressionRule::collapse("text-align:right;margin-top:5px;").with_max_applications(3)
        );
    }

    #[test]
    fn test_trailing_digits_are_always_a_count() {
        assert_eq!(
            parse_collapse("margin-top:5").unwrap(),
            SuppressionRule::collapse("margin-top").with_max_applications(5)
        );
        assert_eq!(
            parse_collapse("margin-top:5:1").unwrap(),
            SuppressionRule::collapse("margin-top:5").with_max_applications(1)
        );
    }

    #[test]
    fn test_collapse_rejects_empty_value() {
        assert!(parse_collapse("").is_err());
        assert!(parse_collapse(":2").is_err());
    }
}
