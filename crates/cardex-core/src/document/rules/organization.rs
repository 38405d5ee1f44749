//! Issuing organization name on employee and student cards.

use super::cascade::FieldContext;
use super::is_all_upper;
use crate::models::config::OrgAlias;

/// Uppercase header lines that are card furniture, not an organization.
const NON_ORG_WORDS: &[&str] = &["ID CARD", "IDENTITY", "GOVERNMENT", "NAME", "REG", "ADDRESS"];

/// Replace a known abbreviated organization with its canonical full name.
pub fn expand_alias(line: &str, aliases: &[OrgAlias]) -> String {
    aliases
        .iter()
        .find(|alias| line.contains(alias.marker.as_str()))
        .map(|alias| alias.canonical.clone())
        .unwrap_or_else(|| line.to_string())
}

/// First fully-uppercase header line near the top of the card.
pub fn header_line(ctx: &FieldContext<'_>) -> Option<String> {
    ctx.lines
        .iter()
        .take(ctx.config.org_scan_lines)
        .find(|line| {
            line.chars().count() > 4
                && is_all_upper(line)
                && !NON_ORG_WORDS.iter().any(|w| line.contains(w))
        })
        .map(|line| expand_alias(line, &ctx.config.org_aliases))
}
