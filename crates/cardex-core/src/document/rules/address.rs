//! Address capture after an `Address` label.

use super::cascade::FieldContext;
use super::patterns::{ADDRESS_LABEL, POSTAL_CODE};
use crate::document::lines::ScanStep;

const ADDRESS_ANCHOR: &str = "ADDRESS";

/// Value printed on the label line itself, e.g. `Address: 12 Main St`.
fn inline_value(line: &str) -> Option<&str> {
    ADDRESS_LABEL
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|v| !v.is_empty())
}

/// Join captured lines in source order with `, `.
fn join(parts: Vec<&str>) -> Option<String> {
    let parts: Vec<&str> = parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Lines after the label up to and including the first one with a 6-digit postal code.
pub fn until_postal_code(ctx: &FieldContext<'_>) -> Option<String> {
    let anchor = ctx.lines.find_anchor(|upper| upper.contains(ADDRESS_ANCHOR))?;
    let mut parts = Vec::new();

    if let Some(inline) = ctx.lines.get(anchor).and_then(inline_value) {
        parts.push(inline);
        if POSTAL_CODE.is_match(inline) {
            return join(parts);
        }
    }

    parts.extend(ctx.lines.scan_after(anchor).collect(|line| {
        if POSTAL_CODE.is_match(line) {
            ScanStep::TakeAndStop
        } else {
            ScanStep::Take
        }
    }));

    join(parts)
}

/// A fixed number of lines after the label.
pub fn fixed_window(ctx: &FieldContext<'_>) -> Option<String> {
    let anchor = ctx.lines.find_anchor(|upper| upper.contains(ADDRESS_ANCHOR))?;
    let mut parts = Vec::new();

    if let Some(inline) = ctx.lines.get(anchor).and_then(inline_value) {
        parts.push(inline);
    }

    parts.extend(
        ctx.lines
            .scan_after(anchor)
            .limit(ctx.config.voter_address_lines)
            .collect(|_| ScanStep::Take),
    );

    join(parts)
}

/// Lines after the label until a phone-number line or the next `Label:` line.
pub fn until_next_label(ctx: &FieldContext<'_>) -> Option<String> {
    let anchor = ctx.lines.find_anchor(|upper| upper.contains(ADDRESS_ANCHOR))?;
    let threshold = ctx.config.phone_digit_threshold;
    let mut parts = Vec::new();

    if let Some(inline) = ctx.lines.get(anchor).and_then(inline_value) {
        parts.push(inline);
    }

    parts.extend(ctx.lines.scan_after(anchor).collect(|line| {
        let digits = line.chars().filter(|c| c.is_ascii_digit()).count();
        if digits > threshold {
            return ScanStep::Stop;
        }
        if line.contains(':') && !line.to_uppercase().contains(ADDRESS_ANCHOR) {
            return ScanStep::Stop;
        }
        ScanStep::Take
    }));

    join(parts)
}
