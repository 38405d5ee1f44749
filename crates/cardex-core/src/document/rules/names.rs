//! Holder and relation name extraction.
//!
//! Names have no fixed syntax, so every rule here is positional: a label on
//! the same line, a label on the line above, an anchor line the name sits
//! next to, or as a last resort the first plausible uppercase line.

use super::cascade::FieldContext;
use super::patterns::{INLINE_SEPARATOR, RELATION_LABEL, RELATION_NAME};
use super::{has_digit, is_all_upper, trailing_segment};
use crate::document::lines::ScanStep;

/// Lines following the government header that are not the holder's name.
const NATIONAL_HEADER_NOISE: &[&str] = &["DOB", "AADHAAR", "INDIA"];

/// Name labels containing these words belong to someone else.
const NOT_HOLDER_LABEL: &[&str] = &["FATHER", "HUSBAND", "ELECTION"];

/// Anchors the holder name is printed next to on organization cards.
const NAME_ANCHORS: &[&str] = &["REG", "ROLL", "EMP ID"];

/// Institutional boilerplate skipped while scanning around an anchor.
const ANCHOR_SCAN_NOISE: &[&str] = &[
    "IDENTITY",
    "CARD",
    "COLLEGE",
    "ENGINEERING",
    "TECHNOLOGY",
    "INSTITUTE",
    "STUDENT",
    "MALE",
    "FEMALE",
    "SYSTEMS",
    "PRINCIPAL",
    "ADDRESS",
];

/// Boilerplate never taken by the uppercase fallback.
const UPPERCASE_FALLBACK_NOISE: &[&str] = &[
    "ID CARD",
    "IDENTITY",
    "STUDENT",
    "EMPLOYEE",
    "PRINCIPAL",
    "SIGNATURE",
    "ENGINEERING",
    "COLLEGE",
    "ADDRESS",
];

fn contains_any(upper: &str, words: &[&str]) -> bool {
    words.iter().any(|w| upper.contains(w))
}

/// First clean line within a few lines after the `GOVERNMENT` header.
pub fn after_government_header(ctx: &FieldContext<'_>) -> Option<String> {
    let anchor = ctx.lines.find_anchor(|upper| upper.contains("GOVERNMENT"))?;

    ctx.lines
        .scan_after(anchor)
        .limit(ctx.config.national_name_window)
        .first(|line| {
            if contains_any(&line.to_uppercase(), NATIONAL_HEADER_NOISE) || has_digit(line) {
                ScanStep::Skip
            } else {
                ScanStep::Take
            }
        })
        .map(str::to_string)
}

/// `Name: value` on a single line.
pub fn inline_name_label(ctx: &FieldContext<'_>) -> Option<String> {
    ctx.lines
        .iter()
        .filter(|line| {
            let upper = line.to_uppercase();
            upper.contains("NAME") && !contains_any(&upper, NOT_HOLDER_LABEL)
        })
        .find_map(|line| trailing_segment(line, &INLINE_SEPARATOR).filter(|v| !v.is_empty()))
        .map(str::to_string)
}

/// First holder-name label: its inline value, or the following line when the
/// label stands alone.
pub fn holder_name_label(ctx: &FieldContext<'_>) -> Option<String> {
    let anchor = ctx.lines.find_anchor(|upper| {
        upper.contains("NAME") && !contains_any(upper, NOT_HOLDER_LABEL)
    })?;
    let line = ctx.lines.get(anchor)?;

    match trailing_segment(line, &INLINE_SEPARATOR) {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ => ctx.lines.get(anchor + 1).map(str::to_string),
    }
}

/// A line reading only `Name`, followed by the value.
pub fn bare_name_label(ctx: &FieldContext<'_>) -> Option<String> {
    let anchor = ctx.lines.find_anchor(|upper| upper.trim() == "NAME")?;
    ctx.lines.get(anchor + 1).map(str::to_string)
}

/// `Father's Name: value` or `Husband's Name: value` on a single line.
pub fn relation_inline(ctx: &FieldContext<'_>) -> Option<String> {
    ctx.lines.iter().find_map(|line| {
        RELATION_NAME
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// A bare relation label followed by the value on the next line.
pub fn relation_label_next_line(ctx: &FieldContext<'_>) -> Option<String> {
    let index = ctx
        .lines
        .iter()
        .position(|line| RELATION_LABEL.is_match(line))?;
    ctx.lines.get(index + 1).map(str::to_string)
}

/// A `NAME` label without a colon, with the value on the next line.
pub fn label_next_line(ctx: &FieldContext<'_>) -> Option<String> {
    let labels = ctx
        .lines
        .anchors(|upper| upper.contains("NAME") && !upper.contains(':'));

    labels.into_iter().find_map(|index| {
        let candidate = ctx.lines.get(index + 1)?.trim();
        if has_digit(candidate) || candidate.to_uppercase().contains("DESIGNATION") {
            None
        } else {
            Some(candidate.to_string())
        }
    })
}

fn is_anchor_scan_noise(ctx: &FieldContext<'_>, candidate: &str) -> bool {
    candidate.chars().count() < 3
        || contains_any(&candidate.to_uppercase(), ANCHOR_SCAN_NOISE)
        || ctx
            .org_name
            .as_deref()
            .is_some_and(|org| org.contains(candidate))
}

/// Nearest clean line above the first registration/roll/employee-ID anchor.
pub fn above_anchor(ctx: &FieldContext<'_>) -> Option<String> {
    let anchor = ctx
        .lines
        .find_anchor(|upper| contains_any(upper, NAME_ANCHORS))?;

    ctx.lines
        .scan_before(anchor)
        .first(|line| {
            if is_anchor_scan_noise(ctx, line.trim()) {
                ScanStep::Skip
            } else {
                ScanStep::Take
            }
        })
        .map(|line| line.trim().to_string())
}

/// Nearest clean line below the anchor, for cards that print the holder
/// beneath the registration number.
pub fn below_anchor(ctx: &FieldContext<'_>) -> Option<String> {
    let anchor = ctx
        .lines
        .find_anchor(|upper| contains_any(upper, NAME_ANCHORS))?;

    ctx.lines
        .scan_after(anchor)
        .first(|line| {
            let candidate = line.trim();
            if is_anchor_scan_noise(ctx, candidate)
                || has_digit(candidate)
                || candidate.contains(':')
            {
                ScanStep::Skip
            } else {
                ScanStep::Take
            }
        })
        .map(|line| line.trim().to_string())
}

/// First fully-uppercase, digit-free line longer than four characters that is
/// neither boilerplate nor the organization name.
pub fn largest_uppercase(ctx: &FieldContext<'_>) -> Option<String> {
    let org_upper = ctx.org_name.as_deref().map(str::to_uppercase);

    ctx.lines
        .iter()
        .find(|line| {
            let upper = line.to_uppercase();
            is_all_upper(line)
                && line.chars().count() > 4
                && !contains_any(&upper, UPPERCASE_FALLBACK_NOISE)
                && !org_upper.as_deref().is_some_and(|org| upper.contains(org))
                && !has_digit(line)
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::lines::LineSequence;
    use crate::models::config::ExtractionConfig;

    type Rule = fn(&FieldContext<'_>) -> Option<String>;

    fn run(rule: Rule, lines: &[&str]) -> Option<String> {
        run_with_org(rule, lines, None)
    }

    fn run_with_org(rule: Rule, lines: &[&str], org: Option<&str>) -> Option<String> {
        let lines: LineSequence = lines.iter().copied().collect();
        let config = ExtractionConfig::default();
        let ctx = FieldContext::new(&lines, &config).with_org_name(org.map(str::to_string));
        rule(&ctx)
    }

    #[test]
    fn test_after_government_header() {
        let lines = ["GOVERNMENT OF INDIA", "Rohit Kumar", "DOB: 01-01-1990"];
        assert_eq!(run(after_government_header, &lines), Some("Rohit Kumar".to_string()));

        let lines = ["Government of India", "AADHAAR", "12 Lane", "Meera Nair"];
        assert_eq!(run(after_government_header, &lines), Some("Meera Nair".to_string()));
    }

    #[test]
    fn test_government_window_bounded() {
        let lines = ["GOVERNMENT OF INDIA", "INDIA", "DOB 1990", "Year 1990", "Too Far"];
        assert_eq!(run(after_government_header, &lines), None);
    }

    #[test]
    fn test_holder_label_inline_and_next_line() {
        assert_eq!(
            run(holder_name_label, &["ELECTION COMMISSION", "Name: Asha Devi"]),
            Some("Asha Devi".to_string())
        );
        assert_eq!(
            run(holder_name_label, &["Name :", "Asha Devi"]),
            Some("Asha Devi".to_string())
        );
        assert_eq!(
            run(holder_name_label, &["Father's Name: Ram", "Husband's Name - Mohan"]),
            None
        );
    }

    #[test]
    fn test_bare_name_label() {
        assert_eq!(run(bare_name_label, &["NAME", "Asha"]), Some("Asha".to_string()));
        assert_eq!(run(bare_name_label, &["NAME"]), None);
    }

    #[test]
    fn test_relation_name() {
        let lines = ["Name: Asha Devi", "Husband's Name: Mohan Lal", "FEMALE"];
        assert_eq!(run(relation_inline, &lines), Some("Mohan Lal".to_string()));

        let lines = ["Father's Name", "Ram Prasad"];
        assert_eq!(run(relation_inline, &lines), None);
        assert_eq!(run(relation_label_next_line, &lines), Some("Ram Prasad".to_string()));
    }

    #[test]
    fn test_label_next_line() {
        let lines = ["TECHCORP", "Employee Name", "John Doe", "EMP ID: TC-1"];
        assert_eq!(run(label_next_line, &lines), Some("John Doe".to_string()));

        let lines = ["Name", "Designation"];
        assert_eq!(run(label_next_line, &lines), None);
    }

    #[test]
    fn test_above_anchor_skips_boilerplate() {
        let lines = ["TECHCORP SYSTEMS", "IDENTITY CARD", "JOHN DOE", "M", "EMP ID: TC-1234"];
        assert_eq!(
            run_with_org(above_anchor, &lines, Some("TECHCORP SYSTEMS")),
            Some("JOHN DOE".to_string())
        );
    }

    #[test]
    fn test_above_anchor_skips_org_echo() {
        let lines = ["ALPHA ACADEMY", "ACADEMY", "Reg No: 7"];
        assert_eq!(run_with_org(above_anchor, &lines, Some("ALPHA ACADEMY")), None);
    }

    #[test]
    fn test_below_anchor() {
        let lines = ["RAJALAKSHMI ENGINEERING COLLEGE", "Reg No: 12345", "Priya S"];
        let org = Some("RAJALAKSHMI ENGINEERING COLLEGE");
        assert_eq!(run_with_org(above_anchor, &lines, org), None);
        assert_eq!(run_with_org(below_anchor, &lines, org), Some("Priya S".to_string()));
    }

    #[test]
    fn test_largest_uppercase_excludes_org() {
        let lines = ["GREEN VALLEY SCHOOL", "STUDENT ID CARD", "ARJUN MEHTA", "CLASS 9"];
        assert_eq!(
            run_with_org(largest_uppercase, &lines, Some("GREEN VALLEY SCHOOL")),
            Some("ARJUN MEHTA".to_string())
        );
        assert_eq!(run(largest_uppercase, &["Mixed Case", "AB"]), None);
    }
}
