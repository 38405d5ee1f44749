//! Designation (employee cards) or class/course (student cards).

use super::cascade::FieldContext;
use super::patterns::{CLASS_LABEL, DESIGNATION_LABEL};

/// Job titles and course names printed without a label.
const ROLE_KEYWORDS: &[&str] = &[
    "B.TECH",
    "B.E",
    "BACHELOR",
    "INFORMATION TECHNOLOGY",
    "DEVELOPER",
    "MANAGER",
    "ENGINEER",
];

/// `Designation: value`, or the line after a bare `Designation` label.
pub fn designation_label(ctx: &FieldContext<'_>) -> Option<String> {
    let index = ctx
        .lines
        .iter()
        .position(|line| DESIGNATION_LABEL.is_match(line))?;
    let line = ctx.lines.get(index)?;

    let inline = DESIGNATION_LABEL
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|v| !v.is_empty());

    match inline {
        Some(value) => Some(value.to_string()),
        None => ctx.lines.get(index + 1).map(|l| l.trim().to_string()),
    }
}

/// First line naming a role or course, other than the organization header.
pub fn role_keyword(ctx: &FieldContext<'_>) -> Option<String> {
    let org = ctx.org_name.as_deref();

    ctx.lines
        .iter()
        .filter(|line| !org.is_some_and(|org| org.contains(*line) || line.contains(org)))
        .find(|line| {
            let upper = line.to_uppercase();
            ROLE_KEYWORDS.iter().any(|k| upper.contains(k))
        })
        .map(|line| line.trim().to_string())
}

/// `Class: X` rendered as `Class X`.
pub fn class_label(ctx: &FieldContext<'_>) -> Option<String> {
    let line = ctx
        .lines
        .iter()
        .find(|line| line.to_uppercase().contains("CLASS"))?;

    let value = CLASS_LABEL.replace_all(line, "");
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(format!("Class {value}"))
    }
}
