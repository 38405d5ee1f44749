//! Field sets and rule cascades for each document template.

use super::lines::LineSequence;
use super::normalize::is_card_noise;
use super::rules::{address, dates, designation, gender, identifiers, names, organization};
use super::rules::{Cascade, FieldContext};
use crate::models::config::{CardexConfig, ExtractionConfig};
use crate::models::record::{
    CardRecord, DocumentKind, ExtractedRecord, NationalIdRecord, VoterIdRecord,
};

fn gender_cascade() -> Cascade {
    Cascade::new("gender").rule("gender keyword", gender::keyword)
}

/// Cascades for the national identity card.
pub fn national_cascades() -> Vec<Cascade> {
    vec![
        Cascade::new("id_number").rule("grouped 12-digit number", identifiers::national_number),
        Cascade::new("dob").rule("numeric date", dates::numeric_date),
        gender_cascade(),
        Cascade::new("full_name")
            .rule("after government header", names::after_government_header)
            .rule("inline name label", names::inline_name_label),
        Cascade::new("address").rule("until postal code", address::until_postal_code),
    ]
}

/// Cascades for the voter identity card.
pub fn voter_cascades() -> Vec<Cascade> {
    vec![
        Cascade::new("voter_id").rule("EPIC number", identifiers::voter_number),
        Cascade::new("name")
            .rule("holder name label", names::holder_name_label)
            .rule("bare name label", names::bare_name_label),
        Cascade::new("father_name")
            .rule("relation label inline", names::relation_inline)
            .rule("relation label next line", names::relation_label_next_line),
        Cascade::new("dob")
            .rule("numeric date", dates::numeric_date)
            .rule("age line", dates::age_line),
        gender_cascade(),
        Cascade::new("address").rule("fixed window", address::fixed_window),
    ]
}

/// Cascades for employee, student and generic organization cards.
///
/// `org_name` runs first on its own; its result feeds the name and
/// designation exclusions.
pub fn card_cascades() -> Vec<Cascade> {
    vec![
        Cascade::new("name")
            .rule("label above value", names::label_next_line)
            .rule("above number anchor", names::above_anchor)
            .rule("below number anchor", names::below_anchor)
            .rule("largest uppercase line", names::largest_uppercase),
        Cascade::new("id_number")
            .rule("labeled number", identifiers::labeled_card_number)
            .rule("transfer code", identifiers::transfer_code),
        Cascade::new("designation_or_class")
            .rule("designation label", designation::designation_label)
            .rule("role keyword", designation::role_keyword)
            .rule("class label", designation::class_label),
        Cascade::new("dob").rule("card date", dates::card_date),
        Cascade::new("address").rule("until next label", address::until_next_label),
    ]
}

fn org_cascade() -> Cascade {
    Cascade::new("org_name").rule("uppercase header", organization::header_line)
}

/// Minimum retained line length and noise filtering for a template.
pub fn template_lines(kind: DocumentKind, lines: &LineSequence, config: &CardexConfig) -> LineSequence {
    match kind {
        DocumentKind::NationalId => lines.with_min_len(config.normalize.national_min_line_len),
        DocumentKind::VoterId => lines.with_min_len(config.normalize.min_line_len),
        DocumentKind::EmployeeId | DocumentKind::StudentId | DocumentKind::GenericId => lines
            .with_min_len(config.normalize.min_line_len)
            .filtered(|line| !is_card_noise(line)),
    }
}

/// Run a set of cascades, returning each field's value by name.
fn run_all<'c>(cascades: &'c [Cascade], ctx: &FieldContext<'_>) -> Vec<(&'c str, Option<String>)> {
    cascades
        .iter()
        .map(|cascade| (cascade.field(), cascade.evaluate(ctx)))
        .collect()
}

fn take(values: &mut Vec<(&str, Option<String>)>, field: &str) -> Option<String> {
    values
        .iter_mut()
        .find(|(name, _)| *name == field)
        .and_then(|(_, value)| value.take())
}

/// Build the record for `kind` from lines already prepared by [`template_lines`].
pub fn extract_record(kind: DocumentKind, lines: &LineSequence, config: &ExtractionConfig) -> ExtractedRecord {
    let ctx = FieldContext::new(lines, config);

    match kind {
        DocumentKind::NationalId => {
            let cascades = national_cascades();
            let mut values = run_all(&cascades, &ctx);
            ExtractedRecord::National(NationalIdRecord {
                id_number: take(&mut values, "id_number"),
                dob: take(&mut values, "dob"),
                gender: take(&mut values, "gender"),
                full_name: take(&mut values, "full_name"),
                address: take(&mut values, "address"),
            })
        }
        DocumentKind::VoterId => {
            let cascades = voter_cascades();
            let mut values = run_all(&cascades, &ctx);
            ExtractedRecord::Voter(VoterIdRecord {
                voter_id: take(&mut values, "voter_id"),
                name: take(&mut values, "name"),
                father_name: take(&mut values, "father_name"),
                dob: take(&mut values, "dob"),
                gender: take(&mut values, "gender"),
                address: take(&mut values, "address"),
            })
        }
        DocumentKind::EmployeeId | DocumentKind::StudentId | DocumentKind::GenericId => {
            let org_name = org_cascade().evaluate(&ctx);
            let ctx = ctx.with_org_name(org_name.clone());

            let cascades = card_cascades();
            let mut values = run_all(&cascades, &ctx);
            ExtractedRecord::Card {
                kind,
                record: CardRecord {
                    org_name,
                    name: take(&mut values, "name"),
                    id_number: take(&mut values, "id_number"),
                    designation_or_class: take(&mut values, "designation_or_class"),
                    dob: take(&mut values, "dob"),
                    address: take(&mut values, "address"),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_order_is_data() {
        let names: Vec<_> = card_cascades()
            .iter()
            .find(|c| c.field() == "name")
            .map(|c| c.rule_names())
            .unwrap();
        assert_eq!(
            names,
            vec![
                "label above value",
                "above number anchor",
                "below number anchor",
                "largest uppercase line",
            ]
        );
    }

    #[test]
    fn test_field_sets_cover_records() {
        let national: Vec<_> = national_cascades().iter().map(|c| c.field()).collect();
        assert_eq!(national, vec!["id_number", "dob", "gender", "full_name", "address"]);

        let voter: Vec<_> = voter_cascades().iter().map(|c| c.field()).collect();
        assert_eq!(
            voter,
            vec!["voter_id", "name", "father_name", "dob", "gender", "address"]
        );
    }

    #[test]
    fn test_gender_prefers_male_when_both_printed() {
        let lines: LineSequence = ["ELECTION COMMISSION OF INDIA", "FEMALE", "MALE"]
            .into_iter()
            .collect();
        let record = extract_record(DocumentKind::VoterId, &lines, &ExtractionConfig::default());
        assert_eq!(record.get("gender"), Some("Male"));

        let lines: LineSequence = ["GOVERNMENT OF INDIA", "Transgender"].into_iter().collect();
        let record = extract_record(DocumentKind::NationalId, &lines, &ExtractionConfig::default());
        assert_eq!(record.get("gender"), Some("Transgender"));
    }

    #[test]
    fn test_card_lines_drop_legal_notice() {
        let lines: LineSequence = ["ACME LTD", "If found, please return", "1. Not transferable", "Ravi K"]
            .into_iter()
            .collect();
        let prepared = template_lines(DocumentKind::EmployeeId, &lines, &CardexConfig::default());
        assert_eq!(prepared.as_slice(), &["ACME LTD", "Ravi K"]);
    }

    #[test]
    fn test_national_lines_use_strict_length() {
        let lines: LineSequence = ["GOVERNMENT OF INDIA", "AB", "MALE"].into_iter().collect();
        let prepared = template_lines(DocumentKind::NationalId, &lines, &CardexConfig::default());
        assert_eq!(prepared.as_slice(), &["GOVERNMENT OF INDIA", "MALE"]);
    }
}
