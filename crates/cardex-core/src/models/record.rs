//! Identity-card record models.

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Document template selected for an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Aadhaar-style national identity card.
    #[serde(rename = "National ID")]
    NationalId,
    /// Election commission voter card (EPIC).
    #[serde(rename = "Voter ID")]
    VoterId,
    /// Company employee card.
    #[serde(rename = "Employee ID")]
    EmployeeId,
    /// School or college student card.
    #[serde(rename = "Student ID")]
    StudentId,
    /// Any other card with the generic field set.
    #[serde(rename = "ID Card")]
    GenericId,
}

impl DocumentKind {
    /// Human-readable label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::NationalId => "National ID",
            DocumentKind::VoterId => "Voter ID",
            DocumentKind::EmployeeId => "Employee ID",
            DocumentKind::StudentId => "Student ID",
            DocumentKind::GenericId => "ID Card",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fields recovered from a national identity card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalIdRecord {
    pub id_number: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub full_name: Option<String>,
    pub address: Option<String>,
}

/// Fields recovered from a voter identity card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterIdRecord {
    pub voter_id: Option<String>,
    pub name: Option<String>,
    pub father_name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
}

/// Fields recovered from an employee, student or other organization card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub org_name: Option<String>,
    pub name: Option<String>,
    pub id_number: Option<String>,
    pub designation_or_class: Option<String>,
    pub dob: Option<String>,
    pub address: Option<String>,
}

/// A populated record for one of the document templates.
///
/// Serializes flat: a `type` key followed by the template's fields, with
/// absent fields written as `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedRecord {
    National(NationalIdRecord),
    Voter(VoterIdRecord),
    Card {
        kind: DocumentKind,
        record: CardRecord,
    },
}

impl ExtractedRecord {
    /// Document kind the record was built for.
    pub fn kind(&self) -> DocumentKind {
        match self {
            ExtractedRecord::National(_) => DocumentKind::NationalId,
            ExtractedRecord::Voter(_) => DocumentKind::VoterId,
            ExtractedRecord::Card { kind, .. } => *kind,
        }
    }

    /// Field names and values in template order.
    pub fn fields(&self) -> Vec<(&'static str, Option<&str>)> {
        match self {
            ExtractedRecord::National(r) => vec![
                ("id_number", r.id_number.as_deref()),
                ("dob", r.dob.as_deref()),
                ("gender", r.gender.as_deref()),
                ("full_name", r.full_name.as_deref()),
                ("address", r.address.as_deref()),
            ],
            ExtractedRecord::Voter(r) => vec![
                ("voter_id", r.voter_id.as_deref()),
                ("name", r.name.as_deref()),
                ("father_name", r.father_name.as_deref()),
                ("dob", r.dob.as_deref()),
                ("gender", r.gender.as_deref()),
                ("address", r.address.as_deref()),
            ],
            ExtractedRecord::Card { record: r, .. } => vec![
                ("org_name", r.org_name.as_deref()),
                ("name", r.name.as_deref()),
                ("id_number", r.id_number.as_deref()),
                ("designation_or_class", r.designation_or_class.as_deref()),
                ("dob", r.dob.as_deref()),
                ("address", r.address.as_deref()),
            ],
        }
    }

    /// Look up a single field by name.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(name, _)| *name == field)
            .and_then(|(_, value)| value)
    }

    /// Names of the template fields that came out empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name)
            .collect()
    }

    /// Flat JSON object for the record.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("type".to_string(), self.kind().label().into());
        for (name, value) in self.fields() {
            let value = value
                .map(|v| serde_json::Value::String(v.to_string()))
                .unwrap_or(serde_json::Value::Null);
            map.insert(name.to_string(), value);
        }
        serde_json::Value::Object(map)
    }
}

impl Serialize for ExtractedRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Final value handed across the library boundary: a record or an error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractionOutcome {
    Record(ExtractedRecord),
    Error { error: String },
}

impl ExtractionOutcome {
    /// Build the error object for a terminal extraction error.
    pub fn error(err: &ExtractionError) -> Self {
        ExtractionOutcome::Error {
            error: err.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExtractionOutcome::Error { .. })
    }

    pub fn record(&self) -> Option<&ExtractedRecord> {
        match self {
            ExtractionOutcome::Record(record) => Some(record),
            ExtractionOutcome::Error { .. } => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ExtractionOutcome::Record(record) => record.to_json(),
            ExtractionOutcome::Error { error } => serde_json::json!({ "error": error }),
        }
    }
}

impl From<std::result::Result<ExtractedRecord, ExtractionError>> for ExtractionOutcome {
    fn from(result: std::result::Result<ExtractedRecord, ExtractionError>) -> Self {
        match result {
            Ok(record) => ExtractionOutcome::Record(record),
            Err(err) => ExtractionOutcome::error(&err),
        }
    }
}
