use super::mapping::{criticality_from_text, priority_from_text};
use super::rows::non_blank;
use super::{parse_kind, ImportError};
use crate::deadlines::calendar::parse_optional_date;
use crate::deadlines::domain::{DatedObligation, ObligationId};
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;

/// One line of a flattened obligation snapshot, as exported from the
/// dashboard (`kind,id,owner,label,reference_date,due_date,priority,criticality`).
///
/// The same shape is accepted inside JSON request bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub kind: String,
    pub id: String,
    pub owner: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub reference_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub criticality: Option<String>,
}

impl SnapshotRow {
    pub fn to_obligation(&self) -> Result<DatedObligation, ImportError> {
        let kind = parse_kind(&self.kind)?;
        let reference_date = parse_optional_date("reference_date", self.reference_date.as_deref())?;
        let due_date = parse_optional_date("due_date", self.due_date.as_deref())?;

        let priority_hint = non_blank(self.priority.as_deref())
            .map(|raw| {
                priority_from_text(raw).ok_or_else(|| ImportError::UnknownPriority(raw.to_string()))
            })
            .transpose()?;
        let criticality = non_blank(self.criticality.as_deref())
            .map(|raw| {
                criticality_from_text(raw)
                    .ok_or_else(|| ImportError::UnknownCriticality(raw.to_string()))
            })
            .transpose()?;

        Ok(DatedObligation {
            id: ObligationId(self.id.trim().to_string()),
            owner: self.owner.trim().to_string(),
            kind,
            label: self.label.clone(),
            reference_date,
            due_date,
            priority_hint,
            criticality,
        })
    }
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<SnapshotRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<SnapshotRow>()
        .collect::<Result<Vec<_>, _>>()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
