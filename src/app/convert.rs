//! Round-trips wire mappings through the typed models for the command-line
//! tool: parse, validate, and write the normalised mapping back out.

use crate::config::toml_config::OutputFormat;
use crate::core::{Model, WireMapping};
use crate::domain::model::{File, Project, Scan, Session};
use crate::utils::error::{ModelError, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ModelKind {
    Project,
    Session,
    Scan,
    File,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema().model())
    }
}

impl ModelKind {
    pub fn schema(&self) -> &'static crate::core::Schema {
        match self {
            ModelKind::Project => Project::schema(),
            ModelKind::Session => Session::schema(),
            ModelKind::Scan => Scan::schema(),
            ModelKind::File => File::schema(),
        }
    }
}

/// One converted record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Converted {
    pub name: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failing_validators: Vec<String>,
    pub mapping: WireMapping,
}

impl Converted {
    fn from_model<M: Model + fmt::Display>(model: &M) -> Result<Self> {
        Ok(Self {
            name: model.to_string(),
            valid: model.is_valid(),
            failing_validators: model.failing_validators(),
            mapping: model.into_mapping()?,
        })
    }
}

/// Converts a single wire mapping or a list of them.
pub fn convert(kind: ModelKind, input: Value) -> Result<Vec<Converted>> {
    let mappings = match input {
        Value::Array(items) => items,
        // 單一物件視為只有一筆
        single => vec![single],
    };

    tracing::info!("🔄 Converting {} {} mapping(s)", mappings.len(), kind);

    mappings
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(mapping) => convert_one(kind, mapping),
            other => Err(ModelError::MalformedMapping {
                model: kind.to_string(),
                field: format!("[{}]", index),
                reason: format!("expected a mapping, got {}", other),
            }),
        })
        .collect()
}

fn convert_one(kind: ModelKind, mapping: WireMapping) -> Result<Converted> {
    match kind {
        ModelKind::Project => Converted::from_model(&Project::from_mapping(mapping)?),
        ModelKind::Session => Converted::from_model(&Session::from_mapping(mapping)?),
        ModelKind::Scan => Converted::from_model(&Scan::from_mapping(mapping)?),
        ModelKind::File => Converted::from_model(&File::from_mapping(mapping)?),
    }
}

pub fn render(records: &[Converted], format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Json => Ok(serde_json::to_string(records)?),
        OutputFormat::Csv => render_csv(records),
    }
}

/// Nested mappings become dotted columns; one row per record.
fn render_csv(records: &[Converted]) -> Result<String> {
    let rows: Vec<Vec<(String, String)>> = records
        .iter()
        .map(|record| {
            let mut cells = Vec::new();
            flatten("", &record.mapping, &mut cells);
            cells
        })
        .collect();

    let columns: BTreeSet<&str> = rows
        .iter()
        .flat_map(|cells| cells.iter().map(|(key, _)| key.as_str()))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["name", "valid"].into_iter().chain(columns.iter().copied()))?;

    for (record, cells) in records.iter().zip(&rows) {
        let mut row = vec![record.name.clone(), record.valid.to_string()];
        for column in &columns {
            let cell = cells
                .iter()
                .find(|(key, _)| key.as_str() == *column)
                .map(|(_, value)| value.clone())
                .unwrap_or_default();
            row.push(cell);
        }
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ModelError::Io(std::io::Error::new(e.error().kind(), e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| ModelError::UnsupportedValueConversion {
        model: "csv".to_string(),
        field: String::new(),
        reason: e.to_string(),
    })
}

fn flatten(prefix: &str, mapping: &WireMapping, cells: &mut Vec<(String, String)>) {
    for (key, value) in mapping {
        let column = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(nested) => flatten(&column, nested, cells),
            Value::String(text) => cells.push((column, text.clone())),
            other => cells.push((column, other.to_string())),
        }
    }
}
