//! Entities of the remote imaging archive.

use crate::core::factory;
use crate::core::model::Model;
use crate::core::predicates;
use crate::core::schema::{Alias, FieldDefault, FieldSpec, Schema};
use crate::core::validator::{Validator, ValidatorRegistry};
use crate::domain::quality::ScanQuality;
use crate::domain::unknown::Maybe;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

const fn text_alias(name: &'static str) -> Alias {
    Alias::new(name).with_factory(factory::text)
}

const fn int_alias(name: &'static str) -> Alias {
    Alias::new(name).with_factory(factory::integer)
}

// ---------------------------------------------------------------------------
// Project

static PROJECT_FIELDS: [FieldSpec; 1] = [FieldSpec::plain("project_label")];
static PROJECT_SCHEMA: Schema = Schema::new("Project", &PROJECT_FIELDS);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Maybe::is_unknown")]
    pub uri: Maybe<String>,
    pub project_label: String,
}

impl Project {
    pub fn new(project_label: impl Into<String>) -> Self {
        Self {
            uri: Maybe::Unknown,
            project_label: project_label.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.project_label
    }
}

impl Model for Project {
    fn schema() -> &'static Schema {
        &PROJECT_SCHEMA
    }

    fn registry() -> &'static ValidatorRegistry<Self> {
        static REGISTRY: OnceLock<ValidatorRegistry<Project>> = OnceLock::new();
        REGISTRY.get_or_init(ValidatorRegistry::discover)
    }
}

// ---------------------------------------------------------------------------
// Session

fn project_schema() -> &'static Schema {
    Project::schema()
}

static SESSION_FIELDS: [FieldSpec; 5] = [
    FieldSpec::aliased("id", int_alias("xnat:subjectassessordata/id").required()),
    FieldSpec::nested("project", project_schema),
    FieldSpec::plain("session_label"),
    FieldSpec::aliased("subject_label", text_alias("label")),
    FieldSpec::aliased("xsi_type", text_alias("xsiType")),
];
static SESSION_SCHEMA: Schema = Schema::new("Session", &SESSION_FIELDS);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Maybe::is_unknown")]
    pub uri: Maybe<String>,
    pub id: i64,
    pub project: Project,
    pub session_label: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unknown")]
    pub subject_label: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unknown")]
    pub xsi_type: Maybe<String>,
}

impl Session {
    /// `<project>:<session label>`
    pub fn name(&self) -> String {
        format!("{}:{}", self.project.name(), self.session_label)
    }
}

impl Model for Session {
    fn schema() -> &'static Schema {
        &SESSION_SCHEMA
    }

    fn registry() -> &'static ValidatorRegistry<Self> {
        static REGISTRY: OnceLock<ValidatorRegistry<Session>> = OnceLock::new();
        REGISTRY.get_or_init(ValidatorRegistry::discover)
    }
}

// ---------------------------------------------------------------------------
// Scan

fn session_schema() -> &'static Schema {
    Session::schema()
}

static SCAN_FIELDS: [FieldSpec; 6] = [
    FieldSpec::aliased(
        "description",
        text_alias("description").with_default(FieldDefault::Text("")),
    ),
    FieldSpec::aliased("id", int_alias("ID").required()),
    FieldSpec::aliased(
        "quality",
        Alias::new("quality").with_factory(factory::scan_quality),
    ),
    FieldSpec::nested("session", session_schema),
    FieldSpec::aliased("data_type", text_alias("type")),
    FieldSpec::aliased("xsi_type", text_alias("xsiType")),
];
static SCAN_SCHEMA: Schema = Schema::new("Scan", &SCAN_FIELDS);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    #[serde(default, skip_serializing_if = "Maybe::is_unknown")]
    pub uri: Maybe<String>,
    pub description: String,
    pub id: i64,
    #[serde(default, skip_serializing_if = "Maybe::is_unknown")]
    pub quality: Maybe<ScanQuality>,
    pub session: Session,
    #[serde(default, skip_serializing_if = "Maybe::is_unknown")]
    pub data_type: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_unknown")]
    pub xsi_type: Maybe<String>,
}

impl Scan {
    /// `<project>:<session label>:<scan id>`
    pub fn name(&self) -> String {
        format!("{}:{}", self.session.name(), self.id)
    }
}

impl Model for Scan {
    fn schema() -> &'static Schema {
        &SCAN_SCHEMA
    }

    fn registry() -> &'static ValidatorRegistry<Self> {
        static REGISTRY: OnceLock<ValidatorRegistry<Scan>> = OnceLock::new();
        REGISTRY.get_or_init(ValidatorRegistry::discover)
    }
}

// ---------------------------------------------------------------------------
// File

static FILE_FIELDS: [FieldSpec; 6] = [
    FieldSpec::aliased("cat_id", int_alias("cat_ID").required()),
    FieldSpec::plain("name"),
    FieldSpec::aliased(
        "content",
        text_alias("file_content").with_default(FieldDefault::Text("")),
    ),
    FieldSpec::aliased("format", text_alias("file_format")),
    FieldSpec::aliased(
        "size",
        int_alias("Size").with_default(FieldDefault::Integer(0)),
    ),
    FieldSpec::aliased(
        "tags",
        Alias::new("file_tags")
            .with_factory(factory::tags)
            .with_render(factory::render_tags)
            .with_default(FieldDefault::EmptyList),
    ),
];
static FILE_SCHEMA: Schema = Schema::new("File", &FILE_FIELDS);

/// A resource file attached to a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    #[serde(default, skip_serializing_if = "Maybe::is_unknown")]
    pub uri: Maybe<String>,
    pub cat_id: i64,
    pub name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Maybe::is_unknown")]
    pub format: Maybe<String>,
    pub size: i64,
    pub tags: Vec<String>,
}

impl File {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Model for File {
    fn schema() -> &'static Schema {
        &FILE_SCHEMA
    }

    fn registry() -> &'static ValidatorRegistry<Self> {
        static REGISTRY: OnceLock<ValidatorRegistry<File>> = OnceLock::new();
        REGISTRY.get_or_init(ValidatorRegistry::discover)
    }

    fn declared_validators() -> Vec<Validator<Self>> {
        vec![
            predicates::text_not_empty("name"),
            predicates::int_at_least("size", 0),
        ]
    }
}

// ---------------------------------------------------------------------------

macro_rules! display_by_name {
    ($($model:ident),+) => {
        $(
            impl fmt::Display for $model {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "<{}({})>", stringify!($model), self.name())
                }
            }
        )+
    };
}

display_by_name!(Project, Session, Scan, File);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique_wire_keys(schema: &Schema) {
        let mut seen = HashSet::new();
        for field in schema.fields() {
            assert!(
                seen.insert(field.wire_key()),
                "{} declares wire key '{}' twice",
                schema.model(),
                field.wire_key()
            );
        }
    }

    #[test]
    fn test_schemas_have_unique_wire_keys() {
        assert_unique_wire_keys(Project::schema());
        assert_unique_wire_keys(Session::schema());
        assert_unique_wire_keys(Scan::schema());
        assert_unique_wire_keys(File::schema());
    }

    #[test]
    fn test_every_model_inherits_uri() {
        for schema in [Project::schema(), Session::schema(), Scan::schema(), File::schema()] {
            let uri = schema.field("uri").expect("uri field");
            assert_eq!(uri.wire_key(), "URI");
            assert!(!uri.is_required());
        }
    }

    #[test]
    fn test_names_and_display() {
        let project = Project::new("PRJ01");
        let session = Session {
            uri: Maybe::Unknown,
            id: 3,
            project: project.clone(),
            session_label: "S01".to_string(),
            subject_label: Maybe::Unknown,
            xsi_type: Maybe::Unknown,
        };
        let scan = Scan {
            uri: Maybe::Unknown,
            description: String::new(),
            id: 7,
            quality: Maybe::Known(ScanQuality::Usable),
            session: session.clone(),
            data_type: Maybe::Known("T1".to_string()),
            xsi_type: Maybe::Unknown,
        };

        assert_eq!(project.to_string(), "<Project(PRJ01)>");
        assert_eq!(session.name(), "PRJ01:S01");
        assert_eq!(scan.name(), "PRJ01:S01:7");
        assert_eq!(scan.to_string(), "<Scan(PRJ01:S01:7)>");
    }

    #[test]
    fn test_file_declared_validators() {
        assert_eq!(File::registry().len(), 2);
        assert!(Project::registry().is_empty());
    }
}
