use anyhow::Result;
use serde_json::json;
use xnat_models::core::predicates;
use xnat_models::{File, Model, ModelError, Project, Scan, Session, Validator};

fn project() -> Result<Project> {
    Ok(Project::from_mapping(
        json!({"project_label": "PRJ01"})
            .as_object()
            .cloned()
            .unwrap_or_default(),
    )?)
}

fn session(label: &str) -> Result<Session> {
    Ok(Session::from_mapping(
        json!({
            "xnat:subjectassessordata/id": "3",
            "session_label": label,
            "project": {"project_label": "PRJ01"}
        })
        .as_object()
        .cloned()
        .unwrap_or_default(),
    )?)
}

/// 測試重複註冊與重複移除（每個測試使用不同的模型型別，避免共用登錄表互相干擾）
#[test]
fn test_validator_idempotence() -> Result<()> {
    let has_id = Validator::simple("has_id", |scan: &Scan| scan.id > 0);

    Scan::insert_validator(has_id.clone())?;
    assert!(matches!(
        Scan::insert_validator(has_id.clone()),
        Err(ModelError::ValidatorAlreadyRegistered { .. })
    ));

    Scan::remove_validator(&has_id)?;
    assert!(matches!(
        Scan::remove_validator(&has_id),
        Err(ModelError::NotAValidator { .. })
    ));
    Ok(())
}

/// 測試 is_valid 為所有驗證器的邏輯 AND
#[test]
fn test_validation_aggregation() -> Result<()> {
    let short = session("S01")?;
    let long = session("SESSION_WITH_A_LONG_LABEL")?;
    assert!(short.is_valid());
    assert!(long.is_valid());

    Session::insert_validator(predicates::text_max_len("session_label", 8))?;
    Session::insert_validator(predicates::text_not_empty("project.project_label"))?;

    assert!(short.is_valid());
    assert!(!long.is_valid());
    assert_eq!(
        long.failing_validators(),
        vec!["text_max_len(field=\"session_label\", max=8)".to_string()]
    );
    Ok(())
}

/// 測試同一個泛型驗證器以不同參數綁定，視為不同驗證器
#[test]
fn test_bound_arguments_distinguish_validators() -> Result<()> {
    let project = project()?;

    Project::insert_validator(predicates::one_of("project_label", &["PRJ01", "PRJ02"]))?;
    Project::insert_validator(predicates::one_of("project_label", &["PRJ01"]))?;
    assert!(project.is_valid());

    Project::insert_validator(predicates::field_known("uri"))?;
    assert!(!project.is_valid());

    Project::remove_validator(&predicates::field_known("uri"))?;
    assert!(project.is_valid());
    Ok(())
}

/// 測試宣告的驗證器在首次使用時自動註冊
#[test]
fn test_declared_validators_are_registered() -> Result<()> {
    assert!(matches!(
        File::insert_validator(predicates::int_at_least("size", 0)),
        Err(ModelError::ValidatorAlreadyRegistered { .. })
    ));

    let file = File::from_mapping(
        json!({"cat_ID": "1", "name": "", "Size": "10"})
            .as_object()
            .cloned()
            .unwrap_or_default(),
    )?;
    assert!(!file.is_valid());
    assert_eq!(file.failing_validators().len(), 1);
    Ok(())
}
