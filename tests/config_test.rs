// ==========================================
// ESG 评估与项目地图 - 配置集成测试
// ==========================================
// 覆盖: JSON 文件 → 环境变量覆写 → 会话状态
// ==========================================


use esg_atlas::app::AppState;
use esg_atlas::config::{config_keys, ConfigError, ConfigManager, CoordinatePolicy, SyncStrategy};
use esg_atlas::engine::{AssessmentError, FlowOutcome};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;
use test_helpers::{mixed_dataset, write_csv_file};

fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("创建临时文件失败");
    file.write_all(json.as_bytes()).expect("写入临时文件失败");
    file
}

#[tokio::test]
async fn test_config_file_drives_session() {
    let dataset = write_csv_file(&mixed_dataset(2, 0));
    let json = format!(
        r#"{{
            "dataset": {{ "path": {path:?} }},
            "assessment": {{ "coordinate_policy": "accept_nan" }},
            "map": {{ "sync_strategy": "diff", "viewport": {{ "zoom": 5.0 }} }}
        }}"#,
        path = dataset.path().display().to_string()
    );
    let file = config_file(&json);

    let manager = ConfigManager::from_file(file.path()).unwrap();
    assert_eq!(manager.source(), Some(file.path()));

    let state = AppState::new(manager.into_config()).unwrap();
    assert_eq!(state.map_sync.strategy(), SyncStrategy::Diff);
    assert_eq!(state.map_sync.with_surface(|s| s.viewport().zoom), 5.0);

    state.load_configured_dataset().await.unwrap();
    assert_eq!(state.map_sync.marker_count(), 2);

    // accept_nan 策略传递到评估流程
    let mut flow = state.start_assessment();
    assert_eq!(flow.coordinate_policy(), CoordinatePolicy::AcceptNan);
    flow.set_project_name("Solar Z").unwrap();
    flow.set_coordinates_text("n/a", "n/a").unwrap();
    let outcome = loop {
        match flow.next(&state.registry) {
            Ok(FlowOutcome::Moved { .. }) => continue,
            other => break other,
        }
    };
    assert!(matches!(outcome, Ok(FlowOutcome::Finalized { .. })));
    assert_eq!(state.map_sync.marker_count(), 3);
}

#[test]
fn test_env_overrides_win_over_file() {
    let file = config_file(r#"{ "map": { "sync_strategy": "diff" } }"#);
    let mut manager = ConfigManager::from_file(file.path()).unwrap();

    let env: HashMap<&str, &str> = [
        (config_keys::SYNC_STRATEGY, "full_rebuild"),
        (config_keys::COORDINATE_POLICY, "reject"),
    ]
    .into_iter()
    .collect();
    manager
        .apply_env_overrides(|key| env.get(key).map(|v| v.to_string()))
        .unwrap();

    assert_eq!(manager.config().map.sync_strategy, SyncStrategy::FullRebuild);
    assert_eq!(
        manager.config().assessment.coordinate_policy,
        CoordinatePolicy::Reject
    );
}

#[test]
fn test_malformed_config_file() {
    let file = config_file("{ not json");
    let err = ConfigManager::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_reject_policy_default_session() {
    let state = AppState::new(Default::default()).unwrap();
    let mut flow = state.start_assessment();
    flow.set_coordinates_text("", "").unwrap();
    for _ in 0..4 {
        flow.next(&state.registry).unwrap();
    }
    assert!(matches!(
        flow.next(&state.registry),
        Err(AssessmentError::InvalidCoordinates(_))
    ));
    assert_eq!(state.map_sync.marker_count(), 0);
}
