// ==========================================
// ESG 评估与项目地图 - 评估流程集成测试
// ==========================================
// 覆盖: 五步问卷 → 评分 → 提交追加 → 地图标记
// ==========================================


use esg_atlas::app::AppState;
use esg_atlas::config::{AtlasConfig, CoordinatePolicy};
use esg_atlas::domain::{AssessmentStep, EsgCategory, ProjectCategory, RecordOrigin};
use esg_atlas::engine::{AssessmentError, AssessmentFlow, FlowOutcome, Handoff};
use esg_atlas::importer::StaticDatasetSource;
use esg_atlas::repository::ProjectRegistry;
use test_helpers::mixed_dataset;

/// 填写基本信息并设置答案,停在汇总步骤
fn fill_flow(
    flow: &mut AssessmentFlow,
    registry: &ProjectRegistry,
    name: &str,
    lat: &str,
    lon: &str,
    answers: &[(EsgCategory, &[usize])],
) {
    flow.set_project_name(name).unwrap();
    flow.set_location("Test County").unwrap();
    flow.set_coordinates_text(lat, lon).unwrap();

    while flow.step() != AssessmentStep::Summary {
        if let Some(category) = flow.step().questionnaire() {
            for (c, indices) in answers {
                if *c == category {
                    for &i in *indices {
                        flow.set_answer(category, i, true).unwrap();
                    }
                }
            }
        }
        flow.next(registry).unwrap();
    }
}

// ==========================================
// 评分示例
// ==========================================

#[test]
fn test_worked_scoring_example() {
    let registry = ProjectRegistry::new();
    let mut flow = AssessmentFlow::new(CoordinatePolicy::Reject);
    fill_flow(
        &mut flow,
        &registry,
        "Prairie Solar",
        "38.5",
        "-98.0",
        &[
            (EsgCategory::Environmental, &[0, 1][..]),
            (EsgCategory::Social, &[0, 1, 2, 3, 4][..]),
        ],
    );

    let preview = flow.preview_scores().unwrap();
    assert_eq!(preview.environmental(), 40.0);
    assert_eq!(preview.social(), 100.0);
    assert_eq!(preview.governance(), 0.0);

    match flow.next(&registry).unwrap() {
        FlowOutcome::Finalized {
            record, handoff, ..
        } => {
            assert!((record.composite_score() - 46.67).abs() < 0.01);
            assert_eq!(handoff, Handoff::ProjectMap);
            assert_eq!(record.origin(), &RecordOrigin::Assessment);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_progress_through_steps() {
    let registry = ProjectRegistry::new();
    let mut flow = AssessmentFlow::new(CoordinatePolicy::Reject);
    let mut seen = vec![flow.progress()];
    for _ in 0..4 {
        flow.next(&registry).unwrap();
        seen.push(flow.progress());
    }
    assert_eq!(seen, vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
    assert!(registry.is_empty());
}

// ==========================================
// 提交: 追加且仅追加一条
// ==========================================

#[tokio::test]
async fn test_finalize_appends_exactly_one_record() {
    let state = AppState::new(AtlasConfig::default()).unwrap();
    state
        .load_dataset(&StaticDatasetSource::new("seed", mixed_dataset(3, 0)))
        .await
        .unwrap();
    let before = state.registry.snapshot();

    let mut flow = state.start_assessment();
    fill_flow(&mut flow, &state.registry, "Ridge Wind", "41.0", "-95.0", &[]);
    let outcome = flow.next(&state.registry).unwrap();

    let snapshot = state.registry.snapshot();
    assert_eq!(snapshot.len(), before.len() + 1);
    assert_eq!(&snapshot[..before.len()], &before[..]);

    let FlowOutcome::Finalized { record, event, .. } = outcome else {
        panic!("flow not finalized");
    };
    assert_eq!(snapshot.last(), Some(&record));
    assert_eq!(event.appended_id, Some(record.id()));
    assert_eq!(record.category(), ProjectCategory::Wind);

    // 新记录立即出现在地图上
    assert_eq!(state.map_sync.marker_count(), 4);
    assert!(state.map_sync.marker_for(record.id()).is_some());
}

#[test]
fn test_explicit_category_wins_over_name() {
    let registry = ProjectRegistry::new();
    let mut flow = AssessmentFlow::new(CoordinatePolicy::Reject);
    flow.set_category(ProjectCategory::Geothermal).unwrap();
    fill_flow(&mut flow, &registry, "Solar Wind Combo", "10", "10", &[]);

    match flow.next(&registry).unwrap() {
        FlowOutcome::Finalized { record, .. } => {
            assert_eq!(record.category(), ProjectCategory::Geothermal)
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

// ==========================================
// 坐标策略: 评估路径与导入路径共用同一校验
// ==========================================

#[test]
fn test_reject_policy_matches_import_path() {
    let registry = ProjectRegistry::new();
    let mut flow = AssessmentFlow::new(CoordinatePolicy::Reject);
    fill_flow(&mut flow, &registry, "Big Wind Farm", "not-a-number", "-100", &[]);

    let err = flow.next(&registry).unwrap_err();

    assert!(matches!(err, AssessmentError::InvalidCoordinates(_)));
    assert_eq!(flow.step(), AssessmentStep::Summary);
    assert!(registry.is_empty());

    // 修正坐标后可再次提交
    flow.set_coordinates_text("35.2", "-101.8").unwrap();
    assert!(matches!(
        flow.next(&registry).unwrap(),
        FlowOutcome::Finalized { .. }
    ));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_accept_nan_policy_keeps_historical_asymmetry() {
    // accept_nan: 评估路径接受无法解析的坐标（NaN）,而导入路径会丢弃同样的行
    let registry = ProjectRegistry::new();
    let mut flow = AssessmentFlow::new(CoordinatePolicy::AcceptNan);
    fill_flow(&mut flow, &registry, "Big Wind Farm", "not-a-number", "-100", &[]);

    match flow.next(&registry).unwrap() {
        FlowOutcome::Finalized { record, .. } => {
            assert!(record.latitude().is_nan());
            assert!(!record.position().is_finite());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(registry.len(), 1);
}
