// ==========================================
// ESG 评估与项目地图 - 导入管道集成测试
// ==========================================
// 覆盖: 解析 → 映射 → 规整/过滤 → 登记表替换 → 地图标记
// ==========================================


use esg_atlas::app::{AppError, AppState};
use esg_atlas::config::AtlasConfig;
use esg_atlas::domain::{DqLevel, ProjectCategory, RecordOrigin};
use esg_atlas::importer::{
    FileDatasetSource, ImportError, ProjectImporter, ProjectImporterImpl, StaticDatasetSource,
};
use esg_atlas::repository::ProjectRegistry;
use test_helpers::{csv_row, csv_text, mixed_dataset, write_csv_file, HEADER};

// ==========================================
// 有效/无效行计数
// ==========================================

#[tokio::test]
async fn test_valid_and_invalid_rows() {
    esg_atlas::logging::init_test();

    let registry = ProjectRegistry::new();
    let source = StaticDatasetSource::new("mixed", mixed_dataset(7, 3));

    let report = ProjectImporterImpl::default()
        .load(&source, &registry)
        .await
        .expect("导入失败");

    assert_eq!(report.total_rows, 10);
    assert_eq!(report.accepted, 7);
    assert_eq!(report.dropped, 3);
    assert_eq!(report.errors().count(), 3);
    assert_eq!(registry.len(), 7);
    assert!(registry
        .snapshot()
        .iter()
        .all(|r| r.name().starts_with("Solar Array")));
}

#[tokio::test]
async fn test_big_wind_farm_with_text_latitude_is_dropped() {
    let registry = ProjectRegistry::new();
    let text = csv_text(&[csv_row(
        "Big Wind Farm",
        "Amarillo, TX",
        "not-a-number",
        "-101.8",
        ["60", "60", "60", "60"],
    )]);

    let report = ProjectImporterImpl::default()
        .load(&StaticDatasetSource::new("wind", text), &registry)
        .await
        .unwrap();

    assert_eq!(report.accepted, 0);
    assert!(registry.is_empty());
    let violation = &report.violations[0];
    assert_eq!(violation.level, DqLevel::Error);
    assert_eq!(violation.project_name.as_deref(), Some("Big Wind Farm"));
}

#[tokio::test]
async fn test_replace_discards_previous_records() {
    let registry = ProjectRegistry::new();
    let importer = ProjectImporterImpl::default();

    importer
        .load(&StaticDatasetSource::new("first", mixed_dataset(5, 0)), &registry)
        .await
        .unwrap();
    let first_ids: Vec<_> = registry.snapshot().iter().map(|r| r.id()).collect();

    importer
        .load(&StaticDatasetSource::new("second", mixed_dataset(2, 1)), &registry)
        .await
        .unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.snapshot().iter().all(|r| !first_ids.contains(&r.id())));
}

// ==========================================
// 解析容错
// ==========================================

#[test]
fn test_quoted_fields_and_trailing_blank_rows() {
    let text = format!(
        "{}\n{}\n{}\n\n,,,,,,,\n",
        HEADER,
        csv_row("Acme Biogass Plant", "Des Moines, IA", "41.6", "-93.6", ["70", "80", "60", "70"]),
        "\"Twin\nRivers Hydro\",\"Portland, OR\",45.5,-122.7,40,40,40,40"
    );

    let (report, records) = ProjectImporterImpl::default().ingest_text(&text).unwrap();

    assert_eq!(report.total_rows, 2);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].category(), ProjectCategory::Biomass);
    assert_eq!(records[0].location(), "Des Moines, IA");
    assert_eq!(records[1].name(), "Twin\nRivers Hydro");
    assert_eq!(records[1].category(), ProjectCategory::Hydro);
}

#[test]
fn test_violation_row_numbers_follow_source_lines() {
    let text = format!(
        "{}\n{}\n,,,,,,,\n{}\n",
        HEADER,
        csv_row("Solar Y", "Tucson, AZ", "32.2", "-110.9", ["50", "50", "50", "50"]),
        csv_row("Big Wind Farm", "Amarillo, TX", "not-a-number", "-101.8", ["50", "50", "50", "50"]),
    );
    let (report, _) = ProjectImporterImpl::default().ingest_text(&text).unwrap();

    let dropped: Vec<_> = report.errors().collect();
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].row_number, 4);
}

#[test]
fn test_extra_columns_are_ignored() {
    let text = format!(
        "{},Notes\nGeothermal Heat,Reno,39.5,-119.8,50,50,50,50,extra\n",
        HEADER
    );
    let (report, records) = ProjectImporterImpl::default().ingest_text(&text).unwrap();

    assert_eq!(report.accepted, 1);
    assert_eq!(records[0].category(), ProjectCategory::Geothermal);
}

#[test]
fn test_imported_records_carry_batch_id() {
    let (report, records) = ProjectImporterImpl::default()
        .ingest_text(&mixed_dataset(2, 0))
        .unwrap();

    for record in &records {
        assert_eq!(
            record.origin(),
            &RecordOrigin::Import {
                batch_id: report.batch_id.clone()
            }
        );
    }
}

#[test]
fn test_composite_derived_from_indicators() {
    let text = csv_text(&[csv_row("Solar X", "AZ", "33", "-112", ["99", "40", "100", "0"])]);
    let (report, records) = ProjectImporterImpl::default().ingest_text(&text).unwrap();

    assert!((records[0].composite_score() - 46.67).abs() < 0.01);
    assert_eq!(report.warnings().count(), 1);
}

#[test]
fn test_numeric_looking_names_and_locations_kept_verbatim() {
    let text = csv_text(&[
        csv_row("007", "02134", "42.35", "-71.1", ["50", "50", "50", "50"]),
        csv_row("1e3", "1.50", "42.36", "-71.2", ["50", "50", "50", "50"]),
    ]);
    let (_, records) = ProjectImporterImpl::default().ingest_text(&text).unwrap();

    assert_eq!(records[0].name(), "007");
    assert_eq!(records[0].location(), "02134");
    assert_eq!(records[1].name(), "1e3");
    assert_eq!(records[1].location(), "1.50");
}

// ==========================================
// 致命错误: 登记表保持不变
// ==========================================

#[tokio::test]
async fn test_header_mismatch_leaves_registry_unchanged() {
    let state = AppState::new(AtlasConfig::default()).unwrap();
    state
        .load_dataset(&StaticDatasetSource::new("seed", mixed_dataset(3, 0)))
        .await
        .unwrap();
    let before = state.registry.snapshot();

    let bad = "Project Name,Project Location,lat,lng\nA,B,1,2\n";
    let err = state
        .load_dataset(&StaticDatasetSource::new("bad", bad))
        .await
        .unwrap_err();

    match err {
        AppError::Import(ImportError::HeaderMismatch { missing }) => {
            assert!(missing.contains(&"latitude".to_string()));
            assert!(missing.contains(&"Total Score".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(state.registry.snapshot(), before);
    assert_eq!(state.map_sync.marker_count(), 3);
}

// ==========================================
// 文件数据源
// ==========================================

#[tokio::test]
async fn test_load_from_csv_file() {
    let file = write_csv_file(&mixed_dataset(4, 2));
    let mut config = AtlasConfig::default();
    config.dataset.path = file.path().to_path_buf();

    let state = AppState::new(config).unwrap();
    assert!(state.is_loading());

    let report = state.load_configured_dataset().await.unwrap();

    assert!(!state.is_loading());
    assert_eq!(report.accepted, 4);
    assert_eq!(state.registry.len(), 4);
    assert_eq!(state.map_sync.marker_count(), 4);
}

#[tokio::test]
async fn test_missing_file_clears_loading_flag() {
    let state = AppState::new(AtlasConfig::default()).unwrap();
    let source = FileDatasetSource::new("/definitely/not/here.csv");

    let err = state.load_dataset(&source).await.unwrap_err();

    assert!(matches!(err, AppError::Import(ImportError::FileNotFound(_))));
    assert!(!state.is_loading());
    assert!(state.registry.is_empty());
}

#[tokio::test]
async fn test_semicolon_delimiter_from_config() {
    let text = format!(
        "{}\nSolar Y;Tucson;32.2;-110.9;50;50;50;50\n",
        HEADER.replace(',', ";")
    );
    let mut config = AtlasConfig::default();
    config.dataset.delimiter = ';';

    let state = AppState::new(config).unwrap();
    let report = state
        .load_dataset(&StaticDatasetSource::new("semicolon", text))
        .await
        .unwrap();

    assert_eq!(report.accepted, 1);
}
