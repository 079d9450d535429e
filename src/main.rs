// ==========================================
// ESG 评估与项目地图 - 命令行主入口
// ==========================================
// 子命令: ingest / assess / questions
// ==========================================

use anyhow::{bail, Context, Result};
use clap::Parser;
use esg_atlas::app::AppState;
use esg_atlas::cli::{AssessArgs, Cli, Command};
use esg_atlas::config::ConfigManager;
use esg_atlas::domain::{format_percent, AssessmentStep, EsgCategory, QUESTIONS_PER_CATEGORY};
use esg_atlas::engine::FlowOutcome;
use esg_atlas::importer::FileDatasetSource;
use esg_atlas::{i18n, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    match cli.log.as_deref() {
        Some(level) => logging::init_with_level(level),
        None => logging::init(),
    }

    tracing::info!(version = esg_atlas::VERSION, "{} 启动", esg_atlas::APP_NAME);

    let manager = ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    if let Some(path) = manager.source() {
        tracing::info!(path = %path.display(), "使用配置文件");
    }
    let config = manager.into_config();
    i18n::set_locale(&config.assessment.locale);

    match cli.command {
        Command::Ingest { dataset } => {
            let state = AppState::new(config)?;
            run_ingest(&state, dataset, cli.json).await
        }
        Command::Assess(args) => {
            let state = AppState::new(config)?;
            run_assess(&state, args, cli.json).await
        }
        Command::Questions { locale } => {
            let locale = locale.unwrap_or(config.assessment.locale);
            run_questions(&locale, cli.json)
        }
    }
}

async fn load(state: &AppState, dataset: Option<std::path::PathBuf>) -> Result<()> {
    let path = dataset.unwrap_or_else(|| state.config.dataset.path.clone());
    let report = state
        .load_dataset(&FileDatasetSource::new(&path))
        .await
        .with_context(|| format!("加载数据集失败: {}", path.display()))?;

    for violation in report.violations.iter() {
        tracing::debug!(
            row = violation.row_number,
            level = ?violation.level,
            field = %violation.field,
            "{}",
            violation.message
        );
    }
    let accepted = report.accepted.to_string();
    let dropped = report.dropped.to_string();
    eprintln!(
        "{}",
        i18n::t_with_args(
            "cli.ingest.summary",
            &[("accepted", accepted.as_str()), ("dropped", dropped.as_str())],
        )
    );
    Ok(())
}

async fn run_ingest(state: &AppState, dataset: Option<std::path::PathBuf>, json: bool) -> Result<()> {
    load(state, dataset).await?;

    if json {
        let geojson = state.map_sync.with_surface(|surface| surface.to_geojson());
        println!("{}", serde_json::to_string_pretty(&geojson)?);
        return Ok(());
    }

    let caption = i18n::t("map.popup.esg_score");
    for marker in state.map_sync.markers() {
        let popup = &marker.spec.popup;
        println!(
            "{:<32} {:<24} {:>8} {:<10} {} {}: {}",
            popup.title,
            popup.subtitle,
            marker.spec.icon.category.to_string(),
            popup.tier.to_string(),
            marker.spec.icon.glyph,
            caption,
            popup.score_label,
        );
    }
    let count = state.map_sync.marker_count().to_string();
    println!(
        "{}",
        i18n::t_with_args("cli.ingest.markers", &[("count", count.as_str())])
    );
    Ok(())
}

async fn run_assess(state: &AppState, args: AssessArgs, json: bool) -> Result<()> {
    if args.dataset.is_some() {
        load(state, args.dataset.clone()).await?;
    }

    let mut flow = state.start_assessment();
    flow.set_project_name(args.name.clone())?;
    if let Some(category) = args.category {
        flow.set_category(category)?;
    }
    flow.set_location(args.location.clone())?;
    flow.set_coordinates_text(args.lat.clone(), args.lon.clone())?;

    for (category, indices) in [
        (EsgCategory::Environmental, &args.environmental),
        (EsgCategory::Social, &args.social),
        (EsgCategory::Governance, &args.governance),
    ] {
        for &index in indices {
            flow.set_answer(category, index, true)?;
        }
    }

    // 逐步前进直到提交
    let locale = i18n::current_locale();
    let record = loop {
        match flow.next(&state.registry)? {
            FlowOutcome::Moved { to, .. } => {
                eprintln!(
                    "{} - {}",
                    i18n::progress_text(flow.progress(), &locale),
                    i18n::step_title(to, &locale)
                );
            }
            FlowOutcome::Finalized { record, .. } => break record,
        }
    };

    let Some(marker) = state.map_sync.marker_for(record.id()) else {
        bail!("地图标记缺失: {}", record.id());
    };

    if json {
        let output = serde_json::json!({ "record": record, "marker": marker });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let score = format_percent(record.composite_score());
        println!(
            "{}",
            i18n::t_with_args(
                "cli.assess.saved",
                &[("name", record.name()), ("score", score.as_str())],
            )
        );
        println!(
            "{}",
            marker.spec.popup.to_html(&i18n::t("map.popup.esg_score"))
        );
    }
    Ok(())
}

fn run_questions(locale: &str, json: bool) -> Result<()> {
    let mut sections = Vec::new();
    let mut step = Some(AssessmentStep::BasicInfo);
    while let Some(current) = step {
        if let Some(category) = current.questionnaire() {
            let questions: Vec<String> = (0..QUESTIONS_PER_CATEGORY)
                .map(|index| i18n::question_text(category, index, locale))
                .collect();
            sections.push((i18n::step_title(current, locale), category, questions));
        }
        step = current.next();
    }

    if json {
        let output: Vec<_> = sections
            .iter()
            .map(|(title, category, questions)| {
                serde_json::json!({ "title": title, "category": category, "questions": questions })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (title, _, questions) in sections {
        println!("{}", title);
        for (index, question) in questions.iter().enumerate() {
            println!("  [{}] {}", index, question);
        }
    }
    Ok(())
}
