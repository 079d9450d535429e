//! 命令行接口
//!
//! 使用 clap derive 定义全局参数与子命令

use crate::domain::types::ProjectCategory;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 可再生能源项目 ESG 评估与项目地图
#[derive(Parser, Debug)]
#[command(name = "esg-atlas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the project dataset and show the import report and map markers
    Ingest {
        /// Dataset file (overrides configuration)
        #[arg(long, value_name = "PATH")]
        dataset: Option<PathBuf>,
    },

    /// Run a full assessment and add the project to the map
    Assess(AssessArgs),

    /// Print the questionnaire
    Questions {
        /// Locale (en, zh-CN)
        #[arg(long)]
        locale: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
pub struct AssessArgs {
    /// Project name
    #[arg(long)]
    pub name: String,

    /// Project category (inferred from the name when omitted)
    #[arg(long)]
    pub category: Option<ProjectCategory>,

    /// Project location
    #[arg(long, default_value = "")]
    pub location: String,

    /// Latitude text
    #[arg(long, allow_hyphen_values = true)]
    pub lat: String,

    /// Longitude text
    #[arg(long, allow_hyphen_values = true)]
    pub lon: String,

    /// Indices (0-based) of environmental questions answered yes
    #[arg(long, value_delimiter = ',')]
    pub environmental: Vec<usize>,

    /// Indices (0-based) of social questions answered yes
    #[arg(long, value_delimiter = ',')]
    pub social: Vec<usize>,

    /// Indices (0-based) of governance questions answered yes
    #[arg(long, value_delimiter = ',')]
    pub governance: Vec<usize>,

    /// Load this dataset before adding the assessed project
    #[arg(long, value_name = "PATH")]
    pub dataset: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assess() {
        let cli = Cli::try_parse_from([
            "esg-atlas",
            "assess",
            "--name",
            "Sunny Acres",
            "--lat",
            "33.4",
            "--lon",
            "-112.0",
            "--environmental",
            "0,1",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Command::Assess(args) => {
                assert_eq!(args.name, "Sunny Acres");
                assert_eq!(args.lon, "-112.0");
                assert_eq!(args.environmental, vec![0, 1]);
                assert!(args.social.is_empty());
                assert!(args.category.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_category() {
        let cli = Cli::try_parse_from([
            "esg-atlas", "assess", "--name", "X", "--category", "Wind", "--lat", "1", "--lon", "2",
        ])
        .unwrap();
        match cli.command {
            Command::Assess(args) => assert_eq!(args.category, Some(ProjectCategory::Wind)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["esg-atlas", "ingest", "--log", "debug", "--config", "c.json"])
            .unwrap();
        assert_eq!(cli.log.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
    }
}
