use std::path::PathBuf;

use adult_report::config::{
    ReportConfig, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE, DEFAULT_TIMEOUT_SECS, SOURCE_ENV,
};
use adult_report::report::Page;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "adult-report",
    version,
    about = "Adult Income dataset loader, summary statistics and exploration report"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = SOURCE_ENV,
        default_value = DEFAULT_SOURCE,
        help = "Dataset location (http(s) URL or local path, headerless CSV)"
    )]
    pub source: String,
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS, help = "HTTP fetch timeout")]
    pub timeout_secs: u64,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the summary statistics
    Summary,
    /// Print one report page as Markdown
    Page {
        #[arg(value_enum)]
        page: PageName,
    },
    /// Render the PNG figures
    Charts {
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        out: PathBuf,
    },
    /// Write report.md and the figures
    Report {
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        out: PathBuf,
        #[arg(long, default_value_t = false)]
        no_charts: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PageName {
    Introduction,
    Visualizations,
    Conclusion,
}

impl From<PageName> for Page {
    fn from(name: PageName) -> Self {
        match name {
            PageName::Introduction => Page::Introduction,
            PageName::Visualizations => Page::Visualizations,
            PageName::Conclusion => Page::Conclusion,
        }
    }
}

impl Cli {
    pub fn config(&self) -> ReportConfig {
        let mut config = ReportConfig {
            source: self.source.clone(),
            fetch_timeout: std::time::Duration::from_secs(self.timeout_secs),
            ..ReportConfig::default()
        };
        match &self.command {
            Commands::Charts { out } | Commands::Report { out, .. } => {
                config.output_dir = out.clone();
            }
            Commands::Summary | Commands::Page { .. } => {}
        }
        config
    }
}
