//! adult-report - Adult Income dataset exploration report
//!
//! Loads the dataset once, then prints statistics, renders pages or writes
//! the full report with its figures.

mod cli;

use adult_report::charts::StaticChartRenderer;
use adult_report::report::{render_report, Page, ReportContext};
use adult_report::{summarize, DatasetCache};
use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use log::{info, LevelFilter};
use serde_json::json;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    // RUST_LOG, when set, takes precedence over -v
    builder.parse_default_env();
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config();
    let locator = config.locator();
    let cache = DatasetCache::new(locator.open(config.fetch_timeout), config.columns.as_slice());
    let source_name = locator.to_string();

    match cli.command {
        Commands::Summary => {
            let dataset = cache.get().context("loading dataset")?;
            let summary = summarize(&dataset)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("records            {}", summary.record_count);
                println!("rows dropped       {}", dataset.rows_dropped());
                println!("mean age           {:.2}", summary.mean_age);
                println!("mean education_num {:.2}", summary.mean_education_num);
                println!("mean capital_gain  {:.2}", summary.mean_capital_gain);
                println!("mean capital_loss  {:.2}", summary.mean_capital_loss);
                println!("mean hours/week    {:.2}", summary.mean_hours_per_week);
                println!("share >50K         {:.4}", summary.high_income_share);
            }
        }
        Commands::Page { page } => {
            let dataset = cache.get().context("loading dataset")?;
            let ctx = ReportContext::build(&dataset, &source_name)?;
            let page = Page::from(page);
            let markdown = page.render(&ctx);
            if cli.json {
                let out = json!({ "page": page.title(), "markdown": markdown });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{markdown}");
            }
        }
        Commands::Charts { .. } => {
            let dataset = cache.get().context("loading dataset")?;
            let (width, height) = config.chart_size;
            let renderer = StaticChartRenderer::new(width, height, config.histogram_bins);
            let written = renderer.render_all(&dataset, &config.output_dir)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&json!({ "charts": written }))?);
            } else {
                for path in written {
                    println!("{}", path.display());
                }
            }
        }
        Commands::Report { no_charts, .. } => {
            let dataset = cache.get().context("loading dataset")?;
            let ctx = ReportContext::build(&dataset, &source_name)?;

            std::fs::create_dir_all(&config.output_dir)
                .with_context(|| format!("creating {}", config.output_dir.display()))?;
            let report_path = config.output_dir.join("report.md");
            std::fs::write(&report_path, render_report(&ctx))
                .with_context(|| format!("writing {}", report_path.display()))?;
            info!("wrote {}", report_path.display());

            let mut charts = Vec::new();
            if !no_charts {
                let (width, height) = config.chart_size;
                let renderer = StaticChartRenderer::new(width, height, config.histogram_bins);
                charts = renderer.render_all(&dataset, &config.output_dir)?;
            }

            if cli.json {
                let out = json!({
                    "report": report_path,
                    "charts": charts,
                    "summary": ctx.summary,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", report_path.display());
                for path in charts {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}
