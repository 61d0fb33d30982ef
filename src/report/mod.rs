//! Report pages rendered as Markdown from the cleaned dataset.

use std::fmt::Write as _;

use serde::Serialize;

use crate::charts::CHART_FILES;
use crate::data::{Dataset, NumericFeature, ADULT_COLUMNS};
use crate::error::DatasetError;
use crate::stats::{summarize, FeatureStats, StatsCalculator, SummaryStatistics};

pub const REPORT_TITLE: &str = "Data Exploration Report: Adult Income Dataset";
pub const DATASET_HOME: &str = "https://archive.ics.uci.edu/ml/datasets/adult";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Introduction,
    Visualizations,
    Conclusion,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Introduction, Page::Visualizations, Page::Conclusion];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Introduction => "Introduction",
            Page::Visualizations => "Visualizations of Key Insights",
            Page::Conclusion => "Conclusion and Takeaways",
        }
    }

    pub fn render(&self, ctx: &ReportContext) -> String {
        match self {
            Page::Introduction => render_introduction(ctx),
            Page::Visualizations => render_visualizations(ctx),
            Page::Conclusion => render_conclusion(ctx),
        }
    }
}

/// Everything the pages read. Built once per dataset.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub source: String,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub summary: SummaryStatistics,
    pub features: Vec<FeatureStats>,
    /// Prefix joined to chart file names in image links, e.g. `charts/`.
    pub chart_prefix: String,
}

impl ReportContext {
    pub fn build(dataset: &Dataset, source: &str) -> Result<Self, DatasetError> {
        Ok(Self {
            source: source.to_string(),
            rows_read: dataset.rows_read(),
            rows_dropped: dataset.rows_dropped(),
            summary: summarize(dataset)?,
            features: StatsCalculator::all_feature_stats(dataset)?,
            chart_prefix: String::new(),
        })
    }

    pub fn with_chart_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.chart_prefix = prefix.into();
        self
    }

    pub fn feature(&self, feature: NumericFeature) -> Option<&FeatureStats> {
        self.features.iter().find(|s| s.feature == feature.name())
    }
}

/// All pages, in navigation order.
pub fn render_report(ctx: &ReportContext) -> String {
    let mut out = format!("# {REPORT_TITLE}\n\n");
    for page in Page::ALL {
        out.push_str(&page.render(ctx));
        out.push('\n');
    }
    out
}

fn percent(share: f64) -> String {
    format!("{:.0}%", share * 100.0)
}

fn render_introduction(ctx: &ReportContext) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## {}\n", Page::Introduction.title());
    let _ = writeln!(
        out,
        "The **Adult Income Dataset** is sourced from the [UCI Machine Learning Repository]({DATASET_HOME}). \
         It compiles census data aimed at predicting whether an individual earns over $50,000 a year \
         from demographic and employment variables.\n"
    );
    let _ = writeln!(
        out,
        "The source (`{}`) holds {} entries with {} attributes, including the income target. \
         {} entries had at least one missing value and were dropped, leaving {} complete entries \
         for this report.\n",
        ctx.source,
        ctx.rows_read,
        ADULT_COLUMNS.len(),
        ctx.rows_dropped,
        ctx.summary.record_count
    );
    out.push_str("### Purpose of Exploration\n\n");
    out.push_str("- Understand the demographic characteristics of individuals based on income.\n");
    out.push_str("- Analyze the relationships between age, education, work hours, and income.\n");
    out.push_str("- Identify key factors influencing higher income.\n\n");
    out.push_str("### Why This Dataset Is Important\n\n");
    out.push_str(
        "The dataset shows socio-economic patterns in the workforce. It helps identify factors \
         that affect income inequality and can ground policy recommendations to bridge the income gap.\n",
    );
    out
}

fn render_visualizations(ctx: &ReportContext) -> String {
    let s = &ctx.summary;
    let mut out = String::new();
    let _ = writeln!(out, "## {}\n", Page::Visualizations.title());
    out.push_str("### Key Statistics at a Glance\n\n");
    out.push_str("| Metric | Value |\n|---|---|\n");
    let _ = writeln!(out, "| Average Age | {:.1} years |", s.mean_age);
    let _ = writeln!(out, "| Hours per Week | {:.2} hours |", s.mean_hours_per_week);
    let _ = writeln!(out, "| Education Level | {:.0} years |", s.mean_education_num);
    let _ = writeln!(out, "| Income Proportion | {} > $50K |", percent(s.high_income_share));
    out.push('\n');

    for (i, (file, caption)) in CHART_FILES.iter().enumerate() {
        let _ = writeln!(out, "### {}. {caption}\n", i + 1);
        let _ = writeln!(out, "![{caption}]({}{file})\n", ctx.chart_prefix);
    }
    out
}

fn render_conclusion(ctx: &ReportContext) -> String {
    let s = &ctx.summary;
    let mut out = String::new();
    let _ = writeln!(out, "## {}\n", Page::Conclusion.title());
    out.push_str("### Key Insights from the Data Exploration\n\n");

    let _ = write!(out, "- **Age**: The average age of individuals is {:.1} years", s.mean_age);
    if let Some(age) = ctx.feature(NumericFeature::Age) {
        let _ = write!(
            out,
            ", with the middle half falling between {:.0} and {:.0} years",
            age.q1, age.q3
        );
    }
    out.push_str(".\n");

    let _ = writeln!(
        out,
        "- **Income**: Only about {} of the individuals earn more than $50,000 annually, indicating income disparity.",
        percent(s.high_income_share)
    );
    let _ = writeln!(
        out,
        "- **Education**: The average education level is {:.1} years.",
        s.mean_education_num
    );

    let _ = write!(
        out,
        "- **Work Hours**: Individuals work {:.1} hours per week on average",
        s.mean_hours_per_week
    );
    if let Some(hours) = ctx.feature(NumericFeature::HoursPerWeek) {
        let _ = write!(out, " (median {:.0})", hours.median);
    }
    out.push_str(".\n");

    if let (Some(gain), Some(loss)) = (
        ctx.feature(NumericFeature::CapitalGain),
        ctx.feature(NumericFeature::CapitalLoss),
    ) {
        let _ = writeln!(
            out,
            "- **Capital Gains/Losses**: {} of individuals report zero capital gain and {} zero capital loss; \
             the rest form a small number of large outliers (means {:.2} and {:.2}).",
            percent(gain.zero_share),
            percent(loss.zero_share),
            s.mean_capital_gain,
            s.mean_capital_loss
        );
    }

    out.push_str("\n### Future Recommendations\n\n");
    out.push_str("1. Analyze the relationship between occupation and income.\n");
    out.push_str("2. Explore the impact of marital status and education on income levels.\n");
    out.push_str("3. Consider predictive models to understand income mobility.\n");
    out
}
