//! Charts module - figure data and static PNG rendering

mod plotter;
mod renderer;

pub use plotter::{
    BoxplotData, ChartPlotter, FeatureHistogram, HistogramBin, BOXPLOT_CAPITAL, BOXPLOT_NUMERIC,
    COUNTPLOT_TOP,
};
pub use renderer::{
    StaticChartRenderer, BOXPLOT_CAPITAL_FILE, BOXPLOT_NUMERIC_FILE, CHART_FILES, COUNTPLOTS_FILE,
    HISTOGRAMS_FILE,
};
