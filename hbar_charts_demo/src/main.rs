// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal bar chart demos.
//!
//! With `--input`, renders one chart from a JSON dataset to SVG. Without it,
//! renders the built-in datasets into an HTML report.

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use hbar_charts::{
    ChartError, Datum, HorizontalBarChart, HorizontalBarChartConfig, RenderSummary, SortBy,
    SortKey, SortOrder,
};
use hbar_scene::Scene;
use hbar_text::HeuristicTextMeasurer;
use peniko::Color;

#[derive(Debug, Parser)]
#[command(name = "hbar-demo", version, about = "Render horizontal bar charts to SVG")]
struct Cli {
    /// JSON array of `{ "label", "value", "color"? }` rows.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// JSON chart configuration; missing fields take their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Outer chart width in pixels.
    #[arg(short, long, default_value_t = 480.0)]
    width: f64,
    /// Row order.
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
    /// Output path (SVG with `--input`, HTML report otherwise).
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    ValueAsc,
    ValueDesc,
    LabelAsc,
    LabelDesc,
}

impl SortArg {
    fn sorter(self) -> SortBy {
        match self {
            Self::ValueAsc => SortBy::new(SortKey::Value, SortOrder::Asc),
            Self::ValueDesc => SortBy::new(SortKey::Value, SortOrder::Desc),
            Self::LabelAsc => SortBy::new(SortKey::Label, SortOrder::Asc),
            Self::LabelDesc => SortBy::new(SortKey::Label, SortOrder::Desc),
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Chart(#[from] ChartError),
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(path) => {
            tracing::info!(path = %path.display(), "wrote output");
            println!("wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "demo failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // A host that already installed a subscriber keeps it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

fn run(cli: &Cli) -> Result<PathBuf, DemoError> {
    let config = match &cli.config {
        Some(path) => read_json(path)?,
        None => HorizontalBarChartConfig::default(),
    };

    if let Some(input) = &cli.input {
        let data: Vec<Datum> = read_json(input)?;
        let rendered = render(config, cli.width, cli.sort, data)?;
        let out = cli
            .out
            .clone()
            .unwrap_or_else(|| PathBuf::from("hbar_chart.svg"));
        write(&out, &rendered.svg)?;
        return Ok(out);
    }

    let mut sections = Vec::new();
    for demo in demo_datasets() {
        let mut config = config.clone();
        if demo.max_label_width.is_some() {
            config.max_label_width = demo.max_label_width;
        }
        let rendered = render(config, cli.width, cli.sort, demo.data)?;
        sections.push(report::HtmlSection {
            title: demo.title.into(),
            description: demo.description.into(),
            svg: rendered.svg,
            margins: rendered.summary.margins,
            tooltip_html: rendered.tooltip_html,
        });
    }
    let html = report::render_report("hbar charts demo", &sections);
    let out = cli
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from("hbar_charts_demo.html"));
    write(&out, &html)?;
    Ok(out)
}

struct Rendered {
    svg: String,
    summary: RenderSummary,
    tooltip_html: Option<String>,
}

fn render(
    config: HorizontalBarChartConfig,
    width: f64,
    sort: Option<SortArg>,
    data: Vec<Datum>,
) -> Result<Rendered, DemoError> {
    let mut chart = HorizontalBarChart::new(config, width)?;
    if let Some(sort) = sort {
        chart = chart.with_sorter(sort.sorter());
    }
    chart.set_data(data);

    let mut scene = Scene::new(HeuristicTextMeasurer::default());
    let summary = chart.render(&mut scene)?;
    tracing::debug!(
        left = summary.margins.left,
        right = summary.margins.right,
        trimmed = summary.trimmed,
        "rendered chart"
    );
    Ok(Rendered {
        svg: scene.to_svg_string(),
        summary,
        tooltip_html: chart.tooltip_content(0).map(|c| c.to_html()),
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DemoError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DemoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DemoError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), DemoError> {
    std::fs::write(path, contents).map_err(|source| DemoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

struct DemoDataset {
    title: &'static str,
    description: &'static str,
    max_label_width: Option<f64>,
    data: Vec<Datum>,
}

fn demo_datasets() -> Vec<DemoDataset> {
    vec![
        DemoDataset {
            title: "All positive",
            description: "Category labels on the left of the zero line, values on the right.",
            max_label_width: None,
            data: vec![
                Datum::new("North America", 1834.2),
                Datum::new("Europe", 1290.75),
                Datum::new("Asia Pacific", 2210.0),
                Datum::new("Latin America", 402.1),
            ],
        },
        DemoDataset {
            title: "All negative",
            description: "Roles mirror: values on the left, categories on the right.",
            max_label_width: None,
            data: vec![
                Datum::new("Q1", -12.5),
                Datum::new("Q2", -48.0),
                Datum::new("Q3", -7.25),
            ],
        },
        DemoDataset {
            title: "Mixed signs",
            description: "Margins are sized from the value labels of the smallest and largest rows.",
            max_label_width: None,
            data: vec![
                Datum::new("Hardware", -5_200.0),
                Datum::new("Software", 10_450.0),
                Datum::new("Services", 3_141.59),
                Datum::new("Licensing", -950.0).with_color(Color::from_rgb8(0xc0, 0x39, 0x2b)),
            ],
        },
        DemoDataset {
            title: "Long labels",
            description: "Category labels wider than the capped margin are trimmed with an ellipsis.",
            max_label_width: Some(140.0),
            data: vec![
                Datum::new("Research and development (including prototypes)", 88.0),
                Datum::new("Sales", 42.0),
                Datum::new("General and administrative overhead", 17.5),
            ],
        },
        DemoDataset {
            title: "Empty",
            description: "No rows: only the zero line is drawn and margins fall back to padding.",
            max_label_width: None,
            data: Vec::new(),
        },
    ]
}
