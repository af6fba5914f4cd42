//! `swath plan` and `swath missions`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use swath::{plan_mission, Diagnostics, MissionType};

use super::preview::{plan_to_svg, write_png};
use super::request::load_request;
use super::response::PlanResponse;

/// Output format for `swath plan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Svg,
}

/// Mission type override on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MissionArg {
    Mapping,
    Oblique,
    Strip,
}

impl From<MissionArg> for MissionType {
    fn from(arg: MissionArg) -> Self {
        match arg {
            MissionArg::Mapping => MissionType::Mapping,
            MissionArg::Oblique => MissionType::Oblique,
            MissionArg::Strip => MissionType::Strip,
        }
    }
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Request file (.json, .yaml, .yml), or - for JSON on stdin
    pub request: PathBuf,

    /// Write output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Also render the preview to a PNG file
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Scale factor for the PNG preview
    #[arg(long, default_value = "1.0")]
    pub png_scale: f64,

    /// Override the request's mission type
    #[arg(short, long, value_enum)]
    pub mission: Option<MissionArg>,

    /// Override the scan heading (degrees)
    #[arg(short, long, allow_negative_numbers = true)]
    pub angle: Option<f64>,

    /// Override the boundary margin (meters)
    #[arg(long)]
    pub margin: Option<f64>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn cmd_plan(args: &PlanArgs) -> Result<()> {
    let file = load_request(&args.request)?;
    let mut request = file.to_mission_request()?;

    if let Some(mission) = args.mission {
        request.mission_type = mission.into();
    }
    if let Some(angle) = args.angle {
        request.angle = Some(angle);
    }
    if let Some(margin) = args.margin {
        request.margin = Some(margin);
    }

    let diag = Diagnostics::new(log::logger());
    let plan = plan_mission(&request, &diag)
        .with_context(|| format!("cannot plan {}", args.request.display()))?;

    let svg = (args.format == OutputFormat::Svg || args.png.is_some()).then(|| plan_to_svg(&request, &plan));

    let output = match (args.format, &svg) {
        (OutputFormat::Svg, Some(svg)) => svg.clone(),
        _ => {
            let response = PlanResponse::from(&plan);
            let mut json = if args.pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            json.push('\n');
            json
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{}", output),
    }

    if let (Some(png_path), Some(svg)) = (&args.png, &svg) {
        let (width, height) = write_png(svg, png_path, args.png_scale)?;
        log::info!("wrote {} ({}x{})", png_path.display(), width, height);
    }

    Ok(())
}

pub fn cmd_missions() {
    println!("Available missions:");
    for mission in MissionType::all() {
        println!("  {:<10} {}", mission.name(), mission.description());
    }
}
