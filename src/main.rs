//! stencil-sign: generate the two STL layers of a stencil sign.

use clap::Parser;
use log::{LevelFilter, error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use stencil_sign::config::GeneratorConfig;
use stencil_sign::io::stl::StlSink;
use stencil_sign::io::{ExportSink, file_stem, sanitize_name};
use stencil_sign::{GenerationFailure, SignGenerator, SignRequest};

#[derive(Parser)]
#[command(name = "stencil-sign", version)]
#[command(about = "Generate two-layer stencil signs for multi-colour 3D printing")]
struct Cli {
    /// Text to cut into the sign; `\n` starts a new line
    text: String,

    /// Sign width in mm
    #[arg(long)]
    width: Option<f64>,

    /// Sign height in mm
    #[arg(long)]
    height: Option<f64>,

    /// Font family
    #[arg(long)]
    font: Option<String>,

    /// Font size in mm (fitted to the plate if not given)
    #[arg(long)]
    font_size: Option<f64>,

    /// Text heaviness, 0-100
    #[arg(long, allow_negative_numbers = true)]
    heaviness: Option<i64>,

    /// Base layer thickness in mm
    #[arg(long)]
    bottom_thickness: Option<f64>,

    /// Top layer thickness in mm
    #[arg(long)]
    top_thickness: Option<f64>,

    /// Plate corner radius in mm
    #[arg(long)]
    corner_radius: Option<f64>,

    /// Start from a preset stored in the config file
    #[arg(long)]
    preset: Option<String>,

    /// Output directory for STL files
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not write the combined preview STL
    #[arg(long)]
    no_preview: bool,

    /// Generate even when cut-through is predicted
    #[arg(long)]
    force: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn request(&self, config: &GeneratorConfig) -> Result<SignRequest, String> {
        let base = match &self.preset {
            Some(name) => config
                .preset(name)
                .cloned()
                .ok_or_else(|| format!("no preset named '{name}' in the config"))?,
            None => config.defaults.clone(),
        };
        Ok(SignRequest {
            text: self.text.replace("\\n", "\n"),
            width_mm: self.width.unwrap_or(base.width_mm),
            height_mm: self.height.unwrap_or(base.height_mm),
            heaviness: self.heaviness.unwrap_or(base.heaviness),
            bottom_thickness_mm: self.bottom_thickness.unwrap_or(base.bottom_thickness_mm),
            top_thickness_mm: self.top_thickness.unwrap_or(base.top_thickness_mm),
            font_family: self.font.clone().unwrap_or(base.font_family),
            font_size_mm: self.font_size.or(base.font_size_mm),
            corner_radius_mm: self.corner_radius.unwrap_or(base.corner_radius_mm),
        })
    }
}

fn report_failure(failure: &GenerationFailure) {
    error!("generation failed");
    eprintln!("Error: {failure}");
    if let stencil_sign::GenerationError::Validation(err) = &failure.error {
        for violation in &err.violations {
            eprintln!("  - {violation}");
        }
    }
    for suggestion in failure.error.suggestions() {
        eprintln!("  hint: {suggestion}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.debug { LevelFilter::Debug } else { LevelFilter::Info })
        .init();

    let mut config = match &cli.config {
        Some(path) => match GeneratorConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: {err}");
                return ExitCode::FAILURE;
            },
        },
        None => GeneratorConfig::default(),
    };
    if cli.no_preview {
        config.build.combined_preview = false;
    }

    let request = match cli.request(&config) {
        Ok(request) => request,
        Err(message) => {
            eprintln!("Error: {message}");
            return ExitCode::FAILURE;
        },
    };
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    let include_weight = config.output.include_weight_label;

    let generator = SignGenerator::new(config);
    let plan = match generator.plan(&request) {
        Ok(plan) => plan,
        Err(failure) => {
            report_failure(&failure);
            return ExitCode::from(2);
        },
    };

    for warning in &plan.warnings {
        println!("warning: {warning}");
    }
    println!(
        "font size {:.2} mm ({}), cut-through risk {}%: {}",
        plan.sizing.resolved_font_size_mm,
        plan.profile.bucket.label(),
        plan.prediction.confidence_percent,
        plan.prediction.reason,
    );
    if plan.prediction.will_fail && !cli.force {
        eprintln!("Error: the text is predicted to cut through the top layer; use --force to generate anyway");
        return ExitCode::from(3);
    }

    let name = if include_weight {
        file_stem(&plan.spec.text(), plan.profile.bucket)
    } else {
        sanitize_name(&plan.spec.text())
    };
    let generated = match generator.build(plan) {
        Ok(generated) => generated,
        Err(failure) => {
            report_failure(&failure);
            return ExitCode::FAILURE;
        },
    };

    match StlSink.export(generated.into_layers(), &name, &output_dir) {
        Ok(files) => {
            info!("{} files written to {}", files.len(), output_dir.display());
            for file in files {
                println!("{}", file.display());
            }
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        },
    }
}
