use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use clap::Parser;
use log::info;

use fractal_engine::core::colour_mapping::schemes::DEFAULT_SCHEME;
use fractal_engine::{
    ColourSchemeRegistry, Complex, EngineConfig, FilePresenterPort, FractalEngine, FractalParameters, FrameSurface,
    PpmFilePresenter, RenderEvent, RenderOutcome,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "fractal_engine", version, about = "Render the Mandelbrot set to a PPM image")]
struct Args {
    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    center_x: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    center_y: f64,

    #[arg(long, default_value_t = 1.0)]
    zoom: f64,

    /// Defaults to 250 + 1000 * log10(zoom + 1).
    #[arg(long)]
    max_iterations: Option<u32>,

    /// JSON view parameters (`maxIterations`, `zoom`, `center`); overrides
    /// the view flags.
    #[arg(long)]
    params: Option<PathBuf>,

    #[arg(long)]
    scheme: Option<String>,

    #[arg(long)]
    workers: Option<usize>,

    #[arg(short, long, default_value = "output/mandelbrot.ppm")]
    output: PathBuf,

    #[arg(long, default_value_t = false)]
    list_schemes: bool,
}

impl Args {
    fn parameters(&self) -> anyhow::Result<FractalParameters> {
        if let Some(path) = &self.params {
            let json = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
            return serde_json::from_str(&json).with_context(|| format!("invalid view parameters in {}", path.display()));
        }

        let max_iterations = self.max_iterations.unwrap_or_else(|| default_max_iterations(self.zoom));

        Ok(FractalParameters::new(
            max_iterations,
            self.zoom,
            Complex::new(self.center_x, self.center_y),
        )?)
    }
}

fn default_max_iterations(zoom: f64) -> u32 {
    (250.0 + 1000.0 * (zoom.max(0.0) + 1.0).log10()).floor() as u32
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run(&Args::parse())
}

fn run(args: &Args) -> anyhow::Result<()> {
    let registry = Arc::new(ColourSchemeRegistry::builtin());

    if args.list_schemes {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    if let Some(scheme) = &args.scheme {
        if !registry.contains(scheme) {
            bail!("unknown colour scheme '{}' (see --list-schemes)", scheme);
        }
    }

    let params = args.parameters()?;
    let config = EngineConfig {
        workers: args.workers,
        default_scheme: args.scheme.clone().unwrap_or_else(|| DEFAULT_SCHEME.to_string()),
        ..EngineConfig::default()
    };

    let engine = FractalEngine::with_registry(config, registry).context("failed to start render engine")?;
    engine.set_parameters(params);

    info!(
        "rendering {}x{} at ({}, {}) zoom {} with {} iterations, scheme '{}', {} workers",
        args.width,
        args.height,
        params.center().real,
        params.center().imag,
        params.zoom(),
        params.max_iterations(),
        engine.color_scheme(),
        engine.worker_count()
    );

    let surface = Arc::new(FrameSurface::new(args.width, args.height));
    let events = engine.subscribe();
    let started = Instant::now();
    let handle = engine.render(surface.clone());

    let outcome = loop {
        if let Some(outcome) = handle.wait_timeout(Duration::from_millis(250)) {
            break outcome;
        }

        let latest = events.try_iter().fold(None, |latest, event| match event {
            RenderEvent::Progress { progress, .. } => Some(progress),
            _ => latest,
        });

        if let Some(progress) = latest {
            info!("{:.0}% complete", progress * 100.0);
        }
    };

    match outcome {
        RenderOutcome::Complete => {}
        RenderOutcome::Cancelled => bail!("render was cancelled"),
        RenderOutcome::Skipped => bail!("nothing to render on a {}x{} canvas", args.width, args.height),
    }

    write_frame(&surface, &args.output)?;

    info!(
        "wrote {} in {:.2?}",
        args.output.display(),
        started.elapsed()
    );

    Ok(())
}

fn write_frame(surface: &FrameSurface, output: &Path) -> anyhow::Result<()> {
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }

    PpmFilePresenter::new()
        .present(&surface.snapshot(), output)
        .with_context(|| format!("failed to write {}", output.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["fractal_engine"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_default_max_iterations_grows_with_zoom() {
        assert_eq!(default_max_iterations(1.0), 551);
        assert_eq!(default_max_iterations(9.0), 1250);
        assert!(default_max_iterations(1000.0) > default_max_iterations(10.0));
    }

    #[test]
    fn test_negative_centre_parses() {
        let args = parse(&["--center-x", "-0.75", "--center-y", "-0.1"]);
        let params = args.parameters().unwrap();

        assert_eq!(params.center(), Complex::new(-0.75, -0.1));
        assert_eq!(params.max_iterations(), 551);
    }

    #[test]
    fn test_explicit_max_iterations_wins() {
        let params = parse(&["--zoom", "50", "--max-iterations", "100"]).parameters().unwrap();

        assert_eq!(params.max_iterations(), 100);
        assert_eq!(params.zoom(), 50.0);
    }

    #[test]
    fn test_params_file_overrides_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        fs::write(&path, r#"{"maxIterations": 80, "zoom": 4.0, "center": {"x": 0.25, "y": 0.0}}"#).unwrap();

        let params = parse(&["--zoom", "2", "--params", path.to_str().unwrap()]).parameters().unwrap();

        assert_eq!(params.max_iterations(), 80);
        assert_eq!(params.zoom(), 4.0);
    }

    #[test]
    fn test_run_writes_ppm() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("out.ppm");
        let args = parse(&[
            "--width",
            "24",
            "--height",
            "16",
            "--max-iterations",
            "50",
            "--workers",
            "2",
            "--output",
            output.to_str().unwrap(),
        ]);

        run(&args).unwrap();

        let written = fs::read(&output).unwrap();
        assert!(written.starts_with(b"P6\n24 16\n255\n"));
    }

    #[test]
    fn test_run_rejects_unknown_scheme() {
        let args = parse(&["--scheme", "Not A Scheme"]);

        assert!(run(&args).is_err());
    }

    #[test]
    fn test_run_rejects_empty_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("empty.ppm");
        let args = parse(&["--width", "0", "--workers", "2", "--output", output.to_str().unwrap()]);

        assert!(run(&args).is_err());
        assert!(!output.exists());
    }
}
