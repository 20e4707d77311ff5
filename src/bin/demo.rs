//! Frame-loop demo driving a bound debug overlay.
//!
//! Each simulated frame advances a point along a parabola, logs frame,
//! position, and velocity lines, and logs a fourth line only on even frames so
//! stale-row handling is visible. The overlay is rendered after every frame.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use slotlog::{LogError, LogLine, bind_sink, leak_sink};
use slotlog_sink::{OverlayConfig, OverlaySink};
use thiserror::Error;

static FRAME: LogLine = LogLine::new_const(0);
static POSITION: LogLine = LogLine::new_const(1);
static VELOCITY: LogLine = LogLine::new_const(2);
static EVEN_FRAME: LogLine = LogLine::new_const(3);

const GRAVITY: f64 = -1.0;

#[derive(Debug, Error)]
pub enum DemoError {
    /// Command-line parsing failed or help/version was requested.
    #[error(transparent)]
    Usage(#[from] clap::Error),
    /// The configuration file could not be read.
    #[error("failed to read overlay config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid overlay JSON.
    #[error("invalid overlay config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Binding or opening a log line failed.
    #[error("log line error: {0}")]
    Log(#[from] LogError),
    /// Writing the rendered overlay failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Eq, PartialEq)]
pub struct Options {
    pub frames: u32,
    pub config: OverlayConfig,
}

fn command() -> Command {
    Command::new("slotlog-overlay")
        .about("Render a simulated debug overlay driven by slot-addressed log lines.")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("frames")
                .long("frames")
                .short('n')
                .value_name("COUNT")
                .help("Number of frames to simulate.")
                .value_parser(value_parser!(u32))
                .default_value("3"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Read overlay options from a JSON file.")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("no-labels")
                .long("no-labels")
                .help("Do not prefix rows with their slot number.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-stale")
                .long("keep-stale")
                .help("Keep rows that were not logged during the last frame.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("clear-stale")
                .long("clear-stale")
                .help("Blank rows that were not logged during the last frame.")
                .action(ArgAction::SetTrue)
                .conflicts_with("keep-stale"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("CHARS")
                .help("Truncate rows to CHARS characters.")
                .value_parser(value_parser!(usize)),
        )
}

/// Parses command-line arguments into demo options.
pub fn parse_options<I>(args: I) -> Result<Options, DemoError>
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(args)?;
    options_from_matches(&matches)
}

fn options_from_matches(matches: &ArgMatches) -> Result<Options, DemoError> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => load_config(path)?,
        None => OverlayConfig::default().with_stale_clearing(true),
    };
    if matches.get_flag("no-labels") {
        config.label_slots = false;
    }
    if matches.get_flag("keep-stale") {
        config.clear_stale_lines = false;
    }
    if matches.get_flag("clear-stale") {
        config.clear_stale_lines = true;
    }
    if let Some(&width) = matches.get_one::<usize>("width") {
        config.max_width = Some(width);
    }

    Ok(Options {
        frames: matches.get_one::<u32>("frames").copied().unwrap_or(3),
        config,
    })
}

fn load_config(path: &Path) -> Result<OverlayConfig, DemoError> {
    let text = std::fs::read_to_string(path).map_err(|source| DemoError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DemoError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs the simulation against the process-wide overlay.
pub fn simulate<W: Write>(overlay: &OverlaySink, frames: u32, out: &mut W) -> Result<(), DemoError> {
    let (mut x, mut y) = (0.0_f64, 0.0_f64);
    let (vx, mut vy) = (0.5_f64, 2.0_f64);

    for frame in 0..frames {
        x += vx;
        y += vy;
        vy += GRAVITY;

        let _ = FRAME.open()? << "frame " << frame + 1 << "/" << frames;
        let _ = POSITION.open()? << "pos=(" << x << ", " << y << ")";
        let _ = VELOCITY.open()? << "vel=(" << vx << ", " << vy << ")";
        if frame % 2 == 0 {
            let _ = EVEN_FRAME.open()? << "even frame " << frame;
        }

        let stale = overlay.end_frame();
        tracing::debug!(target: "slotlog_overlay::frame", frame, stale = stale.len(), "frame_end");

        writeln!(out, "-- frame {} --", frame + 1)?;
        overlay.render(out)?;
    }
    out.flush()?;
    Ok(())
}

fn run<W: Write>(options: Options, stdout: &mut W) -> Result<(), DemoError> {
    let overlay = leak_sink(OverlaySink::new(options.config));
    bind_sink(overlay)?;
    simulate(overlay, options.frames, stdout)
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

/// Entry point shared by `main` and the tests.
pub fn run_with<I, Out, Err>(args: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let options = match parse_options(args) {
        Ok(options) => options,
        Err(DemoError::Usage(error)) => {
            let rendered = error.render().to_string();
            if error.use_stderr() {
                let _ = write!(stderr, "{rendered}");
                return ExitCode::from(2);
            }
            let _ = write!(stdout, "{rendered}");
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            let _ = writeln!(stderr, "slotlog-overlay: {error}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing();
    match run(options, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "slotlog-overlay: {error}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotlog_sink::LineMode;

    #[test]
    fn defaults_clear_stale_rows() {
        let options = parse_options(["slotlog-overlay"]).expect("parses");

        assert_eq!(options.frames, 3);
        assert!(options.config.clear_stale_lines);
        assert!(options.config.label_slots);
    }

    #[test]
    fn flags_override_config() {
        let options = parse_options([
            "slotlog-overlay",
            "--frames",
            "5",
            "--no-labels",
            "--keep-stale",
            "--width",
            "12",
        ])
        .expect("parses");

        assert_eq!(options.frames, 5);
        assert!(!options.config.label_slots);
        assert!(!options.config.clear_stale_lines);
        assert_eq!(options.config.max_width, Some(12));
        assert_eq!(options.config.line_mode, LineMode::WithNewline);
    }

    #[test]
    fn clear_stale_overrides_config_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"label_slots": false}}"#).expect("write config");
        let path = file.path().to_str().expect("UTF-8 path").to_owned();

        let from_file = parse_options(["slotlog-overlay", "--config", path.as_str()])
            .expect("parses");
        assert!(!from_file.config.clear_stale_lines);

        let overridden = parse_options([
            "slotlog-overlay",
            "--config",
            path.as_str(),
            "--clear-stale",
        ])
        .expect("parses");
        assert!(overridden.config.clear_stale_lines);
        assert!(!overridden.config.label_slots);
    }

    #[test]
    fn clear_stale_conflicts_with_keep_stale() {
        let error = parse_options(["slotlog-overlay", "--clear-stale", "--keep-stale"])
            .expect_err("conflicting flags");
        assert!(matches!(error, DemoError::Usage(_)));
    }

    #[test]
    fn invalid_frame_count_is_a_usage_error() {
        let error = parse_options(["slotlog-overlay", "--frames", "many"]).expect_err("rejects");
        assert!(matches!(error, DemoError::Usage(_)));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let error = parse_options(["slotlog-overlay", "--config", "/nonexistent/overlay.json"])
            .expect_err("file is missing");
        assert!(matches!(error, DemoError::ReadConfig { .. }));
        assert!(error.to_string().contains("/nonexistent/overlay.json"));
    }

    #[test]
    fn help_goes_to_stdout_and_succeeds() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit = run_with(["slotlog-overlay", "--help"], &mut stdout, &mut stderr);

        assert_eq!(exit, ExitCode::SUCCESS);
        assert!(stderr.is_empty());
        assert!(String::from_utf8_lossy(&stdout).contains("Usage:"));
    }
}
