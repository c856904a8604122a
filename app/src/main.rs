use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use env_logger::Builder;
use glob::glob;
use log::LevelFilter;
use serde::Serialize;
use tempfile::NamedTempFile;

use pcm_core::PointCloudMap;
use pcm_exporter::write_pcm;
use pcm_parser::parser::{path_extension, pcm::PcmParserProvider, ParserProvider as _};
use pcm_parser::{DecodeMode, Decoded, ParseError, ParseOptions};

#[derive(Parser, Debug)]
#[command(
    name = "pcmtool",
    about = "Inspect, validate and merge Point Cloud Map (*.pcm) files",
    version
)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print reference and point counts
    Info {
        #[command(flatten)]
        input: InputArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode strictly and list every problem found
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Decode all inputs in order and write them out as one file
    Merge {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, required = true, value_name = "FILE")]
        output: PathBuf,

        /// Refuse inputs that have any problem
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    #[arg(short, long, required = true, num_args = 1.., value_name = "FILE")]
    input: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("no input files matched")]
    NoInput,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} file(s) failed the check")]
    CheckFailed(usize),
}

#[derive(Debug, Serialize)]
struct Summary {
    version: Option<String>,
    references: usize,
    points: usize,
    dangling_points: usize,
    issues: usize,
}

impl Summary {
    fn new(decoded: &Decoded) -> Self {
        Summary {
            version: decoded.version.clone(),
            references: decoded.map.references.len(),
            points: decoded.map.points.len(),
            dangling_points: decoded.map.dangling_points().count(),
            issues: decoded.issues.len(),
        }
    }
}

fn expand_globs(input_patterns: &[String]) -> Result<Vec<PathBuf>, AppError> {
    let mut paths = Vec::new();
    for pattern in input_patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let entries = glob(pattern).map_err(|source| AppError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            for entry in entries {
                match entry {
                    Ok(path) => paths.push(path),
                    Err(e) => log::error!("{:?}", e),
                }
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }

    if paths.is_empty() {
        return Err(AppError::NoInput);
    }
    for path in &paths {
        if path_extension(path).is_none() {
            log::warn!("{} does not have a .pcm extension", path.display());
        }
    }
    Ok(paths)
}

fn decode_files(filenames: Vec<PathBuf>, mode: DecodeMode) -> Result<Decoded, AppError> {
    let provider = PcmParserProvider {
        filenames,
        options: ParseOptions::default().with_mode(mode),
    };
    Ok(provider.get_parser().parse()?)
}

/// Writes through a temporary file next to `path` so a failed write never
/// leaves a truncated output behind.
fn write_map(map: &PointCloudMap, path: &Path) -> Result<(), AppError> {
    let write_error = |source| AppError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_error)?;

    let temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    let mut writer = BufWriter::new(temp);
    write_pcm(map, &mut writer).map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    let temp = writer
        .into_inner()
        .map_err(|e| write_error(e.into_error()))?;
    temp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

fn run_info(input: &InputArgs, json: bool) -> Result<(), AppError> {
    let decoded = decode_files(expand_globs(&input.input)?, DecodeMode::Lenient)?;
    let summary = Summary::new(&decoded);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "version: {}",
            summary.version.as_deref().unwrap_or("unknown")
        );
        println!("references: {}", summary.references);
        println!("points: {}", summary.points);
        println!("dangling points: {}", summary.dangling_points);
        println!("issues: {}", summary.issues);
    }
    Ok(())
}

fn run_check(input: &InputArgs) -> Result<(), AppError> {
    let mut failed = 0;
    for path in expand_globs(&input.input)? {
        match decode_files(vec![path.clone()], DecodeMode::Strict) {
            Ok(decoded) => println!(
                "{}: ok ({} references, {} points)",
                path.display(),
                decoded.map.references.len(),
                decoded.map.points.len()
            ),
            Err(AppError::Parse(ParseError::Rejected { origin, issues })) => {
                failed += 1;
                for issue in issues {
                    println!("{origin}: {issue}");
                }
            }
            Err(e) => return Err(e),
        }
    }

    if failed > 0 {
        return Err(AppError::CheckFailed(failed));
    }
    Ok(())
}

fn run_merge(input: &InputArgs, output: &Path, strict: bool) -> Result<(), AppError> {
    let mode = if strict {
        DecodeMode::Strict
    } else {
        DecodeMode::Lenient
    };

    let start = std::time::Instant::now();
    let input_files = expand_globs(&input.input)?;
    log::info!("Expanded input files: {:?}", input_files);

    let decoded = decode_files(input_files, mode)?;
    log::info!(
        "decoded {} references, {} points in {:?}",
        decoded.map.references.len(),
        decoded.map.points.len(),
        start.elapsed()
    );
    if !decoded.issues.is_empty() {
        log::warn!("{} line(s) were dropped or adjusted", decoded.issues.len());
    }

    write_map(&decoded.map, output)?;
    log::info!("wrote {}", output.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .parse_default_env()
        .init();

    let result = match &args.command {
        Command::Info { input, json } => run_info(input, *json),
        Command::Check { input } => run_check(input),
        Command::Merge {
            input,
            output,
            strict,
        } => run_merge(input, output, *strict),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
