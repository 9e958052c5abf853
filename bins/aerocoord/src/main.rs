//! aerocoord - coordinate extraction and geometry for NOTAM text
//!
//! Reads pasted NOTAM/airspace text from a file or stdin, normalises every
//! coordinate it finds and derives polygon order, extreme corners and the
//! enclosing circle.

use aerocoord_cli::output::{format_count, format_decimal, Status};
use aerocoord_cli::report;
use aerocoord_core::config::{Config, OutputConfig};
use aerocoord_core::error::{exit_codes, Error, ErrorCode};
use aerocoord_core::input::{display_name, read_input};
use aerocoord_geo::batch::summarize;
use aerocoord_geo::{
    analyze_batch, compute_extremities, convert, extract_time_ranges, extremities,
    format_time_ranges, is_simple_polygon, order_polygon, parse, parse_token, trim, Coordinate,
    Document, Engine, Extraction, Unit,
};
use aerocoord_telemetry::{metrics, timed_span, TelemetryConfig};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aerocoord")]
#[command(about = "Extract, order and measure aeronautical coordinates from NOTAM text")]
#[command(version)]
struct Cli {
    /// Configuration file (default: .aerocoord.toml, aerocoord.toml, .config/aerocoord.toml)
    #[arg(short, long, global = true, env = "AEROCOORD_CONFIG")]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Seed for the enclosing-circle shuffle
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List valid coordinates in canonical form
    Extract {
        /// Input file ("-" or omitted for stdin)
        file: Option<PathBuf>,
    },

    /// Convert canonical tokens to decimal degrees
    Parse {
        /// Canonical tokens
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Order coordinates into a polygon traversal
    Order {
        /// Input file ("-" or omitted for stdin)
        file: Option<PathBuf>,
    },

    /// Print the NW, NE, SE and SW corner coordinates
    Extremities {
        /// Input file ("-" or omitted for stdin)
        file: Option<PathBuf>,
    },

    /// Drop the seconds from every coordinate
    Trim {
        /// Input file ("-" or omitted for stdin)
        file: Option<PathBuf>,
    },

    /// Fit the minimal enclosing circle
    Circle {
        /// Input file ("-" or omitted for stdin)
        file: Option<PathBuf>,
    },

    /// Run the full pipeline; several files are analyzed in parallel
    Analyze {
        /// Input files (stdin when none)
        files: Vec<PathBuf>,
    },

    /// Convert a distance between KM, NM, MT and FT
    Convert {
        /// Value to convert
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Source unit
        from: String,
        /// Target unit
        to: String,
    },

    /// Compact YYMMDDHHMM TO YYMMDDHHMM schedule ranges
    Schedule {
        /// Input file ("-" or omitted for stdin)
        file: Option<PathBuf>,
    },
}

/// Resolved settings shared by every command
struct App {
    engine: Engine,
    output: OutputConfig,
}

impl App {
    fn extract(&self, text: &str) -> Extraction {
        timed_span!("extract");
        let extraction = self.engine.extract(text);
        metrics().increment_by("tokens_valid", extraction.valid.len() as u64);
        metrics().increment_by("tokens_invalid", extraction.invalid.len() as u64);
        for warning in &extraction.warnings {
            Status::warning(warning);
        }
        for candidate in &extraction.invalid {
            Status::warning(&format!("Invalid coordinate candidate: {}", candidate));
        }
        extraction
    }

    fn print_json(&self, value: &impl serde::Serialize) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value).map_err(Error::from)?);
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let json = cli.json;

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => report_error(&err, json),
    };

    if verbose {
        eprintln!("{}", metrics().export_json());
    }

    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.schema.general.log_level.clone()
    };
    aerocoord_telemetry::init_with_config(TelemetryConfig {
        log_level,
        ..TelemetryConfig::default()
    })?;
    tracing::debug!(path = ?config.path, "Configuration loaded");

    let mut engine_config = config.schema.engine_config();
    if cli.seed.is_some() {
        engine_config.circle.seed = cli.seed;
    }
    let mut output = config.schema.output.clone();
    output.json |= cli.json;

    let app = App {
        engine: Engine::new(engine_config),
        output,
    };

    match cli.command {
        Commands::Extract { file } => run_extract(&app, file),
        Commands::Parse { tokens } => run_parse(&app, &tokens),
        Commands::Order { file } => run_order(&app, file),
        Commands::Extremities { file } => run_extremities(&app, file),
        Commands::Trim { file } => run_trim(&app, file),
        Commands::Circle { file } => run_circle(&app, file),
        Commands::Analyze { files } => run_analyze(&app, &files),
        Commands::Convert { value, from, to } => run_convert(&app, value, &from, &to),
        Commands::Schedule { file } => run_schedule(&app, file),
    }
}

/// Prints an error and picks the exit code for it
fn report_error(err: &anyhow::Error, json: bool) -> i32 {
    match err.downcast_ref::<Error>() {
        Some(e) => {
            if json {
                if let Ok(text) = serde_json::to_string_pretty(&e.to_report()) {
                    println!("{}", text);
                }
            }
            Status::error(&e.to_string());
            e.code.exit_code()
        }
        None => {
            Status::error(&format!("{:#}", err));
            exit_codes::FAILURE
        }
    }
}

fn read(file: Option<PathBuf>) -> Result<String> {
    tracing::debug!(input = %display_name(file.as_deref()), "Reading input");
    Ok(read_input(file.as_deref())?)
}

fn run_extract(app: &App, file: Option<PathBuf>) -> Result<i32> {
    let text = read(file)?;
    let extraction = app.extract(&text);

    if app.output.json {
        app.print_json(&extraction)?;
    } else if !extraction.is_empty() {
        println!("{}", report::render_extraction(&extraction));
    }

    if extraction.is_empty() {
        Status::info("No valid coordinates found");
        return Ok(exit_codes::NO_COORDINATES);
    }
    Ok(exit_codes::SUCCESS)
}

fn run_parse(app: &App, tokens: &[String]) -> Result<i32> {
    let places = app.output.decimal_places;
    let mut failed = 0;
    let mut rows = Vec::with_capacity(tokens.len());

    for token in tokens {
        match parse_token(token) {
            Ok(coord) => {
                if !app.output.json {
                    println!("{}  {}", token, format_decimal(coord.latitude, coord.longitude, places));
                }
                rows.push(serde_json::json!({ "token": token, "coordinate": coord }));
            }
            Err(e) => {
                failed += 1;
                Status::error(&Error::from(e).to_string());
                rows.push(serde_json::json!({ "token": token, "coordinate": null }));
            }
        }
    }

    if app.output.json {
        app.print_json(&rows)?;
    }

    if failed > 0 {
        return Ok(exit_codes::INVALID_INPUT);
    }
    Ok(exit_codes::SUCCESS)
}

fn run_order(app: &App, file: Option<PathBuf>) -> Result<i32> {
    let text = read(file)?;
    let extraction = app.extract(&text);
    if extraction.is_empty() {
        return Err(Error::no_coordinates().into());
    }

    let ordered = {
        timed_span!("order");
        order_polygon(&extraction.canonical())
    };
    let points: Vec<Coordinate> = ordered.iter().filter_map(|t| parse(t)).collect();
    if !is_simple_polygon(&points) {
        Status::warning("Ordered polygon self-intersects: points are not star-shaped about their centroid");
    }

    if app.output.json {
        app.print_json(&ordered)?;
    } else {
        println!("{}", report::render_tokens(&ordered));
    }
    Ok(exit_codes::SUCCESS)
}

fn run_extremities(app: &App, file: Option<PathBuf>) -> Result<i32> {
    let text = read(file)?;
    let canonical = app.extract(&text).canonical();

    if app.output.json {
        app.print_json(&compute_extremities(&canonical))?;
    } else {
        println!("{}", extremities(&canonical));
    }
    Ok(exit_codes::SUCCESS)
}

fn run_trim(app: &App, file: Option<PathBuf>) -> Result<i32> {
    let text = read(file)?;
    let trimmed = trim(&app.extract(&text).canonical());

    if app.output.json {
        app.print_json(&trimmed)?;
    } else if !trimmed.is_empty() {
        println!("{}", report::render_tokens(&trimmed));
    }
    Ok(exit_codes::SUCCESS)
}

fn run_circle(app: &App, file: Option<PathBuf>) -> Result<i32> {
    let text = read(file)?;
    let extraction = app.extract(&text);
    let points: Vec<Coordinate> = extraction.valid.iter().filter_map(|t| t.decimal).collect();
    if points.is_empty() {
        return Err(Error::no_coordinates().into());
    }

    let circle = {
        timed_span!("circle", points = points.len());
        app.engine.config().circle.fit(&points)
    };

    if app.output.json {
        app.print_json(&circle)?;
    } else {
        println!("{}", report::render_circle(&circle, &app.output));
    }
    Ok(exit_codes::SUCCESS)
}

fn run_analyze(app: &App, files: &[PathBuf]) -> Result<i32> {
    if files.len() <= 1 {
        let text = read(files.first().cloned())?;
        let analysis = {
            timed_span!("analyze");
            app.engine.analyze(&text)
        };
        metrics().increment_by("tokens_valid", analysis.extraction.valid.len() as u64);
        for warning in &analysis.warnings {
            Status::warning(warning);
        }

        if app.output.json {
            app.print_json(&analysis)?;
        } else {
            println!("{}", report::render_analysis(&analysis, &app.output));
        }

        if analysis.extraction.is_empty() {
            return Ok(exit_codes::NO_COORDINATES);
        }
        return Ok(exit_codes::SUCCESS);
    }

    let documents = files
        .iter()
        .map(|path| {
            read(Some(path.clone())).map(|text| Document::new(path.display().to_string(), text))
        })
        .collect::<Result<Vec<_>>>()?;

    let results = {
        timed_span!("analyze_batch", documents = documents.len());
        analyze_batch(&app.engine, &documents)
    };
    let summary = summarize(&results);

    if app.output.json {
        app.print_json(&serde_json::json!({ "documents": results, "summary": summary }))?;
    } else {
        for result in &results {
            Status::header(&result.id);
            for warning in &result.analysis.warnings {
                Status::warning(&format!("{}: {}", result.id, warning));
            }
            println!("{}", report::render_analysis(&result.analysis, &app.output));
        }
        println!();
        println!("{}", report::render_batch_summary(&summary));
    }

    if summary.valid == 0 {
        return Ok(exit_codes::NO_COORDINATES);
    }
    Ok(exit_codes::SUCCESS)
}

fn run_convert(app: &App, value: f64, from: &str, to: &str) -> Result<i32> {
    let from: Unit = from.parse().map_err(Error::from)?;
    let to: Unit = to.parse().map_err(Error::from)?;

    let converted = convert(value, from, to).ok_or_else(|| {
        Error::new(
            ErrorCode::InvalidUnit,
            format!("Cannot convert {} to {}", from, to),
        )
        .with_suggestion("Convert KM <-> NM or MT <-> FT")
    })?;

    if app.output.json {
        app.print_json(&serde_json::json!({ "value": converted, "unit": to }))?;
    } else {
        println!("{:.*} {}", app.output.decimal_places, converted, to);
    }
    Ok(exit_codes::SUCCESS)
}

fn run_schedule(app: &App, file: Option<PathBuf>) -> Result<i32> {
    let text = read(file)?;
    let ranges = extract_time_ranges(&text);
    if ranges.is_empty() {
        return Err(Error::new(ErrorCode::InvalidSchedule, "No valid time ranges found")
            .with_suggestion("Ranges look like 2403010800 TO 2403011600")
            .into());
    }

    let formatted = format_time_ranges(&ranges).map_err(Error::from)?;
    tracing::debug!(ranges = ranges.len(), "Schedule formatted");

    if app.output.json {
        app.print_json(&serde_json::json!({ "ranges": ranges, "formatted": formatted }))?;
    } else {
        println!("{}", formatted);
        Status::success(&format!("Formatted {}", format_count(ranges.len(), "range", "ranges")));
    }
    Ok(exit_codes::SUCCESS)
}
