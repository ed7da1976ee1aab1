use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use log::LevelFilter;
use serde_json::json;
use subcue::{
    CueUpdate, Language, MarkupMode, SubtitleInfo, SubtitleLoader, SubtitleSettings,
    SubtitleTrack, SubtitleType, offset_millis, validate_document,
};

const CLI_AFTER_HELP: &str = "Examples:\n  subcue parse movie.srt --json\n  subcue at movie.srt 00:12:03.5 --offset 1.5\n  subcue validate movie.srt\n  subcue convert movie.srt --format vtt --out movie.vtt\n  subcue rank candidates.json --media tt0111161 --language en\n  subcue completions zsh > _subcue";

#[derive(Debug, Parser)]
#[command(
    name = "subcue",
    version,
    about = "Parse, inspect, convert and rank subtitle files",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional logging output.
    #[arg(long, global = true)]
    verbose: bool,

    /// Allow overwriting existing output files.
    #[arg(long, global = true)]
    overwrite: bool,

    /// JSON settings file (font, preferred language, default encoding, markup).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a subtitle file and print its cues.
    #[command(
        about = "Print the cues of a subtitle file",
        after_help = "Examples:\n  subcue parse movie.srt\n  subcue parse movie.srt --json --nested\n  subcue parse movie.srt --encoding windows-1252 --strict"
    )]
    Parse {
        /// Input subtitle path.
        input: PathBuf,

        /// Output cues as machine-readable JSON.
        #[arg(long)]
        json: bool,

        /// Fail on cues that end before they start.
        #[arg(long)]
        strict: bool,

        /// Read every inline style tag instead of whole-line tags only.
        #[arg(long)]
        nested: bool,

        /// Charset of the input (utf-8, utf-16, iso-8859-1, windows-1252).
        #[arg(long)]
        encoding: Option<String>,
    },

    /// Print the cue shown at a playback time.
    #[command(
        about = "Show the active cue at a time",
        after_help = "Examples:\n  subcue at movie.srt 75\n  subcue at movie.srt 00:01:15,500 --offset -0.5"
    )]
    At {
        /// Input subtitle path.
        input: PathBuf,

        /// Playback time (seconds, MM:SS or HH:MM:SS[.mmm]).
        time: String,

        /// Subtitle offset in seconds. Positive values delay subtitles.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        offset: f64,
    },

    /// Check a subtitle file for timing problems.
    #[command(
        about = "Validate a subtitle file",
        after_help = "Examples:\n  subcue validate movie.srt"
    )]
    Validate {
        /// Input subtitle path.
        input: PathBuf,
    },

    /// Write a subtitle file in another format.
    #[command(
        about = "Convert a subtitle file",
        after_help = "Examples:\n  subcue convert movie.srt --format vtt --out movie.vtt\n  subcue convert movie.srt --format srt --out shifted.srt --offset 2.5"
    )]
    Convert {
        /// Input subtitle path.
        input: PathBuf,
        /// Output format: srt | vtt.
        #[arg(long)]
        format: String,
        /// Output file path.
        #[arg(long)]
        out: PathBuf,
        /// Shift every cue by this many seconds.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        offset: f64,
    },

    /// Rank subtitle candidates for a media item.
    #[command(
        about = "Rank subtitle candidates",
        after_help = "Examples:\n  subcue rank candidates.json --media tt0111161\n  subcue rank candidates.json --media tt0111161 --language pt-br --json"
    )]
    Rank {
        /// JSON file holding an array of subtitle infos.
        candidates: PathBuf,
        /// Media id the candidates are filtered to.
        #[arg(long)]
        media: String,
        /// Preferred language code (overrides the settings file).
        #[arg(long)]
        language: Option<String>,
        /// Output the ranking as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_subtitle_type(value: &str) -> Option<SubtitleType> {
    SubtitleType::from_extension(value.trim())
}

/// Parse a playback time into milliseconds.
fn parse_timecode(value: &str) -> Result<u64, Box<dyn std::error::Error>> {
    let trimmed = value.trim().replace(',', ".");
    if trimmed.is_empty() {
        return Err("time value cannot be empty".into());
    }

    if let Ok(seconds) = trimmed.parse::<f64>() {
        return Ok(seconds_to_millis(seconds));
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(format!("invalid time format: {trimmed}").into());
    }

    let (hours, minutes, seconds_str) = if parts.len() == 3 {
        (parts[0].parse::<u64>()?, parts[1].parse::<u64>()?, parts[2])
    } else {
        (0_u64, parts[0].parse::<u64>()?, parts[1])
    };

    let seconds = seconds_str.parse::<f64>()?;
    let total_seconds = (hours as f64 * 3600.0) + (minutes as f64 * 60.0) + seconds;
    Ok(seconds_to_millis(total_seconds))
}

fn seconds_to_millis(seconds: f64) -> u64 {
    (seconds.max(0.0) * 1000.0).round() as u64
}

fn ensure_writable_path(path: &Path, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        if overwrite {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("overwriting {}", path.display()).yellow()
            );
        } else {
            return Err(format!(
                "output already exists: {} (use --overwrite to replace)",
                path.display()
            )
            .into());
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn load_settings(global: &GlobalOptions) -> Result<SubtitleSettings, Box<dyn std::error::Error>> {
    match &global.settings {
        Some(path) => Ok(SubtitleSettings::load(path)?),
        None => Ok(SubtitleSettings::default()),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);
    let settings = load_settings(&cli.global)?;

    match cli.command {
        Commands::Parse {
            input,
            json,
            strict,
            nested,
            encoding,
        } => {
            let mut options = settings.parse_options().with_strict_timing(strict);
            if nested {
                options = options.with_markup(MarkupMode::Nested);
            }
            if let Some(encoding) = encoding {
                options = options.with_default_encoding(encoding);
            }

            let document = SubtitleLoader::with_options(options).load(&input, None)?;

            if json {
                let payload = json!({
                    "path": input.display().to_string(),
                    "cue_count": document.len(),
                    "span_ms": document.span(),
                    "cues": document.cues(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                for cue in document.cues() {
                    println!("{}", format!("#{}", cue.id).cyan().bold());
                    println!("{} --> {} ms", cue.start_time, cue.end_time);
                    println!("{}\n", cue.text());
                }
                println!("{} cue(s)", document.len());
            }
        }
        Commands::At {
            input,
            time,
            offset,
        } => {
            let current_time = parse_timecode(&time)?;
            let document = SubtitleLoader::with_options(settings.parse_options()).load(&input, None)?;

            let mut track = SubtitleTrack::new();
            track.set_document(document);
            track.set_offset(offset);

            match track.on_time_changed(current_time) {
                CueUpdate::Show(cue) => {
                    println!("{}", format!("#{}", cue.id).cyan().bold());
                    println!("{}", cue.text());
                }
                CueUpdate::Clear | CueUpdate::Unchanged => {
                    println!("{}", "no subtitle at this time".dimmed());
                }
            }
        }
        Commands::Validate { input } => {
            let document = SubtitleLoader::with_options(settings.parse_options()).load(&input, None)?;
            let report = validate_document(&document);
            print!("{report}");

            if !report.is_valid() {
                return Err(format!("{} error(s) found", report.errors.len()).into());
            }
            println!("{}", "valid".green().bold());
        }
        Commands::Convert {
            input,
            format,
            out,
            offset,
        } => {
            let format = parse_subtitle_type(&format)
                .ok_or(format!("unsupported subtitle format: {format}"))?;
            ensure_writable_path(&out, cli.global.overwrite)?;

            let document = SubtitleLoader::with_options(settings.parse_options()).load(&input, None)?;
            let document = document.shifted(offset_millis(offset));
            fs::write(&out, document.to_text(format))?;

            println!("{} {}", "saved".green().bold(), out.display());
        }
        Commands::Rank {
            candidates,
            media,
            language,
            json,
        } => {
            let mut selector = settings.selector();
            if let Some(language) = language {
                selector = selector.with_preferred_language(language.parse::<Language>()?);
            }

            let all: Vec<SubtitleInfo> = serde_json::from_str(&fs::read_to_string(&candidates)?)?;
            let ranked = selector.candidates_for(&all, &media);
            let default = selector.select_default(&ranked);

            if json {
                let payload = json!({
                    "media": media,
                    "default": default.language(),
                    "candidates": ranked,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                for info in &ranked {
                    let marker = if *info == default { "*" } else { " " };
                    let top = info
                        .top_file()
                        .map(|file| format!("{} (score {}, {} downloads)", file.name, file.score, file.downloads))
                        .unwrap_or_default();
                    println!("{marker} {:<8} {top}", info.language().to_string().bold());
                }
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "subcue", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
