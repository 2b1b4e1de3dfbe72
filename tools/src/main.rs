use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::{CharacterTable, SwfVersion};
use glob::Pattern;
use swf_sprite_tools::{
    decode_sprite, format_inspect_pretty, inspect_sprite, reencode_sprite, register_sprites,
    CharacterFile, InspectReport,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "swf-sprite-tools",
    version,
    about = "SWF sprite inspection and re-encoding tools"
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect sprite bodies: records, needed characters and bounds.
    Inspect {
        /// Path to a sprite body, or a directory of them.
        path: PathBuf,
        /// SWF version the sprite came from.
        #[arg(long, default_value_t = 10)]
        swf_version: u8,
        /// Optional character table JSON used to resolve bounds.
        #[arg(long)]
        characters: Option<PathBuf>,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Decode a sprite body and write it back out.
    Reencode {
        /// Sprite body to read.
        input: PathBuf,
        /// Where to write the re-encoded body.
        output: PathBuf,
        /// SWF version the sprite came from.
        #[arg(long, default_value_t = 10)]
        swf_version: u8,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Inspect {
            path,
            swf_version,
            characters,
            glob,
            format,
        } => {
            let version = SwfVersion::new(swf_version);
            let table = characters
                .as_ref()
                .map(|path| load_characters(path))
                .transpose()
                .context("load character table")?;
            let entries = if path.is_dir() {
                collect_sprite_entries(&path, glob.as_deref())?
            } else {
                vec![path]
            };

            let mut decoded = Vec::with_capacity(entries.len());
            for entry in entries {
                let bytes =
                    fs::read(&entry).with_context(|| format!("read sprite {}", entry.display()))?;
                let sprite = decode_sprite(&bytes, version, &wire::Limits::default())
                    .with_context(|| format!("inspect {}", entry.display()))?;
                decoded.push((entry, bytes.len(), sprite));
            }

            // Sprites inspected together can place each other.
            let table = table.map(|mut table| {
                let sprites: Vec<_> = decoded.iter().map(|(_, _, sprite)| sprite.clone()).collect();
                register_sprites(&mut table, &sprites);
                table
            });

            let multiple = decoded.len() > 1;
            for (entry, body_len, sprite) in &decoded {
                let report = inspect_sprite(sprite, *body_len, version, table.as_ref())?;
                if multiple && matches!(format, OutputFormat::Pretty) {
                    println!("== {} ({body_len} bytes) ==", entry.display());
                }
                print_report(&report, format)?;
            }
        }
        Command::Reencode {
            input,
            output,
            swf_version,
        } => {
            let bytes =
                fs::read(&input).with_context(|| format!("read sprite {}", input.display()))?;
            let (encoded, identical) =
                reencode_sprite(&bytes, SwfVersion::new(swf_version), &wire::Limits::default())
                    .with_context(|| format!("reencode {}", input.display()))?;
            fs::write(&output, &encoded)
                .with_context(|| format!("write sprite {}", output.display()))?;
            if identical {
                info!(path = %output.display(), bytes = encoded.len(), "re-encoded identically");
            } else {
                info!(
                    path = %output.display(),
                    input_bytes = bytes.len(),
                    output_bytes = encoded.len(),
                    "re-encoded with different bytes"
                );
            }
            println!(
                "{} -> {} ({} -> {} bytes, {})",
                input.display(),
                output.display(),
                bytes.len(),
                encoded.len(),
                if identical { "identical" } else { "changed" }
            );
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_characters(path: &Path) -> Result<CharacterTable> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read character table {}", path.display()))?;
    let file = CharacterFile::from_json(&contents)?;
    debug!(
        path = %path.display(),
        characters = file.characters.len(),
        "loaded character table"
    );
    Ok(file.into_table())
}

fn collect_sprite_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        entries.push(path);
    }
    entries.sort();
    Ok(entries)
}

fn print_report(report: &InspectReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("serialize json")?;
            println!("{json}");
        }
        OutputFormat::Pretty => print!("{}", format_inspect_pretty(report)),
    }
    Ok(())
}
