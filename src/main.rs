use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use ipak::{collector, ArchiveReader, ArchiveWriter, CodecId, Config, ProgressObserver};

#[derive(Parser)]
#[command(name = "ipak", about = "Pack a directory of images into a single .ipak container")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack every image in the input directory into the container
    Compress {
        /// Directory scanned for image files
        #[arg(short, long, default_value = "data")]
        input_dir: PathBuf,
        /// Container file to create
        #[arg(short, long, default_value = "images.ipak")]
        archive: PathBuf,
        /// Codec: deflate (default), zstd, stored
        #[arg(short, long, default_value = "deflate")]
        codec: String,
        /// Maximum filename length in bytes (name-table row width)
        #[arg(long, default_value = "256")]
        max_name_len: usize,
    },
    /// Unpack the container into the output directory
    Decompress {
        /// Container file to read
        #[arg(short, long, default_value = "images.ipak")]
        archive: PathBuf,
        /// Directory extracted files are written into
        #[arg(short, long, default_value = "data2")]
        output_dir: PathBuf,
        /// Maximum filename length in bytes (must match the build setting)
        #[arg(long, default_value = "256")]
        max_name_len: usize,
    },
}

/// Prints one line per entry, mirroring the archive's index order.
struct ConsoleProgress {
    verb: &'static str,
}

impl ProgressObserver for ConsoleProgress {
    fn on_entry(&mut self, index: usize, total: usize, name: &str) {
        println!("  {} {}/{} ({})", self.verb, index + 1, total, name);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ipak=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        // ── Compress ─────────────────────────────────────────────────────────
        Commands::Compress { input_dir, archive, codec, max_name_len } => {
            let config = Config {
                input_dir,
                container_path: archive,
                max_name_len,
                codec: parse_codec(&codec),
                ..Config::default()
            };

            let entries = collector::collect(&config)?;
            println!(
                "packing {} image(s) from {}",
                entries.len(),
                config.input_dir.display()
            );

            let container_path = config.container_path.clone();
            let mut progress = ConsoleProgress { verb: "packed" };
            let report = ArchiveWriter::new(config).write(entries, &mut progress)?;
            println!(
                "Created: {} — {} entries, {:.2} MiB -> {:.2} MiB ({:.1}% smaller)",
                container_path.display(),
                report.entries,
                mib(report.original_bytes),
                mib(report.compressed_bytes),
                report.ratio() * 100.0
            );
        }

        // ── Decompress ───────────────────────────────────────────────────────
        Commands::Decompress { archive, output_dir, max_name_len } => {
            let config = Config {
                container_path: archive,
                output_dir,
                max_name_len,
                ..Config::default()
            };

            let output_dir = config.output_dir.clone();
            let mut reader = ArchiveReader::open(config)?;
            println!(
                "unpacking {} file(s) to {}",
                reader.len(),
                output_dir.display()
            );

            let mut progress = ConsoleProgress { verb: "unpacked" };
            let count = reader.extract(&mut progress)?;
            println!("Done: {count} file(s) extracted");
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn parse_codec(s: &str) -> CodecId {
    CodecId::from_name(s).unwrap_or_else(|| {
        eprintln!("Unknown codec '{}', defaulting to deflate", s);
        CodecId::Deflate
    })
}

fn mib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}
