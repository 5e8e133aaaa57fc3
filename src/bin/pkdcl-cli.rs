//! Command-line front-end for the DCL implode/explode codec.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use pkdcl::{explode_bytes, implode_bytes, CompressionHeader, CompressionMode, DictionarySize};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "pkdcl-cli")]
#[command(about = "Compress and decompress files in the PKWARE DCL implode format")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Compress {
        /// Input file
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// Literal coding mode
        #[arg(short, long, value_enum, default_value_t = CliMode::Binary)]
        mode: CliMode,

        /// Dictionary size
        #[arg(short, long, value_enum, default_value_t = CliDictSize::Size4K)]
        dict_size: CliDictSize,

        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a file
    Decompress {
        /// Input file
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,
    },

    /// Show the header of a compressed file
    Info {
        /// Compressed file
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliMode {
    /// Raw 8-bit literals
    Binary,
    /// Huffman-coded literals, better for text
    Ascii,
}

impl From<CliMode> for CompressionMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Binary => CompressionMode::Binary,
            CliMode::Ascii => CompressionMode::ASCII,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliDictSize {
    /// 1 KiB dictionary
    Size1K,
    /// 2 KiB dictionary
    Size2K,
    /// 4 KiB dictionary
    Size4K,
}

impl From<CliDictSize> for DictionarySize {
    fn from(size: CliDictSize) -> Self {
        match size {
            CliDictSize::Size1K => DictionarySize::Size1K,
            CliDictSize::Size2K => DictionarySize::Size2K,
            CliDictSize::Size4K => DictionarySize::Size4K,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Commands::Compress {
            input,
            output,
            mode,
            dict_size,
            force,
        } => compress(cli, input, output, (*mode).into(), (*dict_size).into(), *force),
        Commands::Decompress {
            input,
            output,
            force,
        } => decompress(cli, input, output, *force),
        Commands::Info { input } => info(input),
    }
}

fn spinner(quiet: bool, message: &'static str) -> Option<ProgressBar> {
    if quiet {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static template is valid"),
    );
    bar.set_message(message);
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    Some(bar)
}

fn check_output(output: &PathBuf, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if output.exists() && !force {
        return Err(format!(
            "output file {} exists (use --force to overwrite)",
            output.display()
        )
        .into());
    }
    Ok(())
}

fn compress(
    cli: &Cli,
    input: &PathBuf,
    output: &PathBuf,
    mode: CompressionMode,
    dict_size: DictionarySize,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_output(output, force)?;
    let data = fs::read(input)?;

    let bar = spinner(cli.quiet, "compressing");
    let start = Instant::now();
    let compressed = implode_bytes(&data, mode, dict_size)?;
    let elapsed = start.elapsed();
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    fs::write(output, &compressed)?;

    if !cli.quiet {
        let ratio = if data.is_empty() {
            100.0
        } else {
            compressed.len() as f64 * 100.0 / data.len() as f64
        };
        println!(
            "{} -> {} ({} -> {} bytes, {ratio:.1}%, {elapsed:.2?})",
            input.display(),
            output.display(),
            data.len(),
            compressed.len(),
        );
    }
    Ok(())
}

fn decompress(
    cli: &Cli,
    input: &PathBuf,
    output: &PathBuf,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_output(output, force)?;
    let data = fs::read(input)?;

    let bar = spinner(cli.quiet, "decompressing");
    let start = Instant::now();
    let decompressed = explode_bytes(&data)?;
    let elapsed = start.elapsed();
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    fs::write(output, &decompressed)?;

    if !cli.quiet {
        println!(
            "{} -> {} ({} -> {} bytes, {elapsed:.2?})",
            input.display(),
            output.display(),
            data.len(),
            decompressed.len(),
        );
    }
    Ok(())
}

fn info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let header = CompressionHeader::parse(&data)?;

    println!("{}:", input.display());
    println!("  mode:            {:?}", header.mode);
    println!("  dictionary size: {} bytes", header.dict_size.bytes());
    println!("  compressed size: {} bytes", data.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn compress_then_decompress_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let packed = dir.path().join("input.imploded");
        let unpacked = dir.path().join("output.txt");
        fs::write(&input, b"round trip through the filesystem").unwrap();

        let cli = Cli {
            command: Commands::Info { input: input.clone() },
            quiet: true,
        };
        compress(
            &cli,
            &input,
            &packed,
            CompressionMode::ASCII,
            DictionarySize::Size2K,
            false,
        )
        .unwrap();
        decompress(&cli, &packed, &unpacked, false).unwrap();

        assert_eq!(fs::read(&input).unwrap(), fs::read(&unpacked).unwrap());
    }

    #[test]
    fn refuses_to_clobber_without_force() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.bin");
        let output = dir.path().join("output.bin");
        fs::write(&input, b"data").unwrap();
        fs::write(&output, b"precious").unwrap();

        let cli = Cli {
            command: Commands::Info { input: input.clone() },
            quiet: true,
        };
        let err = compress(
            &cli,
            &input,
            &output,
            CompressionMode::Binary,
            DictionarySize::Size1K,
            false,
        );
        assert!(err.is_err());
        assert_eq!(fs::read(&output).unwrap(), b"precious");
    }
}
