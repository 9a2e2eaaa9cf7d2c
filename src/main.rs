//! Main entry point for the unspf CLI application.
//!
//! This binary provides a command-line interface for listing and
//! extracting SPF flat-container archives.

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use unspf::{Cli, SpfArchive, SpfEntry, safe_output_path};

/// Application entry point.
///
/// Parses command-line arguments, opens the archive, and dispatches to
/// listing or extraction. A failed open reports the error and shows no
/// contents — a partial listing is never printed.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let archive = SpfArchive::open(&cli.archive)?;

    // List mode: display archive contents and exit
    if cli.list || cli.verbose {
        return list_entries(&archive, cli.verbose);
    }

    // Extract mode: apply filters to determine which entries to extract:
    // 1. If specific entries are requested, only include matching ones
    // 2. Exclude entries matching the -x patterns
    let entries_to_extract: Vec<_> = archive
        .entries()
        .iter()
        .filter(|e| {
            if !cli.entries.is_empty() {
                let matches = cli.entries.iter().any(|wanted| {
                    let basename = Path::new(&e.path)
                        .file_name()
                        .map(|s| s.to_string_lossy())
                        .unwrap_or_default();
                    e.path == *wanted || basename == *wanted
                });
                if !matches {
                    return false;
                }
            }

            !cli.exclude.iter().any(|x| e.path.contains(x.as_str()))
        })
        .collect();

    if !cli.is_quiet() && archive.is_empty() {
        eprintln!("{}: archive holds no entries", cli.archive);
    }

    let multiple = cli.pipe && entries_to_extract.len() > 1;
    for entry in entries_to_extract {
        extract_entry(&archive, entry, &cli, multiple)?;
    }

    Ok(())
}

/// List entries in the archive.
///
/// Supports two output formats:
/// - Simple format (`-l`): just entry paths, one per line
/// - Verbose format (`-v`): table with data offset, length and the
///   archive's auxiliary index
fn list_entries(archive: &SpfArchive, verbose: bool) -> Result<()> {
    if verbose {
        println!("{:>10}  {:>10}  {:>6}  Name", "Offset", "Length", "Index");
        println!("{}", "-".repeat(50));
    }

    let mut total_length = 0u64;

    for entry in archive.entries() {
        if verbose {
            println!(
                "{:>10}  {:>10}  {:>6}  {}",
                entry.offset, entry.length, entry.index, entry.path
            );
            total_length += entry.length;
        } else {
            println!("{}", entry.path);
        }
    }

    if verbose {
        println!("{}", "-".repeat(50));
        println!(
            "{:>10}  {:>10}  {:>6}  {} entries",
            "",
            total_length,
            "",
            archive.len()
        );
    }

    Ok(())
}

/// Extract a single entry from the archive.
///
/// Handles the extraction options:
/// - Pipe mode (`-p`): write blob bytes to stdout instead of a file
/// - Custom output directory (`-d`): extract under the given root
/// - Overwrite control (`-n`, `-o`): handle existing files
fn extract_entry(
    archive: &SpfArchive,
    entry: &SpfEntry,
    cli: &Cli,
    show_marker: bool,
) -> Result<()> {
    // Pipe mode: write blob contents directly to stdout
    if cli.pipe {
        if show_marker {
            println!("--- {} ---", entry.path);
        }
        archive.extract_to_stdout(entry)?;
        return Ok(());
    }

    let dest_root = cli
        .extract_dir
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    // Handle existing files based on overwrite options
    let output_path = safe_output_path(entry, &dest_root)?;
    if output_path.exists() {
        if cli.never_overwrite {
            if !cli.is_quiet() {
                eprintln!("Skipping: {} (file exists)", entry.path);
            }
            return Ok(());
        }

        if !cli.overwrite {
            if !cli.is_quiet() {
                eprintln!("Skipping: {} (use -o to overwrite)", entry.path);
            }
            return Ok(());
        }
    }

    if !cli.is_quiet() {
        println!("  extracting: {}", entry.path);
    }

    archive.extract(entry, &dest_root)?;

    Ok(())
}
