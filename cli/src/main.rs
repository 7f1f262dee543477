//! docsift CLI - document outlines and persona-driven section ranking

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docsift::analysis::{body_size, body_style};
use docsift::collection;
use docsift::render::{outline_path, outline_to_text, write_outline};
use docsift::{
    detect_script, extract_outline, load_document, segment_document, HashEmbedder, OutlineOptions,
    RankOptions,
};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(version)]
#[command(about = "Extract document outlines and rank sections for a persona", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a heading outline from every PDF or JSON page description
    Outline {
        /// Input file or directory
        #[arg(value_name = "INPUT", env = "DOCSIFT_INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", env = "DOCSIFT_OUTPUT", default_value = "output")]
        output: PathBuf,

        /// Accept bold or uppercase headings and derive levels from font styles
        #[arg(long)]
        relaxed: bool,

        /// Keep heading numbers split into their own block as separate text
        #[arg(long)]
        no_merge: bool,

        /// Print outlines instead of writing JSON files
        #[arg(long)]
        print: bool,
    },

    /// Rank sections of every collection under a directory
    Rank {
        /// Directory of collections
        #[arg(value_name = "DIR", env = "DOCSIFT_COLLECTIONS")]
        input: PathBuf,

        /// Output directory (one subdirectory per collection)
        #[arg(short, long, value_name = "DIR", env = "DOCSIFT_OUTPUT", default_value = "output")]
        output: PathBuf,

        /// Embedding dimensions
        #[arg(long, env = "DOCSIFT_DIMENSIONS", default_value_t = docsift::rank::DEFAULT_DIMENSIONS)]
        dimensions: usize,

        /// Number of ranked sections reported
        #[arg(long, env = "DOCSIFT_TOP_SECTIONS", default_value_t = 20)]
        top_sections: usize,

        /// Number of sections refined into excerpts
        #[arg(long, env = "DOCSIFT_TOP_REFINED", default_value_t = 5)]
        top_refined: usize,

        /// Disable parallel processing
        #[arg(long)]
        sequential: bool,
    },

    /// Show layout statistics of a document
    Inspect {
        /// Input PDF or JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            relaxed,
            no_merge,
            print,
        } => {
            let mut options = OutlineOptions::new();
            if relaxed {
                options = options.relaxed();
            }
            if no_merge {
                options = options.without_merge();
            }
            cmd_outline(&input, &output, &options, print)
        }
        Commands::Rank {
            input,
            output,
            dimensions,
            top_sections,
            top_refined,
            sequential,
        } => {
            let mut options = RankOptions::new()
                .with_top_sections(top_sections)
                .with_top_refined(top_refined);
            if sequential {
                options = options.sequential();
            }
            let embedder = HashEmbedder::new(dimensions).with_parallel(options.parallel);
            cmd_rank(&input, &output, &embedder, &options)
        }
        Commands::Inspect { input } => cmd_inspect(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn progress_bar(len: usize) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Input files of the outline command, sorted by name.
fn outline_inputs(input: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    let mut files: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension().is_some_and(|ext| {
                    let ext = ext.to_string_lossy().to_lowercase();
                    ext == "pdf" || ext == "json"
                })
        })
        .collect();
    files.sort();
    Ok(files)
}

fn cmd_outline(
    input: &Path,
    output: &Path,
    options: &OutlineOptions,
    print: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = outline_inputs(input)?;
    if files.is_empty() {
        println!("{}", "No PDF or JSON files found.".yellow());
        return Ok(());
    }

    if print {
        for file in &files {
            match load_document(file) {
                Ok(doc) => {
                    println!("{}", file.display().to_string().cyan().bold());
                    print!("{}", outline_to_text(&extract_outline(&doc, options)));
                }
                Err(e) => eprintln!("{} {}: {}", "Skipped".yellow(), file.display(), e),
            }
        }
        return Ok(());
    }

    let pb = progress_bar(files.len())?;
    let mut written = 0;
    let mut failed = Vec::new();
    for file in &files {
        pb.set_message(file.display().to_string());
        let result = load_document(file).and_then(|doc| {
            let outline = extract_outline(&doc, options);
            write_outline(&outline, &outline_path(output, file)).map(|_| outline.outline.len())
        });
        match result {
            Ok(count) => {
                log::debug!("{}: {} headings", file.display(), count);
                written += 1;
            }
            Err(e) => failed.push((file.clone(), e)),
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    for (file, e) in &failed {
        eprintln!("{} {}: {}", "Skipped".yellow(), file.display(), e);
    }
    println!(
        "\n{} {} outlines written to {}",
        "Done!".green().bold(),
        written,
        output.display()
    );
    Ok(())
}

fn cmd_rank(
    input: &Path,
    output: &Path,
    embedder: &HashEmbedder,
    options: &RankOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let collections = collection::discover_collections(input)?;
    if collections.is_empty() {
        println!("{}", "No collections found to process.".yellow());
        return Ok(());
    }
    log::info!("found {} collections", collections.len());

    let mut written = 0;
    let mut failed = 0;
    for dir in &collections {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("\n{} {}", "Processing".cyan().bold(), name);
        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Ranking sections...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = collection::run_collection(dir, output, embedder, options);
        spinner.finish_and_clear();
        match result {
            Ok(Some(path)) => {
                written += 1;
                println!("  {} {}", "└─".dimmed(), path.display());
            }
            Ok(None) => {
                println!("  {} no text extracted, no output written", "└─".dimmed());
            }
            Err(e) => {
                failed += 1;
                log::error!("{}: {}", name, e);
                eprintln!("  {} {}: {}", "Skipped".yellow(), name, e);
            }
        }
    }

    println!(
        "\n{} {} reports written, {} failed",
        "Done!".green().bold(),
        written,
        failed
    );
    Ok(())
}

fn cmd_inspect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref title) = doc.title {
        println!("{}: {}", "Title".bold(), title);
    }
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Blocks".bold(), doc.block_count());
    println!("{}: {}", "Script".bold(), detect_script(&doc));
    println!("{}: {}pt", "Body size".bold(), body_size(&doc));
    match body_style(&doc) {
        Some(style) => println!("{}: {}", "Body style".bold(), style),
        None => println!("{}: {}", "Body style".bold(), "none".dimmed()),
    }

    let outline = extract_outline(&doc, &OutlineOptions::default());
    let sections = segment_document(&doc);
    println!();
    println!("{}", "Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Headings".bold(), outline.outline.len());
    println!("{}: {}", "Sections".bold(), sections.len());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document outline extraction and section ranking");
    println!();
    println!("License: MIT");
}
