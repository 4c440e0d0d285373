use anyhow::Context;
use clap::{Parser, Subcommand};
use fatt_core::options::DEFAULT_IMAGE_SIZE;
use fatt_core::{BuildManager, BuildOptions, BuilderRegistry, ChainMode, InputEntry};
use fatt_formatters::{list_available_builders, register_builtin_builders, render_manifest};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod minify;
mod scanner;

#[derive(Parser)]
#[command(name = "fatt")]
#[command(about = "Packs a content tree into a flashable storage image", long_about = None)]
struct Cli {
    /// Log per-entry placement
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an image from a directory tree
    Build {
        input_dir: PathBuf,
        output_file: PathBuf,
        /// Image size in bytes
        max_size: u64,
        /// Image format (fat16, simple)
        #[arg(short, long, default_value = "fat16", value_parser = parse_format)]
        format: String,
        /// Write a path,size,sha256 manifest of the packed files
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Plan the image without writing it
        #[arg(long)]
        dry_run: bool,
        /// Volume label
        #[arg(long)]
        label: Option<String>,
        /// Write real cluster chains into the allocation tables
        #[arg(long)]
        linked_chains: bool,
        /// JSON file with build options
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write a path,size,sha256 manifest for a directory tree
    Manifest {
        src_dir: PathBuf,
        manifest_file: PathBuf,
    },
    /// Minify every JSON file of a tree into a destination tree
    Minify {
        src: PathBuf,
        dst: PathBuf,
        #[arg(long)]
        dry_run: bool,
        /// Fail if the minified total exceeds this many bytes
        #[arg(long, default_value_t = DEFAULT_IMAGE_SIZE)]
        limit: u64,
    },
    /// List available image formats
    ListFormats,
}

fn parse_format(value: &str) -> Result<String, String> {
    Ok(value.to_lowercase())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

async fn write_manifest(entries: &[InputEntry], manifest_file: &Path) -> anyhow::Result<()> {
    tokio::fs::write(manifest_file, render_manifest(entries))
        .await
        .with_context(|| format!("Failed to write manifest {}", manifest_file.display()))?;
    println!("Manifest written: {}", manifest_file.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut registry = BuilderRegistry::new();
    register_builtin_builders(&mut registry);
    let registry = Arc::new(registry);

    match cli.command {
        Commands::Build {
            input_dir,
            output_file,
            max_size,
            format,
            manifest,
            dry_run,
            label,
            linked_chains,
            config,
        } => {
            if !registry.is_supported(&format) {
                anyhow::bail!(
                    "Unknown image format: '{}'. Use 'fatt list-formats' to see available formats.",
                    format
                );
            }

            let mut options = match &config {
                Some(path) => BuildOptions::load(path)?,
                None => BuildOptions::default(),
            };
            options.image_size = max_size;
            if label.is_some() {
                options.label = label;
            }
            if linked_chains {
                options.chain_mode = ChainMode::Linked;
            }

            println!("Collecting files...");
            let entries = scanner::collect_files(&input_dir)
                .await
                .with_context(|| format!("Failed to scan {}", input_dir.display()))?;
            if entries.is_empty() && format == "simple" {
                anyhow::bail!("No files found in {}", input_dir.display());
            }
            let total: u64 = entries.iter().map(|e| e.content.len() as u64).sum();
            println!("Found {} files", entries.len());
            println!("Total content: {} bytes ({:.1} KB)", total, total as f64 / 1024.0);

            if let Some(manifest_file) = &manifest {
                write_manifest(&entries, manifest_file).await?;
            }

            let manager = Arc::new(BuildManager::new(registry.clone()));

            if dry_run {
                let report = manager.simulate_build(&format, &entries, &options)?;
                println!("\nDry-run report ({}):", report.format);
                println!("  Files: {}", report.file_count);
                println!("  Directories: {}", report.directory_count);
                println!(
                    "  Used: {} of {} bytes ({:.1}%)",
                    report.used_bytes,
                    report.available_bytes,
                    report.usage_percent()
                );
                for warning in &report.warnings {
                    println!("  Warning: {}", warning);
                }
                println!("\nDry-run complete");
                return Ok(());
            }

            let image = tokio::task::spawn_blocking(move || {
                manager.execute_build(&format, &entries, &options)
            })
            .await??;

            tokio::fs::write(&output_file, &image)
                .await
                .with_context(|| format!("Failed to write {}", output_file.display()))?;
            println!("\nImage created: {} ({} bytes)", output_file.display(), image.len());
            println!("SUCCESS! Ready to flash.");
        }
        Commands::Manifest {
            src_dir,
            manifest_file,
        } => {
            let entries = scanner::collect_files(&src_dir)
                .await
                .with_context(|| format!("Failed to scan {}", src_dir.display()))?;
            write_manifest(&entries, &manifest_file).await?;
            println!("Total files: {}", entries.len());
        }
        Commands::Minify {
            src,
            dst,
            dry_run,
            limit,
        } => {
            let summary = minify::minify_tree(&src, &dst, dry_run, limit).await?;
            println!("\nSUMMARY");
            println!("Files: {}", summary.lines.len());
            println!(
                "Total size: {} bytes ({:.2} KB)",
                summary.total_bytes,
                summary.total_bytes as f64 / 1024.0
            );
        }
        Commands::ListFormats => {
            println!("Available formats:\n");
            print!("{}", list_available_builders(&registry));
        }
    }

    Ok(())
}
