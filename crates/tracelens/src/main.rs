use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracelens_core::layout::{FrameLayout, is_expandable};
use tracelens_core::symbol::{display_function, trim_package};
use tracelens_core::trace::collapse_repeats;
use tracelens_core::types::{PackageStatus, Registers};
use tracelens_core::Trace;
use tracelens_utils::{info, init_logging, init_logging_for_tui};

/// A terminal viewer for symbolicated stack traces.
#[derive(Parser, Debug)]
#[command(name = "tracelens")]
#[command(version)]
#[command(about = "A terminal viewer for symbolicated stack traces", long_about = None)]
struct Cli
{
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Open a trace file in the interactive viewer
    View
    {
        /// Path to a JSON trace file
        file: PathBuf,
    },
    /// Print a one-line classification of every frame and exit
    Summary
    {
        /// Path to a JSON trace file
        file: PathBuf,
    },
}

fn main()
{
    let cli = Cli::parse();

    match cli.command {
        Commands::View { file } => {
            // File-only logging so log lines never corrupt the TUI screen
            if let Err(e) = init_logging_for_tui(None) {
                eprintln!("Failed to initialize logging: {e}");
                process::exit(1);
            }

            let trace = match Trace::from_json_file(&file) {
                Ok(trace) => trace,
                Err(e) => {
                    eprintln!("Failed to load trace from {}: {e}", file.display());
                    process::exit(1);
                }
            };

            info!("Opening {} in the viewer", file.display());
            let rt = tokio::runtime::Runtime::new().unwrap();
            if let Err(e) = rt.block_on(tracelens_ui::run_tui(trace)) {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        Commands::Summary { file } => {
            // Initialize logging (reads from RUST_LOG env var)
            // Defaults to INFO level and Pretty format if not set
            if let Err(e) = init_logging() {
                eprintln!("Failed to initialize logging: {e}");
                process::exit(1);
            }

            let trace = match Trace::from_json_file(&file) {
                Ok(trace) => trace,
                Err(e) => {
                    eprintln!("Failed to load trace from {}: {e}", file.display());
                    process::exit(1);
                }
            };

            print_summary(trace);
        }
    }
}

/// Headless rendition of the frame list: one line per row the viewer
/// would show, with the same classification the interactive mode uses.
fn print_summary(trace: Trace)
{
    let Trace {
        platform,
        frames,
        registers,
        images,
    } = trace;

    println!("Trace platform: {platform}");
    println!("Images: {}", images.len());
    println!();

    let collapsed = collapse_repeats(frames);
    let is_only_frame = collapsed.len() == 1;
    let no_registers = Registers::new();

    for (index, (frame, times_repeated)) in collapsed.iter().enumerate() {
        let resolved = frame.resolved_platform(&platform);
        let layout = match FrameLayout::select(&resolved) {
            FrameLayout::Native => "native ",
            FrameLayout::Generic => "generic",
        };

        let name = display_function(frame.function.as_deref(), frame.raw_function.as_deref(), false)
            .or_else(|| frame.filename.clone())
            .or_else(|| frame.module.clone())
            .unwrap_or_else(|| "<unknown>".to_string());

        let mut line = format!("#{index:<3} {layout}  {name}");

        if let Some(package) = &frame.package {
            let image = frame
                .instruction_addr
                .as_deref()
                .and_then(|addr| images.iter().find(|image| image.contains_address(addr)));
            let status = match PackageStatus::classify(image) {
                PackageStatus::Empty => "",
                PackageStatus::Success => " [ok]",
                PackageStatus::Error => " [error]",
            };
            line.push_str(&format!("  ({}{status})", trim_package(package)));
        }

        if let Some(addr) = &frame.instruction_addr {
            line.push_str(&format!("  {addr}"));
        }

        let prev = index.checked_sub(1).map(|i| &collapsed[i].0);
        let next = collapsed.get(index + 1).map(|(frame, _)| frame);

        if frame.is_inline_frame(prev, &platform) {
            line.push_str("  inline");
        }
        if frame.is_found_by_stack_scanning() {
            line.push_str("  scanned");
        }
        if frame.leads_to_app(next) {
            line.push_str("  leads-to-app");
        }
        // Registers belong to the crashing frame only
        let frame_registers = if index + 1 == collapsed.len() {
            &registers
        } else {
            &no_registers
        };
        if is_expandable(frame, frame_registers, &resolved, is_only_frame, false) {
            line.push_str("  expandable");
        }
        if *times_repeated > 0 {
            line.push_str(&format!("  x{}", times_repeated + 1));
        }

        println!("{line}");
    }
}
