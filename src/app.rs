//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the ingest → aggregate → range pipeline
//! - prints the run summary
//! - renders and exports the figure
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, RenderArgs};
use crate::domain::RenderConfig;
use crate::error::AppError;
use crate::render::StyleConfig;

pub mod pipeline;

/// Entry point for the `tenv` binary.
pub fn run() -> Result<(), AppError> {
    // We want `tenv -i 2024=a.csv -i 2025=b.csv` to behave like
    // `tenv render ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the common invocation short.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Render(args) => handle(args, OutputMode::Full),
        Command::Inspect(args) => handle(args, OutputMode::SummaryOnly),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    SummaryOnly,
}

fn handle(args: RenderArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = render_config_from_args(&args);
    let run = pipeline::prepare(&config)?;

    println!("{}", crate::report::format_run_summary(&run, &config));

    if let Some(path) = &config.export_monthly {
        crate::io::export::write_monthly_csv(path, &run.monthly_by_label())?;
        println!("Wrote monthly means to {}", path.display());
    }

    if mode == OutputMode::Full {
        let style = StyleConfig::default();
        let exported = crate::render::export_figure(&run.figure_data(), &config, &style)?;
        println!("Wrote {}", exported.raster.display());
        println!("Wrote {}", exported.vector.display());
    }

    Ok(())
}

pub fn render_config_from_args(args: &RenderArgs) -> RenderConfig {
    RenderConfig {
        inputs: args.inputs.clone(),
        out_dir: args.out_dir.clone(),
        basename: args.basename.clone(),
        fig_width_in: args.width,
        fig_height_in: args.height,
        raster_dpi: args.raster_dpi,
        base_dpi: args.base_dpi,
        y_padding: args.y_padding,
        y_major_step: args.y_step,
        left_pad_fraction: args.left_pad,
        export_monthly: args.export_monthly.clone(),
    }
}

/// Rewrite argv so flag-first invocations default to `render`.
///
/// Rules:
/// - `tenv -i 2024=a.csv ...`     -> `tenv render -i 2024=a.csv ...`
/// - `tenv --help/--version/-h`   -> unchanged (show top-level help/version)
/// - `tenv render|inspect ...`    -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "render" | "inspect");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "render flags".
    if arg1.starts_with('-') {
        argv.insert(1, "render".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flag_first_invocations_default_to_render() {
        let rewritten = rewrite_args(argv(&["tenv", "-i", "2024=a.csv"]));
        assert_eq!(rewritten, argv(&["tenv", "render", "-i", "2024=a.csv"]));
    }

    #[test]
    fn explicit_subcommands_and_help_are_untouched() {
        let inspect = argv(&["tenv", "inspect", "-i", "2024=a.csv"]);
        assert_eq!(rewrite_args(inspect.clone()), inspect);

        let help = argv(&["tenv", "--help"]);
        assert_eq!(rewrite_args(help.clone()), help);
    }

    #[test]
    fn config_carries_all_args() {
        let cli = crate::cli::Cli::parse_from([
            "tenv",
            "render",
            "-i",
            "2024=a.csv",
            "-i",
            "2025=b.csv",
            "--out-dir",
            "figures",
            "--y-padding",
            "3.5",
        ]);
        let Command::Render(args) = cli.command else {
            panic!("expected render subcommand");
        };

        let config = render_config_from_args(&args);
        assert_eq!(config.inputs.len(), 2);
        assert_eq!(config.inputs[1].label, "2025");
        assert_eq!(config.out_dir, std::path::PathBuf::from("figures"));
        assert!((config.y_padding - 3.5).abs() < 1e-12);
        assert_eq!(config.basename, "weather_temperature");
    }
}
