use anyhow::Context;
use clap::Parser as ClapParser;
use parser::{ArchiveAccess, DirectoryAccess, PackageAccess, ParserOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Parses an e-learning content package (SCORM, AICC, cmi5, or xAPI) and
/// prints its uniform metadata as JSON.
#[derive(Debug, ClapParser)]
#[command(name = "module-parser", version)]
struct Args {
    /// Package source: a directory or a .zip archive.
    package: PathBuf,

    /// Validate SCORM 2004 manifests against their bundled schema set.
    #[arg(long)]
    validate_schema: bool,

    /// Skip total-size accounting (size_on_disk reports -1).
    #[arg(long)]
    no_size: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Include recovered warnings in the output.
    #[arg(long)]
    warnings: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MODULE_PARSER_LOG")
                .unwrap_or_else(|_| EnvFilter::new("parser=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = ParserOptions {
        validate_schema: args.validate_schema,
        calculate_size: !args.no_size,
    };

    let access: Box<dyn PackageAccess> = if args.package.is_dir() {
        Box::new(DirectoryAccess::new(&args.package)?)
    } else {
        Box::new(ArchiveAccess::open(&args.package)?)
    };

    let parsed = parser::parse_detailed(access.as_ref(), &options)
        .with_context(|| format!("failed to parse '{}'", args.package.display()))?;

    let output = if args.warnings {
        serde_json::json!({
            "metadata": parsed.metadata,
            "warnings": parsed.warnings,
        })
    } else {
        serde_json::to_value(&parsed.metadata)?
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}
