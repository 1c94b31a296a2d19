use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use pkgdoc::{document_package, DocConfig, PackageId, SortOrder};

#[derive(Parser)]
#[command(name = "pkgdoc")]
#[command(about = "Extract documentation from a Go package as JSON")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Document a package under $GOPATH/src
    pkgdoc github.com/acme/demo

    # Document a checkout somewhere else
    pkgdoc github.com/acme/demo --dir ./demo

    # Exported API only, signatures without bodies
    pkgdoc github.com/acme/demo --exported-only --strip-bodies
"#)]
pub struct Cli {
    /// Import path of the package
    pub import_path: String,

    /// Package directory (defaults to <src-root>/<import-path>)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Source root import paths are resolved against
    #[arg(long)]
    pub src_root: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only document exported identifiers
    #[arg(long)]
    pub exported_only: bool,

    /// Print functions without their bodies
    #[arg(long)]
    pub strip_bodies: bool,

    /// Listing order: source or name
    #[arg(long)]
    pub sort: Option<String>,

    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => DocConfig::load(path)?,
        None => DocConfig::default(),
    };

    if cli.src_root.is_some() {
        config.src_root = cli.src_root.clone();
    }
    config.options.exported_only |= cli.exported_only;
    config.options.strip_bodies |= cli.strip_bodies;
    if let Some(sort) = &cli.sort {
        config.options.sort = SortOrder::from_str(sort)
            .with_context(|| format!("Unknown sort order '{}' (expected source or name)", sort))?;
    }

    let pkg = match &cli.dir {
        Some(dir) => PackageId::new(&cli.import_path, dir),
        None => {
            let root = config
                .resolve_src_root()
                .context("Cannot locate a source root; pass --dir or --src-root")?;
            PackageId::in_src_root(&root, &cli.import_path)
        }
    };

    let docs = document_package(&pkg, &config.options)?;
    let json = if cli.compact {
        serde_json::to_string(&docs)?
    } else {
        serde_json::to_string_pretty(&docs)?
    };
    println!("{}", json);

    Ok(())
}
