use anyhow::Result;
use autoload_core::{
    AutoloadConfig, DeclarationScanner, MatchStrategy, Resolver, Runtime, SourceExecutor,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autoload")]
#[command(version = "0.1.0")]
#[command(about = "Resolve namespaced symbols to source files using composer.json", long_about = None)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalOptions {
    /// Directory the composer.json search starts from (default: executable dir)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Read this manifest instead of searching for composer.json
    #[arg(long, global = true, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Prefix matching: first-segment or longest-prefix
    #[arg(long, global = true, value_name = "STRATEGY", default_value = "first-segment")]
    strategy: MatchStrategy,

    /// Source file extension
    #[arg(long, global = true, value_name = "EXT", default_value = "php")]
    extension: String,

    /// Include autoload-dev mappings
    #[arg(long, global = true)]
    dev: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the files for the given symbols ("not found" is reported, not an error)
    Resolve {
        #[arg(value_name = "SYMBOL", required = true)]
        symbols: Vec<String>,
    },

    /// Print the file each symbol resolves to, without loading it
    Which {
        #[arg(value_name = "SYMBOL", required = true)]
        symbols: Vec<String>,
    },

    /// List the namespace mappings read from the manifest
    Mappings,
}

impl GlobalOptions {
    fn to_config(&self) -> AutoloadConfig {
        AutoloadConfig {
            extension: self.extension.clone(),
            strategy: self.strategy,
            include_dev: self.dev,
            install_dir: self.root.clone(),
            manifest_path: self.manifest.clone(),
            ..AutoloadConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.options.to_config();

    let mut runtime = Runtime::new(DeclarationScanner::new());
    let resolver = autoload_core::bootstrap(&mut runtime, &config)?;

    match cli.command {
        Commands::Resolve { symbols } => {
            for line in resolve_symbols(&mut runtime, &symbols)? {
                println!("{}", line);
            }

            for path in runtime.executor().includes() {
                log::info!("included {}", path.display());
            }
            Ok(())
        }

        Commands::Which { symbols } => {
            for symbol in &symbols {
                match resolver.find_file(symbol) {
                    Some(path) => println!("{}  {}", symbol, path.display()),
                    None => println!("{}  (no file)", symbol),
                }
            }
            Ok(())
        }

        Commands::Mappings => {
            print_mappings(&resolver);
            Ok(())
        }
    }
}

/// Load each symbol and describe the outcome.
///
/// Only load failures are errors; an unknown symbol is a normal outcome.
fn resolve_symbols<E: SourceExecutor>(
    runtime: &mut Runtime<E>,
    symbols: &[String],
) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        if runtime.ensure_loaded(symbol)? {
            lines.push(format!("loaded     {}", symbol));
        } else {
            lines.push(format!("not found  {}", symbol));
        }
    }
    Ok(lines)
}

fn print_mappings(resolver: &Resolver) {
    println!(
        "# strategy: {}, extension: .{}",
        resolver.strategy().as_str(),
        resolver.extension()
    );

    for mapping in resolver.mappings().iter() {
        match &mapping.anchor {
            Some(anchor) => println!(
                "{}\\ => {}  (relative to {})",
                mapping.prefix,
                mapping.dirs.join(", "),
                anchor.display()
            ),
            None => println!("{}\\ => {}", mapping.prefix, mapping.dirs.join(", ")),
        }
    }
}
