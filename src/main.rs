use clap::{Parser, Subcommand};
use dropify::fs::StdFilesystem;
use dropify::{ExtensionRegistry, config, output, pipeline, registry};
use std::path::{Path, PathBuf};

/// Shared flags for commands that encode assets.
#[derive(clap::Args, Clone)]
struct RegistryArgs {
    /// Config file [default: <ASSETS>/dropify.toml]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Add or override an extension mapping (repeatable)
    #[arg(long = "mime", value_name = ".EXT=TYPE", value_parser = registry::parse_override)]
    mime: Vec<(String, String)>,
}

fn version_string() -> &'static str {
    if env!("DROPIFY_ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("DROPIFY_GIT_HASH") {
        "" => "dev@unknown",
        // Leaked once at startup
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "dropify")]
#[command(about = "Inline asset directories into HTML as generated script tags")]
#[command(long_about = "\
Inline asset directories into HTML as generated script tags

Each marker comment in the input HTML names a directory under the assets
root. The marker is replaced by a <script> that declares a variable of the
same name holding the directory tree as a JavaScript object:

  <!--Dropify:sprites-->     leaves are base64 strings
  <!--Dropify:sprites#-->    leaves are data: URIs (needs a known extension)

Files and directories starting with '.' are ignored. File keys drop the
extension: sprites/hero.png becomes sprites.hero.

Run 'dropify gen-config' for a documented dropify.toml.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace every marker in INPUT and write the result to OUTPUT
    Build {
        /// Assets root; marker names resolve to directories below it
        assets: PathBuf,
        /// HTML file containing Dropify markers
        input: PathBuf,
        /// Where to write the resulting HTML
        output: PathBuf,
        #[command(flatten)]
        registry: RegistryArgs,
    },
    /// Resolve and encode every marker without writing anything
    Check {
        assets: PathBuf,
        input: PathBuf,
        /// Print a JSON manifest instead of the tree view
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        registry: RegistryArgs,
    },
    /// Print a stock dropify.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            assets,
            input,
            output,
            registry,
        } => {
            let registry = load_registry(&assets, &registry)?;
            println!("==> Inlining {} → {}", input.display(), output.display());
            let report = pipeline::dropify(&registry, &assets, &input, &output)?;
            output::print_report(&report);
        }
        Command::Check {
            assets,
            input,
            json,
            registry,
        } => {
            let registry = load_registry(&assets, &registry)?;
            let source = pipeline::read_input(&StdFilesystem, &input)?;
            let (_, report) = pipeline::render(&StdFilesystem, &registry, &assets, &source)?;
            if json {
                println!("{}", output::format_report_json(&report)?);
            } else {
                println!("==> Checking {}", input.display());
                output::print_report(&report);
                for line in output::format_registry(&registry) {
                    println!("{}", line);
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Stock table, then the config file, then `--mime` flags.
fn load_registry(
    assets: &Path,
    args: &RegistryArgs,
) -> Result<ExtensionRegistry, config::ConfigError> {
    let site_config = match &args.config {
        Some(path) if !path.exists() => {
            return Err(config::ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file {} not found", path.display()),
            )));
        }
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(assets)?,
    };
    let mut registry = site_config.registry();
    registry.extend(args.mime.iter().cloned());
    Ok(registry)
}
