use clap::{Args, Parser, Subcommand};
use palette_css::{CollisionPolicy, Config, Conversion, CssError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "palette2css")]
#[command(about = "Flatten a JSON design palette into CSS custom properties")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a palette and write the stylesheet fragment
    Build {
        #[command(flatten)]
        source: SourceArgs,

        /// Output .css file (its directory is created if missing)
        #[arg(short, long, default_value = palette_css::DEFAULT_OUTPUT)]
        output: PathBuf,
    },

    /// Check a palette for errors without writing output
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the stylesheet fragment to stdout
    Print {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Input palette .json file
    #[arg(short, long, default_value = palette_css::DEFAULT_INPUT)]
    input: PathBuf,

    /// Top-level section holding the node classes
    #[arg(long, default_value = palette_doc::DEFAULT_ROOT)]
    root: String,

    /// Fail when two palette entries generate the same custom property
    #[arg(long)]
    strict: bool,
}

impl SourceArgs {
    fn into_config(self) -> Config {
        Config {
            input: self.input,
            root: self.root,
            collisions: if self.strict {
                CollisionPolicy::Strict
            } else {
                CollisionPolicy::Lenient
            },
            ..Config::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Build { source, output } => cmd_build(Config {
            output,
            ..source.into_config()
        }),
        Command::Check { source } => cmd_check(source.into_config()),
        Command::Print { source } => cmd_print(source.into_config()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_build(config: Config) -> Result<(), CssError> {
    let conversion = palette_css::convert(&config)?;
    report_collisions(&conversion);
    eprintln!(
        "Built: {} ({} declarations)",
        config.output.display(),
        conversion.declarations.len()
    );
    Ok(())
}

fn cmd_check(config: Config) -> Result<(), CssError> {
    let conversion = palette_css::check(&config)?;
    report_collisions(&conversion);
    eprintln!(
        "OK: {} ({} declarations)",
        config.input.display(),
        conversion.declarations.len()
    );
    Ok(())
}

fn cmd_print(config: Config) -> Result<(), CssError> {
    let conversion = palette_css::check(&config)?;
    report_collisions(&conversion);
    print!("{}", conversion.css());
    Ok(())
}

fn report_collisions(conversion: &Conversion) {
    for collision in &conversion.collisions {
        eprintln!("warning: {collision}");
    }
}
