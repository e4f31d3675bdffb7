use anyhow::Result;
use clap::{Parser, Subcommand};
use slang_extract::commands;
use slang_extract::commands::extract::ExtractOptions;
use slang_extract::fs::RealFileSystem;
use slang_extract::logging::ConsoleLogger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slang-extract")]
#[command(author, version, about = "Extract Dart string literals into slang translation keys", long_about = None)]
struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add the slang packages, create slang.yaml and a base translation file
    Init,

    /// Extract the string literal at a source position into a translation key
    Extract {
        /// Dart source file containing the literal
        #[arg(short, long)]
        file: PathBuf,

        /// 1-based line of the cursor position
        #[arg(short, long)]
        line: usize,

        /// 1-based column of the cursor position
        #[arg(short, long)]
        column: usize,

        /// Translation key (prompted for when omitted)
        #[arg(short, long)]
        key: Option<String>,

        /// Replace with `Class.of(context)` access instead of the translate variable
        #[arg(long)]
        use_context: bool,

        /// Print what would change without touching any file
        #[arg(long)]
        dry_run: bool,

        /// Skip running the generator after the merge
        #[arg(long)]
        no_generate: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let fs = RealFileSystem;
    let logger = ConsoleLogger;

    match cli.command {
        Commands::Init => commands::init::run(&root, &fs, &logger),
        Commands::Extract {
            file,
            line,
            column,
            key,
            use_context,
            dry_run,
            no_generate,
        } => {
            let options = ExtractOptions {
                file,
                line,
                column,
                key,
                use_context,
                dry_run,
                no_generate,
            };
            commands::extract::run(&root, &options, &fs, &logger)
        }
    }
}
