use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "titleforged")]
#[command(author, version, about = "Stream-title cleanup planner for media libraries")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decide whether a file needs its stream titles rewritten
    Plan {
        /// Media file to plan
        #[arg(required = true)]
        file: PathBuf,

        /// Read a saved `ffprobe -print_format json -show_format -show_streams`
        /// dump instead of running ffprobe
        #[arg(long, value_name = "DUMP")]
        from_json: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Output file for the ffmpeg command (default: <stem>.titleforged.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scan a directory and list files whose titles need processing
    Scan {
        /// Library directory to scan
        #[arg(required = true)]
        dir: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the title rules over a single title
    Rewrite {
        /// Title to rewrite
        title: String,

        /// JSON rule array to use instead of the configured rules
        #[arg(long)]
        rules: Option<String>,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
