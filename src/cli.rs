//! CLI argument definitions for ohmbudsman.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ohmbudsman")]
#[command(version)]
#[command(about = "Daily Disguised-SNAP digests from Readwise to Buttondown", long_about = None)]
#[command(
    after_help = "GETTING STARTED:\n    ohmbudsman init             Write .ohmbudsman/config.md and the default prompt\n    ohmbudsman run --dry-run    Fetch, summarize and lint without publishing\n\n    Tokens are read from READWISE_TOKEN, OPENAI_API_KEY and BUTTONDOWN_TOKEN (a .env file works too)."
)]
pub struct Cli {
    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project config file (default: .ohmbudsman/config.md)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize ohmbudsman in the current directory
    Init {
        /// Overwrite existing config and prompt files
        #[arg(long)]
        force: bool,
    },
    /// Check a digest against the Disguised-SNAP structure rules
    ///
    /// Front matter is skipped. Exits non-zero on the first violation.
    Lint {
        /// Markdown file to check
        file: PathBuf,
    },
    /// Fetch recent articles from Readwise Reader and save them as JSON
    Fetch {
        /// Output file (default: <output_dir>/articles.json)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Reader tag to filter on (overrides config and READWISE_TAG)
        #[arg(long)]
        tag: Option<String>,
        /// Look back this many hours (overrides config)
        #[arg(long)]
        hours: Option<u32>,
    },
    /// Summarize articles into a digest and write digest_output.md
    Generate {
        /// Summarize a saved article list instead of fetching
        #[arg(long, value_name = "FILE")]
        articles: Option<PathBuf>,
        /// Output directory (overrides config)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Write the digest even if it fails lint
        #[arg(long)]
        no_lint: bool,
    },
    /// Create a Buttondown draft from a digest file
    Publish {
        /// Digest markdown file
        file: PathBuf,
        /// Email subject (default: "<title> — <date>")
        #[arg(long)]
        subject: Option<String>,
    },
    /// Render a digest to PDF with pandoc
    Render {
        /// Digest markdown file
        file: PathBuf,
        /// Output directory (overrides config)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Run the full pipeline: fetch, summarize, lint, write, publish
    Run {
        /// Stop after writing the digest; do not publish
        #[arg(long)]
        dry_run: bool,
        /// Skip the lint gate
        #[arg(long)]
        no_lint: bool,
        /// Reader tag to filter on (overrides config and READWISE_TAG)
        #[arg(long)]
        tag: Option<String>,
    },
    /// Generate social media snippets from a digest
    Snippets {
        /// Digest markdown file
        file: PathBuf,
    },
    /// Generate a podcast script from a digest
    Podcast {
        /// Digest markdown file
        file: PathBuf,
    },
    /// Build every asset for a digest: PDF, snippets, podcast script, audio, index row
    ///
    /// Audio is skipped with a warning when ELEVENLABS_API_KEY is not set.
    Assets {
        /// Digest markdown file
        file: PathBuf,
        /// Do not synthesize audio even when a key is available
        #[arg(long)]
        no_audio: bool,
    },
    /// Synthesize a podcast script to MP3 with ElevenLabs
    Audio {
        /// Podcast script text file
        file: PathBuf,
    },
    /// Append a digest and its assets to metadata/content_index.csv
    Metadata {
        /// Digest markdown file
        file: PathBuf,
        /// Rendered PDF
        #[arg(long, value_name = "FILE")]
        pdf: PathBuf,
        /// Social snippets JSON
        #[arg(long, value_name = "FILE")]
        social: PathBuf,
        /// Podcast MP3, if one was made
        #[arg(long, value_name = "FILE")]
        audio: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Show version information (add -v for commit and build date)
    Version,
}
