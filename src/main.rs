//! CLI entry point for ohmbudsman.

mod cli;
mod cmd;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use ohmbudsman::ui;

fn main() {
    // Run on a thread with a known stack size; Windows defaults to 1MB.
    const STACK_SIZE: usize = 8 * 1024 * 1024; // 8 MB

    let thread = match std::thread::Builder::new()
        .stack_size(STACK_SIZE)
        .spawn(run)
    {
        Ok(thread) => thread,
        Err(err) => {
            ui::failure(&format!("failed to spawn main thread: {}", err));
            std::process::exit(1);
        }
    };

    match thread.join() {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            ui::failure(&format!("{:#}", err));
            std::process::exit(1);
        }
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is normal; only the variables matter.
    dotenvy::dotenv().ok();

    if cli.quiet {
        std::env::set_var(ui::QUIET_ENV, "1");
    }
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init { force } => cmd::init::cmd_init(force),
        Commands::Lint { file } => cmd::lint::cmd_lint(&file, config_path),
        Commands::Fetch { out, tag, hours } => {
            cmd::fetch::cmd_fetch(config_path, out.as_deref(), tag, hours)
        }
        Commands::Generate {
            articles,
            out,
            no_lint,
        } => cmd::generate::cmd_generate(config_path, articles.as_deref(), out.as_deref(), no_lint),
        Commands::Publish { file, subject } => {
            cmd::publish::cmd_publish(config_path, &file, subject)
        }
        Commands::Render { file, out_dir } => {
            cmd::render::cmd_render(config_path, &file, out_dir.as_deref())
        }
        Commands::Run {
            dry_run,
            no_lint,
            tag,
        } => cmd::run::cmd_run(config_path, dry_run, no_lint, tag),
        Commands::Snippets { file } => cmd::derive::cmd_snippets(config_path, &file),
        Commands::Podcast { file } => cmd::derive::cmd_podcast(config_path, &file),
        Commands::Assets { file, no_audio } => {
            cmd::assets::cmd_assets(config_path, &file, no_audio)
        }
        Commands::Audio { file } => cmd::assets::cmd_audio(config_path, &file),
        Commands::Metadata {
            file,
            pdf,
            social,
            audio,
        } => cmd::assets::cmd_metadata(config_path, &file, &pdf, &social, audio.as_deref()),
        Commands::Completion { shell } => cmd::util::cmd_completion(shell),
        Commands::Version => cmd::util::cmd_version(cli.verbose > 0),
    }
}
