// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet mode drops everything below error; otherwise RUST_LOG wins,
    // defaulting to info.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("error")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Copy {
            func,
            src,
            alias,
            force,
            bash,
            dir,
        }) => commands::cmd_copy(&func, &src, alias.as_deref(), force, bash, &dir),
        Some(Commands::Insert {
            func,
            src,
            yes,
            force,
            dir,
        }) => commands::cmd_insert(&func, &src, yes, force, &dir),
        Some(Commands::Done { func, dir }) => commands::cmd_done(&func, &dir),
        Some(Commands::Clean { force, dir }) => commands::cmd_clean(force, &dir),
        Some(Commands::Spy { func, src }) => commands::cmd_spy(&func, &src),
        Some(Commands::Extract {
            func,
            src,
            force,
            dir,
        }) => commands::cmd_extract(&func, &src, force, &dir),
        Some(Commands::Check { func, dir }) => {
            let changed = commands::cmd_check(&func, &dir)?;
            if !changed {
                // Legacy exit convention: 0 when changes exist, 1 when
                // the pair is identical.
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::Meta { file, field, dir }) => {
            commands::cmd_meta(&file, field.as_deref(), &dir)
        }
        Some(Commands::Flag {
            func,
            new,
            src,
            dir,
        }) => commands::cmd_flag(&func, &new, &src, &dir),
        Some(Commands::Point { new, src, dir }) => commands::cmd_point(&new, &src, &dir),
        Some(Commands::Where { func, src, bash }) => commands::cmd_where(&func, &src, bash),
        Some(Commands::Ls { src, bash }) => commands::cmd_ls(&src, bash),
        Some(Commands::Find { pattern, src, bash }) => commands::cmd_find(&pattern, &src, bash),
        None => {
            println!("funcx v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'funcx --help' for usage information");
            Ok(())
        }
    }
}
