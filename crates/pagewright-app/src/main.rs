// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagewright — source code to PDF converter with a managed PDF library.
//
// Entry point. Initialises logging and backend services, then runs a single
// command.

mod cli;
mod services;

use std::process::ExitCode;

use clap::Parser;
use pagewright_core::error::{PagewrightError, Result};
use pagewright_core::human_errors::humanize_error;

use cli::{Cli, Command, ConfigArgs};
use services::app_services::AppServices;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    tracing::debug!("Pagewright starting");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => pagewright_library::data_dir()?,
    };
    let mut svc = AppServices::init(data_dir)?;

    match cli.command {
        Command::Convert { input, file_type } => {
            let out = svc.convert(&input, &file_type)?;
            println!("{}", out.display());
        }
        Command::List => {
            for entry in svc.list_pdfs()? {
                println!("{:>10}  {}", human_size(entry.size_bytes), entry.filename);
            }
        }
        Command::Delete { name } => {
            svc.delete_pdf(&name)?;
            println!("Deleted {name}");
        }
        Command::SetRoot { path } => {
            let root = svc.set_root(&path)?;
            println!("{}", root.display());
        }
        Command::Root => println!("{}", svc.root().display()),
        Command::Types => {
            for spec in svc.file_types() {
                println!("{:<6} {}", spec.key(), spec.label);
            }
        }
        Command::Info { name } => {
            let (entry, pages) = svc.pdf_info(&name)?;
            println!("File:     {}", entry.filename);
            println!("Path:     {}", entry.path.display());
            println!("Size:     {}", human_size(entry.size_bytes));
            if let Some(modified) = entry.modified {
                println!("Modified: {}", modified.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            println!("Pages:    {pages}");
        }
        Command::Config(args) => configure(&mut svc, args)?,
    }
    Ok(())
}

fn configure(svc: &mut AppServices, args: ConfigArgs) -> Result<()> {
    if !args.is_empty() {
        let mut config = svc.config().clone();
        if let Some(header) = args.header {
            config.header_text = header;
        }
        if let Some(theme) = args.theme {
            config.theme = theme.into();
        }
        if let Some(paper) = args.paper {
            config.paper_size = paper.into();
        }
        if let Some(size) = args.font_size {
            config.font_size_pt = size;
        }
        if let Some(font) = args.font {
            config.custom_font = Some(font);
        }
        if args.builtin_font {
            config.custom_font = None;
        }
        if let Some(indent) = args.indent {
            config.code_indent = indent;
        }
        svc.save_config(config)?;
    }

    let json = serde_json::to_string_pretty(svc.config())?;
    println!("{json}");
    Ok(())
}

fn report(err: &PagewrightError) {
    let human = humanize_error(err);
    eprintln!("error: {}", human.message);
    if !human.suggestion.is_empty() {
        eprintln!("  {}", human.suggestion);
    }
    tracing::debug!(error = %err, kind = ?err.kind(), "command failed");
}

fn human_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    match bytes {
        b if b >= MIB => format!("{:.1} MiB", b as f64 / MIB as f64),
        b if b >= KIB => format!("{:.1} KiB", b as f64 / KIB as f64),
        b => format!("{b} B"),
    }
}
