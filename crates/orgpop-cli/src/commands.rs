use crate::args::Cli;
use crate::event_loop;
use crate::render::MonthView;
use anyhow::Result;
use orgpop_runtime::config::expand_tilde;
use orgpop_runtime::{Config, build_index};

pub fn run(cli: Cli) -> Result<()> {
    // The coordinator decides once per invocation whether to proceed;
    // everything below only runs for the instance that keeps going.
    #[cfg(unix)]
    let lock = if cli.toggle {
        use orgpop_runtime::instance::{self, Acquired};

        match instance::acquire(instance::DEFAULT_INSTANCE_NAME)? {
            // Handled, no error: the running instance was told to close.
            Acquired::Signaled => return Ok(()),
            Acquired::Primary(lock) => Some(lock),
        }
    } else {
        None
    };

    #[cfg(not(unix))]
    if cli.toggle {
        anyhow::bail!("--toggle requires a Unix platform");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(&expand_tilde(path))?,
        None => Config::load()?,
    };
    if !cli.dirs.is_empty() {
        config.roots = cli.dirs.iter().map(|dir| expand_tilde(dir)).collect();
    }

    let report = build_index(&config)?;
    if cli.verbose {
        eprintln!(
            "orgpop: indexed {} events from {} files",
            report.index.event_count(),
            report.files_scanned
        );
    }

    let date = cli.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let view = MonthView::build(&report.index, date, cli.placement());

    if !cli.tray {
        view.print(cli.format)?;
    }

    #[cfg(unix)]
    if cli.tray || lock.is_some() {
        event_loop::run(lock.as_ref())?;
    }

    #[cfg(not(unix))]
    if cli.tray {
        event_loop::run()?;
    }

    Ok(())
}
