use anyhow::Context;
use clap::{ArgAction, Parser};
use std::io;
use std::path::PathBuf;

use crate::classifier::Classifier;
use crate::cleaner;
use crate::config::Config;
use crate::disposition;
use crate::index::InstalledSoftwareIndex;
use crate::logging;
use crate::output::{self, OutputMode};
use crate::scanner::{self, ScanRoots};
use crate::sources::{HostInventory, SearchPath};
use crate::theme::Theme;

#[derive(Parser)]
#[command(name = "confsweep")]
#[command(version)]
#[command(about = "Find config folders left behind by uninstalled applications")]
#[command(
    long_about = "confsweep inspects the top-level folders in ~/.config, ~/.local/share and \
    the hidden folders in your home directory, matches each against installed packages, \
    executables on PATH, Flatpak apps, desktop entries and AppImages, and lists the ones \
    with no detectable owner.\n\n\
    You are then asked, folder by folder, to keep (K), delete (D), skip (S) or quit (Q). \
    Deletion is permanent."
)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print the orphaned section and prompts
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the report and exit without prompting
    #[arg(long)]
    pub no_prompt: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn run(self) -> anyhow::Result<()> {
        logging::init_logging(self.verbose);
        let mode = OutputMode::from_flags(self.quiet, self.verbose);

        let config = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        };
        let roots = ScanRoots::for_current_user()?;
        log::debug!("scan roots: {:?}", roots);

        let index = InstalledSoftwareIndex::build(
            &HostInventory::new(),
            &config.source_dirs(&roots.home),
            Box::new(SearchPath::from_env()),
        );
        let aliases = config.alias_table();
        let ignore = config.ignore_list(&roots);
        let classifier = Classifier::new(&index, &aliases);

        let report = scanner::scan(&roots, &classifier, &ignore, mode);
        output::print_report(&report, mode).context("Failed to write the report")?;

        let orphans = report.into_orphans();
        if orphans.is_empty() {
            println!("{}", Theme::success("No orphaned folders found. Nothing to clean up."));
            return Ok(());
        }
        if self.no_prompt {
            return Ok(());
        }

        let protected = roots.protected();
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let stdout = io::stdout();
        let mut out = stdout.lock();

        let summary = disposition::run(&orphans, &mut input, &mut out, |folder| {
            cleaner::delete_folder(folder, &protected)
        })
        .context("Failed to write to the terminal")?;

        output::write_disposition_summary(&mut out, &summary)
            .context("Failed to write to the terminal")?;
        Ok(())
    }
}
