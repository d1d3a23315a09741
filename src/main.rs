use anyhow::Result;
use clap::Parser;
use std::path::Path;

use go_bump::config::{self, Config};
use go_bump::fetch;
use go_bump::git_ops::GitRepo;
use go_bump::listing::HtmlListing;
use go_bump::makefile;
use go_bump::resolver::{self, ResolutionRequest};
use go_bump::ui;

#[derive(clap::Parser)]
#[command(
    name = "go-bump",
    about = "Update the Go toolchain version and source hash in the build Makefile"
)]
struct Args {
    #[arg(help = "Explicit target version (e.g. 1.24.6); latest for the branch line when omitted")]
    target: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("go-bump {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let makefile_path = Path::new(&config.makefile);

    // Read the version the pipeline is currently pinned to
    let current_vars = match makefile::read_vars(makefile_path) {
        Ok(vars) => vars,
        Err(e) => {
            ui::display_error(&format!("Cannot read current version: {}", e));
            std::process::exit(1);
        }
    };
    let current = current_vars.current_version();
    ui::display_status(&format!("Current version: {}", current));

    // Determine the target: explicit argument, or latest for the branch line
    let target = match args.target {
        Some(version) => {
            ui::display_status(&format!("Target version: {} (explicit)", version));
            version
        }
        None => match resolve_target_from_branch(&config) {
            Ok(version) => version,
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        },
    };

    if current == target {
        ui::display_success("Already up to date");
        return Ok(());
    }

    ui::display_proposed_update(&current, &target);

    // Confirm the archive exists, then stream it through the hasher
    let archive_url = config.archive_url_for(&target);
    if let Err(e) = fetch::probe(&archive_url, config.fetch_timeout()) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    ui::display_status(&format!("Downloading {} to compute hash...", archive_url));
    let hash = match fetch::checksum(&archive_url, config.download_timeout()) {
        Ok(hash) => hash,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    ui::display_status(&format!("New hash: {}", hash));

    if args.dry_run {
        let (major_minor, patch) = match makefile::split_target(&target) {
            Ok(parts) => parts,
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        };
        println!("\n\x1b[1m[DRY RUN] Planned changes:\x1b[0m");
        ui::display_planned_vars(&makefile::MakefileVars {
            major_minor,
            patch,
            hash,
        });
        println!("Dry run mode, file not modified");
        return Ok(());
    }

    // The rewrite is the only mutating step; everything fallible ran already
    let written = match makefile::write(makefile_path, &target, &hash) {
        Ok(written) => written,
        Err(e) => {
            ui::display_error(&format!("Makefile update failed: {}", e));
            std::process::exit(1);
        }
    };

    ui::display_status(&format!(
        "Backed up original to {}",
        makefile::backup_path(makefile_path).display()
    ));
    println!("Updated Makefile:");
    ui::display_planned_vars(&written);
    ui::display_success(&format!("Updated Go from {} to {}", current, target));

    Ok(())
}

/// Derives the target line from the checked-out branch and resolves the
/// latest release for it from the listing page.
fn resolve_target_from_branch(config: &Config) -> go_bump::Result<String> {
    let repo = GitRepo::new()?;
    let branch = repo.current_branch()?;
    ui::display_status(&format!("Current branch: {}", branch));

    // Branch shape is checked before any network call is made
    let line = resolver::line_from_branch(&branch).ok_or_else(|| {
        go_bump::GoBumpError::parse(format!(
            "branch '{}' does not match the expected format (<minor>.x)",
            branch
        ))
    })?;
    ui::display_status(&format!("Target line: {}", line));

    let request = ResolutionRequest::new(line.as_str(), config.allows_prerelease(&line));
    if request.allow_prerelease {
        ui::display_status(&format!("Line {} allows beta/rc versions", line));
    }

    ui::display_status(&format!("Looking up the latest release for {}...", line));
    let html = fetch::fetch_listing(&config.listing_url, config.fetch_timeout())?;
    let listing = HtmlListing::parse(&html);
    let latest = resolver::resolve(&request, &listing)?;
    ui::display_status(&format!("Latest release for {}: {}", line, latest));

    Ok(latest.to_string())
}
