use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use querymon::classify::{classify_report, ReportKind};
use querymon::{allowlist, excel, pipeline, prompt, utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    let outcome = run(&args);
    if let Err(e) = &outcome {
        error!(action = "abort", component = "main", error = %e, "Run failed");
        eprintln!("\nERROR: {e:#}");
    }

    if !args.no_wait {
        prompt::pause();
    }

    if outcome.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    info!(
        action = "start",
        component = "main",
        version = env!("CARGO_PKG_VERSION"),
        "Starting query report analysis"
    );

    let input_file = match &args.file {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file not found at {:?}", path);
            }
            path.clone()
        }
        None => match prompt::select_excel_file(Path::new("."))? {
            Some(path) => path,
            None => return Ok(()),
        },
    };

    println!("\nLoading data...");
    let dataset = excel::load_dataset(&input_file)?;

    if classify_report(&dataset.columns) == ReportKind::Unsupported {
        anyhow::bail!(
            "This is not a query demand report. Only search query exports \
             from Yandex.Webmaster are supported."
        );
    }

    let site_url = match &args.site {
        Some(site) => site.trim().to_string(),
        None => prompt::prompt_site_url()?,
    };
    if site_url.is_empty() {
        anyhow::bail!("Site address must not be empty");
    }

    let domain = utils::domain_from_site_url(&site_url);
    info!(action = "resolve", component = "main", domain = %domain, "Analyzing domain");

    let allow_list = allowlist::load_allow_list(args.urls.as_deref())?;

    println!("\nProcessing data...");
    let report =
        pipeline::process_query_report(&dataset, &site_url, &domain, allow_list.as_ref())?;

    let output_dir = input_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let output_file = output_dir.join(excel::output_file_name(&domain));

    println!("\nSaving results...");
    excel::save_report(&output_file, &report)?;

    println!("\n{}", "=".repeat(50));
    println!("[OK] Report saved to {}", output_file.display());
    println!(
        "[OK] Clean queries processed: {}",
        utils::format_number(report.clean.len() as u64)
    );
    println!(
        "[OK] URL-like queries filtered: {}",
        utils::format_number(report.filtered.len() as u64)
    );
    println!("{}", "=".repeat(50));

    info!(action = "complete", component = "main", "Run finished successfully");
    Ok(())
}
