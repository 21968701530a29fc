use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "querymon",
    about = "Analyze search query reports exported from Yandex.Webmaster",
    version,
    long_about = None
)]
pub struct Args {
    /// Path to the xlsx report exported from Yandex.Webmaster
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Site address in the form https://site.ru
    #[arg(short, long)]
    pub site: Option<String>,

    /// Path to an allow-list file with one page URL per line
    #[arg(long)]
    pub urls: Option<PathBuf>,

    /// Do not wait for Enter before exiting (for automation)
    #[arg(long)]
    pub no_wait: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
