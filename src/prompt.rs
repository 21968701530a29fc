use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Lists xlsx files in `dir`, skipping Excel `~$` lock files, sorted by name.
pub fn list_excel_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory {dir:?}"))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension().and_then(|ext| ext.to_str()) == Some("xlsx")
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| !name.starts_with("~$"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Interactive file picker over the xlsx files in `dir`. Returns `None` when
/// there is nothing to pick or stdin is closed.
pub fn select_excel_file(dir: &Path) -> Result<Option<PathBuf>> {
    let files = list_excel_files(dir)?;

    if files.is_empty() {
        println!("No Excel files found in the current directory.");
        return Ok(None);
    }

    println!("\nAvailable Excel files:");
    for (i, file) in files.iter().enumerate() {
        println!("[{}] {}", i + 1, file.display());
    }

    loop {
        print!("\nSelect a file number: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match line.trim().parse::<usize>() {
            Ok(choice) if (1..=files.len()).contains(&choice) => {
                let selected = files[choice - 1].clone();
                info!(action = "select", component = "file_picker", file_path = ?selected, "File selected");
                return Ok(Some(selected));
            }
            Ok(_) => println!("Invalid number. Try again."),
            Err(_) => println!("Enter a number."),
        }
    }
}

pub fn prompt_site_url() -> Result<String> {
    print!("\nEnter the site address in the form https://site.ru: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// End-of-run pause so a double-clicked console window does not vanish.
pub fn pause() {
    print!("\nPress Enter to exit...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
}
