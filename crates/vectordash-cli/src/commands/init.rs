//! Initialize a new vectordash project.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing vectordash project...", "→".blue());
    init_at(&base_path)?;

    println!();
    println!("{} vectordash project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} vectordash templates", "1.".blue());
    println!("  {} vectordash chunk <documents> --template knowledge_base", "2.".blue());
    println!("  {} vectordash compare a.json b.json", "3.".blue());

    Ok(())
}

/// Create the data directory, config file and .gitignore under `base_path`.
fn init_at(base_path: &Path) -> Result<()> {
    // Create .vectordash directory
    let data_dir = base_path.join(".vectordash");
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    println!("  {} Created {}", "✓".green(), data_dir.display());

    // Create default config
    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        Config::default().save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    // Keep the local history out of version control
    let gitignore_path = data_dir.join(".gitignore");
    if !gitignore_path.exists() {
        std::fs::write(&gitignore_path, "history.json\n")
            .with_context(|| format!("Failed to write {}", gitignore_path.display()))?;
        println!("  {} Created {}", "✓".green(), gitignore_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_project_files() {
        let dir = tempfile::tempdir().unwrap();
        init_at(dir.path()).unwrap();

        assert!(dir.path().join(".vectordash").is_dir());
        assert!(dir.path().join(CONFIG_FILE).is_file());
        let ignore = std::fs::read_to_string(dir.path().join(".vectordash/.gitignore")).unwrap();
        assert_eq!(ignore, "history.json\n");

        // Running again keeps the existing files.
        init_at(dir.path()).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_gitignore_write_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join(".vectordash");
        std::fs::create_dir_all(&data_dir).unwrap();
        // Dangling link: reported as missing, but writing through it fails.
        std::os::unix::fs::symlink(dir.path().join("missing/target"), data_dir.join(".gitignore"))
            .unwrap();

        let err = init_at(dir.path()).unwrap_err();
        assert!(err.to_string().contains(".gitignore"), "{err}");
    }
}
