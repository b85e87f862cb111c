//! List collection templates.

use anyhow::Result;
use colored::Colorize;
use vectordash::prelude::*;

pub fn run() -> Result<()> {
    println!("{} Collection templates:", "→".blue());
    println!();

    for template in TEMPLATES {
        let (_, preset) = template.chunk_settings();
        println!(
            "  {} {}",
            template.id.white().bold(),
            format!("({})", template.name).dimmed()
        );
        println!("      {}", template.description);
        println!(
            "      chunk size: {}  overlap: {}",
            preset.size.to_string().cyan(),
            preset.overlap.to_string().cyan()
        );
    }

    println!();
    println!(
        "{} {} templates",
        "✓".green(),
        TEMPLATES.len().to_string().cyan()
    );

    Ok(())
}
