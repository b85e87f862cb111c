//! Compare embeddings.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use vectordash::prelude::*;

use crate::input::read_vector;

pub fn run(first: &str, second: &str, dims: usize, seed: u64) -> Result<()> {
    let a = read_vector(first)?;
    let b = read_vector(second)?;

    let report = SimilarityReport::compute(&a, &b)?;
    println!(
        "{} {} vs {} ({} dimensions)",
        "→".blue(),
        first.cyan(),
        second.cyan(),
        a.len()
    );
    print_report(&report, &a, &b, dims, seed);

    Ok(())
}

pub fn show_norm(path: &str) -> Result<()> {
    let vector = read_vector(path)?;

    println!("{} {}", "→".blue(), path.cyan());
    println!("  Dimensions: {}", vector.len().to_string().cyan());
    println!("  Norm:       {}", format!("{:.6}", norm(&vector)).cyan());

    Ok(())
}

/// Print a similarity report and, when `dims > 0`, a sample of dimensions.
pub fn print_report(report: &SimilarityReport, a: &[f32], b: &[f32], dims: usize, seed: u64) {
    println!();
    println!(
        "  Similarity: {} {}",
        format!("{:.2}%", report.percent()).white().bold(),
        format!("(cosine {:.4})", report.score).dimmed()
    );
    println!("  Band:       {}", band_colored(report.band));
    println!("  {}", report.band.description());

    if dims > 0 {
        let picked = sample_dimensions(a.len(), dims, seed);
        println!();
        println!("  {:>6}  {:>10}  {:>10}", "dim", "first", "second");
        for pair in compare_dimensions(a, b, &picked) {
            println!(
                "  {}  {:>10.4}  {:>10.4}",
                format!("{:>6}", pair.dimension).blue(),
                pair.a,
                pair.b
            );
        }
    }
}

fn band_colored(band: SimilarityBand) -> ColoredString {
    match band {
        SimilarityBand::NearDuplicate | SimilarityBand::CloselyRelated => band.label().green(),
        SimilarityBand::SomeCommonThemes => band.label().yellow(),
        SimilarityBand::LooselyRelated | SimilarityBand::Unrelated => band.label().red(),
    }
}
