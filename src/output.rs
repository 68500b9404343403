//! CLI output formatting for generation runs.
//!
//! # Output Format
//!
//! ## Single profile
//!
//! ```text
//! Settings
//!     Count: 50
//!     Length: 6-12
//!     Prefixes: off
//!     Adjusted: count must be at least 1 (got 0), using 100
//!
//! Stages
//!     Base forms: 9
//!     Combined: 33
//!     With years: 520
//!     Mutated: 20817
//!     In window: 9412
//!
//! Wrote 50 candidates → wordlist_20250307_090542.txt
//! ```
//!
//! `External` only appears when remote suggestions were requested, and the
//! `Augmented` / `Short by` lines only when the filtered pool was too small.
//!
//! ## Batch
//!
//! ```text
//! 001 alice (50 candidates)
//!     Seed: 1234567890
//!     Output: out/alice.txt
//! 002 bob (50 candidates)
//!     Seed: 987654321
//!     Output: out/bob.txt
//!
//! Wrote 2 wordlists, 100 candidates
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use std::path::Path;

use crate::config::{ConfigAdjustment, GenerationConfig};
use crate::generate::BatchOutput;
use crate::hydra::HydraPlan;
use crate::types::StageReport;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Single run
// ============================================================================

/// Effective settings plus every correction that produced them.
pub fn format_settings(config: &GenerationConfig, adjustments: &[ConfigAdjustment]) -> Vec<String> {
    let mut lines = vec![
        "Settings".to_string(),
        format!("{}Count: {}", indent(1), config.target_count()),
        format!(
            "{}Length: {}-{}",
            indent(1),
            config.min_length(),
            config.max_length()
        ),
        format!(
            "{}Prefixes: {}",
            indent(1),
            if config.apply_prefixes() { "on" } else { "off" }
        ),
    ];
    for adjustment in adjustments {
        lines.push(format!("{}Adjusted: {}", indent(1), adjustment));
    }
    lines
}

/// Print effective settings to stdout.
pub fn print_settings(config: &GenerationConfig, adjustments: &[ConfigAdjustment]) {
    for line in format_settings(config, adjustments) {
        println!("{}", line);
    }
}

/// Per-stage pool sizes.
pub fn format_stage_report(report: &StageReport, suggested: bool) -> Vec<String> {
    let mut lines = vec![
        "Stages".to_string(),
        format!("{}Base forms: {}", indent(1), report.base),
        format!("{}Combined: {}", indent(1), report.combined),
        format!("{}With years: {}", indent(1), report.with_years),
        format!("{}Mutated: {}", indent(1), report.mutated),
    ];
    if suggested {
        lines.push(format!("{}External: {}", indent(1), report.external));
    }
    lines.push(format!("{}In window: {}", indent(1), report.filtered));
    if let Some(augment) = &report.augment {
        lines.push(format!(
            "{}Augmented: {} affixed, {} random",
            indent(1),
            augment.affixed,
            augment.random
        ));
        if augment.remaining() > 0 {
            lines.push(format!("{}Short by: {}", indent(1), augment.remaining()));
        }
    }
    lines
}

/// Complete summary for a single-profile run.
pub fn format_generation_output(
    config: &GenerationConfig,
    adjustments: &[ConfigAdjustment],
    report: &StageReport,
    suggested: bool,
    output: &Path,
) -> Vec<String> {
    let mut lines = format_settings(config, adjustments);
    lines.push(String::new());
    lines.extend(format_stage_report(report, suggested));
    lines.push(String::new());
    lines.push(format!(
        "Wrote {} → {}",
        plural(report.selected, "candidate", "candidates"),
        output.display()
    ));
    lines
}

/// Print a single-profile summary to stdout.
pub fn print_generation_output(
    config: &GenerationConfig,
    adjustments: &[ConfigAdjustment],
    report: &StageReport,
    suggested: bool,
    output: &Path,
) {
    for line in format_generation_output(config, adjustments, report, suggested, output) {
        println!("{}", line);
    }
}

// ============================================================================
// Batch
// ============================================================================

/// One entry per job plus a total. `paths` is parallel to `outputs`.
pub fn format_batch_output<P: AsRef<Path>>(outputs: &[BatchOutput], paths: &[P]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut total = 0;
    for (i, (out, path)) in outputs.iter().zip(paths).enumerate() {
        let count = out.generation.candidates.len();
        total += count;
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            out.name,
            plural(count, "candidate", "candidates")
        ));
        lines.push(format!("{}Seed: {}", indent(1), out.seed));
        let remaining = out.generation.report.augment.map_or(0, |a| a.remaining());
        if remaining > 0 {
            lines.push(format!("{}Short by: {}", indent(1), remaining));
        }
        lines.push(format!("{}Output: {}", indent(1), path.as_ref().display()));
    }
    lines.push(String::new());
    lines.push(format!(
        "Wrote {}, {}",
        plural(outputs.len(), "wordlist", "wordlists"),
        plural(total, "candidate", "candidates")
    ));
    lines
}

/// Print a batch summary to stdout.
pub fn print_batch_output<P: AsRef<Path>>(outputs: &[BatchOutput], paths: &[P]) {
    for line in format_batch_output(outputs, paths) {
        println!("{}", line);
    }
}

// ============================================================================
// Hydra
// ============================================================================

/// Derived usernames and the composed command.
pub fn format_hydra_plan(plan: &HydraPlan) -> Vec<String> {
    let mut lines = vec![format!(
        "Usernames ({}) → {}",
        plan.usernames.len(),
        plan.users_path.display()
    )];
    for name in &plan.usernames {
        lines.push(format!("{}{}", indent(1), name));
    }
    lines.push(String::new());
    lines.push("Command".to_string());
    lines.push(format!("{}{}", indent(1), plan.command));
    lines.push(String::new());
    lines.push("Ensure you have legal authorization before executing this command.".to_string());
    lines
}

/// Print a hydra plan to stdout.
pub fn print_hydra_plan(plan: &HydraPlan) {
    for line in format_hydra_plan(plan) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
