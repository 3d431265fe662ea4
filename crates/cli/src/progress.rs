//! Progress reporting and summary output for the CLI

use std::path::Path;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use trfreq_core::{Progress, ReviseStats, SortStats};

/// Progress reporter with a byte bar and a stats line
pub struct ProgressReporter {
    _multi: MultiProgress,
    main_bar: ProgressBar,
    stats_bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a reporter for an input of `total_bytes`, or a spinner when the
    /// size is unknown
    pub fn new(label: &str, total_bytes: Option<u64>) -> Self {
        let multi = MultiProgress::new();

        let main_bar = match total_bytes {
            Some(total) => {
                let bar = multi.add(ProgressBar::new(total));
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{prefix:>7} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("█▓▒░-"),
                );
                bar
            }
            None => {
                let bar = multi.add(ProgressBar::new_spinner());
                bar.set_style(
                    ProgressStyle::default_spinner()
                        .template("{prefix:>7} [{elapsed_precise}] {spinner} {bytes} ({bytes_per_sec}) {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        main_bar.set_prefix(label.to_string());

        let stats_bar = multi.add(ProgressBar::new(0));
        stats_bar.set_style(
            ProgressStyle::default_bar()
                .template("  Stats: {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        Self {
            _multi: multi,
            main_bar,
            stats_bar,
        }
    }

    /// Update progress with a stage snapshot
    pub fn update(&self, progress: &Progress) {
        self.main_bar.set_position(progress.bytes_processed);
        self.main_bar.set_message("Processing...");
        self.stats_bar.set_message(stats_message(progress));
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        self.main_bar.finish_with_message("Complete!");
        self.stats_bar.finish();
    }
}

fn stats_message(progress: &Progress) -> String {
    if progress.lines == 0 {
        return "0 lines".to_string();
    }
    format!(
        "{} lines | {} kept ({:.1}%) | {} dropped ({:.1}%)",
        format_number(progress.lines),
        format_number(progress.kept),
        (progress.kept as f64 / progress.lines as f64) * 100.0,
        format_number(progress.dropped),
        (progress.dropped as f64 / progress.lines as f64) * 100.0
    )
}

/// Format large numbers in compact form
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

fn print_header(title: &str, input: &Path, output: Option<&Path>) {
    println!("\n{}", "═".repeat(60));
    println!("{}", title);
    println!("{}", "═".repeat(60));
    println!("Input:              {}", input.display());

    if let Some(output_path) = output {
        println!("Output:             {}", output_path.display());
    } else {
        println!("Output:             (dry run - no output written)");
    }
}

/// Print a formatted corpus sorter report
pub fn print_sort_report(input: &Path, output: Option<&Path>, stats: &SortStats) {
    let total = stats.lines_read;
    print_header("Corpus Sort Complete", input, output);
    println!("Lines read:         {}", format_with_commas(total));
    println!("Blank/short lines:  {}", format_with_commas(stats.short_lines));
    if stats.malformed_lines > 0 {
        println!("Malformed skipped:  {}", format_with_commas(stats.malformed_lines));
    }
    println!(
        "Non-alphabetic:     {} ({:.1}%)",
        format_with_commas(stats.non_alphabetic),
        percent(stats.non_alphabetic, total)
    );
    println!(
        "Too rare:           {} ({:.1}%)",
        format_with_commas(stats.below_min_frequency),
        percent(stats.below_min_frequency, total)
    );
    println!(
        "Words kept:         {} ({:.1}%)",
        format_with_commas(stats.accepted),
        percent(stats.accepted, total)
    );
    println!("{}", "═".repeat(60));
}

/// Print a formatted alphabet reviser report
pub fn print_revise_report(input: &Path, output: Option<&Path>, stats: &ReviseStats) {
    let total = stats.rows_read;
    print_header("Alphabet Revision Complete", input, output);
    println!("Rows read:          {}", format_with_commas(total));
    if stats.blank_lines > 0 {
        println!("Blank lines:        {}", format_with_commas(stats.blank_lines));
    }
    if stats.malformed_lines > 0 {
        println!("Malformed skipped:  {}", format_with_commas(stats.malformed_lines));
    }
    println!(
        "Outside alphabet:   {} ({:.1}%)",
        format_with_commas(stats.rejected),
        percent(stats.rejected, total)
    );

    let top = stats.top_rejected_chars(5);
    if !top.is_empty() {
        let listed: Vec<String> = top
            .iter()
            .map(|(c, count)| format!("{:?} ×{}", c, format_with_commas(*count)))
            .collect();
        println!("Top offenders:      {}", listed.join(", "));
    }

    println!(
        "Words kept:         {} ({:.1}%)",
        format_with_commas(stats.accepted),
        percent(stats.accepted, total)
    );
    println!("{}", "═".repeat(60));
}

/// Format number with thousand separators
fn format_with_commas(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
