// Terminal output helpers shared by the commands.
use colored::Colorize;
use promscan_metrics::Tally;

pub fn print_header(text: &str) {
    println!("\n{}", text.bold().cyan());
    println!("{}", "=".repeat(text.len()).cyan());
}

pub fn print_error(text: &str) {
    println!("{} {}", "✗".red().bold(), text.red());
}

pub fn print_warning(text: &str) {
    println!("{} {}", "⚠".yellow().bold(), text.yellow());
}

/// The outcome counters go to stderr so the inventory on stdout stays
/// pipeable.
pub fn print_tally(tally: &Tally) {
    eprintln!("Skipped:    {}", tally.skipped);
    eprintln!("Succeeded:  {}", tally.succeeded);
    eprintln!("Failed:     {}", tally.failed);
}
