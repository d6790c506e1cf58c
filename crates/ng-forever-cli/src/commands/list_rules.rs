//! List rules command implementation.

use ng_forever_rules::{all_rules, Rule};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<20} {:<10} Description", "Name", "Extension");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<20} {:<10} {}",
            rule.name(),
            rule.file_extension(),
            rule.description()
        );
    }

    println!("\nRules can be disabled per project in ng-forever.toml:");
    println!("  [rules.ng-for-track-by]");
    println!("  enabled = false");
}
