//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# ng-forever configuration
# See https://github.com/ng-forever/ng-forever for documentation

[scanner]
# Root directory to scan (default: current directory)
# root = "./src"

# Skip commented code instead of flagging it
skip_commented = false

# Print fix suggestions for rules that found issues
show_fix_suggestions = true

# Write an HTML report into the scanned directory
export_report = false

# Glob patterns to exclude, in addition to node_modules, .git and dist
exclude = [
    "**/coverage/**",
]

# Framework version override; omit to detect it from package.json
# framework_version = "17.0.0"

[rules.ng-for-track-by]
enabled = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("ng-forever.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created ng-forever.toml");
    println!("\nNext steps:");
    println!("  1. Edit ng-forever.toml to configure the scanner");
    println!("  2. Run: ng-forever scan");

    Ok(())
}
