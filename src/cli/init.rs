use crate::config::DEFAULT_CONFIG_FILE;
use crate::{Context, Result};
use colored::Colorize;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# repowatch configuration

# Directory for the state file and append-only logs
log_dir = "logs"

# File whose reported modification time is the update signal
filename = "Packages.gz"

# "baseline" records a first sighting quietly; "announce" treats it as an update
first_seen = "baseline"

# Minutes between cycles in watch mode
interval_minutes = 30

# Pause between target requests within a cycle
request_delay_secs = 1

[[targets]]
name = "noble-main"
url = "https://archive.ubuntu.com/ubuntu/dists/noble/main/binary-amd64/"

[[targets]]
name = "noble-updates"
url = "https://archive.ubuntu.com/ubuntu/dists/noble-updates/main/binary-amd64/"

[[targets]]
name = "noble-security"
url = "https://archive.ubuntu.com/ubuntu/dists/noble-security/main/binary-amd64/"
"#;

/// Write a starter configuration file
pub fn run(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{}",
        format!("✅ Wrote starter config to {}", path.display()).green()
    );
    println!("Edit the [[targets]] list, then run 'repowatch check'.");

    Ok(())
}
