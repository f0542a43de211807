//! Local environment report.

use colored::Colorize;
use serde::Serialize;
use xldm_config::{ConfigSource, DatabaseConfig};
use xldm_inspect::SUPPORTED_EXTENSIONS;

/// One prerequisite and whether it is met
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub name: String,
    pub recommended: String,
    pub satisfied: bool,
}

/// Tool, platform and configuration status
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentReport {
    pub tool_version: &'static str,
    pub rust_version: &'static str,
    pub os: &'static str,
    pub arch: &'static str,
    pub supported_formats: &'static [&'static str],
    pub requirements: Vec<Requirement>,
}

impl EnvironmentReport {
    /// Collect the report for the given configuration.
    pub fn collect(source: &ConfigSource) -> Self {
        let defaults = DatabaseConfig::default();

        let mut requirements = vec![Requirement {
            name: ".env file".to_string(),
            recommended: "present".to_string(),
            satisfied: source.has_defaults_file(),
        }];

        for (key, recommended) in [
            ("DB_HOST", defaults.host.as_str()),
            ("DB_USER", defaults.user.as_str()),
            ("DB_NAME", defaults.name.as_str()),
            ("DB_PASSWORD", "(non-empty)"),
        ] {
            requirements.push(Requirement {
                name: key.to_string(),
                recommended: recommended.to_string(),
                satisfied: source.get(key).is_some(),
            });
        }

        Self {
            tool_version: env!("CARGO_PKG_VERSION"),
            rust_version: env!("CARGO_PKG_RUST_VERSION"),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            supported_formats: SUPPORTED_EXTENSIONS,
            requirements,
        }
    }

    pub fn all_satisfied(&self) -> bool {
        self.requirements.iter().all(|r| r.satisfied)
    }

    /// Requirements that are not met
    pub fn missing(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter().filter(|r| !r.satisfied)
    }
}

/// Print the report to stdout.
pub fn print_report(report: &EnvironmentReport) {
    let rule = "=".repeat(50);
    println!("{rule}");
    println!("{}", "Environment report".cyan().bold());
    println!("{rule}");

    println!("\nxldm version: {}", report.tool_version);
    if !report.rust_version.is_empty() {
        println!("Minimum Rust version: {}", report.rust_version);
    }
    println!("Operating system: {} ({})", report.os, report.arch);
    println!("Spreadsheet formats: {}", report.supported_formats.join(", "));

    println!("\nRequirements:");
    for requirement in &report.requirements {
        let status = if requirement.satisfied {
            "ok".green()
        } else {
            "missing".red()
        };
        println!(
            "- {} (recommended: {}): {status}",
            requirement.name, requirement.recommended
        );
    }

    if report.all_satisfied() {
        println!("\n{}", "All requirements met".green());
    } else {
        println!(
            "\n{} requirement(s) missing",
            report.missing().count().to_string().red().bold()
        );
    }

    println!("\n{rule}");
}
