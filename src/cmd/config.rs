// scm-adapter: read-only version-control repository adapter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands.

use crate::config::Config;
use crate::scm::registry::AdapterRegistry;

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display loaded configuration files.
pub fn run_inis_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}

/// Display registered repository backends with their aliases.
pub fn run_backends_command(registry: &AdapterRegistry) {
    for line in format_backends(registry) {
        println!("{line}");
    }
}

#[must_use]
pub fn format_backends(registry: &AdapterRegistry) -> Vec<String> {
    registry
        .kinds()
        .map(|kind| {
            let aliases: Vec<&str> = registry
                .aliases()
                .filter(|(_, target)| *target == kind)
                .map(|(alias, _)| alias)
                .collect();
            if aliases.is_empty() {
                kind.to_string()
            } else {
                format!("{kind} ({})", aliases.join(", "))
            }
        })
        .collect()
}
