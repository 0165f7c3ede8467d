//! Build script for tickboard-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time

use std::collections::HashSet;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIO pins on the RP2040
const GPIO_COUNT: i64 = 30;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds board.toml as its default configuration.    ║\n\
            ║  Please create one in the tickboard-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!("\nERROR: Failed to read board.toml: {}\n", e),
    };

    let config: toml::Value = match content.parse() {
        Ok(value) => value,
        Err(e) => panic!("\nERROR: board.toml is not valid TOML:\n{}\n", e),
    };

    let mut errors = Vec::new();
    validate_timing(&config, &mut errors);
    validate_pins(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

/// Timing values must be positive and leave room for eight samples per
/// debounce window
fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let timing = match config.get("timing") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[timing] must be a table".into());
            return;
        }
        None => return,
    };

    let get = |key: &str, default: i64, errors: &mut Vec<String>| match timing.get(key) {
        Some(toml::Value::Integer(v)) if *v > 0 => *v,
        Some(_) => {
            errors.push(format!("[timing] {} must be a positive integer", key));
            default
        }
        None => default,
    };

    let period = get("button_period_ms", 10, errors);
    let debounce = get("debounce_ms", 600, errors);
    let stuck = get("stuck_timeout_ms", 30_000, errors);
    get("heartbeat_ms", 1, errors);

    if debounce < period * 8 {
        errors.push("[timing] debounce_ms must cover 8 button periods".into());
    }
    if stuck <= debounce {
        errors.push("[timing] stuck_timeout_ms must exceed debounce_ms".into());
    }
}

/// Button and LED sections need a valid, unique pin each
fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    let mut used = HashSet::new();

    for (kind, max) in [("button", 8usize), ("led", 4usize)] {
        let sections = match config.get(kind) {
            Some(toml::Value::Table(t)) => t,
            Some(_) => {
                errors.push(format!("[{}] sections must be numbered tables", kind));
                continue;
            }
            None => continue,
        };

        if sections.len() > max {
            errors.push(format!("at most {} [{}.N] sections", max, kind));
        }

        for index in 0..sections.len() {
            let name = format!("{}.{}", kind, index);
            let pin = match sections.get(&index.to_string()) {
                Some(toml::Value::Table(t)) => t.get("pin"),
                _ => {
                    errors.push(format!("[{}] missing (sections must count from 0)", name));
                    continue;
                }
            };

            match pin.and_then(|p| p.as_str()).and_then(gpio_number) {
                Some(n) if !used.insert(n) => {
                    errors.push(format!("[{}] gpio{} already used", name, n));
                }
                Some(_) => {}
                None => errors.push(format!("[{}] pin must look like \"^!gpio3\"", name)),
            }
        }
    }
}

fn gpio_number(pin: &str) -> Option<i64> {
    let n: i64 = pin.trim_start_matches(['!', '^']).strip_prefix("gpio")?.parse().ok()?;
    (0..GPIO_COUNT).contains(&n).then_some(n)
}
