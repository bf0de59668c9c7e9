//! Build script for oledfb-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

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

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml before it is embedded in the image
fn validate_config() {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Failed to read panel.toml                                ║\n\
            ║                                                                  ║\n\
            ║  Error: {:<56} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            e
        ),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid TOML syntax in panel.toml                        ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n\
            {}",
            e
        ),
    };

    let mut errors = Vec::new();
    check_range(&config, "display", "width", 1, 128, &mut errors);
    check_range(&config, "display", "height", 1, 64, &mut errors);
    check_range(&config, "display", "contrast", 0, 255, &mut errors);
    check_range(&config, "i2c", "address", 0, 0x7F, &mut errors);

    if let Some(mode) = config.get("display").and_then(|d| d.get("flush_mode")) {
        match mode.as_str() {
            Some("per_byte") | Some("stream") => {}
            _ => errors.push("[display] flush_mode must be \"per_byte\" or \"stream\"".to_string()),
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in panel.toml                             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n\
            {}",
            errors.join("\n")
        );
    }

    println!("cargo:warning=panel.toml validated successfully");
}

/// Check an optional integer key lies within `min..=max`
fn check_range(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    let Some(value) = config.get(section).and_then(|s| s.get(key)) else {
        return;
    };
    match value.as_integer() {
        Some(v) if (min..=max).contains(&v) => {}
        _ => errors.push(format!("[{}] {} must be an integer in {}..={}", section, key, min, max)),
    }
}
