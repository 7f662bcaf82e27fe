//! Build script for the sporlmix CLI.
//!
//! Copies the `.env.example` configuration template into the user's local data
//! directory so a ready-to-edit example sits next to the `.env` file the
//! application reads at startup.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into the sporlmix data directory.
///
/// # File Operations
///
/// ## Source Location
/// `.env.example` in the crate root (where Cargo.toml resides).
///
/// ## Destination Location
/// - Linux: `~/.local/share/sporlmix/.env.example`
/// - macOS: `~/Library/Application Support/sporlmix/.env.example`
/// - Windows: `%LOCALAPPDATA%/sporlmix/.env.example`
///
/// # Error Handling
///
/// A missing template only emits a `cargo:warning`. Failing to create the
/// target directory or to write the copy fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("sporlmix");
    fs::create_dir_all(&out_dir)?;

    if template.is_file() {
        let contents = fs::read_to_string(&template)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
