//! Generates `version.rs` for `core::version`: the algorithm API version from
//! `[package.metadata]`, the build time and the short git hash.

use chrono::Utc;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Used when the manifest carries no readable `algorithm_api_version`
const FALLBACK_API_VERSION: u32 = 20250727;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let manifest = Path::new(&manifest_dir).join("Cargo.toml");
    let api_version = fs::read_to_string(&manifest)
        .ok()
        .and_then(|text| algorithm_api_version(&text))
        .unwrap_or_else(|| {
            println!(
                "cargo:warning=no package.metadata.algorithm_api_version, using {}",
                FALLBACK_API_VERSION
            );
            FALLBACK_API_VERSION
        });

    let generated = format!(
        "pub const ALGORITHM_API_VERSION: u32 = {};\npub const BUILD_TIME: &str = {:?};\npub const GIT_HASH: &str = {:?};\n",
        api_version,
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        git_hash().unwrap_or_else(|| "unknown".to_string()),
    );

    let out_dir = env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo");
    fs::write(Path::new(&out_dir).join("version.rs"), generated).expect("write version.rs");
}

fn algorithm_api_version(manifest: &str) -> Option<u32> {
    let manifest = manifest.parse::<toml::Table>().ok()?;
    let version = manifest
        .get("package")?
        .get("metadata")?
        .get("algorithm_api_version")?
        .as_integer()?;
    u32::try_from(version).ok()
}

fn git_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
