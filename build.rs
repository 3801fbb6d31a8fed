//! Build script for FM/RDS firmware
//!
//! Handles:
//! - Memory layout configuration
//! - Linker scripts for the target binary (cortex-m-rt and defmt)

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (tests) link normally
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_none() {
        return;
    }

    // memory.x is generated by embassy-stm32 (`memory-x` feature), but a
    // board-specific override in the project directory takes precedence
    println!("cargo:rerun-if-changed=memory.x");
    if let Ok(dir) = std::env::var("CARGO_MANIFEST_DIR") {
        println!("cargo:rustc-link-search={dir}");
    }

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
