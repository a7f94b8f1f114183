// Build scripts signal errors by panicking; there is no caller to
// return Result to.  Cargo treats a non-zero exit as a build failure.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Build script for the kline binary crate.
//!
//! ## Tailwind CSS compilation
//!
//! Runs `npx @tailwindcss/cli` to compile `crates/kline/tailwind.css`
//! into `$OUT_DIR/assets/tailwind.css`, so every `cargo` invocation
//! compiles without relying on `dx build` having run first.
//!
//! ## Generated `index.html`
//!
//! Writes the Dioxus host page to the crate root. The server renders
//! flash messages and the analysis result into the same page, outside
//! the `#main` mount point.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::{env, fs};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());

    // Workspace root is two levels up from crates/kline/.
    let workspace_root = manifest_dir
        .parent()
        .and_then(Path::parent)
        .expect("could not find workspace root");

    build_tailwind_css(&manifest_dir, workspace_root, &out_dir);
    generate_index_html(&manifest_dir);
}

/// Compile Tailwind CSS via `npx @tailwindcss/cli`.
///
/// Input:  `crates/kline/tailwind.css`
/// Output: `$OUT_DIR/assets/tailwind.css`
///
/// The output path is exposed as `TAILWIND_CSS_PATH` for
/// `include_str!(env!("TAILWIND_CSS_PATH"))` in `main.rs`.
fn build_tailwind_css(manifest_dir: &Path, workspace_root: &Path, out_dir: &Path) {
    let input = manifest_dir.join("tailwind.css");
    let assets_dir = out_dir.join("assets");
    let output = assets_dir.join("tailwind.css");

    fs::create_dir_all(&assets_dir)
        .unwrap_or_else(|e| panic!("failed to create {}: {e}", assets_dir.display()));

    println!("cargo:rerun-if-changed={}", input.display());

    // Tailwind scans the UI crates for class names; the staging crate
    // has none.
    let crates_dir = workspace_root.join("crates");
    register_rs_sources(&crates_dir.join("kline"));
    register_rs_sources(&crates_dir.join("kline-io"));

    let input_lossy = input.to_string_lossy();
    let output_lossy = output.to_string_lossy();
    let mut args: Vec<&str> = vec!["@tailwindcss/cli", "-i", &input_lossy, "-o", &output_lossy];

    let profile = env::var("PROFILE").unwrap_or_default();
    if profile == "release" {
        args.push("--minify");
    }

    let status = Command::new("npx")
        .args(&args)
        .status()
        .unwrap_or_else(|e| {
            panic!(
                "failed to run `npx @tailwindcss/cli`: {e}\n\
                 \n\
                 Tailwind CSS is compiled from build.rs and requires Node.js / npm.\n\
                 Install Node.js (https://nodejs.org/) and ensure `npx` is on PATH."
            )
        });

    assert!(
        status.success(),
        "`npx @tailwindcss/cli` exited with {status}"
    );

    println!("cargo:rustc-env=TAILWIND_CSS_PATH={}", output.display());
}

/// Recursively emit `cargo:rerun-if-changed` for every `.rs` file
/// under `dir`.
fn register_rs_sources(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            register_rs_sources(&path);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }
}

/// Generate `crates/kline/index.html`.
///
/// Written to the source tree because Dioxus CLI expects `index.html`
/// at the crate root. The file is gitignored.
fn generate_index_html(manifest_dir: &Path) {
    let index_html = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <title>{app_title}</title>
    <meta content="text/html;charset=utf-8" http-equiv="Content-Type" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <meta charset="UTF-8" />
  </head>
  <body>
    <div id="main"></div>
  </body>
</html>
"#;

    let index_path = manifest_dir.join("index.html");
    fs::write(&index_path, index_html)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", index_path.display()));
}
