//! Build script for the ghost-lens Tauri app.
//!
//! Nothing platform-specific — Tauri generates its glue code and the rest
//! of the crate is plain Rust.

fn main() {
    tauri_build::build();
}
