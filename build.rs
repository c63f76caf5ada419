//! Build script that keeps the embedded local-storage migrations fresh.
//!
//! `embed_migrations!` reads the SQL files at compile time, which Cargo does
//! not track on its own, so rebuilds are requested whenever `migrations/`
//! changes.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
