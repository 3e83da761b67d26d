//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `goaltrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("goaltrack_core ping={}", goaltrack_core::ping());
    println!("goaltrack_core version={}", goaltrack_core::core_version());
}
