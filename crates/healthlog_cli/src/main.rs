//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `healthlog_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("healthlog_core ping={}", healthlog_core::ping());
    println!("healthlog_core version={}", healthlog_core::core_version());
}
