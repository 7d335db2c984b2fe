//! Display utilities.

use console::style;
use saltline::Limits;
use saltline::config::{
    DEFAULT_MEMORY_COST, DEFAULT_OUTPUT_LEN, DEFAULT_SALT_LEN, DEFAULT_THREADS, DEFAULT_TIME_COST, MAX_LENGTH, MAX_THREADS, MAX_TIME, MIN_MEMORY, MIN_OUTPUT_LEN, MIN_SALT_LEN, MIN_THREADS, MIN_TIME, VERSION,
};

/// Formats a memory cost given in KiB.
pub fn format_kib(kib: u64) -> String {
    const UNITS: &[&str] = &["KiB", "MiB", "GiB", "TiB"];
    const UNIT: u64 = 1024;

    let mut size = kib;
    let mut unit_idx = 0;

    while size >= UNIT && size.is_multiple_of(UNIT) && unit_idx < UNITS.len() - 1 {
        size /= UNIT;
        unit_idx += 1;
    }

    format!("{size} {}", UNITS[unit_idx])
}

/// Prints a freshly created credential on stdout.
pub fn show_credential(credential: &str) {
    println!("{credential}");
}

/// Reports a successful verification.
pub fn show_match() {
    println!("{} {}", style("✓").green(), style("Password matches").bold());
}

/// Prints the active limits and the command line defaults.
pub fn show_limits(limits: &Limits) {
    let rows = [
        ("version", VERSION.to_string()),
        ("password length", format!("1 .. {MAX_LENGTH} bytes")),
        ("salt length", format!("{MIN_SALT_LEN} .. {MAX_LENGTH} bytes")),
        ("output length", format!("{MIN_OUTPUT_LEN} .. {MAX_LENGTH} bytes")),
        ("memory cost", format!("{} .. {} (and >= 8 x threads)", format_kib(u64::from(MIN_MEMORY)), format_kib(limits.max_memory()))),
        ("time cost", format!("{MIN_TIME} .. {MAX_TIME}")),
        ("threads", format!("{MIN_THREADS} .. {MAX_THREADS}")),
    ];

    println!("{} ({limits})", style("Limits").bold());
    for (name, value) in rows {
        println!("  {:<16} {}", style(name).cyan(), value);
    }

    println!();
    println!("{}", style("Defaults").bold());
    println!("  {:<16} t={DEFAULT_TIME_COST} m={} p={DEFAULT_THREADS}", style("costs").cyan(), format_kib(u64::from(DEFAULT_MEMORY_COST)));
    println!("  {:<16} {DEFAULT_OUTPUT_LEN} bytes", style("output length").cyan());
    println!("  {:<16} {DEFAULT_SALT_LEN} bytes", style("salt length").cyan());
}
