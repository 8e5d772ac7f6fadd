//! Cron-style console formatting
//!
//! The harvesting scripts historically ran under cron with stdout captured
//! as the log file; these helpers reproduce that layout: a divider header
//! and message lines padded so the `HH:MM:SS` timestamp right-aligns.

use chrono::Local;

const DIVIDER_WIDTH: usize = 125;

/// Print a divider-framed section header
pub fn header(message: &str) {
    println!("{}", "-".repeat(DIVIDER_WIDTH));
    println!("{message}");
    println!("{}\n", "-".repeat(DIVIDER_WIDTH));
}

/// Print a sub-header line with a right-aligned timestamp
pub fn sub_header(message: &str) {
    let time = Local::now().format("%H:%M:%S");
    println!("-------->  {message:<106}{time}");
}

/// Print a message line with a right-aligned timestamp
pub fn message(message: &str) {
    let time = Local::now().format("%H:%M:%S");
    println!("           Message:{message:<98}{time}");
}
