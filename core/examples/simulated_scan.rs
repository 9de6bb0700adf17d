//! Example: Drive the scanner adapter with a simulated device.
//!
//! Usage:
//!   cargo run --example simulated_scan

use codescanner_core::{CodeScanner, ReadStage, SimulatedDriver};

fn main() {
    let device = SimulatedDriver::new();
    let scanner = CodeScanner::new(device.clone());

    scanner.subscribe(|code| {
        println!("{:<6} {:<8} {}", code.code_type(), code.length(), code.text());
    });

    if let Err(e) = scanner.enable() {
        eprintln!("Error opening scanner: {}", e);
        return;
    }

    println!("{:<6} {:<8} {}", "TYPE", "LENGTH", "TEXT");
    println!("{}", "-".repeat(40));

    for (code_type, text) in [('A', "4901234567894"), ('Q', "https://example.com")] {
        if let Err(e) = device.scan(code_type, text) {
            eprintln!("Error reading scan: {}", e);
        }
    }

    device.fail_next_read(ReadStage::Length);
    match device.scan('A', "12345") {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("\nFailed scan: {}", e),
    }

    if let Err(e) = scanner.enable() {
        println!("Second enable: {}", e);
    }

    println!("\nTotal: {} codes read", scanner.read_count());
}
