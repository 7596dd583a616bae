use std::time::{Duration, Instant};

use colored::*;

use crate::sprint;
use crate::terminal::{colors, print, spinner};
use camscout_common::device::{DiscoveredDevice, UNKNOWN};
use camscout_common::{config::Config, success};
use camscout_core::discovery::{DiscoveryService, ScanMethod, ScanReport};

type Detail = (String, ColoredString);

pub async fn discover(cfg: &Config) -> anyhow::Result<()> {
    let service = DiscoveryService::from_config(cfg);
    let spinner = (!cfg.quiet).then(|| spinner::start("Waiting for cameras to answer..."));

    let start_time: Instant = Instant::now();
    let result = service.perform_discovery().await;
    drop(spinner);

    discovery_ends(&result?, start_time.elapsed(), cfg);
    Ok(())
}

fn discovery_ends(report: &ScanReport, total_time: Duration, cfg: &Config) {
    if report.devices.is_empty() {
        no_cameras_found(cfg);
        return;
    }

    if cfg.quiet {
        report.devices.iter().for_each(print_device_line);
        return;
    }

    print::header("Camera Discovery", cfg.quiet);
    for (idx, device) in report.devices.iter().enumerate() {
        print_device_tree(device, idx);
        if idx + 1 != report.devices.len() {
            sprint!();
        }
    }
    print_summary(report, total_time);
}

fn no_cameras_found(cfg: &Config) {
    print::header("ZERO CAMERAS DETECTED", cfg.quiet);
    if !cfg.quiet {
        print::no_results();
    }
}

fn print_summary(report: &ScanReport, total_time: Duration) {
    let method = match report.method {
        ScanMethod::Onvif => "WS-Discovery",
        ScanMethod::Sweep => "port sweep",
    };
    let found: ColoredString = format!("{} devices", report.devices.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Discovery Complete: {found} found by {method} in {total_time}")
            .color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::centerln(&output.to_string());
    success!("Scanned from {} ({})", report.network.name, report.network.cidr);
}

fn print_device_tree(device: &DiscoveredDevice, idx: usize) {
    print::tree_head(idx, &device.ip.to_string());
    print::as_tree_one_level(device_details(device));
}

/// Tab separated, for piping into other tools.
fn print_device_line(device: &DiscoveredDevice) {
    print::print(&format!(
        "{}\t{}\t{}\t{}\t{}",
        device.ip,
        device.port,
        device.kind.as_str(),
        device.manufacturer,
        device.model
    ));
}

fn device_details(device: &DiscoveredDevice) -> Vec<Detail> {
    vec![
        ("Port".to_string(), device.port.to_string().normal()),
        ("Type".to_string(), device.kind.as_str().color(colors::ACCENT)),
        ("Vendor".to_string(), known_or_dim(&device.manufacturer, colors::VENDOR)),
        ("Model".to_string(), known_or_dim(&device.model, colors::TEXT_DEFAULT)),
    ]
}

fn known_or_dim(value: &str, color: Color) -> ColoredString {
    if value == UNKNOWN {
        value.color(colors::UNKNOWN)
    } else {
        value.color(color)
    }
}
