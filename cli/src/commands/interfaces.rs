use colored::*;

use crate::sprint;
use crate::terminal::{colors, print};
use camscout_common::config::Config;
use camscout_common::network::interface::NetworkInterface;
use camscout_core::discovery::DiscoveryService;

pub fn interfaces(cfg: &Config) -> anyhow::Result<()> {
    let networks = DiscoveryService::from_config(cfg).networks();

    print::header("Usable Interfaces", cfg.quiet);
    if networks.is_empty() {
        tracing::warn!("No usable network interface found");
        return Ok(());
    }

    let selected = match &cfg.interface {
        Some(name) => networks.iter().position(|n| &n.name == name),
        None => Some(0),
    };

    for (idx, network) in networks.iter().enumerate() {
        if cfg.quiet {
            print::print(&format!("{}\t{}", network.name, network.cidr));
            continue;
        }
        print_interface(network, idx, selected == Some(idx));
        if idx + 1 != networks.len() {
            sprint!();
        }
    }
    Ok(())
}

fn print_interface(network: &NetworkInterface, idx: usize, selected: bool) {
    let name = if selected {
        format!("{} {}", network.name, "(scan)".color(colors::ACCENT))
    } else {
        network.name.clone()
    };
    print::tree_head(idx, &name);

    let (address, prefix) = network.cidr.split_once('/').unwrap_or((network.cidr.as_str(), ""));
    let cidr: ColoredString = format!(
        "{}/{}",
        address.color(colors::IPV4_ADDR),
        prefix.color(colors::IPV4_PREFIX)
    )
    .color(colors::SEPARATOR);

    print::as_tree_one_level(vec![
        ("Address".to_string(), network.address.to_string().color(colors::IPV4_ADDR)),
        ("Netmask".to_string(), network.netmask.to_string().normal()),
        ("IPv4".to_string(), cidr),
    ]);
}
