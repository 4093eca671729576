//! Host port conflicts.
//!
//! In host network mode a workload binds its exposed ports directly on the
//! node, so it collides with any other host-mode container exposing the
//! same port. In bridge mode only explicit host bindings matter.

use sieve_core::{CandidateNode, PortBinding, PortMap, WorkloadDescriptor};
use tracing::debug;

use crate::error::FilterResult;
use crate::filter::NodeFilter;

/// Guarantees that a workload binding a public port only lands on nodes
/// where that port is still free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortFilter;

impl NodeFilter for PortFilter {
    fn name(&self) -> &'static str {
        "port"
    }

    fn matches(&self, workload: &WorkloadDescriptor, node: &CandidateNode) -> FilterResult<bool> {
        if workload.is_host_network() {
            Ok(filter_host(workload, node))
        } else {
            Ok(filter_bridge(workload, node))
        }
    }

    fn render(&self, workload: &WorkloadDescriptor) -> String {
        if workload.is_host_network() {
            render_host(workload)
        } else {
            render_bridge(workload)
        }
    }
}

fn filter_host(workload: &WorkloadDescriptor, node: &CandidateNode) -> bool {
    for port in &workload.exposed_ports {
        if port_already_exposed(node, port) {
            debug!(node = %node.id, port = %port, "port already exposed in host mode");
            return false;
        }
    }
    true
}

fn filter_bridge(workload: &WorkloadDescriptor, node: &CandidateNode) -> bool {
    for requested in workload.port_bindings.values().flatten() {
        if port_already_in_use(node, requested) {
            debug!(
                node = %node.id,
                host_ip = %requested.host_ip,
                host_port = %requested.host_port,
                "host port already bound"
            );
            return false;
        }
    }
    true
}

fn port_already_exposed(node: &CandidateNode, port: &str) -> bool {
    node.containers
        .iter()
        .any(|c| c.is_host_network() && c.exposed_ports.contains(port))
}

fn port_already_in_use(node: &CandidateNode, requested: &PortBinding) -> bool {
    // Declared bindings cover stopped containers; runtime bindings cover
    // ports the runtime picked dynamically. Either can hold the port.
    node.containers.iter().any(|c| {
        conflicts(requested, &c.port_bindings) || conflicts(requested, &c.runtime_ports)
    })
}

fn conflicts(requested: &PortBinding, bindings: &PortMap) -> bool {
    bindings
        .values()
        .flatten()
        .filter(|existing| !existing.host_port.is_empty())
        .any(|existing| {
            existing.host_port == requested.host_port
                && (existing.host_ip == requested.host_ip
                    || requested.binds_all_interfaces()
                    || existing.binds_all_interfaces())
        })
}

fn render_host(workload: &WorkloadDescriptor) -> String {
    if workload.exposed_ports.is_empty() {
        return String::new();
    }

    let options: Vec<String> = workload
        .exposed_ports
        .iter()
        .map(|port| format!("--expose={port}"))
        .collect();
    format!("--net=host {}", options.join(" "))
}

fn render_bridge(workload: &WorkloadDescriptor) -> String {
    workload
        .port_bindings
        .iter()
        .flat_map(|(port, bindings)| {
            bindings
                .iter()
                .map(move |binding| format!("-p {port}:{}", binding.host_port))
        })
        .collect::<Vec<_>>()
        .join(" ")
}
