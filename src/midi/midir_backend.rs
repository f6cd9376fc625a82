// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! midir backend.
//!
//! Cross-platform implementation of the `MidiOutput` trait.

use anyhow::{anyhow, Result};
use midir::{MidiOutput as MidirClient, MidiOutputConnection};
use tracing::info;

use super::MidiOutput;

const CLIENT_NAME: &str = "GridNotes";

/// A connection to one MIDI output port
pub struct MidirOutput {
    connection: MidiOutputConnection,
    port_name: String,
}

impl MidirOutput {
    /// Connect to the output port at `port_index`.
    pub fn new(port_index: usize) -> Result<Self> {
        let client = MidirClient::new(CLIENT_NAME)
            .map_err(|e| anyhow!("Failed to create MIDI client: {}", e))?;

        let ports = client.ports();
        let port = ports.get(port_index).ok_or_else(|| {
            anyhow!(
                "MIDI output {} not found (only {} available)",
                port_index,
                ports.len()
            )
        })?;
        let port_name = client
            .port_name(port)
            .unwrap_or_else(|_| format!("Unknown {}", port_index));

        let connection = client
            .connect(port, "GridNotes Output")
            .map_err(|e| anyhow!("Failed to connect to '{}': {}", port_name, e))?;

        info!(port = %port_name, "connected to MIDI output");
        Ok(Self {
            connection,
            port_name,
        })
    }

    /// Connect to the first port whose name contains `name` (case-insensitive).
    pub fn new_by_name(name: &str) -> Result<Self> {
        let wanted = name.to_lowercase();
        let index = list_ports()?
            .into_iter()
            .find(|(_, n)| n.to_lowercase().contains(&wanted))
            .map(|(i, _)| i)
            .ok_or_else(|| anyhow!("No MIDI output matching '{}' found", name))?;

        Self::new(index)
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl MidiOutput for MidirOutput {
    fn send(&mut self, message: &[u8]) -> Result<()> {
        self.connection
            .send(message)
            .map_err(|e| anyhow!("Failed to send MIDI message: {}", e))
    }
}

/// List all MIDI output ports as (index, name) pairs.
pub fn list_ports() -> Result<Vec<(usize, String)>> {
    let client = MidirClient::new(CLIENT_NAME)
        .map_err(|e| anyhow!("Failed to create MIDI client: {}", e))?;

    Ok(client
        .ports()
        .iter()
        .enumerate()
        .map(|(i, port)| {
            let name = client
                .port_name(port)
                .unwrap_or_else(|_| format!("Unknown {}", i));
            (i, name)
        })
        .collect())
}

/// Print all MIDI output ports to stdout.
pub fn print_ports() -> Result<()> {
    let ports = list_ports()?;
    if ports.is_empty() {
        println!("No MIDI outputs found.");
    } else {
        println!("Available MIDI outputs:");
        for (i, name) in ports {
            println!("  {}: {}", i, name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_ports_indices() {
        // Ports vary by system; only the numbering is checked
        if let Ok(ports) = list_ports() {
            for (expected, (index, _)) in ports.iter().enumerate() {
                assert_eq!(*index, expected);
            }
        }
    }

    #[test]
    fn test_unknown_port_name() {
        assert!(MidirOutput::new_by_name("no such port 8f3a1c").is_err());
    }
}
