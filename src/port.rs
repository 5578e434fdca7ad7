// SPDX-FileCopyrightText: The midiscope authors
// SPDX-License-Identifier: MPL-2.0

use std::{borrow::Cow, fmt, ops::Deref};

/// User-readable information about a single MIDI port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiPortInfo {
    /// Port number as reported by the backend
    pub number: usize,
    pub port_name: Cow<'static, str>,
    /// Name of the device that owns the port, if known
    pub device_name: Option<Cow<'static, str>>,
    /// The closest to a unique name that the backend could provide
    pub display_name: Option<Cow<'static, str>>,
}

impl MidiPortInfo {
    #[must_use]
    pub fn new(number: usize, port_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            number,
            port_name: port_name.into(),
            device_name: None,
            display_name: None,
        }
    }

    #[must_use]
    pub fn with_device_name(mut self, device_name: impl Into<Cow<'static, str>>) -> Self {
        self.device_name = Some(device_name.into());
        self
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<Cow<'static, str>>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    // Only names that add information are worth printing.
    fn distinct_name<'a>(&self, name: Option<&'a Cow<'static, str>>) -> Option<&'a str> {
        name.map(Deref::deref)
            .filter(|name| !name.is_empty() && *name != self.port_name)
    }
}

impl fmt::Display for MidiPortInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            number, port_name, ..
        } = self;
        write!(f, "Port {number}: {port_name}")?;
        if let Some(device_name) = self.distinct_name(self.device_name.as_ref()) {
            write!(f, " (Device: {device_name})")?;
        }
        if let Some(display_name) = self.distinct_name(self.display_name.as_ref()) {
            write!(f, " [{display_name}]")?;
        }
        Ok(())
    }
}

pub(crate) const INPUT_SECTION_HEADER: &str = "=== MIDI Input Devices ===\n";
pub(crate) const OUTPUT_SECTION_HEADER: &str = "\n=== MIDI Output Devices ===\n";

pub(crate) fn write_port_section(listing: &mut String, ports: &[MidiPortInfo], empty_text: &str) {
    if ports.is_empty() {
        listing.push_str(empty_text);
        listing.push('\n');
        return;
    }
    for port in ports {
        listing.push_str(&port.to_string());
        listing.push('\n');
    }
}

/// Render the human-readable device listing.
#[must_use]
pub fn format_device_listing(inputs: &[MidiPortInfo], outputs: &[MidiPortInfo]) -> String {
    let mut listing = String::from(INPUT_SECTION_HEADER);
    write_port_section(&mut listing, inputs, "No input devices found");
    listing.push_str(OUTPUT_SECTION_HEADER);
    write_port_section(&mut listing, outputs, "No output devices found");
    listing
}
