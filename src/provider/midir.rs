// SPDX-FileCopyrightText: The midiscope authors
// SPDX-License-Identifier: MPL-2.0

use std::borrow::Cow;

use midir::{MidiInput, MidiOutput};

use super::{MidiPortObserver, ProviderError};
use crate::{Library, MidiPortInfo};

const fn backend_name() -> &'static str {
    if cfg!(feature = "jack") {
        "JACK"
    } else if cfg!(target_os = "linux") {
        "ALSA"
    } else if cfg!(any(target_os = "macos", target_os = "ios")) {
        "CoreMIDI"
    } else if cfg!(target_os = "windows") {
        "WinMM"
    } else if cfg!(target_family = "wasm") {
        "WebMIDI"
    } else {
        "unknown"
    }
}

/// Port observer driven by [`midir`].
///
/// A fresh client is created for each query. This picks up devices
/// that have been plugged in since the last query and keeps the
/// observer `Send + Sync`.
#[derive(Debug, Clone)]
pub struct MidirPortObserver {
    client_name: String,
}

impl MidirPortObserver {
    /// Create an observer for an initialized [`Library`].
    #[must_use]
    pub fn new(library: &Library) -> Self {
        Self {
            client_name: library.client_name().to_owned(),
        }
    }

    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.client_name
    }
}

impl MidiPortObserver for MidirPortObserver {
    fn backend_name(&self) -> Cow<'static, str> {
        Cow::Borrowed(backend_name())
    }

    fn input_ports(&self) -> Result<Vec<MidiPortInfo>, ProviderError> {
        let input = MidiInput::new(&format!("{} input observer", self.client_name))?;
        let ports = input
            .ports()
            .iter()
            .enumerate()
            .filter_map(|(number, port)| match input.port_name(port) {
                Ok(port_name) => Some(MidiPortInfo::new(number, port_name)),
                Err(err) => {
                    log::debug!("Skipping input port {number}: {err}");
                    None
                }
            })
            .collect();
        Ok(ports)
    }

    fn output_ports(&self) -> Result<Vec<MidiPortInfo>, ProviderError> {
        let output = MidiOutput::new(&format!("{} output observer", self.client_name))?;
        let ports = output
            .ports()
            .iter()
            .enumerate()
            .filter_map(|(number, port)| match output.port_name(port) {
                Ok(port_name) => Some(MidiPortInfo::new(number, port_name)),
                Err(err) => {
                    log::debug!("Skipping output port {number}: {err}");
                    None
                }
            })
            .collect();
        Ok(ports)
    }
}
