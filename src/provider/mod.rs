// SPDX-FileCopyrightText: The midiscope authors
// SPDX-License-Identifier: MPL-2.0

use std::{borrow::Cow, ops::Deref};

use thiserror::Error;

use crate::{
    port::{write_port_section, INPUT_SECTION_HEADER, OUTPUT_SECTION_HEADER},
    MidiPortInfo,
};

#[cfg(feature = "midir")]
pub(crate) mod midir;


#[derive(Debug, Error)]
pub enum ProviderError {
    /// The backend could not be reached.
    ///
    /// Reported by observers that are implemented outside of this crate
    /// and that cannot express their failure with one of the other variants.
    #[error("backend unavailable: {msg}")]
    Unavailable { msg: Cow<'static, str> },

    #[cfg(feature = "midir")]
    #[error(transparent)]
    Init(#[from] ::midir::InitError),
}

/// Queries that back the device listing screen.
///
/// Both queries are synchronous and are expected to return quickly.
/// There is no error path: implementations fold any failure into
/// the returned text.
pub trait MidiProvider {
    /// Formatted listing of all connected devices.
    #[must_use]
    fn list_devices(&self) -> String;

    /// Version of the library and backend.
    #[must_use]
    fn version(&self) -> String;
}

impl<P> MidiProvider for P
where
    P: Deref,
    <P as Deref>::Target: MidiProvider,
{
    fn list_devices(&self) -> String {
        self.deref().list_devices()
    }

    fn version(&self) -> String {
        self.deref().version()
    }
}

/// Enumerates the MIDI ports of a single backend.
pub trait MidiPortObserver {
    /// Name of the backend, e.g. "ALSA" or "CoreMIDI".
    #[must_use]
    fn backend_name(&self) -> Cow<'static, str>;

    fn input_ports(&self) -> Result<Vec<MidiPortInfo>, ProviderError>;

    fn output_ports(&self) -> Result<Vec<MidiPortInfo>, ProviderError>;
}

/// [`MidiProvider`] that renders the ports of a [`MidiPortObserver`].
#[derive(Debug, Clone, Default)]
pub struct ObservingProvider<O> {
    observer: O,
}

impl<O> ObservingProvider<O> {
    #[must_use]
    pub const fn new(observer: O) -> Self {
        Self { observer }
    }

    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }
}

impl<O> ObservingProvider<O>
where
    O: MidiPortObserver,
{
    fn try_list_devices(&self, listing: &mut String) -> Result<(), ProviderError> {
        listing.push_str(INPUT_SECTION_HEADER);
        let inputs = self.observer.input_ports()?;
        write_port_section(listing, &inputs, "No input devices found");
        listing.push_str(OUTPUT_SECTION_HEADER);
        let outputs = self.observer.output_ports()?;
        write_port_section(listing, &outputs, "No output devices found");
        log::debug!(
            "Listed {num_inputs} input and {num_outputs} output port(s)",
            num_inputs = inputs.len(),
            num_outputs = outputs.len(),
        );
        Ok(())
    }
}

impl<O> MidiProvider for ObservingProvider<O>
where
    O: MidiPortObserver,
{
    fn list_devices(&self) -> String {
        let mut listing = String::new();
        if let Err(err) = self.try_list_devices(&mut listing) {
            log::warn!("Failed to list MIDI devices: {err}");
            listing.push_str("Error: ");
            listing.push_str(&err.to_string());
            listing.push('\n');
        }
        listing
    }

    fn version(&self) -> String {
        format!(
            "{name} {version} ({backend})",
            name = env!("CARGO_PKG_NAME"),
            version = env!("CARGO_PKG_VERSION"),
            backend = self.observer.backend_name(),
        )
    }
}
