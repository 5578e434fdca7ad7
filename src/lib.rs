// SPDX-FileCopyrightText: The midiscope authors
// SPDX-License-Identifier: MPL-2.0

#![allow(rustdoc::invalid_rust_codeblocks)]
#![doc = include_str!("../README.md")]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(rustdoc::broken_intra_doc_links)]
// Repetitions of module/type names occur frequently when using many
// modules for keeping the size of the source files handy. Often
// types have the same name as their parent module.
#![allow(clippy::module_name_repetitions)]

mod handle;
pub use self::handle::{NativeHandle, PortDirection};

mod library;
pub use self::library::{Library, LibraryConfig};

mod port;
pub use self::port::{format_device_listing, MidiPortInfo};

mod provider;
#[cfg(feature = "midir")]
pub use self::provider::midir::MidirPortObserver;
pub use self::provider::{MidiPortObserver, MidiProvider, ObservingProvider, ProviderError};

mod relay;
pub use self::relay::{
    registry::{BoxedOpenTarget, OpenTargets, PendingOpenRelay},
    DeviceBinding, DeviceOpenError, DeviceOpenRelay, DeviceOpenedListener,
};

#[cfg(feature = "observables")]
mod shell;
#[cfg(feature = "observables")]
pub use self::shell::{DisplayShell, ShellAction, ShellConfig, ShellLayout, Widget};

#[cfg(test)]
mod test_log;
