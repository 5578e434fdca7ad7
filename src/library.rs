// SPDX-FileCopyrightText: The midiscope authors
// SPDX-License-Identifier: MPL-2.0

use std::sync::OnceLock;

static LIBRARY: OnceLock<Library> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Name under which clients are registered with the MIDI backend
    pub client_name: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            client_name: env!("CARGO_PKG_NAME").to_owned(),
        }
    }
}

/// Process-wide library state.
///
/// Must be initialized explicitly with [`Library::initialize()`] before
/// any backend could be created.
#[derive(Debug)]
pub struct Library {
    config: LibraryConfig,
}

impl Library {
    /// Initialize the library.
    ///
    /// Idempotent: The first invocation wins and all subsequent
    /// invocations return the same instance, regardless of the
    /// configuration that they pass.
    pub fn initialize(config: LibraryConfig) -> &'static Self {
        let mut initialized = false;
        let library = LIBRARY.get_or_init(|| {
            initialized = true;
            Self {
                config: config.clone(),
            }
        });
        if initialized {
            log::info!(
                "Initialized {name} {version} as \"{client_name}\"",
                name = env!("CARGO_PKG_NAME"),
                version = env!("CARGO_PKG_VERSION"),
                client_name = library.config.client_name,
            );
        } else if library.config != config {
            log::debug!(
                "Library already initialized as \"{client_name}\": Ignoring {config:?}",
                client_name = library.config.client_name,
            );
        }
        library
    }

    /// The library, if already initialized.
    #[must_use]
    pub fn get() -> Option<&'static Self> {
        LIBRARY.get()
    }

    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.config.client_name
    }

    #[must_use]
    pub const fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
