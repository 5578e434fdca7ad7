// SPDX-FileCopyrightText: The midiscope authors
// SPDX-License-Identifier: MPL-2.0

use derive_more::{Display, From};
use strum::{Display as StrumDisplay, EnumIter};

/// Opaque token that identifies an engine-side object.
///
/// Allocated and interpreted only by the engine. Everyone else
/// just carries it around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display("#{_0}")]
pub struct NativeHandle(u64);

impl NativeHandle {
    /// Reserved value that never refers to an engine object.
    pub const INVALID: Self = Self(0);

    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

/// Direction of a device binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PortDirection {
    Input,
    Output,
}

impl PortDirection {
    /// Convert from the boolean flag used at the platform boundary.
    #[must_use]
    pub const fn from_is_output(is_output: bool) -> Self {
        if is_output {
            Self::Output
        } else {
            Self::Input
        }
    }

    #[must_use]
    pub const fn is_output(self) -> bool {
        matches!(self, Self::Output)
    }
}
