// SPDX-FileCopyrightText: The midiscope authors
// SPDX-License-Identifier: MPL-2.0

use std::ops::Deref;

use thiserror::Error;

use crate::{NativeHandle, PortDirection};

pub(crate) mod registry;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceOpenError {
    #[error("failed to open MIDI {direction} device for {handle}")]
    NotOpened {
        handle: NativeHandle,
        direction: PortDirection,
    },

    #[error("invalid handle {handle}")]
    InvalidHandle { handle: NativeHandle },

    #[error("no pending open request for {handle}")]
    UnknownHandle { handle: NativeHandle },

    #[error("opened MIDI {actual} device does not match the pending {expected} request for {handle}")]
    DirectionMismatch {
        handle: NativeHandle,
        expected: PortDirection,
        actual: PortDirection,
    },
}

/// Engine entry point for opened devices.
pub trait DeviceBinding<D> {
    /// Invoked once for each successfully opened device.
    ///
    /// `handle` and `direction` are passed through unmodified from
    /// whoever requested the device to be opened.
    fn device_opened(
        &self,
        device: D,
        handle: NativeHandle,
        direction: PortDirection,
    ) -> Result<(), DeviceOpenError>;
}

impl<T, D> DeviceBinding<D> for T
where
    T: Deref,
    <T as Deref>::Target: DeviceBinding<D>,
{
    fn device_opened(
        &self,
        device: D,
        handle: NativeHandle,
        direction: PortDirection,
    ) -> Result<(), DeviceOpenError> {
        self.deref().device_opened(device, handle, direction)
    }
}

/// Platform callback for device open requests.
pub trait DeviceOpenedListener<D> {
    /// Invoked by the platform when an open request completes.
    ///
    /// `None` signals that the device could not be opened.
    fn on_device_opened(&self, device: Option<D>) -> Result<(), DeviceOpenError>;
}

/// Relays opened devices from the platform into a [`DeviceBinding`].
///
/// Adds nothing but a presence check and logging. The handle and
/// direction are bound at construction and never change.
#[derive(Debug, Clone)]
pub struct DeviceOpenRelay<B> {
    handle: NativeHandle,
    direction: PortDirection,
    binding: B,
}

impl<B> DeviceOpenRelay<B> {
    #[must_use]
    pub const fn new(handle: NativeHandle, direction: PortDirection, binding: B) -> Self {
        Self {
            handle,
            direction,
            binding,
        }
    }

    #[must_use]
    pub const fn handle(&self) -> NativeHandle {
        self.handle
    }

    #[must_use]
    pub const fn direction(&self) -> PortDirection {
        self.direction
    }

    #[must_use]
    pub const fn binding(&self) -> &B {
        &self.binding
    }
}

impl<B, D> DeviceOpenedListener<D> for DeviceOpenRelay<B>
where
    B: DeviceBinding<D>,
{
    fn on_device_opened(&self, device: Option<D>) -> Result<(), DeviceOpenError> {
        let Self {
            handle,
            direction,
            binding,
        } = self;
        let Some(device) = device else {
            log::error!("Failed to open MIDI {direction} device for {handle}");
            return Err(DeviceOpenError::NotOpened {
                handle: *handle,
                direction: *direction,
            });
        };
        log::info!("MIDI {direction} device opened successfully for {handle}");
        binding.device_opened(device, *handle, *direction)
    }
}
