// SPDX-FileCopyrightText: The midiscope authors
// SPDX-License-Identifier: MPL-2.0

use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
};

use super::{DeviceBinding, DeviceOpenError, DeviceOpenRelay, DeviceOpenedListener};
use crate::{NativeHandle, PortDirection};

/// Receives the device once the open request has completed.
pub type BoxedOpenTarget<D> = Box<dyn FnOnce(D) + Send + 'static>;

struct PendingOpen<D> {
    direction: PortDirection,
    target: BoxedOpenTarget<D>,
}

/// Pending device open requests, keyed by handle.
///
/// Allocates the opaque handles that are handed out to the platform
/// and dispatches opened devices back to the requesting input or
/// output target.
pub struct OpenTargets<D> {
    next_handle: AtomicU64,
    pending: Mutex<HashMap<NativeHandle, PendingOpen<D>>>,
}

impl<D> fmt::Debug for OpenTargets<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenTargets")
            .field("next_handle", &self.next_handle)
            .field("pending_count", &self.pending_count())
            .finish_non_exhaustive()
    }
}

impl<D> Default for OpenTargets<D> {
    fn default() -> Self {
        Self {
            // Starts after the reserved invalid handle
            next_handle: AtomicU64::new(NativeHandle::INVALID.value() + 1),
            pending: Mutex::new(HashMap::new()),
        }
    }
}

impl<D> OpenTargets<D> {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // A panicking target never leaves the map in an inconsistent state.
    fn lock_pending(&self) -> MutexGuard<'_, HashMap<NativeHandle, PendingOpen<D>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a target and return the relay for the platform.
    #[must_use]
    pub fn prepare_open(
        self: &Arc<Self>,
        direction: PortDirection,
        target: impl FnOnce(D) + Send + 'static,
    ) -> PendingOpenRelay<D> {
        let handle = NativeHandle::new(self.next_handle.fetch_add(1, Ordering::Relaxed));
        debug_assert!(handle.is_valid());
        log::debug!("Preparing to open MIDI {direction} device for {handle}");
        let pending = PendingOpen {
            direction,
            target: Box::new(target),
        };
        let replaced = self.lock_pending().insert(handle, pending);
        debug_assert!(replaced.is_none());
        PendingOpenRelay {
            relay: DeviceOpenRelay::new(handle, direction, Arc::clone(self)),
        }
    }

    /// Drop a pending target.
    ///
    /// Returns `true` if the target was still pending.
    pub fn cancel(&self, handle: NativeHandle) -> bool {
        let cancelled = self.lock_pending().remove(&handle).is_some();
        if cancelled {
            log::debug!("Cancelled pending open request for {handle}");
        }
        cancelled
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.lock_pending().len()
    }
}

impl<D> DeviceBinding<D> for OpenTargets<D> {
    fn device_opened(
        &self,
        device: D,
        handle: NativeHandle,
        direction: PortDirection,
    ) -> Result<(), DeviceOpenError> {
        if !handle.is_valid() {
            log::error!("Invalid handle {handle} for opened MIDI {direction} device");
            return Err(DeviceOpenError::InvalidHandle { handle });
        }
        // Release the lock before invoking the target
        let target = {
            let mut pending = self.lock_pending();
            let Entry::Occupied(entry) = pending.entry(handle) else {
                log::warn!("No pending open request for {handle}");
                return Err(DeviceOpenError::UnknownHandle { handle });
            };
            let expected = entry.get().direction;
            if expected != direction {
                // The request stays pending for the matching device.
                log::error!(
                    "Opened MIDI {direction} device does not match the pending {expected} \
                     request for {handle}"
                );
                return Err(DeviceOpenError::DirectionMismatch {
                    handle,
                    expected,
                    actual: direction,
                });
            }
            entry.remove().target
        };
        log::debug!("Dispatching opened MIDI {direction} device to {handle}");
        target(device);
        Ok(())
    }
}

/// Relay for a request that is pending in [`OpenTargets`].
///
/// Cancels the pending request if the device could not be opened.
#[derive(Debug)]
pub struct PendingOpenRelay<D> {
    relay: DeviceOpenRelay<Arc<OpenTargets<D>>>,
}

impl<D> PendingOpenRelay<D> {
    #[must_use]
    pub const fn handle(&self) -> NativeHandle {
        self.relay.handle()
    }

    #[must_use]
    pub const fn direction(&self) -> PortDirection {
        self.relay.direction()
    }
}

impl<D> DeviceOpenedListener<D> for PendingOpenRelay<D> {
    fn on_device_opened(&self, device: Option<D>) -> Result<(), DeviceOpenError> {
        let result = self.relay.on_device_opened(device);
        if let Err(DeviceOpenError::NotOpened { handle, .. }) = &result {
            self.relay.binding().cancel(*handle);
        }
        result
    }
}
