// SPDX-FileCopyrightText: The midiscope authors
// SPDX-License-Identifier: MPL-2.0

use std::sync::{Arc, Mutex};

use log::Level;

use super::{registry::OpenTargets, *};
use crate::test_log::{count_records, start_capture, take_records};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FakeDevice(u32);

#[derive(Debug, Default)]
struct RecordingBinding {
    calls: Mutex<Vec<(FakeDevice, NativeHandle, PortDirection)>>,
}

impl RecordingBinding {
    fn calls(&self) -> Vec<(FakeDevice, NativeHandle, PortDirection)> {
        self.calls.lock().unwrap().clone()
    }
}

impl DeviceBinding<FakeDevice> for RecordingBinding {
    fn device_opened(
        &self,
        device: FakeDevice,
        handle: NativeHandle,
        direction: PortDirection,
    ) -> Result<(), DeviceOpenError> {
        self.calls.lock().unwrap().push((device, handle, direction));
        Ok(())
    }
}

#[test]
fn absent_device_logs_error_and_does_not_forward() {
    start_capture();
    let relay = DeviceOpenRelay::new(
        NativeHandle::new(7),
        PortDirection::Input,
        RecordingBinding::default(),
    );

    let result = relay.on_device_opened(None::<FakeDevice>);

    assert_eq!(
        Err(DeviceOpenError::NotOpened {
            handle: NativeHandle::new(7),
            direction: PortDirection::Input,
        }),
        result
    );
    assert!(relay.binding().calls().is_empty());
    assert_eq!(0, count_records(Level::Info));
    assert_eq!(1, take_records(Level::Error).len());
}

#[test]
fn present_device_logs_info_and_forwards_once() {
    start_capture();
    let relay = DeviceOpenRelay::new(
        NativeHandle::new(42),
        PortDirection::Output,
        RecordingBinding::default(),
    );

    assert_eq!(Ok(()), relay.on_device_opened(Some(FakeDevice(1))));

    assert_eq!(
        vec![(FakeDevice(1), NativeHandle::new(42), PortDirection::Output)],
        relay.binding().calls()
    );
    assert_eq!(0, count_records(Level::Error));
    assert_eq!(1, take_records(Level::Info).len());
}

#[test]
fn handle_and_direction_are_reproduced_unchanged() {
    let binding = Arc::new(RecordingBinding::default());
    let relay = DeviceOpenRelay::new(
        NativeHandle::new(42),
        PortDirection::from_is_output(true),
        Arc::clone(&binding),
    );

    for id in 0..3 {
        relay.on_device_opened(Some(FakeDevice(id))).unwrap();
    }
    relay.on_device_opened(None::<FakeDevice>).unwrap_err();

    let calls = binding.calls();
    assert_eq!(3, calls.len());
    for (id, (device, handle, direction)) in (0..).zip(calls) {
        assert_eq!(FakeDevice(id), device);
        assert_eq!(42, handle.value());
        assert!(direction.is_output());
    }
    assert_eq!(NativeHandle::new(42), relay.handle());
    assert_eq!(PortDirection::Output, relay.direction());
}

#[test]
fn registry_dispatches_to_pending_target() {
    let targets = OpenTargets::new();
    let received = Arc::new(Mutex::new(Vec::new()));
    let relay = {
        let received = Arc::clone(&received);
        targets.prepare_open(PortDirection::Input, move |device: FakeDevice| {
            received.lock().unwrap().push(device);
        })
    };
    assert!(relay.handle().is_valid());
    assert_eq!(1, targets.pending_count());

    relay.on_device_opened(Some(FakeDevice(5))).unwrap();

    assert_eq!(vec![FakeDevice(5)], *received.lock().unwrap());
    assert_eq!(0, targets.pending_count());

    // The target has been consumed
    assert_eq!(
        Err(DeviceOpenError::UnknownHandle {
            handle: relay.handle()
        }),
        relay.on_device_opened(Some(FakeDevice(6)))
    );
    assert_eq!(vec![FakeDevice(5)], *received.lock().unwrap());
}

#[test]
fn registry_allocates_distinct_handles() {
    let targets = OpenTargets::<FakeDevice>::new();
    let input = targets.prepare_open(PortDirection::Input, |_| {});
    let output = targets.prepare_open(PortDirection::Output, |_| {});
    assert_ne!(input.handle(), output.handle());
    assert_eq!(PortDirection::Input, input.direction());
    assert_eq!(PortDirection::Output, output.direction());
    assert_eq!(2, targets.pending_count());
}

#[test]
fn registry_drops_targets_of_failed_opens() {
    let targets = OpenTargets::<FakeDevice>::new();
    for _ in 0..1000 {
        let relay = targets.prepare_open(PortDirection::Output, |_| {
            panic!("must not be invoked");
        });
        assert_eq!(
            Err(DeviceOpenError::NotOpened {
                handle: relay.handle(),
                direction: PortDirection::Output,
            }),
            relay.on_device_opened(None::<FakeDevice>)
        );
    }
    assert_eq!(0, targets.pending_count());
}

#[test]
fn registry_cancels_pending_target() {
    let targets = OpenTargets::<FakeDevice>::new();
    let relay = targets.prepare_open(PortDirection::Input, |_| {
        panic!("must not be invoked");
    });
    assert!(targets.cancel(relay.handle()));
    assert!(!targets.cancel(relay.handle()));
    assert_eq!(0, targets.pending_count());
}

#[test]
fn registry_keeps_target_on_mismatched_direction() {
    start_capture();
    let targets = OpenTargets::new();
    let received = Arc::new(Mutex::new(Vec::new()));
    let relay = {
        let received = Arc::clone(&received);
        targets.prepare_open(PortDirection::Input, move |device: FakeDevice| {
            received.lock().unwrap().push(device);
        })
    };

    assert_eq!(
        Err(DeviceOpenError::DirectionMismatch {
            handle: relay.handle(),
            expected: PortDirection::Input,
            actual: PortDirection::Output,
        }),
        targets.device_opened(FakeDevice(1), relay.handle(), PortDirection::Output)
    );
    assert_eq!(1, targets.pending_count());
    assert!(received.lock().unwrap().is_empty());
    assert_eq!(1, take_records(Level::Error).len());

    // The matching device still reaches the target
    relay.on_device_opened(Some(FakeDevice(2))).unwrap();
    assert_eq!(vec![FakeDevice(2)], *received.lock().unwrap());
    assert_eq!(0, targets.pending_count());
}

#[test]
fn registry_rejects_invalid_and_unknown_handles() {
    start_capture();
    let targets = OpenTargets::<FakeDevice>::new();
    let _relay = targets.prepare_open(PortDirection::Input, |_| {
        panic!("must not be invoked");
    });

    assert_eq!(
        Err(DeviceOpenError::InvalidHandle {
            handle: NativeHandle::INVALID
        }),
        targets.device_opened(FakeDevice(1), NativeHandle::INVALID, PortDirection::Input)
    );
    assert_eq!(
        Err(DeviceOpenError::UnknownHandle {
            handle: NativeHandle::new(1000)
        }),
        targets.device_opened(FakeDevice(1), NativeHandle::new(1000), PortDirection::Input)
    );

    assert_eq!(1, targets.pending_count());
    assert_eq!(1, count_records(Level::Error));
    assert_eq!(1, take_records(Level::Warn).len());
}
