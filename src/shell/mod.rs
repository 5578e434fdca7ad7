// SPDX-FileCopyrightText: The midiscope authors
// SPDX-License-Identifier: MPL-2.0

use std::fmt::Write as _;

use discro::{Publisher, Subscriber};

use crate::MidiProvider;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub title: String,
    pub refresh_label: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "MIDI Device Probe".to_owned(),
            refresh_label: "Refresh MIDI Devices".to_owned(),
        }
    }
}

/// User-triggered actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    Title(String),
    /// Static label, set once
    Label(String),
    Button { label: String, action: ShellAction },
    /// Scrollable, monospace text that shows the device list
    DeviceList,
}

/// Vertical stack of widgets, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellLayout {
    pub widgets: Vec<Widget>,
}

/// Screen that lists the connected MIDI devices.
///
/// The device list is refreshed on demand. Refreshing only needs
/// a shared reference and could be triggered concurrently. Each
/// refresh issues exactly one query and the most recent result wins.
#[allow(missing_debug_implementations)]
pub struct DisplayShell<P> {
    provider: P,
    layout: ShellLayout,
    version_label: String,
    device_list: Publisher<String>,
}

impl<P> DisplayShell<P>
where
    P: MidiProvider,
{
    /// Build the screen and show the initial device list.
    #[must_use]
    pub fn create(provider: P, config: ShellConfig) -> Self {
        let ShellConfig {
            title,
            refresh_label,
        } = config;
        let version_label = provider.version();
        let layout = ShellLayout {
            widgets: vec![
                Widget::Title(title),
                Widget::Label(version_label.clone()),
                Widget::Button {
                    label: refresh_label,
                    action: ShellAction::Refresh,
                },
                Widget::DeviceList,
            ],
        };
        let shell = Self {
            provider,
            layout,
            version_label,
            device_list: Publisher::new(String::new()),
        };
        shell.refresh();
        shell
    }

    pub fn refresh(&self) {
        let devices = self.provider.list_devices();
        log::trace!("Refreshed device list: {devices:?}");
        self.device_list.write(devices);
    }

    pub fn on_action(&self, action: ShellAction) {
        match action {
            ShellAction::Refresh => self.refresh(),
        }
    }

    /// Handler of the refresh button.
    pub fn on_refresh_clicked(&self) {
        self.on_action(ShellAction::Refresh);
    }
}

impl<P> DisplayShell<P> {
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub const fn layout(&self) -> &ShellLayout {
        &self.layout
    }

    #[must_use]
    pub fn version_label(&self) -> &str {
        &self.version_label
    }

    /// Currently visible content of the device list.
    #[must_use]
    pub fn device_list_text(&self) -> String {
        self.device_list.read().clone()
    }

    /// Observe the content of the device list.
    #[must_use]
    pub fn subscribe_device_list(&self) -> Subscriber<String> {
        self.device_list.subscribe()
    }

    /// Plain-text rendering of the whole screen.
    #[must_use]
    pub fn render(&self) -> String {
        let mut rendered = String::new();
        for widget in &self.layout.widgets {
            match widget {
                Widget::Title(title) => {
                    let underline = "=".repeat(title.chars().count());
                    let _ = writeln!(rendered, "{title}\n{underline}\n");
                }
                Widget::Label(text) => {
                    let _ = writeln!(rendered, "{text}\n");
                }
                Widget::Button { label, .. } => {
                    let _ = writeln!(rendered, "[ {label} ]\n");
                }
                Widget::DeviceList => {
                    rendered.push_str(&self.device_list.read());
                }
            }
        }
        rendered
    }
}
