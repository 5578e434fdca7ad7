// SPDX-FileCopyrightText: The midiscope authors
// SPDX-License-Identifier: MPL-2.0

use std::io::{stdin, stdout, Write as _};

use midiscope::{
    DisplayShell, Library, LibraryConfig, MidirPortObserver, ObservingProvider, ShellConfig,
};

fn main() {
    pretty_env_logger::init();
    match run() {
        Ok(()) => (),
        Err(err) => eprintln!("Error: {err}"),
    }
}

fn run() -> anyhow::Result<()> {
    let library = Library::initialize(LibraryConfig::default());
    let provider = ObservingProvider::new(MidirPortObserver::new(library));
    let shell = DisplayShell::create(provider, ShellConfig::default());
    loop {
        println!("{}", shell.render());
        print!("Press ENTER to refresh or q to quit: ");
        stdout().flush()?;
        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            // EOF
            return Ok(());
        }
        if input.trim().eq_ignore_ascii_case("q") {
            return Ok(());
        }
        shell.on_refresh_clicked();
    }
}
