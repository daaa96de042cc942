// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub use anyhow::Error;
use clap::Parser;

pub type Result<T = (), E = Error> = core::result::Result<T, E>;

mod list;
mod report;
mod run;

#[derive(Debug, Parser)]
enum Args {
    List(list::List),
    Run(run::Run),
}

fn main() -> Result {
    let format = tracing_subscriber::fmt::format()
        .with_level(false) // don't include levels in formatted output
        .without_time()
        .with_ansi(false)
        .compact(); // Use a less verbose output format.

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .event_format(format)
        .init();

    match Args::parse() {
        Args::List(args) => args.run(),
        Args::Run(args) => args.run(),
    }
}
