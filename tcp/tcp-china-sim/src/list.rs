// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::Result;
use clap::Parser;
use tcp_china_core::recovery::registry::Registry;

/// Prints the names of the available congestion control algorithms
#[derive(Debug, Parser)]
pub struct List {}

impl List {
    pub fn run(&self) -> Result {
        for name in Registry::default().names() {
            println!("{name}");
        }
        Ok(())
    }
}
