// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub use china::ChinaCongestionController;
pub use congestion_controller::CongestionController;
pub use growth_table::GrowthTable;
pub use rtt_estimator::*;

pub mod china;
pub mod congestion_controller;
pub mod growth_table;
#[cfg(feature = "alloc")]
pub mod registry;
mod rtt_estimator;
#[cfg(any(test, feature = "testing"))]
pub mod simulation;
