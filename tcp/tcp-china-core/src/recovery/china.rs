// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! TCP China congestion control
//!
//! TCP China is derived from TCP-Africa ("TCP-Africa: An Adaptive and Fair Rapid Increase
//! Rule for Scalable TCP", King, Baraniuk and Riedi, INFOCOM 2005). TCP-Africa uses the
//! delay signal to switch between the aggressive HighSpeed TCP increase and the
//! conservative Reno increase. TCP China always stays in the HighSpeed TCP mode: the RTT is
//! still tracked, but never consulted when growing or shrinking the window.

use crate::{
    log::{_debug, _trace},
    recovery::{
        congestion_controller::{self, CongestionController},
        growth_table::{GrowthTable, DECREASE_FACTOR_SHIFT, HSTCP_AIMD},
        RttEstimator,
    },
    window::{Window, MINIMUM_SLOW_START_THRESHOLD},
};

/// The name the algorithm is registered under
pub const NAME: &str = "china";

/// The growth regime for a given window
///
/// The mode is derived from the window on every acknowledgment and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    SlowStart,
    FastGrowth,
}

impl Mode {
    #[inline]
    pub fn of(window: &Window) -> Self {
        if window.is_slow_start() {
            Self::SlowStart
        } else {
            Self::FastGrowth
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChinaCongestionController {
    rtt_estimator: RttEstimator,
    /// Position in `table` for the window the last fast growth step was evaluated with
    table_index: usize,
    table: &'static GrowthTable,
}

impl Default for ChinaCongestionController {
    fn default() -> Self {
        Self::new()
    }
}

impl ChinaCongestionController {
    pub fn new() -> Self {
        Self::with_table(&HSTCP_AIMD)
    }

    pub fn with_table(table: &'static GrowthTable) -> Self {
        Self {
            rtt_estimator: RttEstimator::new(),
            table_index: 0,
            table,
        }
    }

    #[inline]
    pub fn rtt_estimator(&self) -> &RttEstimator {
        &self.rtt_estimator
    }

    #[inline]
    pub fn table_index(&self) -> usize {
        self.table_index
    }

    #[inline]
    pub fn table(&self) -> &'static GrowthTable {
        self.table
    }

    /// The largest clamp for which `window * decrease_factor` can't overflow
    #[inline]
    pub fn max_clamp(&self) -> u32 {
        u32::MAX / self.table.max_decrease_factor().max(1)
    }

    /// Moves the table index so it brackets `congestion_window`
    ///
    /// Windows usually grow, so the index is advanced first.
    #[inline]
    fn update_table_index(&mut self, congestion_window: u32) {
        let index = self
            .table
            .advance_index_for(congestion_window, self.table_index);
        let index = self.table.retreat_index_for(congestion_window, index);

        if index != self.table_index {
            _debug!(
                congestion_window,
                previous = self.table_index,
                index,
                "growth table index updated"
            );
            self.table_index = index;
        }

        debug_assert!(self.table.is_index_valid(congestion_window, self.table_index));
    }
}

impl CongestionController for ChinaCongestionController {
    #[inline]
    fn init(&mut self, window: &mut Window) {
        self.table_index = 0;
        self.rtt_estimator.reset();

        let max_clamp = self.max_clamp();
        if window.clamp() > max_clamp {
            _debug!(
                clamp = window.clamp(),
                max_clamp,
                "reducing clamp to keep the decrease in range"
            );
            window.reduce_clamp(max_clamp);
        }

        debug_assert!(window
            .clamp()
            .checked_mul(self.table.max_decrease_factor())
            .is_some());
    }

    #[inline]
    fn record_sample(&mut self, rtt_us: i32, acked: u32) {
        self.rtt_estimator.update_rtt(rtt_us, acked);
    }

    #[inline]
    fn on_ack(&mut self, window: &mut Window, acked: u32, is_window_limited: bool) {
        if !is_window_limited {
            return;
        }

        match Mode::of(window) {
            Mode::SlowStart => {
                window.slow_start(acked);

                if Mode::of(window) == Mode::FastGrowth {
                    _debug!(
                        congestion_window = window.congestion_window(),
                        slow_start_threshold = window.slow_start_threshold(),
                        "exiting slow start"
                    );
                }
            }
            Mode::FastGrowth => {
                let congestion_window = window.congestion_window();
                self.update_table_index(congestion_window);

                // cwnd = cwnd + a(w) / cwnd, with a(w) = index + 1
                if window.additive_increase(self.table_index as u32 + 1) {
                    _trace!(
                        congestion_window = window.congestion_window(),
                        "additive increase"
                    );
                }
            }
        }
    }

    /// Computes the HighSpeed TCP decrease for the regime the connection was last evaluated in
    ///
    /// The index is intentionally not resynchronized with the current window first, so the
    /// decrease factor may lag the window by one table step.
    #[inline]
    fn on_congestion_event(&self, window: &Window) -> u32 {
        let congestion_window = window.congestion_window();
        let decrease_factor = self.table.entries()[self.table_index].decrease_factor;

        // widened so a window that was never clamped by `init` can't wrap
        let decrease =
            (congestion_window as u64 * decrease_factor as u64) >> DECREASE_FACTOR_SHIFT;
        // the factor is below 1.0 so the decrease is at most the window
        let decrease = decrease as u32;

        let slow_start_threshold = congestion_window
            .saturating_sub(decrease)
            .max(MINIMUM_SLOW_START_THRESHOLD);

        _debug!(
            congestion_window,
            decrease_factor,
            slow_start_threshold,
            "congestion event"
        );

        slow_start_threshold
    }
}

#[derive(Debug, Default)]
pub struct Endpoint {}

impl congestion_controller::Endpoint for Endpoint {
    type CongestionController = ChinaCongestionController;

    fn new_congestion_controller(&mut self) -> Self::CongestionController {
        ChinaCongestionController::new()
    }
}
