// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use core::time::Duration;

#[cfg(any(test, feature = "generator"))]
use bolero_generator::prelude::*;

/// Tracks the minimum and smoothed round trip times of a connection, in microseconds
///
/// The minimum RTT approximates the propagation delay of the path and the smoothed RTT
/// approximates propagation plus queueing delay. Neither value feeds the window growth
/// decisions of the China controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(any(feature = "generator", test), derive(TypeGenerator))]
pub struct RttEstimator {
    /// The smallest sample observed, or 0 if no samples have been recorded
    min_rtt: u32,
    /// An exponentially-weighted moving average, or 0 if no samples have been recorded
    smoothed_rtt: u32,
}

impl RttEstimator {
    pub const fn new() -> Self {
        Self {
            min_rtt: 0,
            smoothed_rtt: 0,
        }
    }

    /// Clears all recorded samples
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Records a round trip time sample
    ///
    /// `rtt_us` is a signed microsecond delta as reported by the transport. Non-positive
    /// samples are normalized to `rtt_us + 1` interpreted as unsigned, and never to zero.
    /// Samples of -2 and below wrap to very large values. `_acked` is the number of
    /// segments acknowledged along with the sample and is currently unused.
    #[inline]
    pub fn update_rtt(&mut self, rtt_us: i32, _acked: u32) {
        let rtt = Self::normalize(rtt_us);

        if self.min_rtt == 0 || rtt < self.min_rtt {
            self.min_rtt = rtt;
        }

        if self.smoothed_rtt == 0 {
            self.smoothed_rtt = rtt;
        } else {
            // smoothed_rtt = 7/8 * smoothed_rtt + 1/8 * rtt, in the same truncating form as
            // the Linux RTT estimator
            self.smoothed_rtt = self
                .smoothed_rtt
                .wrapping_add(rtt >> 3)
                .wrapping_sub(self.smoothed_rtt >> 3);
        }
    }

    #[inline]
    fn normalize(rtt_us: i32) -> u32 {
        if rtt_us > 0 {
            return rtt_us as u32;
        }

        crate::log::_trace!(rtt_us, "normalizing non-positive rtt sample");

        (rtt_us.wrapping_add(1) as u32).max(1)
    }

    /// Gets the minimum round trip time in microseconds, or 0 if unset
    #[inline]
    pub fn min_rtt_us(&self) -> u32 {
        self.min_rtt
    }

    /// Gets the weighted average round trip time in microseconds, or 0 if unset
    #[inline]
    pub fn smoothed_rtt_us(&self) -> u32 {
        self.smoothed_rtt
    }

    /// Gets the minimum round trip time
    #[inline]
    pub fn min_rtt(&self) -> Option<Duration> {
        Self::duration(self.min_rtt)
    }

    /// Gets the weighted average round trip time
    #[inline]
    pub fn smoothed_rtt(&self) -> Option<Duration> {
        Self::duration(self.smoothed_rtt)
    }

    #[inline]
    fn duration(us: u32) -> Option<Duration> {
        (us > 0).then(|| Duration::from_micros(us as u64))
    }
}
