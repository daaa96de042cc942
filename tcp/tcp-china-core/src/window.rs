// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Congestion window state owned by the transport
//!
//! Congestion controllers read and write a [`Window`] on every acknowledgment but never own
//! it. All sizes are in segments.

/// The initial congestion window, matching `TCP_INIT_CWND`
pub const INITIAL_WINDOW: u32 = 10;

/// A slow start threshold large enough that the connection starts in slow start
pub const INFINITE_SLOW_START_THRESHOLD: u32 = 0x7fff_ffff;

/// The smallest slow start threshold a congestion event may produce
pub const MINIMUM_SLOW_START_THRESHOLD: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    congestion_window: u32,
    slow_start_threshold: u32,
    /// Accumulates fractional increases until a full segment can be added
    window_counter: u32,
    clamp: u32,
}

impl Default for Window {
    fn default() -> Self {
        Self::new(u32::MAX)
    }
}

impl Window {
    /// Creates a window in slow start with the initial congestion window
    pub const fn new(clamp: u32) -> Self {
        Self {
            congestion_window: if INITIAL_WINDOW < clamp {
                INITIAL_WINDOW
            } else {
                clamp
            },
            slow_start_threshold: INFINITE_SLOW_START_THRESHOLD,
            window_counter: 0,
            clamp,
        }
    }

    #[inline]
    pub const fn congestion_window(&self) -> u32 {
        self.congestion_window
    }

    #[inline]
    pub const fn slow_start_threshold(&self) -> u32 {
        self.slow_start_threshold
    }

    #[inline]
    pub const fn window_counter(&self) -> u32 {
        self.window_counter
    }

    #[inline]
    pub const fn clamp(&self) -> u32 {
        self.clamp
    }

    /// Sets the congestion window, limited to the clamp
    #[inline]
    pub fn set_congestion_window(&mut self, congestion_window: u32) {
        self.congestion_window = congestion_window.min(self.clamp);
    }

    #[inline]
    pub fn set_slow_start_threshold(&mut self, slow_start_threshold: u32) {
        self.slow_start_threshold = slow_start_threshold;
    }

    #[inline]
    pub fn set_window_counter(&mut self, window_counter: u32) {
        self.window_counter = window_counter;
    }

    /// Lowers the clamp, shrinking the congestion window if it no longer fits
    #[inline]
    pub fn reduce_clamp(&mut self, clamp: u32) {
        self.clamp = self.clamp.min(clamp);
        self.congestion_window = self.congestion_window.min(self.clamp);
    }

    /// Returns true while the window is at or below the slow start threshold
    #[inline]
    pub const fn is_slow_start(&self) -> bool {
        self.congestion_window <= self.slow_start_threshold
    }

    /// Returns true if the sender is using enough of the window for growth to be
    /// meaningful
    ///
    /// Outside of slow start the whole window must be in flight. In slow start the window
    /// may keep growing as long as more than half of it is in use, which lets it increase
    /// rapidly.
    #[inline]
    pub fn is_window_limited(&self, segments_in_flight: u32) -> bool {
        if segments_in_flight >= self.congestion_window {
            return true;
        }

        self.is_slow_start() && self.congestion_window < segments_in_flight.saturating_mul(2)
    }

    /// Applies the threshold returned by a congestion event
    ///
    /// The window drops to the new threshold and any partial increase is discarded, as a
    /// TCP sender does once fast recovery completes.
    #[inline]
    pub fn on_congestion_event(&mut self, slow_start_threshold: u32) {
        self.slow_start_threshold = slow_start_threshold;
        self.set_congestion_window(slow_start_threshold);
        self.window_counter = 0;
    }

    /// Adds `segments` in slow start, returning the number of segments that were applied
    #[inline]
    pub(crate) fn slow_start(&mut self, segments: u32) -> u32 {
        let previous = self.congestion_window;
        self.congestion_window = previous.saturating_add(segments).min(self.clamp);
        self.congestion_window.saturating_sub(previous)
    }

    /// Adds `increment` to the fractional counter, growing the window by one segment once a
    /// full window's worth has accumulated
    ///
    /// Returns true if the window grew.
    #[inline]
    pub(crate) fn additive_increase(&mut self, increment: u32) -> bool {
        if self.congestion_window >= self.clamp {
            return false;
        }

        self.window_counter = self.window_counter.saturating_add(increment);

        if self.window_counter >= self.congestion_window {
            self.window_counter -= self.congestion_window;
            self.congestion_window += 1;
            return true;
        }

        false
    }
}
