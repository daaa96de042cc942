// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::window::Window;

/// Creates congestion controllers for new connections
pub trait Endpoint: 'static {
    type CongestionController: CongestionController;

    fn new_congestion_controller(&mut self) -> Self::CongestionController;
}

/// Per-connection congestion control decisions
///
/// The transport owns the [`Window`] and calls into the controller from the connection's
/// packet processing path. Controllers never perform I/O and never block.
pub trait CongestionController: 'static + Send {
    /// Called once when the connection is established, before any other method
    ///
    /// Controllers may lower the window clamp to keep their arithmetic in range.
    fn init(&mut self, window: &mut Window);

    /// Called with a round trip time sample for a batch of acknowledged segments
    fn record_sample(&mut self, rtt_us: i32, acked: u32);

    /// Called when `acked` segments are newly acknowledged
    ///
    /// `is_window_limited` is false when the application, rather than the congestion
    /// window, is limiting the sender.
    fn on_ack(&mut self, window: &mut Window, acked: u32, is_window_limited: bool);

    /// Called when the transport detects a congestion event
    ///
    /// Returns the new slow start threshold. The window itself is left to the transport.
    fn on_congestion_event(&self, window: &Window) -> u32;
}

#[cfg(feature = "alloc")]
impl<T: CongestionController + ?Sized> CongestionController for alloc::boxed::Box<T> {
    #[inline]
    fn init(&mut self, window: &mut Window) {
        (**self).init(window)
    }

    #[inline]
    fn record_sample(&mut self, rtt_us: i32, acked: u32) {
        (**self).record_sample(rtt_us, acked)
    }

    #[inline]
    fn on_ack(&mut self, window: &mut Window, acked: u32, is_window_limited: bool) {
        (**self).on_ack(window, acked, is_window_limited)
    }

    #[inline]
    fn on_congestion_event(&self, window: &Window) -> u32 {
        (**self).on_congestion_event(window)
    }
}

#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use super::*;

    /// Records how it was called and otherwise behaves like standard slow start with a
    /// halving decrease
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct MockCongestionController {
        pub init: u32,
        pub rtt_samples: u32,
        pub acks: u32,
    }

    impl CongestionController for MockCongestionController {
        fn init(&mut self, _window: &mut Window) {
            self.init += 1;
        }

        fn record_sample(&mut self, _rtt_us: i32, _acked: u32) {
            self.rtt_samples += 1;
        }

        fn on_ack(&mut self, window: &mut Window, acked: u32, is_window_limited: bool) {
            self.acks += 1;
            if is_window_limited {
                window.set_congestion_window(window.congestion_window().saturating_add(acked));
            }
        }

        fn on_congestion_event(&self, window: &Window) -> u32 {
            (window.congestion_window() / 2).max(crate::window::MINIMUM_SLOW_START_THRESHOLD)
        }
    }

    #[derive(Debug, Default)]
    pub struct Endpoint;

    impl super::Endpoint for Endpoint {
        type CongestionController = MockCongestionController;

        fn new_congestion_controller(&mut self) -> Self::CongestionController {
            MockCongestionController::default()
        }
    }
}

#[cfg(test)]
mod fuzz_target;
