// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Round-based simulations of a congestion controller on a lossless constant-RTT path
//!
//! Each round the sender transmits the congestion window, limited by the application, and
//! every segment is acknowledged before the next round starts. A configured drop replaces
//! the round in which the window first reaches it.

use crate::{
    limits::Limits,
    recovery::CongestionController,
    window::{Window, MINIMUM_SLOW_START_THRESHOLD},
};
use core::fmt;

/// The round trip time every simulated segment is acknowledged with
pub const DEFAULT_RTT_US: i32 = 200_000;

fn type_name<T: ?Sized>() -> &'static str {
    let name = core::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

#[derive(Debug)]
pub struct Simulation {
    pub name: &'static str,
    pub description: &'static str,
    pub cc: &'static str,
    pub rounds: Vec<Round>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub number: usize,
    /// The congestion window at the start of the round
    pub congestion_window: u32,
    /// Set if the round ended in a congestion event instead of acknowledgments
    pub is_congestion_event: bool,
}

impl fmt::Debug for Round {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:>3}: cwnd: {}", self.number, self.congestion_window)
    }
}

/// Simulates a network with no congestion experienced
pub fn slow_start_unlimited<CC: CongestionController>(
    mut congestion_controller: CC,
    num_rounds: usize,
) -> Simulation {
    let mut window = Limits::new().window();
    congestion_controller.init(&mut window);

    Simulation {
        name: "Slow Start Unlimited",
        description: "Full congestion window utilization with no congestion experienced",
        cc: type_name::<CC>(),
        rounds: simulate_constant_rtt(
            &mut congestion_controller,
            &mut window,
            &[],
            None,
            DEFAULT_RTT_US,
            num_rounds,
        ),
    }
}

/// Simulates a network that experiences loss at a 10000 segment window and again once the
/// window recovers to 9000 segments
pub fn loss_at_10000_and_9000<CC: CongestionController>(
    mut congestion_controller: CC,
    num_rounds: usize,
) -> Simulation {
    let mut window = Limits::new().window();
    congestion_controller.init(&mut window);

    Simulation {
        name: "Loss at 10000 and 9000",
        description: "Loss encountered at ~10000 segments and ~9000 segments",
        cc: type_name::<CC>(),
        rounds: simulate_constant_rtt(
            &mut congestion_controller,
            &mut window,
            &[10_000, 9_000],
            None,
            DEFAULT_RTT_US,
            num_rounds,
        ),
    }
}

/// Simulates a network that experiences loss at a 750 segment window with the application
/// sending at most 500 segments per round
pub fn app_limited_500<CC: CongestionController>(
    mut congestion_controller: CC,
    num_rounds: usize,
) -> Simulation {
    const APP_LIMIT_SEGMENTS: u32 = 500;

    let mut window = Limits::new().window();
    congestion_controller.init(&mut window);

    Simulation {
        name: "App Limited 500",
        description: "App limited to 500 segments per round with loss encountered at ~750",
        cc: type_name::<CC>(),
        rounds: simulate_constant_rtt(
            &mut congestion_controller,
            &mut window,
            &[750],
            Some(APP_LIMIT_SEGMENTS),
            DEFAULT_RTT_US,
            num_rounds,
        ),
    }
}

/// Simulates a network starting from the minimum window size with no further congestion
pub fn minimum_window<CC: CongestionController>(
    mut congestion_controller: CC,
    num_rounds: usize,
) -> Simulation {
    let mut window = Limits::new().window();
    congestion_controller.init(&mut window);

    // Experience enough congestion to drop to the minimum window
    while window.congestion_window() > MINIMUM_SLOW_START_THRESHOLD
        || window.slow_start_threshold() > MINIMUM_SLOW_START_THRESHOLD
    {
        let slow_start_threshold = congestion_controller.on_congestion_event(&window);
        window.on_congestion_event(slow_start_threshold);
    }

    Simulation {
        name: "Minimum Window",
        description: "Full congestion window utilization after starting from the minimum window",
        cc: type_name::<CC>(),
        rounds: simulate_constant_rtt(
            &mut congestion_controller,
            &mut window,
            &[],
            None,
            DEFAULT_RTT_US,
            num_rounds,
        ),
    }
}

/// Simulates a connection whose window is clamped at 1000 segments
pub fn clamped_at_1000<CC: CongestionController>(
    mut congestion_controller: CC,
    num_rounds: usize,
) -> Simulation {
    let limits = Limits {
        clamp: 1_000,
        ..Limits::new()
    };
    let mut window = limits.window();
    congestion_controller.init(&mut window);

    Simulation {
        name: "Clamped at 1000",
        description: "Full congestion window utilization with the window clamped at 1000",
        cc: type_name::<CC>(),
        rounds: simulate_constant_rtt(
            &mut congestion_controller,
            &mut window,
            &[],
            None,
            DEFAULT_RTT_US,
            num_rounds,
        ),
    }
}

/// Simulates the given number of rounds with drops occurring at the given congestion window
/// sizes, limited to the given app limit
///
/// The controller must already be initialized with `window`.
pub fn simulate_constant_rtt<CC: CongestionController + ?Sized>(
    congestion_controller: &mut CC,
    window: &mut Window,
    drops: &[u32],
    app_limit: Option<u32>,
    rtt_us: i32,
    num_rounds: usize,
) -> Vec<Round> {
    let mut rounds = Vec::with_capacity(num_rounds);
    let mut drop_index = 0;

    for round in 0..num_rounds {
        let is_congestion_event =
            drop_index < drops.len() && window.congestion_window() >= drops[drop_index];

        rounds.push(Round {
            number: round,
            congestion_window: window.congestion_window(),
            is_congestion_event,
        });

        if is_congestion_event {
            let slow_start_threshold = congestion_controller.on_congestion_event(window);
            window.on_congestion_event(slow_start_threshold);
            drop_index += 1;
        } else {
            let sent = window
                .congestion_window()
                .min(app_limit.unwrap_or(u32::MAX));

            send_and_ack(congestion_controller, window, sent, rtt_us);
        }
    }

    rounds
}

/// Acknowledges `segments` one at a time, each with the same round trip time
fn send_and_ack<CC: CongestionController + ?Sized>(
    congestion_controller: &mut CC,
    window: &mut Window,
    segments: u32,
    rtt_us: i32,
) {
    // the whole round is in flight before the first acknowledgment arrives
    let is_window_limited = window.is_window_limited(segments);

    for _ in 0..segments {
        congestion_controller.record_sample(rtt_us, 1);
        congestion_controller.on_ack(window, 1, is_window_limited);
    }
}

#[cfg(test)]
mod tests;
