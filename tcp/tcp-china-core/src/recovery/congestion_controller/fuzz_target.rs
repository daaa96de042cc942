// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    limits::Limits,
    recovery::{
        china::Mode, growth_table::MAX_CLAMP, registry::Registry, ChinaCongestionController,
        CongestionController,
    },
    window::{Window, MINIMUM_SLOW_START_THRESHOLD},
};
use bolero::{check, generator::*};

#[derive(Debug, TypeGenerator)]
enum Operation {
    SegmentsSent {
        #[generator(1..=1000)]
        count: u16,
    },
    AckReceived {
        #[generator(1..=1000)]
        count: u16,
        /// Overrides the window limited state derived from the segments in flight
        window_limited: Option<bool>,
    },
    RttSample {
        rtt_us: i32,
    },
    CongestionEvent,
    SlowStartThresholdSet {
        slow_start_threshold: u32,
    },
}

struct Model<CC: CongestionController> {
    /// The congestion controller being fuzzed
    subject: CC,
    /// The window the subject controls
    window: Window,
    /// Segments sent but not yet acknowledged
    segments_in_flight: u32,
    /// The number of slow start thresholds applied to the window
    congestion_events: u32,
}

impl<CC: CongestionController> Model<CC> {
    fn new(mut congestion_controller: CC, limits: &Limits) -> Self {
        let mut window = limits.window();
        congestion_controller.init(&mut window);

        Self {
            subject: congestion_controller,
            window,
            segments_in_flight: 0,
            congestion_events: 0,
        }
    }

    fn apply(&mut self, operation: &Operation) {
        match operation {
            Operation::SegmentsSent { count } => {
                self.segments_in_flight = self.segments_in_flight.saturating_add(*count as u32);
            }
            Operation::AckReceived {
                count,
                window_limited,
            } => self.on_ack_received(*count as u32, *window_limited),
            Operation::RttSample { rtt_us } => self.subject.record_sample(*rtt_us, 1),
            Operation::CongestionEvent => self.on_congestion_event(),
            Operation::SlowStartThresholdSet {
                slow_start_threshold,
            } => {
                self.window
                    .set_slow_start_threshold((*slow_start_threshold).max(MINIMUM_SLOW_START_THRESHOLD));
            }
        }
    }

    fn on_ack_received(&mut self, count: u32, window_limited: Option<bool>) {
        let is_window_limited =
            window_limited.unwrap_or_else(|| self.window.is_window_limited(self.segments_in_flight));
        let acked = count.min(self.segments_in_flight).max(1);
        self.segments_in_flight = self.segments_in_flight.saturating_sub(acked);

        let before = self.window;
        self.subject.on_ack(&mut self.window, acked, is_window_limited);

        if !is_window_limited {
            assert_eq!(before, self.window);
        }
        assert!(self.window.congestion_window() >= before.congestion_window());
    }

    fn on_congestion_event(&mut self) {
        let slow_start_threshold = self.subject.on_congestion_event(&self.window);

        assert!(slow_start_threshold >= MINIMUM_SLOW_START_THRESHOLD);
        assert!(
            slow_start_threshold
                <= self
                    .window
                    .congestion_window()
                    .max(MINIMUM_SLOW_START_THRESHOLD)
        );

        self.window.on_congestion_event(slow_start_threshold);
        self.congestion_events += 1;
    }

    fn invariants(&self) {
        assert!(self.window.clamp() <= MAX_CLAMP);
        assert!(self.window.congestion_window() <= self.window.clamp());

        if self.congestion_events > 0 {
            assert!(self.window.slow_start_threshold() >= MINIMUM_SLOW_START_THRESHOLD);
        }
    }
}

impl Model<ChinaCongestionController> {
    /// Applies the operation and checks the table index against the window the last
    /// growth step was evaluated with
    fn apply_china(&mut self, operation: &Operation) {
        let before = self.window;
        let previous_index = self.subject.table_index();

        self.apply(operation);

        let table = self.subject.table();
        let index = self.subject.table_index();
        assert!(index <= table.last_index());

        let stepped = matches!(operation, Operation::AckReceived { .. })
            && Mode::of(&before) == Mode::FastGrowth
            && (self.window != before || index != previous_index);

        if stepped {
            assert!(table.is_index_valid(before.congestion_window(), index));
        } else {
            assert_eq!(previous_index, index);
        }
    }
}

#[test]
fn china_fuzz() {
    check!()
        .with_generator((gen::<Limits>(), gen::<Vec<Operation>>()))
        .for_each(|(limits, operations)| {
            let mut model = Model::new(ChinaCongestionController::new(), limits);
            model.invariants();

            for operation in operations.iter() {
                model.apply_china(operation);
                model.invariants();
            }
        });
}

#[test]
fn boxed_matches_concrete() {
    let registry = Registry::default();

    check!()
        .with_generator((gen::<Limits>(), gen::<Vec<Operation>>()))
        .for_each(|(limits, operations)| {
            let boxed = registry
                .new_congestion_controller(crate::recovery::china::NAME)
                .unwrap();
            let mut boxed = Model::new(boxed, limits);
            let mut concrete = Model::new(ChinaCongestionController::new(), limits);

            for operation in operations.iter() {
                boxed.apply(operation);
                concrete.apply(operation);
                assert_eq!(boxed.window, concrete.window);
            }

            assert_eq!(
                boxed.subject.on_congestion_event(&boxed.window),
                concrete.subject.on_congestion_event(&concrete.window)
            );
        });
}
