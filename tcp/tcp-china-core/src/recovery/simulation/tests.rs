// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::recovery::{registry::Registry, ChinaCongestionController};
use core::ops::Range;
use insta::assert_debug_snapshot;
use plotters::prelude::*;
use std::{
    env,
    path::{Path, PathBuf},
};

const CHART_DIMENSIONS: (u32, u32) = (1024, 768);

// These simulations are too slow for Miri
#[test]
#[cfg_attr(miri, ignore)]
fn slow_start_unlimited_test() {
    let cc = ChinaCongestionController::new();

    slow_start_unlimited(cc, 12).finish();
}

#[test]
#[cfg_attr(miri, ignore)]
fn loss_at_10000_and_9000_test() {
    let cc = ChinaCongestionController::new();

    loss_at_10000_and_9000(cc, 200).finish();
}

#[test]
#[cfg_attr(miri, ignore)]
fn app_limited_500_test() {
    let cc = ChinaCongestionController::new();

    app_limited_500(cc, 40).finish();
}

#[test]
#[cfg_attr(miri, ignore)]
fn minimum_window_test() {
    let cc = ChinaCongestionController::new();

    minimum_window(cc, 40).finish();
}

#[test]
#[cfg_attr(miri, ignore)]
fn clamped_at_1000_test() {
    let cc = ChinaCongestionController::new();

    clamped_at_1000(cc, 20).finish();
}

#[test]
#[cfg_attr(miri, ignore)]
fn registry_controller_test() {
    let registry = Registry::default();
    let boxed = registry
        .new_congestion_controller(crate::recovery::china::NAME)
        .unwrap();

    let expected = loss_at_10000_and_9000(ChinaCongestionController::new(), 200);
    let actual = loss_at_10000_and_9000(boxed, 200);

    assert_eq!(expected.rounds, actual.rounds);
}

#[test]
fn rtt_is_tracked() {
    let mut cc = ChinaCongestionController::new();
    let mut window = Limits::new().window();
    cc.init(&mut window);

    simulate_constant_rtt(&mut cc, &mut window, &[], None, 40_000, 3);

    assert_eq!(cc.rtt_estimator().min_rtt_us(), 40_000);
    assert_eq!(cc.rtt_estimator().smoothed_rtt_us(), 40_000);
}

#[test]
fn congestion_events_are_flagged() {
    let mut cc = ChinaCongestionController::new();
    let mut window = Limits::new().window();
    cc.init(&mut window);

    // the drop lands in the last round, so no later round records the smaller window
    let rounds = simulate_constant_rtt(&mut cc, &mut window, &[1_000], None, DEFAULT_RTT_US, 8);

    assert_eq!(rounds[7].congestion_window, 1_280);
    assert!(rounds[7].is_congestion_event);
    assert_eq!(rounds.iter().filter(|r| r.is_congestion_event).count(), 1);
    assert_eq!(window.congestion_window(), 640);
}

#[test]
fn congestion_event_at_minimum_window_is_flagged() {
    let mut cc = ChinaCongestionController::new();
    let mut window = Limits::new().window();
    cc.init(&mut window);
    window.on_congestion_event(MINIMUM_SLOW_START_THRESHOLD);

    let rounds = simulate_constant_rtt(&mut cc, &mut window, &[2], None, DEFAULT_RTT_US, 2);

    assert!(rounds[0].is_congestion_event);
    assert!(!rounds[1].is_congestion_event);
    // the floor leaves the window where it was
    assert_eq!(rounds[0].congestion_window, rounds[1].congestion_window);
}

impl Simulation {
    fn finish(&self) {
        if let Ok(dir) = env::var("RECOVERY_SIM_DIR") {
            let mut path = PathBuf::new();
            path.push(dir);
            path.push(self.filename());
            path.set_extension("svg");
            self.plot(&path);
        } else {
            self.assert_snapshot();
        }
    }

    fn plot<T: AsRef<Path> + ?Sized>(&self, path: &T) {
        let root_area = SVGBackend::new(path, CHART_DIMENSIONS).into_drawing_area();
        root_area.fill(&WHITE).expect("Could not fill chart");
        root_area
            .titled(&self.title(), ("sans-serif", 40))
            .expect("Could not add title");

        let mut ctx = ChartBuilder::on(&root_area)
            .set_label_area_size(LabelAreaPosition::Left, 120)
            .set_label_area_size(LabelAreaPosition::Bottom, 60)
            .margin(20)
            .margin_top(40)
            .caption(self.description, ("sans-serif", 20))
            .build_cartesian_2d(self.x_range(), self.y_range())
            .expect("Could not build chart");

        ctx.configure_mesh()
            .x_desc("Transmission Round")
            .label_style(("sans-serif", 20))
            .y_desc("Congestion window size (segments)")
            .draw()
            .expect("Could not configure mesh");

        ctx.draw_series(LineSeries::new(
            self.rounds
                .iter()
                .map(|x| (x.number as i32, x.congestion_window as i32)),
            GREEN,
        ))
        .expect("Could not draw series");
    }

    fn x_range(&self) -> Range<i32> {
        0..(self.rounds.len() as i32 + 1)
    }

    fn y_range(&self) -> Range<i32> {
        let max = self
            .rounds
            .iter()
            .map(|r| r.congestion_window as i32)
            .max()
            .unwrap_or(0);

        0..(max + max / 20 + 1)
    }

    fn assert_snapshot(&self) {
        assert_debug_snapshot!(self.filename(), self);
    }

    fn title(&self) -> String {
        format!("{} - {}", self.name, self.cc)
    }

    fn filename(&self) -> String {
        self.title().replace('.', "_").split_whitespace().collect()
    }
}
