// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::Result;
use serde::Serialize;
use std::io::Write;
use tcp_china_core::{recovery::simulation, window::Window};

#[derive(Debug, Serialize)]
pub struct Report {
    pub algorithm: String,
    pub clamp: u32,
    pub rtt_us: i32,
    pub max_congestion_window: u32,
    pub congestion_events: usize,
    pub rounds: Vec<Round>,
}

#[derive(Debug, Serialize)]
pub struct Round {
    pub number: usize,
    pub congestion_window: u32,
    pub is_congestion_event: bool,
}

impl Report {
    pub fn new(algorithm: &str, window: &Window, rtt_us: i32, rounds: &[simulation::Round]) -> Self {
        let max_congestion_window = rounds
            .iter()
            .map(|round| round.congestion_window)
            .max()
            .unwrap_or_default();

        let congestion_events = rounds
            .iter()
            .filter(|round| round.is_congestion_event)
            .count();

        let rounds = rounds
            .iter()
            .map(|round| Round {
                number: round.number,
                congestion_window: round.congestion_window,
                is_congestion_event: round.is_congestion_event,
            })
            .collect();

        Self {
            algorithm: algorithm.to_string(),
            clamp: window.clamp(),
            rtt_us,
            max_congestion_window,
            congestion_events,
            rounds,
        }
    }

    pub fn write_text<W: Write>(&self, mut out: W) -> Result {
        writeln!(out, "algorithm: {}", self.algorithm)?;
        writeln!(out, "clamp: {}", self.clamp)?;
        writeln!(out, "rtt: {}us", self.rtt_us)?;
        for round in &self.rounds {
            write!(out, "{:>3}: cwnd: {}", round.number, round.congestion_window)?;
            if round.is_congestion_event {
                write!(out, " (congestion event)")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn write_json<W: Write>(&self, mut out: W) -> Result {
        serde_json::to_writer_pretty(&mut out, self)?;
        writeln!(out)?;
        Ok(())
    }
}
