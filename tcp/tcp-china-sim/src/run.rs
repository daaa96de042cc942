// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{report::Report, Result};
use clap::{Parser, ValueEnum};
use tcp_china_core::{
    limits::Limits,
    recovery::{registry::Registry, simulation},
};


#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Simulates a single connection on a constant-RTT path
#[derive(Debug, Parser)]
pub struct Run {
    /// The congestion control algorithm to simulate
    #[arg(long, default_value = "china")]
    algorithm: String,

    /// The number of transmission rounds
    #[arg(long, default_value_t = 100)]
    rounds: usize,

    /// Congestion windows, in segments, at which a loss occurs
    ///
    /// Each loss happens once, in order, the first time the window reaches it.
    #[arg(long, value_delimiter = ',')]
    loss_at: Vec<u32>,

    /// The most segments the application sends per round
    #[arg(long)]
    app_limit: Option<u32>,

    /// The largest congestion window the connection may reach
    #[arg(long)]
    clamp: Option<u32>,

    #[arg(long)]
    initial_window: Option<u32>,

    #[arg(long)]
    initial_slow_start_threshold: Option<u32>,

    /// The round trip time of every acknowledgment, in microseconds
    #[arg(long, default_value_t = simulation::DEFAULT_RTT_US)]
    rtt_us: i32,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

impl Run {
    pub fn run(&self) -> Result {
        let report = self.simulate()?;

        match self.format {
            Format::Text => report.write_text(std::io::stdout().lock())?,
            Format::Json => report.write_json(std::io::stdout().lock())?,
        }

        Ok(())
    }

    fn simulate(&self) -> Result<Report> {
        let limits = self.limits()?;
        let registry = Registry::default();

        let mut congestion_controller = registry.new_congestion_controller(&self.algorithm)?;
        let mut window = limits.window();
        congestion_controller.init(&mut window);

        tracing::info!(
            algorithm = %self.algorithm,
            clamp = window.clamp(),
            rounds = self.rounds,
            "starting simulation"
        );

        let rounds = simulation::simulate_constant_rtt(
            &mut congestion_controller,
            &mut window,
            &self.loss_at,
            self.app_limit,
            self.rtt_us,
            self.rounds,
        );

        let report = Report::new(&self.algorithm, &window, self.rtt_us, &rounds);

        tracing::info!(
            max_congestion_window = report.max_congestion_window,
            congestion_events = report.congestion_events,
            "finished simulation"
        );

        Ok(report)
    }

    fn limits(&self) -> Result<Limits> {
        let mut limits = Limits::new();

        if let Some(clamp) = self.clamp {
            limits = limits.with_clamp(clamp)?;
        }
        if let Some(initial_window) = self.initial_window {
            limits = limits.with_initial_window(initial_window)?;
        }
        if let Some(threshold) = self.initial_slow_start_threshold {
            limits = limits.with_initial_slow_start_threshold(threshold)?;
        }

        Ok(limits)
    }
}
