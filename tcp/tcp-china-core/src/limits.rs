// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    recovery::growth_table::MAX_CLAMP,
    window::{Window, INFINITE_SLOW_START_THRESHOLD, INITIAL_WINDOW, MINIMUM_SLOW_START_THRESHOLD},
};
use core::fmt;

#[cfg(any(test, feature = "generator"))]
use bolero_generator::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationError(&'static str);

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}

/// Window parameters for new connections
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(any(feature = "generator", test), derive(TypeGenerator))]
pub struct Limits {
    #[cfg_attr(
        any(feature = "generator", test),
        generator(MINIMUM_SLOW_START_THRESHOLD..=MAX_CLAMP)
    )]
    pub(crate) clamp: u32,
    #[cfg_attr(any(feature = "generator", test), generator(1..=u32::MAX))]
    pub(crate) initial_window: u32,
    #[cfg_attr(
        any(feature = "generator", test),
        generator(MINIMUM_SLOW_START_THRESHOLD..=u32::MAX)
    )]
    pub(crate) initial_slow_start_threshold: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! setter {
    ($(#[doc = $doc:literal])* $name:ident, $field:ident, $validate:ident) => {
        $(#[doc = $doc])*
        pub fn $name(mut self, value: u32) -> Result<Self, ValidationError> {
            self.$field = $validate(value)?;
            Ok(self)
        }
    };
}

impl Limits {
    pub const fn new() -> Self {
        Self {
            clamp: MAX_CLAMP,
            initial_window: INITIAL_WINDOW,
            initial_slow_start_threshold: INFINITE_SLOW_START_THRESHOLD,
        }
    }

    setter!(
        /// Sets the largest congestion window a connection may reach
        ///
        /// The clamp must not exceed [`MAX_CLAMP`] so the multiplicative decrease can't
        /// overflow.
        with_clamp,
        clamp,
        validate_clamp
    );
    setter!(
        /// Sets the congestion window of a new connection, limited to the clamp
        with_initial_window,
        initial_window,
        validate_initial_window
    );
    setter!(
        with_initial_slow_start_threshold,
        initial_slow_start_threshold,
        validate_slow_start_threshold
    );

    #[inline]
    pub const fn clamp(&self) -> u32 {
        self.clamp
    }

    #[inline]
    pub const fn initial_window(&self) -> u32 {
        self.initial_window
    }

    #[inline]
    pub const fn initial_slow_start_threshold(&self) -> u32 {
        self.initial_slow_start_threshold
    }

    /// Creates the window state for a new connection
    pub fn window(&self) -> Window {
        let mut window = Window::new(self.clamp);
        window.set_congestion_window(self.initial_window);
        window.set_slow_start_threshold(self.initial_slow_start_threshold);
        window
    }
}

fn validate_clamp(value: u32) -> Result<u32, ValidationError> {
    if value > MAX_CLAMP {
        return Err(ValidationError(
            "clamp would overflow the multiplicative decrease",
        ));
    }
    if value < MINIMUM_SLOW_START_THRESHOLD {
        return Err(ValidationError(
            "clamp must be at least the minimum slow start threshold",
        ));
    }
    Ok(value)
}

fn validate_initial_window(value: u32) -> Result<u32, ValidationError> {
    if value == 0 {
        return Err(ValidationError("initial window must be greater than 0"));
    }
    Ok(value)
}

fn validate_slow_start_threshold(value: u32) -> Result<u32, ValidationError> {
    if value < MINIMUM_SLOW_START_THRESHOLD {
        return Err(ValidationError(
            "slow start threshold must be at least the minimum slow start threshold",
        ));
    }
    Ok(value)
}
