// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Name-based lookup of congestion control algorithms
//!
//! A transport selects the algorithm for each connection by name. Algorithms are added and
//! removed explicitly rather than as a side effect of loading code.

use crate::{
    log::_debug,
    recovery::{china, ChinaCongestionController, CongestionController},
};
use alloc::{boxed::Box, vec::Vec};
use core::fmt;

/// The longest name an algorithm may be registered under, matching `TCP_CA_NAME_MAX`
pub const NAME_MAX_LEN: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The name is empty or longer than [`NAME_MAX_LEN`] bytes
    InvalidName,
    /// An algorithm with the same name is already registered
    AlreadyRegistered,
    /// No algorithm is registered under the name
    NotRegistered,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidName => write!(
                f,
                "algorithm names must be between 1 and {NAME_MAX_LEN} bytes"
            ),
            Self::AlreadyRegistered => write!(f, "algorithm is already registered"),
            Self::NotRegistered => write!(f, "algorithm is not registered"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A named constructor for congestion controllers
#[derive(Clone, Copy)]
pub struct Algorithm {
    name: &'static str,
    constructor: fn() -> Box<dyn CongestionController>,
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Algorithm").field("name", &self.name).finish()
    }
}

impl Algorithm {
    pub const fn new(name: &'static str, constructor: fn() -> Box<dyn CongestionController>) -> Self {
        Self { name, constructor }
    }

    /// The TCP China algorithm
    pub fn china() -> Self {
        Self::new(china::NAME, || Box::new(ChinaCongestionController::new()))
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn new_congestion_controller(&self) -> Box<dyn CongestionController> {
        (self.constructor)()
    }
}

#[derive(Clone, Debug)]
pub struct Registry {
    algorithms: Vec<Algorithm>,
}

impl Default for Registry {
    /// Returns a registry containing the TCP China algorithm
    fn default() -> Self {
        Self {
            algorithms: alloc::vec![Algorithm::china()],
        }
    }
}

impl Registry {
    /// Returns a registry with no algorithms
    pub const fn new() -> Self {
        Self {
            algorithms: Vec::new(),
        }
    }

    pub fn register(&mut self, algorithm: Algorithm) -> Result<(), Error> {
        if algorithm.name.is_empty() || algorithm.name.len() > NAME_MAX_LEN {
            return Err(Error::InvalidName);
        }

        if self.get(algorithm.name).is_some() {
            return Err(Error::AlreadyRegistered);
        }

        _debug!(algorithm = algorithm.name, "registered congestion control algorithm");
        self.algorithms.push(algorithm);
        Ok(())
    }

    pub fn unregister(&mut self, name: &str) -> Result<Algorithm, Error> {
        let index = self
            .algorithms
            .iter()
            .position(|algorithm| algorithm.name == name)
            .ok_or(Error::NotRegistered)?;

        _debug!(algorithm = name, "unregistered congestion control algorithm");
        Ok(self.algorithms.remove(index))
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Algorithm> {
        self.algorithms
            .iter()
            .find(|algorithm| algorithm.name == name)
    }

    /// Creates a controller for a new connection using the algorithm registered as `name`
    pub fn new_congestion_controller(
        &self,
        name: &str,
    ) -> Result<Box<dyn CongestionController>, Error> {
        self.get(name)
            .map(Algorithm::new_congestion_controller)
            .ok_or(Error::NotRegistered)
    }

    /// Returns the registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.algorithms.iter().map(Algorithm::name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}
