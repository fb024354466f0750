//! Round-robin load balancing strategy.

use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use crate::load_balancer::{LoadBalancer, backend::{Endpoint, EndpointError}};

/// Returned when a selector is built without any endpoints.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("endpoint pool is empty")]
pub struct EmptyPoolError;

/// Round-robin selector.
/// Owns the endpoint pool and a cursor that advances once per pick.
#[derive(Debug)]
pub struct RoundRobin {
    endpoints: Vec<Endpoint>,
    counter: AtomicUsize,
}

impl RoundRobin {
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Self, EmptyPoolError> {
        if endpoints.is_empty() {
            return Err(EmptyPoolError);
        }
        Ok(Self {
            endpoints,
            counter: AtomicUsize::new(0),
        })
    }

    /// Build a selector straight from address strings.
    pub fn from_urls<'a, I>(addresses: I) -> Result<Self, RoundRobinError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let endpoints = addresses
            .into_iter()
            .map(Endpoint::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(endpoints)?)
    }

    /// Number of picks served so far (wraps at `usize::MAX`).
    pub fn picks(&self) -> usize {
        self.counter.load(Ordering::Relaxed)
    }
}

/// Errors from [`RoundRobin::from_urls`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundRobinError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error(transparent)]
    Empty(#[from] EmptyPoolError),
}

impl LoadBalancer for RoundRobin {
    fn pick(&self) -> &Endpoint {
        // A single fetch_add hands every caller a distinct ticket, so concurrent
        // picks can never observe the same slot.
        let ticket = self.counter.fetch_add(1, Ordering::Relaxed);
        &self.endpoints[ticket % self.endpoints.len()]
    }

    fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }
}
