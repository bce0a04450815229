use std::{convert::Infallible, thread, time::Duration};

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, OutputPin},
};
use log::trace;

/// Output pin that only logs level changes.
#[derive(Debug)]
pub(super) struct HostPin {
    name: &'static str,
}

impl HostPin {
    pub(super) const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl ErrorType for HostPin {
    type Error = Infallible;
}

impl OutputPin for HostPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        trace!("{} low", self.name);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        trace!("{} high", self.name);
        Ok(())
    }
}

/// Sleeps only when running in real time; scripted sessions run instantly.
#[derive(Debug)]
pub(super) struct HostDelay {
    realtime: bool,
}

impl HostDelay {
    pub(super) const fn new(realtime: bool) -> Self {
        Self { realtime }
    }
}

impl DelayNs for HostDelay {
    fn delay_ns(&mut self, ns: u32) {
        if self.realtime {
            thread::sleep(Duration::from_nanos(ns as u64));
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        if self.realtime {
            thread::sleep(Duration::from_millis(ms as u64));
        }
    }
}
