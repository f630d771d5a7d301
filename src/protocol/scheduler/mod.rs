//! Per-channel tick counters deciding which broadcasts fire on each tick.
//!
//! Every registered channel counts ticks independently. When its counter
//! reaches the configured period the channel fires and the counter resets to
//! zero: periods are tick-exact, with no drift compensation and no catch-up
//! for skipped ticks.
use crate::error::SchedulerError;
use heapless::Vec;

/// Handle returned by [`Scheduler::register_channel`]; its index is the
/// registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelId(u8);

impl ChannelId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Counter and period of one channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelState {
    counter: u32,
    period: u32,
}

impl ChannelState {
    fn new(period: u32) -> Self {
        Self { counter: 0, period }
    }

    /// Advance by one tick; `true` when the channel fires.
    fn tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.period {
            self.counter = 0;
            true
        } else {
            false
        }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn period(&self) -> u32 {
        self.period
    }
}

/// Channels that fired on one tick, in registration order.
pub type FiredChannels<const N: usize> = Vec<ChannelId, N>;

//==================================================================================SCHEDULER
/// Fixed-capacity set of periodic channels.
#[derive(Clone, Debug, Default)]
pub struct Scheduler<const N: usize> {
    channels: Vec<ChannelState, N>,
}

impl<const N: usize> Scheduler<N> {
    pub const fn new() -> Self {
        Self {
            channels: Vec::new(),
        }
    }

    /// Add a channel firing every `period_ticks` ticks.
    pub fn register_channel(&mut self, period_ticks: u32) -> Result<ChannelId, SchedulerError> {
        if period_ticks == 0 {
            return Err(SchedulerError::ZeroPeriod);
        }
        // ChannelId stores the index in a u8.
        let capacity = N.min(u8::MAX as usize + 1);
        let index = self.channels.len();
        if index >= capacity {
            return Err(SchedulerError::CapacityExceeded { capacity });
        }
        self.channels
            .push(ChannelState::new(period_ticks))
            .map_err(|_| SchedulerError::CapacityExceeded { capacity })?;
        Ok(ChannelId(index as u8))
    }

    /// Advance every channel by one tick and report those that fired.
    pub fn on_tick(&mut self) -> FiredChannels<N> {
        let mut fired = FiredChannels::new();
        for (index, channel) in self.channels.iter_mut().enumerate() {
            if channel.tick() {
                // `fired` has the same capacity as `channels`.
                let _ = fired.push(ChannelId(index as u8));
            }
        }
        fired
    }

    pub fn channel(&self, id: ChannelId) -> Option<&ChannelState> {
        self.channels.get(id.index())
    }

    pub fn period(&self, id: ChannelId) -> Option<u32> {
        self.channel(id).map(ChannelState::period)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
