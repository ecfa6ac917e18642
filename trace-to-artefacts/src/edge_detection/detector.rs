use std::marker::PhantomData;
use twophoton_common::{Real, Time};

pub(crate) trait EdgePolarity: Default + Clone {
    fn triggers(was_active: bool, is_active: bool) -> bool;
}

/// Below-to-above threshold transitions.
#[derive(Default, Clone)]
pub(crate) struct Rising {}
impl EdgePolarity for Rising {
    fn triggers(was_active: bool, is_active: bool) -> bool {
        !was_active && is_active
    }
}

/// Above-to-below threshold transitions.
#[derive(Default, Clone)]
pub(crate) struct Falling {}
impl EdgePolarity for Falling {
    fn triggers(was_active: bool, is_active: bool) -> bool {
        was_active && !is_active
    }
}

/// Emits the timestamp of each threshold crossing of the given polarity,
/// with a fixed shift added to compensate for hardware latency between
/// channels. The first sample has no predecessor and never emits.
#[derive(Default, Clone)]
pub(crate) struct EdgeDetector<Polarity: EdgePolarity> {
    threshold: Real,
    shift: Time,
    previous: Option<bool>,
    phantom: PhantomData<Polarity>,
}

impl<Polarity: EdgePolarity> EdgeDetector<Polarity> {
    pub(crate) fn new(threshold: Real, shift: Time) -> Self {
        Self {
            threshold,
            shift,
            ..Default::default()
        }
    }

    pub(crate) fn signal(&mut self, time: Time, value: Real) -> Option<Time> {
        let is_active = value > self.threshold;
        match self.previous.replace(is_active) {
            Some(was_active) if Polarity::triggers(was_active, is_active) => {
                Some(time + self.shift)
            }
            _ => None,
        }
    }
}
