use super::detector::{EdgeDetector, EdgePolarity};
use twophoton_common::{Real, Time};

#[derive(Clone)]
pub(crate) struct EdgeIter<I, Polarity>
where
    I: Iterator<Item = (Time, Real)>,
    Polarity: EdgePolarity,
{
    source: I,
    detector: EdgeDetector<Polarity>,
}

impl<I, Polarity> Iterator for EdgeIter<I, Polarity>
where
    I: Iterator<Item = (Time, Real)>,
    Polarity: EdgePolarity,
{
    type Item = Time;

    fn next(&mut self) -> Option<Time> {
        loop {
            let (time, value) = self.source.next()?;
            if let Some(edge) = self.detector.signal(time, value) {
                return Some(edge);
            }
        }
    }
}

pub(crate) trait EdgeFilter<I, Polarity>
where
    I: Iterator<Item = (Time, Real)>,
    Polarity: EdgePolarity,
{
    fn edges(self, detector: EdgeDetector<Polarity>) -> EdgeIter<I, Polarity>;
}

impl<I, Polarity> EdgeFilter<I, Polarity> for I
where
    I: Iterator<Item = (Time, Real)>,
    Polarity: EdgePolarity,
{
    fn edges(self, detector: EdgeDetector<Polarity>) -> EdgeIter<I, Polarity> {
        EdgeIter {
            source: self,
            detector,
        }
    }
}
