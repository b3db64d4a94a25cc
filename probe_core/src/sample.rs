//! Readings and the caller-owned history buffer.

use serde::Serialize;

/// An admitted reading: every field is a finite temperature or time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Elapsed seconds since acquisition start.
    pub time: f64,
    /// Internal (probe tip) temperature.
    pub internal: f64,
    /// External (ambient) temperature.
    pub external: f64,
}

impl Sample {
    pub const fn new(time: f64, internal: f64, external: f64) -> Self {
        Self {
            time,
            internal,
            external,
        }
    }
}

/// A candidate reading as delivered by the acquisition side.
///
/// `None` is the invalid marker for a failed vendor read. Non-finite values
/// are treated the same way.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawSample {
    pub time: Option<f64>,
    pub internal: Option<f64>,
    pub external: Option<f64>,
}

impl RawSample {
    pub const fn new(time: Option<f64>, internal: Option<f64>, external: Option<f64>) -> Self {
        Self {
            time,
            internal,
            external,
        }
    }

    /// A candidate with every field present.
    pub const fn valid(time: f64, internal: f64, external: f64) -> Self {
        Self::new(Some(time), Some(internal), Some(external))
    }

    /// Convert into an admitted `Sample` if no field carries the invalid marker.
    pub fn to_sample(&self) -> Option<Sample> {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
        Some(Sample {
            time: finite(self.time)?,
            internal: finite(self.internal)?,
            external: finite(self.external)?,
        })
    }
}

impl From<Sample> for RawSample {
    fn from(s: Sample) -> Self {
        Self::valid(s.time, s.internal, s.external)
    }
}

/// Ordered, append-only sequence of accepted samples.
///
/// Insertion order is chronological order; nothing here reorders or
/// deduplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    samples: Vec<Sample>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            samples: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, s: Sample) {
        self.samples.push(s);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl FromIterator<Sample> for History {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
