//! Admission filter for incoming readings.
//!
//! Rejects readings that carry the invalid marker and readings that repeat
//! the previous accepted pair bit-for-bit (a stalled upstream poll). Rule
//! order: invalid marker, then empty-history bootstrap, then staleness. An
//! invalid candidate is therefore rejected even on an empty history, and the
//! history only ever holds complete samples.

use crate::sample::{History, RawSample, Sample};

/// Outcome of judging one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// First sample of a run; admitted without a staleness check.
    Bootstrap,
    Accepted,
    /// A field carried the invalid marker.
    Invalid,
    /// Internal and external both equal the last accepted values.
    Stale,
}

impl Verdict {
    #[inline]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Bootstrap | Self::Accepted)
    }
}

/// Counts from a batch `clean` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub accepted: usize,
    pub invalid: usize,
    pub stale: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SampleValidator;

impl SampleValidator {
    pub const fn new() -> Self {
        Self
    }

    /// Judge `candidate` against the tail of `history`. Pure.
    pub fn verdict(&self, history: &History, candidate: &RawSample) -> Verdict {
        let Some(sample) = candidate.to_sample() else {
            return Verdict::Invalid;
        };
        let Some(last) = history.last() else {
            return Verdict::Bootstrap;
        };
        if is_repeat(last, &sample) {
            Verdict::Stale
        } else {
            Verdict::Accepted
        }
    }

    /// Whether `candidate` should be appended to `history`. Never fails.
    #[inline]
    pub fn accept(&self, history: &History, candidate: &RawSample) -> bool {
        self.verdict(history, candidate).is_accepted()
    }

    /// Run a whole recorded sequence through `accept`, building the history.
    pub fn clean<I>(&self, raws: I) -> (History, CleanReport)
    where
        I: IntoIterator<Item = RawSample>,
    {
        let mut history = History::new();
        let mut report = CleanReport::default();
        for raw in raws {
            match self.verdict(&history, &raw) {
                Verdict::Invalid => report.invalid += 1,
                Verdict::Stale => report.stale += 1,
                Verdict::Bootstrap | Verdict::Accepted => {
                    if let Some(s) = raw.to_sample() {
                        history.push(s);
                        report.accepted += 1;
                    }
                }
            }
        }
        tracing::debug!(
            accepted = report.accepted,
            invalid = report.invalid,
            stale = report.stale,
            "history cleaned"
        );
        (history, report)
    }
}

#[inline]
#[allow(clippy::float_cmp)]
fn is_repeat(last: &Sample, next: &Sample) -> bool {
    next.internal == last.internal && next.external == last.external
}
