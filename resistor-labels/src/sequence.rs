use crate::color::BandTriple;
use crate::error::SequenceError;
use crate::series::Series;
use crate::value::ResistorValue;

/// Safety cap on how many labels a sequence may emit before giving up.
pub const DEFAULT_ITERATION_LIMIT: usize = 10_000;

/// Everything needed to draw one label.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub value: ResistorValue,
    /// Canonical text, e.g. `1.2 KΩ`.
    pub text: String,
    pub bands: BandTriple,
}

/// One result of [`ValueSequencer::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub label: Label,
    /// `false` on the step that emitted the max value; no further calls are allowed.
    pub more: bool,
}

/// Walks a series decade by decade, up to and including `max_value`.
#[derive(Debug, Clone)]
pub struct ValueSequencer<'a> {
    series: &'a Series,
    max_value: u64,
    limit: usize,
    position: usize,
    decade: u32,
    emitted: usize,
    finished: bool,
}

impl<'a> ValueSequencer<'a> {
    /// `limit` bounds the number of emitted labels, whether or not
    /// `max_value` is ever produced.
    pub fn new(series: &'a Series, max_value: u64, limit: usize) -> Self {
        Self {
            series,
            max_value,
            limit,
            position: 0,
            decade: 0,
            emitted: 0,
            finished: false,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn decade(&self) -> u32 {
        self.decade
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Produce the next label and advance.
    pub fn advance(&mut self) -> Result<Step, SequenceError> {
        if self.finished {
            return Err(SequenceError::Exhausted);
        }
        if self.emitted >= self.limit {
            return Err(SequenceError::IterationLimit { limit: self.limit });
        }

        let base = self.series.bases()[self.position];
        let decade = self.decade;
        let bands =
            BandTriple::for_value(base, decade).ok_or(SequenceError::NoMultiplierColor(decade))?;
        // A two-digit base times 10^9 or less always fits in a u64.
        let value =
            ResistorValue::new(base, decade).ok_or(SequenceError::NoMultiplierColor(decade))?;

        self.position += 1;
        if self.position == self.series.len() {
            self.position = 0;
            self.decade += 1;
        }
        self.emitted += 1;

        let more = value.ohms() != self.max_value;
        self.finished = !more;

        Ok(Step {
            label: Label {
                text: value.to_string(),
                value,
                bands,
            },
            more,
        })
    }
}

impl Iterator for ValueSequencer<'_> {
    type Item = Result<Label, SequenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.advance() {
            Ok(step) => Some(Ok(step.label)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorBand;
    use crate::series::builtin_series;

    #[test]
    fn decade_increments_after_full_series() {
        let series = Series::new(vec![10, 22, 47]).unwrap();
        let mut seq = ValueSequencer::new(&series, 470_000, DEFAULT_ITERATION_LIMIT);
        let n = series.len();
        let mut call = 0;
        loop {
            let before = seq.decade();
            let step = seq.advance().unwrap();
            call += 1;
            assert_eq!(seq.position(), call % n);
            if seq.decade() != before {
                assert_eq!(call % n, 0, "decade changed on call {call}");
            } else {
                assert_ne!(call % n, 0, "decade did not change on call {call}");
            }
            if !step.more {
                break;
            }
        }
        assert_eq!(call, 15);
    }

    #[test]
    fn max_value_is_last_and_inclusive() {
        let series = builtin_series("E12").unwrap();
        let mut seq = ValueSequencer::new(&series, 4_700, DEFAULT_ITERATION_LIMIT);
        let mut steps = Vec::new();
        loop {
            let step = seq.advance().unwrap();
            let more = step.more;
            steps.push(step);
            if !more {
                break;
            }
        }
        assert_eq!(steps.len(), 12 * 2 + 9);
        assert!(steps[..steps.len() - 1].iter().all(|s| s.more));
        let last = steps.last().unwrap();
        assert_eq!(last.label.value.ohms(), 4_700);
        assert_eq!(last.label.text, "4.7 K\u{2126}");
        assert!(matches!(seq.advance(), Err(SequenceError::Exhausted)));
    }

    #[test]
    fn first_label_of_e12() {
        let series = builtin_series("E12").unwrap();
        let mut seq = ValueSequencer::new(&series, 1_000_000, DEFAULT_ITERATION_LIMIT);
        let step = seq.advance().unwrap();
        assert_eq!(step.label.text, "10 \u{2126}");
        assert_eq!(
            step.label.bands.bands(),
            [ColorBand::Brown, ColorBand::Black, ColorBand::Black]
        );
        assert!(step.more);
    }

    #[test]
    fn unreachable_max_hits_iteration_limit() {
        let series = builtin_series("E12").unwrap();
        let mut seq = ValueSequencer::new(&series, 4_701, 50);
        let results: Vec<_> = seq.by_ref().collect();
        assert_eq!(results.len(), 51);
        assert!(results[..50].iter().all(|r| r.is_ok()));
        assert!(matches!(
            results[50],
            Err(SequenceError::IterationLimit { limit: 50 })
        ));
        assert!(seq.next().is_none());
    }

    #[test]
    fn decade_past_palette_is_an_error() {
        let series = Series::new(vec![10]).unwrap();
        let mut seq = ValueSequencer::new(&series, 1, DEFAULT_ITERATION_LIMIT);
        for _ in 0..10 {
            seq.advance().unwrap();
        }
        assert!(matches!(
            seq.advance(),
            Err(SequenceError::NoMultiplierColor(10))
        ));
    }

    #[test]
    fn every_colored_decade_fits() {
        let series = Series::new(vec![99]).unwrap();
        let mut seq = ValueSequencer::new(&series, 99_000_000_000, DEFAULT_ITERATION_LIMIT);
        let last = seq.by_ref().last().unwrap().unwrap();
        assert_eq!(last.value.ohms(), 99_000_000_000);
        assert_eq!(last.bands.bands()[2], ColorBand::White);
        assert_eq!(seq.emitted(), 10);
    }

    #[test]
    fn iterator_stops_after_max() {
        let series = Series::new(vec![10, 47]).unwrap();
        let texts: Vec<String> = ValueSequencer::new(&series, 470, 100)
            .map(|r| r.unwrap().text)
            .collect();
        assert_eq!(
            texts,
            vec!["10 \u{2126}", "47 \u{2126}", "100 \u{2126}", "470 \u{2126}"]
        );
    }
}
