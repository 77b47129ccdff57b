use crate::*;
use std::time::Instant;

/// Mean and population standard deviation of keystroke deltas.
/// Fewer than two samples carry no opinion and yield `(0, 0)`.
pub fn classify(deltas: &[Millis]) -> (f64, f64) {
    if deltas.len() < 2 {
        return (0.0, 0.0);
    }
    let n = deltas.len() as f64;
    let mean = deltas.iter().map(|&d| d as f64).sum::<f64>() / n;
    let variance = deltas
        .iter()
        .map(|&d| d as f64 - mean)
        .map(|r| r * r)
        .sum::<f64>()
        / n;
    (mean, variance.sqrt())
}

/// Suspiciously uniform timing, consistent with a fixed-delay opponent.
pub fn automated(mean: f64, spread: f64) -> bool {
    BOT_MEAN_LOW < mean && mean < BOT_MEAN_HIGH && spread <= BOT_SPREAD
}

/// Inter-keystroke deltas observed from the partner during one exchange.
#[derive(Debug, Default)]
pub struct Timings {
    last: Option<Instant>,
    deltas: Vec<Millis>,
}

impl Timings {
    /// Records a partner keystroke seen at `now`.
    pub fn tick(&mut self, now: Instant) {
        if let Some(last) = self.last {
            self.deltas
                .push(now.saturating_duration_since(last).as_millis() as Millis);
        }
        self.last = Some(now);
    }
    pub fn reset(&mut self) {
        self.last = None;
        self.deltas.clear();
    }
    pub fn deltas(&self) -> &[Millis] {
        &self.deltas
    }
    /// Classifies the sample collected so far, then starts a fresh one.
    pub fn check(&mut self) -> bool {
        let (mean, spread) = classify(&self.deltas);
        log::info!(
            "[detector] timings ({}): {:.1} ± {:.2}",
            self.deltas.len(),
            mean,
            spread
        );
        self.reset();
        automated(mean, spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    #[test]
    fn too_few_samples_is_neutral() {
        assert_eq!(classify(&[]), (0.0, 0.0));
        assert_eq!(classify(&[200]), (0.0, 0.0));
        assert!(!automated(0.0, 0.0));
    }
    #[test]
    fn uniform_timing_is_automated() {
        let (mean, spread) = classify(&[200, 200, 200, 201]);
        assert!((mean - 200.25).abs() < 1e-9);
        assert!((spread - 0.4330).abs() < 1e-3);
        assert!(automated(mean, spread));
    }
    #[test]
    fn irregular_timing_is_human() {
        let (mean, spread) = classify(&[50, 400, 120]);
        assert!((mean - 190.0).abs() < 1e-9);
        assert!(spread > BOT_SPREAD);
        assert!(!automated(mean, spread));
    }
    #[test]
    fn band_edges_are_exclusive() {
        assert!(!automated(198.0, 0.0));
        assert!(!automated(202.0, 0.0));
        assert!(automated(201.9, 2.0));
        assert!(!automated(200.0, 2.01));
    }
    #[test]
    fn population_deviation() {
        // sample deviation would be sqrt(2) here
        let (_, spread) = classify(&[199, 201]);
        assert!((spread - 1.0).abs() < 1e-9);
    }
    #[test]
    fn ticks_record_deltas() {
        let start = Instant::now();
        let mut timings = Timings::default();
        timings.tick(start);
        assert!(timings.deltas().is_empty());
        timings.tick(start + Duration::from_millis(200));
        timings.tick(start + Duration::from_millis(401));
        assert_eq!(timings.deltas(), &[200, 201]);
    }
    #[test]
    fn check_resets_sample() {
        let start = Instant::now();
        let mut timings = Timings::default();
        (0..6).for_each(|i| timings.tick(start + Duration::from_millis(200 * i)));
        assert!(timings.check());
        assert!(timings.deltas().is_empty());
        timings.tick(start + Duration::from_secs(5));
        assert!(timings.deltas().is_empty());
        assert!(!timings.check());
    }
}
