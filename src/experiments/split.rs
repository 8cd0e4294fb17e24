/// Split one uniform value in `[0,1)` into a decision and a fresh uniform
/// residual in `[0,1)`.
///
/// Each call consumes one bit of the seed's binary expansion, so a chain of
/// calls from the same seed always yields the same decisions.
pub fn split_random(random: f64) -> (f64, bool) {
    let scaled = random * 2.0;
    // Rounding can push `scaled` to exactly 2.0 for inputs just below 1.
    let bucket = scaled.floor().clamp(0.0, 1.0);
    let residual = (scaled - bucket).clamp(0.0, 1.0 - f64::EPSILON / 2.0);
    (residual, bucket == 1.0)
}

/// Iterator over the successive decisions of one seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketSplitter {
    residual: f64,
}

impl BucketSplitter {
    pub fn new(seed: f64) -> Self {
        Self { residual: seed }
    }

    pub fn next_decision(&mut self) -> bool {
        let (residual, decision) = split_random(self.residual);
        self.residual = residual;
        decision
    }
}

impl Iterator for BucketSplitter {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        Some(self.next_decision())
    }
}
