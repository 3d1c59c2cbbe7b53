/// The `Tracker` struct accumulates per-position hit counters across simulation trials. Position
/// `p` is incremented once for every trial in which the address drawn for `p` was below `p`. The
/// counters only ever grow and are read once, when normalized into a `ValidFractionCurve`.
#[derive(Debug, PartialEq, Clone)]
pub struct Tracker {
    hits: Vec<u64>,
    pub trials: u64,
}

impl Tracker {
    /// Create a new instance of the `Tracker` struct with `positions` counters initialized to
    /// zero.
    pub fn new(positions: usize) -> Self {
        Self {
            hits: vec![0; positions],
            trials: 0,
        }
    }

    pub fn positions(&self) -> usize {
        self.hits.len()
    }

    /// Record a valid translation at `position` for the current trial.
    ///
    /// # Panics
    ///
    /// Panics if `position` is outside the tracked range.
    ///
    pub fn record_hit(&mut self, position: usize) {
        self.hits[position] += 1;
    }

    pub fn finish_trial(&mut self) {
        self.trials += 1;
    }

    pub fn hits(&self) -> &[u64] {
        &self.hits
    }

    pub fn total_hits(&self) -> u64 {
        self.hits.iter().sum()
    }

    /// Divide every counter by the number of completed trials. A tracker that never finished a
    /// trial normalizes to an all-zero curve.
    pub fn normalize(&self) -> ValidFractionCurve {
        let fractions = match self.trials {
            0 => vec![0.0; self.hits.len()],
            trials => self
                .hits
                .iter()
                .map(|&hits| hits as f64 / trials as f64)
                .collect(),
        };
        ValidFractionCurve { fractions }
    }
}

impl std::fmt::Display for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let curve = self.normalize();
        let saturation = match curve.saturation_position() {
            Some(position) => position.to_string(),
            None => String::from("never"),
        };
        write!(
            f,
            "
Stats Tracked
---------------------------------
trials:                   {:08}
positions:                {:08}
total_hits:               {:012}


mean valid fraction:      {:.06}
saturates at limit:       {}
               ",
            self.trials,
            self.positions(),
            self.total_hits(),
            curve.mean(),
            saturation,
        )
    }
}

/// The normalized output of a simulation: one valid fraction in `[0, 1]` per position.
#[derive(Debug, PartialEq, Clone)]
pub struct ValidFractionCurve {
    fractions: Vec<f64>,
}

impl ValidFractionCurve {
    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<f64> {
        self.fractions.get(position).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.fractions
    }

    /// Chart coordinates: the x value is the 1-based position, the y value its valid fraction.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.fractions
            .iter()
            .enumerate()
            .map(|(index, &fraction)| ((index + 1) as f64, fraction))
    }

    pub fn mean(&self) -> f64 {
        match self.fractions.len() {
            0 => 0.0,
            n => self.fractions.iter().sum::<f64>() / n as f64,
        }
    }

    /// The first position from which every remaining fraction equals 1.
    pub fn saturation_position(&self) -> Option<usize> {
        let tail = self
            .fractions
            .iter()
            .rev()
            .take_while(|&&fraction| fraction >= 1.0)
            .count();
        match tail {
            0 => None,
            n => Some(self.fractions.len() - n),
        }
    }
}
