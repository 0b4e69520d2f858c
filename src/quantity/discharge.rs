quantity!(
    /// Normalized discharge, also labelled SPD.
    Discharge, via: f64, suffix: "", precision: 6
);

impl Discharge {
    pub const fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}
