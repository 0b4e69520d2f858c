quantity!(
    /// Tabulated spillway flow rate, cubic feet per second.
    CubicFeetPerSecond, via: f64, suffix: "cfs", precision: 0
);

impl CubicFeetPerSecond {
    pub const fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}
