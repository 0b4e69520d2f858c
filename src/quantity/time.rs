quantity!(Hours, via: f64, suffix: "h");

impl Hours {
    pub const ZERO: Self = Self(0.0);

    pub const fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}
