quantity!(
    /// Gate opening height.
    ///
    /// Displayed as entered, so that close heights stay distinguishable.
    Feet, via: f64, suffix: "ft"
);

impl Feet {
    pub const fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    pub const fn abs_diff(self, other: Self) -> Self {
        Self((self.0 - other.0).abs())
    }
}
