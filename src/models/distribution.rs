//! Distribution summary models

/// First two moments of a return series, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub std_dev: f64,
}

impl Moments {
    /// A zero or undefined spread cannot parameterize a normal density.
    /// Constant inputs can leave rounding residue, hence the relative floor.
    pub fn is_degenerate(&self) -> bool {
        !self.std_dev.is_finite() || self.std_dev <= 1e-12 * self.mean.abs().max(1.0)
    }
}
