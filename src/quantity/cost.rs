use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Amount in Indian rupees.
pub type Cost = Quantity<0, 1>;

impl Cost {
    /// Round the cost to [paise][1], the hundredth of a rupee.
    ///
    /// Only for presentation: the engine never rounds intermediate amounts.
    ///
    /// [1]: https://en.wikipedia.org/wiki/Indian_paisa
    pub fn round_to_paise(self) -> Self {
        Self::from((self.0.0 * 100.0).round() / 100.0)
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{:.2}", self.0.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}₹", self.0.0)
    }
}
