use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Rupees per unit.
pub type UnitRate = Quantity<-1, 1>;

impl Display for UnitRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{:.2}/unit", self.0.0)
    }
}

impl Debug for UnitRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}₹/u", self.0.0)
    }
}
