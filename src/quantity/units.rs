use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{Quantity, cost::Cost, rate::UnitRate};

/// Billed consumption in units, one unit being one kilowatt-hour.
pub type Units = Quantity<1, 0>;

impl Units {
    /// Default free allowance granted to a domestic connection per billing cycle.
    pub const HUNDRED: Self = Self(ordered_float::OrderedFloat(100.0));
}

impl Display for Units {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} units", self.0.0)
    }
}

impl Debug for Units {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}u", self.0.0)
    }
}

impl Mul<UnitRate> for Units {
    type Output = Cost;

    fn mul(self, rhs: UnitRate) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}
