mod functions;
pub use functions::{Function, Interface, InterfaceView, Rcm, Synchronism};

use serde::{Deserialize, Serialize};

/// Whether a function provides an interface or requires (receives) it
///
/// * `PI` - provided interface, implemented by the owning function
/// * `RI` - required interface, the owning function receives messages through it
///          from its distant function
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum Direction {
    PI,
    RI,
}

impl Direction {
    /// Only received interfaces take part in connection grouping
    pub fn is_received(&self) -> bool {
        matches!(self, Direction::RI)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::PI => write!(f, "PI"),
            Direction::RI => write!(f, "RI"),
        }
    }
}
