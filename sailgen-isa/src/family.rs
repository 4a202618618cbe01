use std::fmt;

use crate::layout::{GENERIC_LAYOUT, I_LAYOUT, J_LAYOUT, Layout, R_LAYOUT, U_LAYOUT};

/// Instruction encoding family.
///
/// Selection is a plain substring test over the segment text, so a segment
/// mentioning two markers resolves by the fixed priority of [`Family::classify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// Upper-immediate (`UTYPE`).
    U,
    /// Jump (`JTYPE`).
    J,
    /// Immediate arithmetic (`ITYPE`).
    I,
    /// Register-register (`RTYPE`).
    R,
    /// Fallback when no marker is present.
    Generic,
}

impl Family {
    /// Every family, in classification priority order.
    pub const ALL: [Family; 5] = [Family::U, Family::J, Family::I, Family::R, Family::Generic];

    /// Pick the family for a segment. Markers are tested U, J, I, R and the
    /// first hit wins; no hit selects [`Family::Generic`].
    pub fn classify(text: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|family| family.marker().is_some_and(|m| text.contains(m)))
            .unwrap_or(Self::Generic)
    }

    /// Marker token that selects this family.
    pub const fn marker(self) -> Option<&'static str> {
        match self {
            Family::U => Some("UTYPE"),
            Family::J => Some("JTYPE"),
            Family::I => Some("ITYPE"),
            Family::R => Some("RTYPE"),
            Family::Generic => None,
        }
    }

    /// Fixed bit layout of this family.
    pub fn layout(self) -> &'static Layout {
        match self {
            Family::U => &U_LAYOUT,
            Family::J => &J_LAYOUT,
            Family::I => &I_LAYOUT,
            Family::R => &R_LAYOUT,
            Family::Generic => &GENERIC_LAYOUT,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::U => "U-type",
            Family::J => "J-type",
            Family::I => "I-type",
            Family::R => "R-type",
            Family::Generic => "generic",
        };
        f.write_str(name)
    }
}
