use std::fmt::Display;
use std::str::FromStr;

use geo::coordinate_position::CoordPos;
use serde::{Deserialize, Serialize};

use crate::algorithm::native::Location;
use crate::error::{GeoKernelError, Result};

/// The dimension of an intersection, ordered `Empty < 0 < 1 < 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimensions {
    Empty,
    ZeroDimensional,
    OneDimensional,
    TwoDimensional,
}

impl Dimensions {
    fn symbol(&self) -> char {
        match self {
            Dimensions::Empty => 'F',
            Dimensions::ZeroDimensional => '0',
            Dimensions::OneDimensional => '1',
            Dimensions::TwoDimensional => '2',
        }
    }
}

impl From<geo::dimensions::Dimensions> for Dimensions {
    fn from(value: geo::dimensions::Dimensions) -> Self {
        match value {
            geo::dimensions::Dimensions::Empty => Dimensions::Empty,
            geo::dimensions::Dimensions::ZeroDimensional => Dimensions::ZeroDimensional,
            geo::dimensions::Dimensions::OneDimensional => Dimensions::OneDimensional,
            geo::dimensions::Dimensions::TwoDimensional => Dimensions::TwoDimensional,
        }
    }
}

const LOCATIONS: [Location; 3] = [Location::Interior, Location::Boundary, Location::Exterior];

/// A DE-9IM intersection matrix.
///
/// Rows are the interior, boundary and exterior of the left operand; columns those of the right
/// operand.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntersectionMatrix([[Dimensions; 3]; 3]);

impl IntersectionMatrix {
    /// All cells empty.
    pub fn empty() -> Self {
        Self([[Dimensions::Empty; 3]; 3])
    }

    pub fn get(&self, lhs: Location, rhs: Location) -> Dimensions {
        self.0[lhs.index()][rhs.index()]
    }

    pub fn set(&mut self, lhs: Location, rhs: Location, dim: Dimensions) {
        self.0[lhs.index()][rhs.index()] = dim;
    }

    /// Raise a cell to `dim` if it is currently lower.
    pub fn set_at_least(&mut self, lhs: Location, rhs: Location, dim: Dimensions) {
        let cell = &mut self.0[lhs.index()][rhs.index()];
        if *cell < dim {
            *cell = dim;
        }
    }

    /// The matrix of the operands swapped.
    pub fn transpose(&self) -> Self {
        let mut out = Self::empty();
        for lhs in LOCATIONS {
            for rhs in LOCATIONS {
                out.set(rhs, lhs, self.get(lhs, rhs));
            }
        }
        out
    }

    /// Test the matrix against a 9-character pattern over `T F * 0 1 2`.
    ///
    /// `T` matches any non-empty cell and `*` matches anything.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        let symbols: Vec<char> = pattern.chars().collect();
        if symbols.len() != 9 {
            return Err(GeoKernelError::Parse(format!(
                "DE-9IM pattern must have 9 characters, got {}",
                symbols.len()
            )));
        }
        let mut all = true;
        for (idx, symbol) in symbols.into_iter().enumerate() {
            let cell = self.0[idx / 3][idx % 3];
            let ok = match symbol.to_ascii_uppercase() {
                '*' => true,
                'T' => cell != Dimensions::Empty,
                'F' => cell == Dimensions::Empty,
                '0' => cell == Dimensions::ZeroDimensional,
                '1' => cell == Dimensions::OneDimensional,
                '2' => cell == Dimensions::TwoDimensional,
                other => {
                    return Err(GeoKernelError::Parse(format!(
                        "Invalid DE-9IM pattern symbol '{other}'"
                    )))
                }
            };
            all &= ok;
        }
        Ok(all)
    }

    fn cell(&self, lhs: Location, rhs: Location) -> bool {
        self.get(lhs, rhs) != Dimensions::Empty
    }

    pub fn is_disjoint(&self) -> bool {
        !self.cell(Location::Interior, Location::Interior)
            && !self.cell(Location::Interior, Location::Boundary)
            && !self.cell(Location::Boundary, Location::Interior)
            && !self.cell(Location::Boundary, Location::Boundary)
    }

    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    pub fn is_within(&self) -> bool {
        self.cell(Location::Interior, Location::Interior)
            && !self.cell(Location::Interior, Location::Exterior)
            && !self.cell(Location::Boundary, Location::Exterior)
    }

    pub fn is_contains(&self) -> bool {
        self.cell(Location::Interior, Location::Interior)
            && !self.cell(Location::Exterior, Location::Interior)
            && !self.cell(Location::Exterior, Location::Boundary)
    }

    pub fn is_covers(&self) -> bool {
        let some_overlap = self.cell(Location::Interior, Location::Interior)
            || self.cell(Location::Interior, Location::Boundary)
            || self.cell(Location::Boundary, Location::Interior)
            || self.cell(Location::Boundary, Location::Boundary);
        some_overlap
            && !self.cell(Location::Exterior, Location::Interior)
            && !self.cell(Location::Exterior, Location::Boundary)
    }

    pub fn is_covered_by(&self) -> bool {
        self.transpose().is_covers()
    }

    pub fn is_touches(&self) -> bool {
        !self.cell(Location::Interior, Location::Interior)
            && (self.cell(Location::Interior, Location::Boundary)
                || self.cell(Location::Boundary, Location::Interior)
                || self.cell(Location::Boundary, Location::Boundary))
    }

    /// Crossing depends on the topological dimensions of the operands.
    pub fn is_crosses(&self, dim_a: Dimensions, dim_b: Dimensions) -> bool {
        let ii = self.get(Location::Interior, Location::Interior);
        match (dim_a, dim_b) {
            (a, b) if a < b => {
                ii != Dimensions::Empty && self.cell(Location::Interior, Location::Exterior)
            }
            (a, b) if a > b => {
                ii != Dimensions::Empty && self.cell(Location::Exterior, Location::Interior)
            }
            (Dimensions::OneDimensional, Dimensions::OneDimensional) => {
                ii == Dimensions::ZeroDimensional
            }
            _ => false,
        }
    }

    pub fn is_overlaps(&self, dim_a: Dimensions, dim_b: Dimensions) -> bool {
        if dim_a != dim_b || dim_a == Dimensions::Empty {
            return false;
        }
        let ii = self.get(Location::Interior, Location::Interior);
        let interiors_meet = if dim_a == Dimensions::OneDimensional {
            ii == Dimensions::OneDimensional
        } else {
            ii != Dimensions::Empty
        };
        interiors_meet
            && self.cell(Location::Interior, Location::Exterior)
            && self.cell(Location::Exterior, Location::Interior)
    }

    /// Topological equality of two non-empty operands.
    pub fn is_equals(&self) -> bool {
        self.cell(Location::Interior, Location::Interior)
            && !self.cell(Location::Interior, Location::Exterior)
            && !self.cell(Location::Boundary, Location::Exterior)
            && !self.cell(Location::Exterior, Location::Interior)
            && !self.cell(Location::Exterior, Location::Boundary)
    }
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&geo::relate::IntersectionMatrix> for IntersectionMatrix {
    fn from(value: &geo::relate::IntersectionMatrix) -> Self {
        let positions = [CoordPos::Inside, CoordPos::OnBoundary, CoordPos::Outside];
        let mut out = Self::empty();
        for (lhs, lhs_pos) in LOCATIONS.into_iter().zip(positions) {
            for (rhs, rhs_pos) in LOCATIONS.into_iter().zip(positions) {
                out.set(lhs, rhs, value.get(lhs_pos, rhs_pos).into());
            }
        }
        out
    }
}

impl Display for IntersectionMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.0 {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for IntersectionMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IntersectionMatrix({self})")
    }
}

impl FromStr for IntersectionMatrix {
    type Err = GeoKernelError;

    fn from_str(s: &str) -> Result<Self> {
        let symbols: Vec<char> = s.chars().collect();
        if symbols.len() != 9 {
            return Err(GeoKernelError::Parse(format!(
                "Intersection matrix must have 9 characters, got {}",
                symbols.len()
            )));
        }
        let mut out = Self::empty();
        for (idx, symbol) in symbols.into_iter().enumerate() {
            out.0[idx / 3][idx % 3] = match symbol.to_ascii_uppercase() {
                'F' => Dimensions::Empty,
                '0' => Dimensions::ZeroDimensional,
                '1' => Dimensions::OneDimensional,
                '2' => Dimensions::TwoDimensional,
                other => {
                    return Err(GeoKernelError::Parse(format!(
                        "Invalid intersection matrix symbol '{other}'"
                    )))
                }
            };
        }
        Ok(out)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn im(s: &str) -> IntersectionMatrix {
        s.parse().unwrap()
    }

    #[test]
    fn display_round_trip() {
        assert_eq!(im("212101212").to_string(), "212101212");
        assert_eq!(im("FF0FFF102").transpose().to_string(), "FF1FF00F2");
    }

    #[test]
    fn pattern_matching() {
        let m = im("212101212");
        assert!(m.matches("T*T***T**").unwrap());
        assert!(m.matches("2********").unwrap());
        assert!(!m.matches("F********").unwrap());
        assert!(m.matches("t********").unwrap());
        assert!(m.matches("T*T").is_err());
        assert!(m.matches("T*T***T*X").is_err());
    }

    #[test]
    fn named_predicates() {
        // point inside polygon
        let m = im("0FFFFF212");
        assert!(m.is_within());
        assert!(m.is_intersects());
        assert!(!m.is_touches());
        assert!(m.transpose().is_contains());
        assert!(m.transpose().is_covers());

        // point on polygon boundary
        let m = im("F0FFFF212");
        assert!(m.is_touches());
        assert!(!m.is_within());
        assert!(m.is_covered_by());
    }

    #[test]
    fn crosses_depends_on_dimensions() {
        let m = im("0F1FF0102");
        assert!(m.is_crosses(Dimensions::OneDimensional, Dimensions::OneDimensional));
        let m = im("1010F0212");
        assert!(m.is_crosses(Dimensions::OneDimensional, Dimensions::TwoDimensional));
        assert!(!m.is_crosses(Dimensions::TwoDimensional, Dimensions::TwoDimensional));
    }

    #[test]
    fn overlaps_requires_equal_dimensions() {
        let m = im("212101212");
        assert!(m.is_overlaps(Dimensions::TwoDimensional, Dimensions::TwoDimensional));
        assert!(!m.is_overlaps(Dimensions::OneDimensional, Dimensions::TwoDimensional));
    }
}
