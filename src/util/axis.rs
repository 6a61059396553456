use crate::util::*;

/// Sweep direction of a one dimensional operator.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Component of a `Coord` this axis addresses.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }

    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Unit step along the axis.
    #[inline]
    pub fn unit(self) -> Coord {
        match self {
            Axis::X => vector![1, 0],
            Axis::Y => vector![0, 1],
        }
    }

    /// Build a coordinate from a position along this axis
    /// and a position along the other one.
    #[inline]
    pub fn compose(self, along: i32, across: i32) -> Coord {
        match self {
            Axis::X => vector![along, across],
            Axis::Y => vector![across, along],
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn compose_test() {
        assert_eq!(Axis::X.compose(3, 7), vector![3, 7]);
        assert_eq!(Axis::Y.compose(3, 7), vector![7, 3]);
        for axis in Axis::ALL {
            let c = axis.compose(5, 2);
            assert_eq!(c[axis.index()], 5);
            assert_eq!(c[axis.other().index()], 2);
            assert_eq!(axis.other().other(), axis);
        }
    }
}
