use g64_core::grid::PixelGrid;

use crate::{edge, point};

/// Outil sélectionnable, sans paramètre.
///
/// # Example
/// ```
/// use g64_ops::operation::OperationKind;
/// let kind = OperationKind::default();
/// assert_eq!(kind, OperationKind::Add);
/// assert_eq!(kind.next(), OperationKind::Subtract);
/// assert_eq!(OperationKind::EdgeDetect.next(), OperationKind::Add);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Addition d'une constante.
    #[default]
    Add,
    /// Soustraction d'une constante.
    Subtract,
    /// Multiplication par une constante.
    Multiply,
    /// Différence horizontale.
    EdgeDetect,
}

impl OperationKind {
    /// Every tool, in menu order.
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Add,
        OperationKind::Subtract,
        OperationKind::Multiply,
        OperationKind::EdgeDetect,
    ];

    /// Menu label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OperationKind::Add => "+",
            OperationKind::Subtract => "-",
            OperationKind::Multiply => "*",
            OperationKind::EdgeDetect => "Show Edge",
        }
    }

    /// Whether the tool reads the constant slider.
    #[must_use]
    pub fn takes_constant(self) -> bool {
        !matches!(self, OperationKind::EdgeDetect)
    }

    /// Bind the slider value.
    ///
    /// # Example
    /// ```
    /// use g64_ops::operation::{Operation, OperationKind};
    /// assert_eq!(OperationKind::Multiply.with_constant(3), Operation::Multiply(3));
    /// assert_eq!(OperationKind::EdgeDetect.with_constant(3), Operation::EdgeDetect);
    /// ```
    #[must_use]
    pub fn with_constant(self, k: i32) -> Operation {
        match self {
            OperationKind::Add => Operation::Add(k),
            OperationKind::Subtract => Operation::Subtract(k),
            OperationKind::Multiply => Operation::Multiply(k),
            OperationKind::EdgeDetect => Operation::EdgeDetect,
        }
    }

    /// Next tool, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous tool, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Opération sur une seule image, constante liée.
///
/// # Example
/// ```
/// use g64_core::grid::PixelGrid;
/// use g64_ops::operation::Operation;
///
/// let grid = PixelGrid::from_levels(2, 1, vec![4, 30]).unwrap();
/// assert_eq!(Operation::Add(5).apply(&grid).levels(), &[9, 31]);
/// assert_eq!(Operation::Add(5).label(), "+ 5");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `clamp(g + k)`.
    Add(i32),
    /// `clamp(g - k)`.
    Subtract(i32),
    /// `clamp(g * k)`.
    Multiply(i32),
    /// `clamp(g(x) - g(x-1))`, column 0 copied.
    EdgeDetect,
}

impl Operation {
    /// Run the operation, producing a new grid.
    #[must_use]
    pub fn apply(self, grid: &PixelGrid) -> PixelGrid {
        log::debug!("Opération {self:?} sur {}×{}", grid.width(), grid.height());
        match self {
            Operation::Add(k) => point::add(grid, k),
            Operation::Subtract(k) => point::subtract(grid, k),
            Operation::Multiply(k) => point::multiply(grid, k),
            Operation::EdgeDetect => edge::edge_detect(grid),
        }
    }

    /// Tool this operation belongs to.
    #[must_use]
    pub fn kind(self) -> OperationKind {
        match self {
            Operation::Add(_) => OperationKind::Add,
            Operation::Subtract(_) => OperationKind::Subtract,
            Operation::Multiply(_) => OperationKind::Multiply,
            Operation::EdgeDetect => OperationKind::EdgeDetect,
        }
    }

    /// Human label appended to the source name, ex. `+ 15`.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Operation::Add(k) => format!("+ {k}"),
            Operation::Subtract(k) => format!("- {k}"),
            Operation::Multiply(k) => format!("* {k}"),
            Operation::EdgeDetect => "edge".to_string(),
        }
    }

    /// File-name friendly tag, ex. `add_15`.
    #[must_use]
    pub fn tag(self) -> String {
        match self {
            Operation::Add(k) => format!("add_{k}"),
            Operation::Subtract(k) => format!("sub_{k}"),
            Operation::Multiply(k) => format!("mul_{k}"),
            Operation::EdgeDetect => "edge".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_cycles_both_ways() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.next().prev(), kind);
        }
        assert_eq!(OperationKind::Add.prev(), OperationKind::EdgeDetect);
    }

    #[test]
    fn kind_round_trips_through_operation() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.with_constant(4).kind(), kind);
        }
    }

    #[test]
    fn apply_dispatches_to_each_tool() {
        let grid = PixelGrid::from_levels(3, 1, vec![2, 6, 6]).unwrap();
        assert_eq!(Operation::Subtract(3).apply(&grid).levels(), &[0, 3, 3]);
        assert_eq!(Operation::Multiply(5).apply(&grid).levels(), &[10, 30, 30]);
        assert_eq!(Operation::EdgeDetect.apply(&grid).levels(), &[2, 4, 0]);
    }

    #[test]
    fn tags_are_file_friendly() {
        assert_eq!(Operation::Subtract(7).tag(), "sub_7");
        assert_eq!(Operation::Multiply(10).tag(), "mul_10");
        assert_eq!(Operation::EdgeDetect.tag(), "edge");
        assert_eq!(Operation::Multiply(10).label(), "* 10");
    }
}
