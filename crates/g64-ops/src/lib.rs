/// Opérations sur les pixels : arithmétique saturée, contours, moyenne.
///
/// Every function is pure and returns a new grid.
pub mod blend;
pub mod edge;
pub mod operation;
pub mod point;

pub use blend::average;
pub use edge::edge_detect;
pub use operation::{Operation, OperationKind};
pub use point::{add, multiply, subtract};
