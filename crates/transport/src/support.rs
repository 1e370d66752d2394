/// Marker trait for types that serve as particle positions.
///
/// A position is opaque to the solver: it only ever reaches a [`Measure`]
/// which turns two of them into a ground distance. The `Clone` bound lets
/// preprocessors rewrite events without borrowing the originals.
///
/// [`Measure`]: crate::Measure
pub trait Support: Clone {}

/// usize implements Support for index particles whose ground
/// distances are precomputed and looked up by position.
impl Support for usize {}
