use serde::Deserialize;
use serde::Serialize;

/// Where the results of one pairwise run live.
///
/// Fixed when a run starts, from the mode, whether any handler is
/// registered, and whether a full symmetric matrix was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Storage {
    /// Dense `n_a × n_b` matrix, row-major. Cross mode.
    #[default]
    Full,
    /// Dense `n × n` matrix with zero diagonal. Symmetric mode on request.
    FullSymmetric,
    /// Condensed upper triangle of `n(n-1)/2` values. Symmetric mode.
    FlattenedSymmetric,
    /// Nothing stored; every result goes to the handlers.
    External,
}

impl Storage {
    pub fn choose(symmetric: bool, handled: bool, full: bool) -> Self {
        match (handled, symmetric, full) {
            (true, _, _) => Storage::External,
            (false, true, true) => Storage::FullSymmetric,
            (false, true, false) => Storage::FlattenedSymmetric,
            (false, false, _) => Storage::Full,
        }
    }
}

impl std::fmt::Display for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Storage::Full => write!(f, "Full"),
            Storage::FullSymmetric => write!(f, "FullSymmetric"),
            Storage::FlattenedSymmetric => write!(f, "FlattenedSymmetric"),
            Storage::External => write!(f, "External"),
        }
    }
}
