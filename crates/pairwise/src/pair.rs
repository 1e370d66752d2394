/// An unordered pair of distinct event indices, stored with `i < j`.
///
/// Pairs among `n` events map one-to-one onto the condensed upper triangle
/// `0..n(n-1)/2`, row by row: (0,1), (0,2), ..., (0,n-1), (1,2), ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair {
    i: usize,
    j: usize,
}

impl Pair {
    pub fn i(&self) -> usize {
        self.i
    }
    pub fn j(&self) -> usize {
        self.j
    }
    /// Number of distinct pairs among `n` events.
    pub const fn count(n: usize) -> usize {
        n * n.saturating_sub(1) / 2
    }
    /// Condensed index among `n` events: n·i − i(i+1)/2 + j − i − 1.
    pub fn triangular(&self, n: usize) -> usize {
        debug_assert!(self.j < n, "pair out of range");
        Self::start(self.i, n) + self.j - self.i - 1
    }
    /// Inverse of [`Pair::triangular`].
    pub fn split(k: usize, n: usize) -> Self {
        debug_assert!(k < Self::count(n), "condensed index out of range");
        let b = (2 * n - 1) as f64;
        let guess = (b - (b * b - 8. * k as f64).max(0.).sqrt()) / 2.;
        let mut i = (guess.max(0.) as usize).min(n.saturating_sub(2));
        while i > 0 && Self::start(i, n) > k {
            i -= 1;
        }
        while i + 2 < n && Self::start(i + 1, n) <= k {
            i += 1;
        }
        Self {
            i,
            j: k - Self::start(i, n) + i + 1,
        }
    }
    /// Condensed index of (i, i + 1), the first pair in row `i`.
    fn start(i: usize, n: usize) -> usize {
        i * (2 * n - i - 1) / 2
    }
}

impl From<(usize, usize)> for Pair {
    fn from((a, b): (usize, usize)) -> Self {
        debug_assert!(a != b, "pair of identical indices");
        Self {
            i: a.min(b),
            j: a.max(b),
        }
    }
}
