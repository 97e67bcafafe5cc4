/// Pairwise identity percentages, one stored value per unordered pair.
///
/// `(i, j)` and `(j, i)` resolve to the same slot, so the matrix is symmetric
/// by construction. The diagonal is not stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityMatrix {
    pub ids: Vec<String>,
    upper: Vec<f64>,
}

impl IdentityMatrix {
    /// Calls `score(i, j)` exactly once for each `i < j`.
    pub fn try_from_pairs<E>(
        ids: Vec<String>,
        mut score: impl FnMut(usize, usize) -> Result<f64, E>,
    ) -> Result<Self, E> {
        let n = ids.len();
        let mut upper = Vec::with_capacity(pair_count(n));
        for i in 0..n {
            for j in (i + 1)..n {
                upper.push(score(i, j)?);
            }
        }
        Ok(Self { ids, upper })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.ids.len();
        if i == j || i >= n || j >= n {
            return None;
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        Some(self.upper[pair_index(lo, hi, n)])
    }

    /// Value for display; the diagonal reads as 100.
    pub fn display_value(&self, i: usize, j: usize) -> f64 {
        self.get(i, j).unwrap_or(100.0)
    }

    pub fn pairs(&self) -> &[f64] {
        &self.upper
    }
}

pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

fn pair_index(lo: usize, hi: usize, n: usize) -> usize {
    lo * (2 * n - lo - 1) / 2 + (hi - lo - 1)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/identity.rs"]
mod tests;
