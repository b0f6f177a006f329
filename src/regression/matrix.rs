// Dense row-major matrix with the handful of operations the normal equations need
//
// Sizes here are tiny (4x4 after forming XᵗX), so a plain Vec<f64> is enough.

use super::FitError;

/// Pivot magnitude below which a column is treated as zero
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Build from row slices; all rows must share one width
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            debug_assert_eq!(row.len(), cols, "ragged matrix rows");
            data.extend_from_slice(row);
        }
        Self {
            rows: rows.len(),
            cols,
            data,
        }
    }

    /// Column vector
    pub fn column(values: &[f64]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t[(j, i)] = self[(i, j)];
            }
        }
        t
    }

    /// Matrix product; panics on mismatched inner dimensions
    pub fn mul(&self, other: &Matrix) -> Self {
        assert_eq!(self.cols, other.rows, "inner dimensions must agree");
        let mut out = Self::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for t in 0..self.cols {
                let a = self[(i, t)];
                for j in 0..other.cols {
                    out[(i, j)] += a * other[(t, j)];
                }
            }
        }
        out
    }

    /// Inverse by Gauss-Jordan elimination on `[A | I]`
    ///
    /// A pivot smaller than `tolerance` in magnitude is replaced by the first
    /// later row whose entry in that column is usable. If none exists the
    /// matrix is singular.
    pub fn inverse(&self, tolerance: f64) -> Result<Matrix, FitError> {
        assert_eq!(self.rows, self.cols, "only square matrices are invertible");
        let n = self.rows;
        let width = 2 * n;

        let mut aug = Self::zeros(n, width);
        for i in 0..n {
            for j in 0..n {
                aug[(i, j)] = self[(i, j)];
            }
            aug[(i, n + i)] = 1.0;
        }

        for i in 0..n {
            if aug[(i, i)].abs() < tolerance {
                let swap = (i + 1..n)
                    .find(|&r| aug[(r, i)].abs() >= tolerance)
                    .ok_or(FitError::Singular { column: i })?;
                aug.swap_rows(i, swap);
            }

            let pivot = aug[(i, i)];
            for j in 0..width {
                aug[(i, j)] /= pivot;
            }

            for r in 0..n {
                if r == i {
                    continue;
                }
                let factor = aug[(r, i)];
                if factor == 0.0 {
                    continue;
                }
                for c in 0..width {
                    let delta = factor * aug[(i, c)];
                    aug[(r, c)] -= delta;
                }
            }
        }

        let mut inv = Self::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                inv[(i, j)] = aug[(i, n + j)];
            }
        }
        Ok(inv)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }
}

impl std::ops::Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.cols + j]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.cols + j]
    }
}
