use std::ops::{Index, IndexMut};

use faer::{Mat, MatRef};

use crate::{
    ShortVec,
    error::{Result, RotationError},
};

/// Dense matrix of `f64`.
///
/// Rotation matrices are 3x3 instances of this type;
/// the quaternion averager also uses it for its 4x4 accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    /// Row-major / C-ordered matrix data.
    data: Vec<f64>,
    nrows: usize,
    ncols: usize,
}

impl AsRef<Matrix> for Matrix {
    fn as_ref(&self) -> &Matrix {
        self
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        self.get(index.0, index.1)
            .expect("index should be in bounds")
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            index.0 < self.nrows && index.1 < self.ncols,
            "index should be in bounds"
        );
        &mut self.data[index.0 * self.ncols + index.1]
    }
}

impl Matrix {
    /// Row-major/ C order data
    pub fn try_new(data: Vec<f64>, ncols: usize) -> Result<Self> {
        if ncols == 0 || data.len() % ncols != 0 {
            return Err(RotationError::invalid(format!(
                "Matrix data length {} is not divisible by ncols {}",
                data.len(),
                ncols
            )));
        }
        let nrows = data.len() / ncols;
        Ok(Self { data, nrows, ncols })
    }

    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![0.0; nrows * ncols],
            nrows,
            ncols,
        }
    }

    pub fn identity(ndim: usize) -> Self {
        let mut out = Self::zeros(ndim, ndim);
        for i in 0..ndim {
            out[(i, i)] = 1.0;
        }
        out
    }

    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for r in 0..nrows {
            for c in 0..ncols {
                data.push(f(r, c));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Row-major view of the underlying data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = vec![0.0; self.data.len()];
        for r in 0..self.nrows {
            for c in 0..self.ncols {
                data[c * self.nrows + r] = self[(r, c)];
            }
        }
        Matrix {
            data,
            nrows: self.ncols,
            ncols: self.nrows,
        }
    }

    pub fn matmul(&self, coord: &[f64]) -> ShortVec<f64> {
        let mut result = smallvec::smallvec![f64::NAN; self.nrows];
        self.matmul_into(coord, &mut result);
        result
    }

    pub fn matmul_into(&self, coord: &[f64], buf: &mut [f64]) {
        buf.fill(0.0);
        for (idx, d) in self.data.iter().enumerate() {
            let r = idx / self.ncols;
            let c = idx % self.ncols;
            buf[r] += d * coord[c];
        }
    }

    /// N.B. Coordinate "columns" are the _rows_ of the input and output matrices.
    pub fn matmul_transposed_into(&self, coord_cols: &[&[f64]], buf: &mut [&mut [f64]]) {
        for (out_dim_idx, buf_col) in buf.iter_mut().enumerate() {
            buf_col.fill(0.0);
            let row_start = out_dim_idx * self.ncols;
            let row = &self.data[row_start..(row_start + self.ncols)];
            for (mat_val, coord_col) in row.iter().zip(coord_cols.iter()) {
                for (c, b) in coord_col.iter().zip(buf_col.iter_mut()) {
                    *b += c * mat_val;
                }
            }
        }
    }

    /// Matrix product `self * rhs`.
    pub fn try_mul(&self, rhs: &Matrix) -> Result<Matrix> {
        let mut out = Matrix::zeros(self.nrows, rhs.ncols);
        self.mul_into(rhs, &mut out)?;
        Ok(out)
    }

    /// Matrix product `self * rhs`, written into `out`.
    ///
    /// `out` must already have the product's shape.
    pub fn mul_into(&self, rhs: &Matrix, out: &mut Matrix) -> Result<()> {
        if self.ncols != rhs.nrows {
            return Err(RotationError::invalid(format!(
                "cannot multiply {}x{} by {}x{}",
                self.nrows, self.ncols, rhs.nrows, rhs.ncols
            )));
        }
        out.require_shape(self.nrows, rhs.ncols, "product output")?;
        for r in 0..self.nrows {
            for c in 0..rhs.ncols {
                let mut acc = 0.0;
                for k in 0..self.ncols {
                    acc += self[(r, k)] * rhs[(k, c)];
                }
                out[(r, c)] = acc;
            }
        }
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&f64> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        self.data.get(row * self.ncols + col)
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Sum of the diagonal; only meaningful for square matrices.
    pub fn trace(&self) -> f64 {
        (0..self.nrows.min(self.ncols)).map(|i| self[(i, i)]).sum()
    }

    pub fn is_identity(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        self.data.iter().enumerate().all(|(idx, v)| {
            let expected = if idx / self.ncols == idx % self.ncols {
                1.0
            } else {
                0.0
            };
            *v == expected
        })
    }

    /// Copy all values from `other`, which must have the same shape.
    pub fn copy_from(&mut self, other: &Matrix) -> Result<()> {
        self.require_shape(other.nrows, other.ncols, "copy destination")?;
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    pub fn scale_mut(&mut self, factor: f64) {
        self.data.iter_mut().for_each(|v| *v *= factor);
    }

    /// Element-wise `self += other`.
    pub fn add_assign(&mut self, other: &Matrix) -> Result<()> {
        other.require_shape(self.nrows, self.ncols, "addend")?;
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
        Ok(())
    }

    pub(crate) fn require_shape(&self, nrows: usize, ncols: usize, what: &str) -> Result<()> {
        if self.nrows != nrows || self.ncols != ncols {
            return Err(RotationError::invalid(format!(
                "{what} must be {nrows}x{ncols}, got {}x{}",
                self.nrows, self.ncols
            )));
        }
        Ok(())
    }

    pub(crate) fn require_3x3(&self, what: &str) -> Result<()> {
        self.require_shape(3, 3, what)
    }

    /// Whether each row has unit length and is orthogonal to every other row,
    /// within `tolerance`.
    pub fn has_orthonormal_rows(&self, tolerance: f64) -> bool {
        let mut rows: Vec<&[f64]> = Vec::with_capacity(self.nrows());
        for r in 0..self.nrows() {
            let start = r * self.ncols();
            let end = start + self.ncols();
            let new_vec = &self.data[start..end];

            if (magnitude(new_vec) - 1.0).abs() > tolerance {
                return false;
            }

            for row in rows.iter() {
                let dp = dot(row, new_vec);
                if dp.abs() > tolerance {
                    return false;
                }
            }
            rows.push(new_vec);
        }
        true
    }

    pub fn determinant(&self) -> Result<f64> {
        if !self.is_square() {
            return Err(RotationError::invalid(
                "determinant only defined for square matrices",
            ));
        }
        if self.nrows() == 0 {
            return Ok(1.0);
        }
        Ok(self.to_faer().determinant())
    }

    pub(crate) fn to_faer(&self) -> Mat<f64> {
        Mat::from_fn(self.nrows, self.ncols, |row, col| self[(row, col)])
    }

    pub(crate) fn from_faer(mat: MatRef<'_, f64>) -> Self {
        Self::from_fn(mat.nrows(), mat.ncols(), |row, col| mat[(row, col)])
    }
}

/// Panics if vectors have different lengths.
fn dot(v1: &[f64], v2: &[f64]) -> f64 {
    if v1.len() != v2.len() {
        panic!("dot: vector length mismatch: {} vs {}", v1.len(), v2.len());
    }
    v1.iter().zip(v2.iter()).map(|(a, b)| a * b).sum()
}

fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}
