use glam::{IVec2, UVec2};
use log::trace;

use crate::error::{GridError, Result};

/// Fixed-size dense 2D container.
///
/// Cell `(i, j)` lives at `i + j * width` in a single flat buffer, so `i` is the
/// fast-varying dimension. The shape is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid2D<T> {
    width: usize,
    height: usize,
    storage: Vec<T>,
}

impl<T> Grid2D<T> {
    /// Wraps an existing row-major buffer. Fails if `storage.len() != width * height`.
    pub fn from_storage(width: usize, height: usize, storage: Vec<T>) -> Result<Grid2D<T>> {
        if width.checked_mul(height) != Some(storage.len()) {
            return Err(GridError::InvalidArgument {
                width,
                height,
                len: storage.len(),
            });
        }
        trace!("grid {width}x{height} from storage");
        Ok(Grid2D {
            width,
            height,
            storage,
        })
    }

    /// Builds a grid by calling `fill(i, j)` for every cell.
    ///
    /// Evaluation order is `j` outer, `i` inner, which is also storage order.
    pub fn init<F>(width: usize, height: usize, mut fill: F) -> Grid2D<T>
    where
        F: FnMut(isize, isize) -> T,
    {
        let len = width
            .checked_mul(height)
            .expect("grid dimensions overflow usize");
        let mut storage = Vec::with_capacity(len);
        for j in 0..height as isize {
            for i in 0..width as isize {
                storage.push(fill(i, j));
            }
        }
        trace!("grid {width}x{height} initialised");
        Grid2D {
            width,
            height,
            storage,
        }
    }

    pub fn init_v<F>(size: UVec2, mut fill: F) -> Grid2D<T>
    where
        F: FnMut(IVec2) -> T,
    {
        Self::init(size.x as usize, size.y as usize, |i, j| {
            fill(IVec2::new(i as i32, j as i32))
        })
    }

    /// Grid with every cell set to `val`.
    pub fn new(width: usize, height: usize, val: T) -> Grid2D<T>
    where
        T: Clone,
    {
        let len = width
            .checked_mul(height)
            .expect("grid dimensions overflow usize");
        trace!("grid {width}x{height} filled");
        Grid2D {
            width,
            height,
            storage: vec![val; len],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Dimensions as a vector, or `None` if either one does not fit in `u32`.
    pub fn size(&self) -> Option<UVec2> {
        let x = u32::try_from(self.width).ok()?;
        let y = u32::try_from(self.height).ok()?;
        Some(UVec2::new(x, y))
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn in_bounds(&self, i: isize, j: isize) -> bool {
        i >= 0 && j >= 0 && (i as usize) < self.width && (j as usize) < self.height
    }

    pub fn in_bounds_v(&self, pos: IVec2) -> bool {
        self.in_bounds(pos.x as isize, pos.y as isize)
    }

    fn index(&self, i: isize, j: isize) -> Result<usize> {
        if self.in_bounds(i, j) {
            Ok(i as usize + j as usize * self.width)
        } else {
            Err(GridError::OutOfBounds {
                i,
                j,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, i: isize, j: isize) -> Result<&T> {
        let idx = self.index(i, j)?;
        Ok(&self.storage[idx])
    }

    pub fn get_v(&self, pos: IVec2) -> Result<&T> {
        self.get(pos.x as isize, pos.y as isize)
    }

    /// Like [`get`](Self::get), but yields `default` instead of failing when
    /// `(i, j)` is out of bounds.
    pub fn get_or(&self, i: isize, j: isize, default: T) -> T
    where
        T: Clone,
    {
        self.get(i, j).ok().cloned().unwrap_or(default)
    }

    pub fn get_or_v(&self, pos: IVec2, default: T) -> T
    where
        T: Clone,
    {
        self.get_or(pos.x as isize, pos.y as isize, default)
    }

    pub fn get_mut(&mut self, i: isize, j: isize) -> Result<&mut T> {
        let idx = self.index(i, j)?;
        Ok(&mut self.storage[idx])
    }

    pub fn get_mut_v(&mut self, pos: IVec2) -> Result<&mut T> {
        self.get_mut(pos.x as isize, pos.y as isize)
    }

    pub fn set(&mut self, i: isize, j: isize, value: T) -> Result<()> {
        *self.get_mut(i, j)? = value;
        Ok(())
    }

    pub fn set_v(&mut self, pos: IVec2, value: T) -> Result<()> {
        self.set(pos.x as isize, pos.y as isize, value)
    }

    /// Visits every cell with `i` outer and `j` inner.
    ///
    /// Note this is the transpose of the [`init`](Self::init) fill order.
    pub fn cells(&self) -> impl Iterator<Item = (isize, isize, &T)> + '_ {
        let (width, height) = (self.width, self.height);
        (0..width).flat_map(move |i| {
            (0..height).map(move |j| (i as isize, j as isize, &self.storage[i + j * width]))
        })
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(isize, isize, &T),
    {
        for (i, j, v) in self.cells() {
            f(i, j, v);
        }
    }

    pub fn for_each_v<F>(&self, mut f: F)
    where
        F: FnMut(IVec2, &T),
    {
        self.for_each(|i, j, v| f(IVec2::new(i as i32, j as i32), v));
    }

    /// Clones out the elements accepted by `pred`, in [`cells`](Self::cells) order.
    pub fn filter<F>(&self, mut pred: F) -> Vec<T>
    where
        F: FnMut(isize, isize, &T) -> bool,
        T: Clone,
    {
        self.cells()
            .filter(|&(i, j, v)| pred(i, j, v))
            .map(|(_, _, v)| v.clone())
            .collect()
    }

    pub fn filter_v<F>(&self, mut pred: F) -> Vec<T>
    where
        F: FnMut(IVec2, &T) -> bool,
        T: Clone,
    {
        self.filter(|i, j, v| pred(IVec2::new(i as i32, j as i32), v))
    }

    /// Consumes the grid, returning its row-major buffer.
    pub fn into_storage(self) -> Vec<T> {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_storage_layout() {
        let grid = Grid2D::init(2, 2, |i, j| i + j * 2);
        assert_eq!(grid.get(1, 0), Ok(&1));
        assert_eq!(grid.get(0, 1), Ok(&2));
        assert_eq!(grid.get_or(5, 5, -1), -1);
        assert_eq!(grid.into_storage(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_init_fill_order() {
        let mut calls = Vec::new();
        let _ = Grid2D::init(2, 3, |i, j| calls.push((i, j)));
        assert_eq!(calls, [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_for_each_order() {
        let grid = Grid2D::init(2, 3, |i, j| i + j * 2);
        let mut visited = Vec::new();
        grid.for_each(|i, j, &v| visited.push((i, j, v)));
        assert_eq!(
            visited,
            [
                (0, 0, 0),
                (0, 1, 2),
                (0, 2, 4),
                (1, 0, 1),
                (1, 1, 3),
                (1, 2, 5)
            ]
        );
    }

    #[test]
    fn test_filter_evens() {
        let grid = Grid2D::init(3, 2, |i, j| i * 10 + j);
        assert_eq!(grid.filter(|_, _, v| v % 2 == 0), [0, 10, 20]);
    }

    #[test]
    fn test_from_storage_length_mismatch() {
        assert_eq!(
            Grid2D::from_storage(2, 2, vec![1, 2, 3]),
            Err(GridError::InvalidArgument {
                width: 2,
                height: 2,
                len: 3
            })
        );
        let grid = Grid2D::from_storage(3, 1, vec!['a', 'b', 'c']).unwrap();
        assert_eq!(grid.get(2, 0), Ok(&'c'));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid2D::new(2, 3, 0u8);
        assert_eq!(
            grid.get(-1, 0),
            Err(GridError::OutOfBounds {
                i: -1,
                j: 0,
                width: 2,
                height: 3
            })
        );
        assert!(grid.set(2, 0, 1).is_err());
        assert!(grid.get_mut(0, 3).is_err());
        assert!(grid.cells().all(|(_, _, &v)| v == 0));
    }

    #[test]
    fn test_empty_grid() {
        let grid: Grid2D<i32> = Grid2D::init(0, 4, |_, _| unreachable!());
        assert!(grid.is_empty());
        assert!(!grid.in_bounds(0, 0));
        assert_eq!(grid.cells().count(), 0);
        assert_eq!(grid.size(), Some(UVec2::new(0, 4)));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_size_beyond_u32() {
        let grid = Grid2D::new(1usize << 32, 0, 0u8);
        assert_eq!(grid.width(), 1usize << 32);
        assert_eq!(grid.size(), None);
        assert_eq!(Grid2D::new(3, 2, 0u8).size(), Some(UVec2::new(3, 2)));
    }

    #[test]
    fn test_vector_addressing() {
        let mut grid = Grid2D::init_v(UVec2::new(3, 2), |p| p.x * 10 + p.y);
        assert_eq!(grid.get_v(IVec2::new(2, 1)), Ok(&21));
        assert_eq!(grid.get_or_v(IVec2::new(3, 0), 99), 99);
        assert!(grid.in_bounds_v(IVec2::new(0, 1)));
        assert!(!grid.in_bounds_v(IVec2::new(0, -1)));

        grid.set_v(IVec2::new(1, 1), 7).unwrap();
        *grid.get_mut_v(IVec2::new(0, 0)).unwrap() += 5;
        assert_eq!(grid.get(1, 1), Ok(&7));
        assert_eq!(grid.get(0, 0), Ok(&5));

        let mut seen = Vec::new();
        grid.for_each_v(|p, _| seen.push(p));
        assert_eq!(
            seen,
            [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)].map(|(x, y)| IVec2::new(x, y))
        );
        assert_eq!(grid.filter_v(|p, _| p.y == 1), [1, 7, 21]);
    }
}
