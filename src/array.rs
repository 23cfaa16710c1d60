use std::ops;

/// Position in a 2D grid as `(row, col)`.
pub type Coord = (usize, usize);

/// Flat row-major 2D storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Array2D<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn dim_to_idx(&self, pos: Coord) -> Option<usize> {
        let (row, col) = pos;

        if row >= self.height || col >= self.width {
            return None;
        }

        Some(row * self.width + col)
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Coord> {
        if idx >= self.buf.len() {
            return None;
        }

        Some((idx / self.width, idx % self.width))
    }

    pub fn get(&self, pos: Coord) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Coord) -> Option<&mut T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.height {
            return None;
        }

        let start = row * self.width;
        Some(&self.buf[start..start + self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // `chunks` panics on zero, an empty array simply has no rows
        self.buf.chunks(self.width.max(1))
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, width: usize, height: usize) -> Self {
        Self {
            buf: vec![item; width * height],
            width,
            height,
        }
    }
}

impl<T> ops::Index<Coord> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Coord) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {:?}", index))
    }
}

impl<T> ops::IndexMut<Coord> for Array2D<T> {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        self.get_mut(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {:?}", index))
    }
}

#[cfg(test)]
mod tests {
    use super::Array2D;

    #[test]
    fn index_is_row_major() {
        let mut array = Array2D::new(0u8, 3, 2);
        array[(1, 2)] = 7;

        assert_eq!(array.dim_to_idx((1, 2)), Some(5));
        assert_eq!(array.idx_to_dim(5), Some((1, 2)));
        assert_eq!(array.row(1), Some(&[0, 0, 7][..]));
        assert_eq!(array.get((2, 0)), None);
        assert_eq!(array.get((0, 3)), None);
    }

    #[test]
    fn rows_and_positions() {
        let array = Array2D::new('x', 4, 3);

        assert_eq!(array.rows().count(), 3);
        assert!(array.rows().all(|row| row.len() == 4));
        assert_eq!(array.iter_pos().last(), Some((2, 3)));
        assert_eq!(array.len(), 12);
    }
}
