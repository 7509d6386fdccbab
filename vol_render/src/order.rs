use nalgebra::{vector, Vector3};

/// Coordinates of a volume in file order, x grows fastest
#[derive(Debug)]
pub struct LinearCoordIterator {
    pub dims: Vector3<usize>,
    pub state: Vector3<usize>,
    done: bool,
}

impl LinearCoordIterator {
    pub fn from_dims(dims: Vector3<usize>) -> LinearCoordIterator {
        LinearCoordIterator {
            dims,
            state: vector![0, 0, 0],
            done: dims.iter().any(|&d| d == 0),
        }
    }
}

impl Iterator for LinearCoordIterator {
    type Item = Vector3<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.state;

        self.state.x += 1;
        if self.state.x == self.dims.x {
            self.state.x = 0;
            self.state.y += 1;
        }
        if self.state.y == self.dims.y {
            self.state.y = 0;
            self.state.z += 1;
        }
        if self.state.z == self.dims.z {
            self.done = true;
        }

        Some(current)
    }
}
