use std::io::Cursor;
use std::path::Path;

use ndarray::Array2;
use ndarray_npy::{ReadNpyError, ReadNpyExt, ReadableElement, WriteNpyExt};
use tracing::debug;

use crate::error::Result;
use crate::labels;

/// Load a 2D `.npy` array of integer cluster labels.
///
/// NumPy label grids come in whatever integer dtype produced them, so the
/// common ones are tried in turn: i64, i32, u32, u16, u8.
pub fn load_labels_npy(path: &Path) -> Result<Array2<u32>> {
    let bytes = std::fs::read(path)?;

    let grid = read_as::<i64>(&bytes)
        .or_else(|_| read_as::<i32>(&bytes))
        .or_else(|_| read_as::<u32>(&bytes))
        .or_else(|_| read_as::<u16>(&bytes))
        .or_else(|_| read_as::<u8>(&bytes))?;

    debug!(path = %path.display(), shape = ?grid.dim(), "Loaded label array");
    labels::from_signed(&grid)
}

fn read_as<T>(bytes: &[u8]) -> std::result::Result<Array2<i64>, ReadNpyError>
where
    T: ReadableElement + Copy + Into<i64>,
{
    Array2::<T>::read_npy(Cursor::new(bytes)).map(|a| a.mapv(|v: T| -> i64 { v.into() }))
}

/// Save a label grid as a `.npy` array of u32.
pub fn save_labels_npy(grid: &Array2<u32>, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    grid.write_npy(file)?;
    Ok(())
}
