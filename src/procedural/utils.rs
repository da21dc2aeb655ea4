//! Utilities useful for various generations tasks.

use glamx::Vec3;

/// Converts a line strip into the equivalent line list.
///
/// Every inner vertex is duplicated so that each pair of consecutive output
/// vertices forms one segment. Strips with less than two vertices yield no segment.
///
/// # Example
/// ```
/// # use lightfield::procedural::line_strip_to_line_list;
/// # use glamx::Vec3;
/// let list = line_strip_to_line_list(&[Vec3::ZERO, Vec3::X, Vec3::Y]);
/// assert_eq!(list, vec![Vec3::ZERO, Vec3::X, Vec3::X, Vec3::Y]);
/// ```
pub fn line_strip_to_line_list(strip: &[Vec3]) -> Vec<Vec3> {
    if strip.len() < 2 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(2 * (strip.len() - 1));

    for pair in strip.windows(2) {
        out.push(pair[0]);
        out.push(pair[1]);
    }

    out
}

/// Converts a closed line loop into the equivalent line list.
///
/// The last vertex is connected back to the first one.
pub fn line_loop_to_line_list(vertices: &[Vec3]) -> Vec<Vec3> {
    let mut out = line_strip_to_line_list(vertices);

    if let (Some(first), Some(last)) = (vertices.first(), vertices.last()) {
        if vertices.len() >= 2 {
            out.push(*last);
            out.push(*first);
        }
    }

    out
}

/// Converts a triangle strip into the equivalent triangle list.
///
/// Triangle `i` is made of the strip vertices `i`, `i + 1` and `i + 2`, so the
/// output has `3 * (n - 2)` vertices. Winding is not alternated.
pub fn triangle_strip_to_triangle_list(strip: &[Vec3]) -> Vec<Vec3> {
    strip
        .windows(3)
        .flat_map(|tri| [tri[0], tri[1], tri[2]])
        .collect()
}

/// The largest number of cells along one side of a grid. Must be even.
pub const MAX_GRID_CELLS: u32 = 10_000;

/// The even number of cells along one side of a grid, at most [`MAX_GRID_CELLS`].
///
/// Non-finite or non-positive lengths yield no cell.
pub(crate) fn grid_cell_count(full_length: f32, cell_length: f32) -> u32 {
    let ratio = full_length / cell_length;
    if !ratio.is_finite() || ratio <= 0.0 || cell_length <= 0.0 {
        return 0;
    }

    let ncells = (ratio.ceil() as u32).min(MAX_GRID_CELLS);
    ncells.saturating_add(ncells % 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_strip_to_line_list() {
        let strip = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
        let list = line_strip_to_line_list(&strip);

        assert_eq!(list.len(), 6);
        assert_eq!(&list[2..4], &[Vec3::X, Vec3::Y]);
        assert!(line_strip_to_line_list(&[Vec3::X]).is_empty());
    }

    #[test]
    fn test_line_loop_closes() {
        let list = line_loop_to_line_list(&[Vec3::ZERO, Vec3::X, Vec3::Y]);

        assert_eq!(list.len(), 6);
        assert_eq!(&list[4..], &[Vec3::Y, Vec3::ZERO]);
    }

    #[test]
    fn test_triangle_strip_to_triangle_list() {
        let strip = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE];
        let list = triangle_strip_to_triangle_list(&strip);

        assert_eq!(list, vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::X, Vec3::Y, Vec3::ONE]);
        assert!(triangle_strip_to_triangle_list(&strip[..2]).is_empty());
    }

    #[test]
    fn test_grid_cells_are_even() {
        assert_eq!(grid_cell_count(1000.0, 10.0), 100);
        assert_eq!(grid_cell_count(30.0, 10.0), 4);
        assert_eq!(grid_cell_count(1.0, 10.0), 2);
    }

    #[test]
    fn test_grid_cells_are_capped() {
        assert_eq!(grid_cell_count(1.0e12, 1.0e-3), MAX_GRID_CELLS);
        assert_eq!(grid_cell_count(1.0e30, 1.0), MAX_GRID_CELLS);
        assert_eq!(grid_cell_count(f32::MAX, f32::MIN_POSITIVE), 0);
        assert_eq!(grid_cell_count(f32::INFINITY, 10.0), 0);
        assert_eq!(grid_cell_count(f32::NAN, 10.0), 0);
        assert_eq!(grid_cell_count(10.0, 0.0), 0);
        assert_eq!(grid_cell_count(-10.0, 1.0), 0);
    }
}
