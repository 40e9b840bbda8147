//! Pieces module - tetromino shape catalog and the kick-based rotation rule
//!
//! Every kind has four precomputed rotation states. Each state lists the four
//! occupied cells as (dx, dy) offsets inside a 4x4 frame whose top-left corner
//! is the piece origin. The O piece repeats the same state four times.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Origin offsets tried, in order, when rotating.
///
/// No shift first, then one cell right, one cell left, and one cell up.
/// The same list applies to every kind and every rotation transition.
pub const KICK_OFFSETS: [(i8, i8); 4] = [(0, 0), (1, 0), (-1, 0), (0, -1)];

/// Catalog indexed by `[PieceKind::index()][Rotation::index()]`.
const SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
    // O
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind.index()][rotation.index()]
}

/// Shape in the spawn orientation.
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, Rotation::North)
}

/// Absolute board cells of a shape placed at origin `(x, y)`.
pub fn absolute_cells(shape: &PieceShape, x: i8, y: i8) -> [(i8, i8); 4] {
    shape.map(|(dx, dy)| (x + dx, y + dy))
}

/// Try to rotate a piece one step clockwise, testing [`KICK_OFFSETS`] in order.
///
/// `is_free(x, y)` must return false for occupied and out-of-bounds cells.
/// Returns the new rotation and the kick offset that was used, or `None`
/// when every candidate collides.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    is_free: impl Fn(i8, i8) -> bool,
) -> Option<(Rotation, (i8, i8))> {
    let new_rotation = rotation.rotate_cw();
    let new_shape = get_shape(kind, new_rotation);

    KICK_OFFSETS.iter().copied().find_map(|(dx, dy)| {
        let fits = new_shape
            .iter()
            .all(|&(mx, my)| is_free(x + dx + mx, y + dy + my));
        fits.then_some((new_rotation, (dx, dy)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_has_four_distinct_cells_inside_frame() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let shape = get_shape(kind, Rotation::from_index(r));
                for (i, a) in shape.iter().enumerate() {
                    assert!((0..4).contains(&a.0) && (0..4).contains(&a.1));
                    for b in &shape[i + 1..] {
                        assert_ne!(a, b, "{kind:?} rotation {r} repeats a cell");
                    }
                }
            }
        }
    }

    #[test]
    fn o_piece_is_rotation_invariant() {
        let north = get_shape(PieceKind::O, Rotation::North);
        for r in [Rotation::East, Rotation::South, Rotation::West] {
            assert_eq!(get_shape(PieceKind::O, r), north);
        }
    }

    #[test]
    fn rotate_in_open_space_uses_no_kick() {
        let result = try_rotate(PieceKind::T, Rotation::North, 3, 5, |_, _| true);
        assert_eq!(result, Some((Rotation::East, (0, 0))));
    }

    #[test]
    fn rotate_fails_when_everything_is_blocked() {
        let result = try_rotate(PieceKind::J, Rotation::South, 3, 5, |_, _| false);
        assert_eq!(result, None);
    }
}
