// cspell:ignore fastrand
use fastrand::Rng;
use memory2d::{Array2, Buffer, Memory2D};

const ROUNDS: usize = 500;

/// Random valid region within `len` elements.
fn region(rng: &mut Rng, len: usize) -> (usize, usize, usize, usize) {
    let offset = rng.usize(0..=len);
    let available = len - offset;
    if available == 0 {
        return (offset, 0, 0, 0);
    }
    let width = rng.usize(1..=available);
    let pitch = rng.usize(0..=4);
    let height = 1 + (available - width) / (width + pitch);
    (offset, rng.usize(1..=height), width, pitch)
}

fn expected(data: &[u32], (offset, height, width, pitch): (usize, usize, usize, usize)) -> Vec<u32> {
    (0..height)
        .flat_map(|r| {
            let start = offset + r * (width + pitch);
            data[start..start + width].iter().copied()
        })
        .collect()
}

#[test]
fn test_valid_regions() {
    let mut rng = Rng::with_seed(0x2d);
    for _ in 0..ROUNDS {
        let data: Vec<u32> = (0..rng.u32(0..64)).collect();
        let buffer = Buffer::from(data.clone());
        let r = region(&mut rng, data.len());
        let view = Memory2D::from_buffer(buffer, r.0, r.1, r.2, r.3).unwrap();
        assert_eq!(view.len(), r.1 * r.2);
        assert_eq!(view.to_vec(), expected(&data, r));
    }
}

#[test]
fn test_slice_matches_direct_construction() {
    let mut rng = Rng::with_seed(0x51ce);
    for _ in 0..ROUNDS {
        let rows = rng.usize(1..10);
        let columns = rng.usize(1..10);
        let array = Array2::from_fn(rows, columns, |r, c| (r * columns + c) as u32);
        let view = Memory2D::from(array.clone());

        let row = rng.usize(0..rows);
        let column = rng.usize(0..columns);
        let height = rng.usize(0..=rows - row);
        let width = rng.usize(0..=columns - column);

        let sliced = view.slice(row, column, height, width).unwrap();
        let direct = Memory2D::from_array2_rect(array, row, column, height, width).unwrap();
        assert_eq!(sliced, direct);
        assert_eq!(sliced.to_vec(), direct.to_vec());
        assert_eq!(sliced.to_array(), direct.to_array());
    }
}

#[test]
fn test_flatten_iff_packed() {
    let mut rng = Rng::with_seed(0xf1a7);
    for _ in 0..ROUNDS {
        let data: Vec<u32> = (0..rng.u32(1..64)).collect();
        let buffer = Buffer::from(data.clone());
        let r = region(&mut rng, data.len());
        let view = Memory2D::from_buffer(buffer, r.0, r.1, r.2, r.3).unwrap();

        match view.try_flatten() {
            Some(flat) => {
                assert!(view.pitch() == 0);
                for i in 0..view.height() {
                    for j in 0..view.width() {
                        assert_eq!(flat[i * view.width() + j], view.span()[(i, j)]);
                    }
                }
            }
            None => assert_ne!(view.pitch(), 0),
        }
    }
}

#[test]
fn test_identity_equality() {
    let mut rng = Rng::with_seed(0xe9);
    for _ in 0..ROUNDS {
        let data: Vec<u32> = (0..rng.u32(1..32)).collect();
        let a = Buffer::from(data.clone());
        let b = Buffer::from(data.clone());
        let r = region(&mut rng, data.len());

        let x = Memory2D::from_buffer(a.clone(), r.0, r.1, r.2, r.3).unwrap();
        let y = Memory2D::from_buffer(a, r.0, r.1, r.2, r.3).unwrap();
        let z = x.clone();
        let other = Memory2D::from_buffer(b, r.0, r.1, r.2, r.3).unwrap();

        assert_eq!(x, x);
        assert_eq!(x == y, y == x);
        assert!(x == y && y == z && x == z);
        // distinct buffers only meet in the empty view
        assert_eq!(x == other, x.is_empty());
    }
}
