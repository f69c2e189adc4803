use super::*;
use crate::alloc::vec;

const DATA: &[i32] = &[1, 2, 3, 4, 5, 6, 7, 8];

#[test]
fn test_empty() {
    let span = Span2D::<u8>::empty();
    assert!(span.is_empty());
    assert_eq!(span.len(), 0);
    assert_eq!(span.row(0), None);
    assert_eq!(span.rows().len(), 0);
    assert_eq!(span.try_as_slice(), Some(&[][..]));
    assert_eq!(span, Span2D::default());
}

#[test]
fn test_from_slice() {
    let span = Span2D::from_slice(DATA, 2, 3, 1).unwrap();
    assert_eq!(span.height(), 2);
    assert_eq!(span.width(), 3);
    assert_eq!(span.pitch(), 1);
    assert_eq!(span.len(), 6);
    assert_eq!(span.row(0), Some(&[1, 2, 3][..]));
    assert_eq!(span.row(1), Some(&[5, 6, 7][..]));
    assert_eq!(span.row(2), None);
    assert_eq!(span.get(1, 2), Some(&7));
    assert_eq!(span.get(1, 3), None);

    // the last row does not need its trailing pitch
    assert!(Span2D::from_slice(&DATA[..7], 2, 3, 1).is_ok());
    assert_eq!(
        Span2D::from_slice(&DATA[..6], 2, 3, 1),
        Err(Error::AreaMismatch {
            area: 7,
            available: 6
        })
    );

    let zero = Span2D::from_slice(DATA, 0, 3, 1).unwrap();
    assert!(zero.is_empty());
}

#[test]
fn test_rows() {
    let span = Span2D::from_slice(DATA, 3, 2, 1).unwrap();
    let mut rows = span.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows.next(), Some(&[1, 2][..]));
    assert_eq!(rows.next_back(), Some(&[7, 8][..]));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.next(), Some(&[4, 5][..]));
    assert_eq!(rows.next(), None);
    assert_eq!(rows.next_back(), None);

    let all: Vec<_> = span.iter().copied().collect();
    assert_eq!(all, [1, 2, 4, 5, 7, 8]);
    let rev: Vec<_> = span.iter().rev().copied().collect();
    assert_eq!(rev, [8, 7, 5, 4, 2, 1]);
}

#[test]
fn test_try_as_slice() {
    let packed = Span2D::from_slice(DATA, 2, 4, 0).unwrap();
    assert_eq!(packed.try_as_slice(), Some(DATA));

    let single = Span2D::from_slice(DATA, 1, 3, 5).unwrap();
    assert_eq!(single.try_as_slice(), Some(&[1, 2, 3][..]));

    let strided = Span2D::from_slice(DATA, 2, 3, 1).unwrap();
    assert_eq!(strided.try_as_slice(), None);
}

#[test]
fn test_copy_to() {
    let span = Span2D::from_slice(DATA, 2, 3, 1).unwrap();

    let mut exact = [0; 6];
    span.copy_to(&mut exact).unwrap();
    assert_eq!(exact, [1, 2, 3, 5, 6, 7]);

    let mut longer = [0; 8];
    span.copy_to(&mut longer).unwrap();
    assert_eq!(longer, [1, 2, 3, 5, 6, 7, 0, 0]);

    let mut shorter = [0; 5];
    assert_eq!(
        span.copy_to(&mut shorter),
        Err(Error::ShapeMismatch {
            required: (2, 3),
            available: (1, 5)
        })
    );
    assert_eq!(shorter, [0; 5]);

    let packed = Span2D::from_slice(DATA, 2, 2, 0).unwrap();
    let mut out = vec![0; 4];
    packed.copy_to(&mut out).unwrap();
    assert_eq!(out, [1, 2, 3, 4]);

    assert_eq!(span.to_vec(), [1, 2, 3, 5, 6, 7]);
}

#[test]
fn test_index() {
    let span = Span2D::from_slice(DATA, 2, 3, 1).unwrap();
    assert_eq!(span[(0, 0)], 1);
    assert_eq!(span[(1, 1)], 6);
}

#[test]
#[should_panic(expected = "column 3 is out of range (must be less than 3)")]
fn test_index_panic() {
    let span = Span2D::from_slice(DATA, 2, 3, 1).unwrap();
    let _ = span[(0, 3)];
}

#[test]
fn test_eq_and_fmt() {
    let a = Span2D::from_slice(DATA, 2, 2, 2).unwrap();
    let other = [1, 2, 5, 6];
    let b = Span2D::from_slice(&other, 2, 2, 0).unwrap();
    assert_eq!(a, b);

    let c = Span2D::from_slice(&other, 1, 4, 0).unwrap();
    assert_ne!(b, c);

    assert_eq!(crate::alloc::format!("{a:?}"), "[[1, 2], [5, 6]]");
}
