#[cfg(feature = "std")]
use std::collections::HashSet;

use super::*;
use crate::alloc::string::String;
use crate::alloc::{format, vec};
use crate::{Buffer, Text};

type M<T> = crate::Memory<T>;

#[test]
fn test_new_default() {
    let m = M::<u8>::new();
    assert!(m.is_empty());
    assert_eq!(m.len(), 0);
    assert_eq!(m.as_slice(), &[]);
    assert_eq!(m, M::default());
}

#[test]
fn test_from_storages() {
    let m = M::from(Buffer::from(vec![1, 2, 3]));
    assert_eq!(m.as_slice(), &[1, 2, 3]);

    let m = M::from(crate::Array2::from([[1, 2], [3, 4]]));
    assert_eq!(m.len(), 4);
    assert_eq!(&*m, &[1, 2, 3, 4]);

    let m = M::from(crate::Array3::from_fn(2, 1, 2, |d, _, c| d * 10 + c));
    assert_eq!(m.to_vec(), [0, 1, 10, 11]);

    let m = M::<u8>::from_text(Text::from("hey")).unwrap();
    assert_eq!(m.as_slice(), b"hey");

    assert_eq!(
        M::<i8>::from_text(Text::from("hey")).unwrap_err(),
        Error::type_mismatch::<i8, u8>()
    );
}

#[test]
fn test_slice() {
    let m = M::from(Buffer::from(vec![1, 2, 3, 4, 5]));

    let s = m.slice(1..4);
    assert_eq!(s.as_slice(), &[2, 3, 4]);
    assert_eq!(s.start(), 1);

    let ss = s.slice(1..);
    assert_eq!(ss.as_slice(), &[3, 4]);
    assert_eq!(ss, m.slice(2..4));

    let empty = m.slice(5..);
    assert!(empty.is_empty());

    assert_eq!(
        m.try_slice(2..6).unwrap_err(),
        RangeError::EndOutOfBounds { end: 6, len: 5 }
    );
    assert_eq!(
        s.try_slice(3..2).unwrap_err(),
        RangeError::StartGreaterThanEnd { start: 3, end: 2 }
    );
}

#[test]
#[should_panic(expected = "end index 4 is out of bounds for memory of length 3")]
fn test_slice_panic() {
    let m = M::from(Buffer::from(vec![1, 2, 3]));
    let _ = m.slice(..4);
}

#[test]
fn test_identity() {
    let buffer = Buffer::from(vec![1, 2, 3]);
    let a = M::from(buffer.clone());
    let b = M::from(buffer);
    assert_eq!(a, b);
    assert!(a.same_storage(&b));

    // same content, other storage
    let c = M::from(Buffer::from(vec![1, 2, 3]));
    assert_ne!(a, c);
    assert!(!a.same_storage(&c));

    // same storage, other run
    assert_ne!(a.slice(1..), a);
    assert!(a.slice(1..).same_storage(&a));

    assert_ne!(M::<i32>::new(), a.slice(0..0));
}

#[test]
#[cfg(feature = "std")]
fn test_hash() {
    let buffer = Buffer::from(vec![1, 2, 3]);
    let mut set = HashSet::new();
    set.insert(M::from(buffer.clone()));
    set.insert(M::from(buffer.clone()));
    set.insert(M::from(buffer).slice(1..));
    set.insert(M::from(Buffer::from(vec![1, 2, 3])));
    assert_eq!(set.len(), 3);
}

#[test]
fn test_pin() {
    let buffer = Buffer::from(vec![1_u16, 2, 3, 4]);
    let m = M::from(buffer.clone()).slice(2..);
    {
        let guard = m.pin().unwrap();
        assert!(guard.is_pinned());
        assert_eq!(buffer.pin_count(), 1);
        assert_eq!(unsafe { *guard.as_ptr() }, 3);
    }
    assert_eq!(buffer.pin_count(), 0);

    let guard = M::<u16>::new().pin().unwrap();
    assert!(!guard.is_pinned());

    let strings = M::from(Buffer::from(vec![String::from("a")]));
    assert!(matches!(
        strings.pin(),
        Err(Error::UnsupportedPin { .. })
    ));
}

#[test]
fn test_fmt() {
    let m = M::from(Buffer::from(vec![1, 2, 3])).slice(1..);
    assert_eq!(format!("{m:?}"), "[2, 3]");
}
