#[cfg(feature = "std")]
use std::collections::HashSet;

use super::*;
use crate::alloc::string::String;
use crate::alloc::{format, vec};
use crate::{LocalBuffer, LocalMemory2D};

type M<T> = crate::Memory2D<T>;
type MM<T> = crate::Memory2DMut<T>;
type Buf<T> = crate::Buffer<T>;

fn eight() -> Buf<i32> {
    Buf::from(vec![1, 2, 3, 4, 5, 6, 7, 8])
}

#[test]
fn test_new_default() {
    let m = M::<u8>::new();
    assert!(m.is_empty());
    assert_eq!(m.len(), 0);
    assert_eq!((m.height(), m.width(), m.pitch(), m.offset()), (0, 0, 0, 0));
    assert!(m.backing().is_none());
    assert!(m.span().is_empty());
    assert_eq!(m, M::default());
}

#[test]
fn test_from_buffer() {
    let m = M::from_buffer(eight(), 0, 2, 3, 1).unwrap();
    assert!(!m.is_empty());
    assert_eq!(m.len(), 6);
    assert_eq!(m.to_vec(), [1, 2, 3, 5, 6, 7]);

    let m = M::from_buffer(eight(), 2, 2, 2, 1).unwrap();
    assert_eq!(m.to_vec(), [3, 4, 6, 7]);
    assert_eq!(m.span().row(2), None);

    let m = M::from_buffer_shape(eight(), 2, 4).unwrap();
    assert_eq!(m.pitch(), 0);
    assert_eq!(m.to_vec(), [1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_from_buffer_errors() {
    assert_eq!(
        M::from_buffer(eight(), 9, 0, 0, 0).unwrap_err(),
        Error::out_of_range(Param::Offset, 9, 9)
    );

    // offset is checked before the zero-area shortcut
    assert!(M::from_buffer(eight(), 10, 0, 5, 0).is_err());
    assert!(M::from_buffer(eight(), 8, 0, 5, 0).unwrap().is_empty());

    assert_eq!(
        M::from_buffer(eight(), 1, 2, 3, 2).unwrap_err(),
        Error::AreaMismatch {
            area: 8,
            available: 7
        }
    );

    assert_eq!(
        M::from_buffer(eight(), 0, 2, 1, usize::MAX).unwrap_err(),
        Error::overflow(Param::Pitch, usize::MAX)
    );
    assert_eq!(
        M::from_buffer(eight(), 0, usize::MAX, 2, 0).unwrap_err(),
        Error::overflow(Param::Height, usize::MAX)
    );
}

#[test]
fn test_zero_area_is_canonical() {
    let buffer = eight();
    for (offset, height, width, pitch) in [(3, 0, 4, 2), (0, 5, 0, 0), (8, 0, 0, 7)] {
        let m = M::from_buffer(buffer.clone(), offset, height, width, pitch).unwrap();
        assert!(m.is_empty());
        assert_eq!(m, M::new());
        assert_eq!(m.offset(), 0);
        assert_eq!(m.pitch(), 0);
    }
    // views never retain a backing they do not address
    assert_eq!(buffer.ref_count(), 1);
}

#[test]
fn test_from_text() {
    let text = crate::Text::from("abcdefgh");
    let m = M::<u8>::from_text(text.clone(), 1, 2, 2, 2).unwrap();
    assert_eq!(m.to_vec(), b"bcfg");

    let m = M::<u8>::from_text_shape(text.clone(), 2, 4).unwrap();
    assert_eq!(m.span().row(1), Some(&b"efgh"[..]));

    // element type is checked first, even with invalid bounds
    assert_eq!(
        M::<u16>::from_text(text.clone(), 100, 1, 1, 0).unwrap_err(),
        Error::type_mismatch::<u16, u8>()
    );
    assert_eq!(
        M::<u8>::from_text(text, 100, 1, 1, 0).unwrap_err(),
        Error::out_of_range(Param::Offset, 100, 9)
    );
}

#[test]
fn test_from_memory() {
    let memory = crate::Memory::from(eight()).slice(2..7);
    let m = M::from_memory(memory.clone(), 1, 2, 2, 0).unwrap();
    assert_eq!(m.to_vec(), [4, 5, 6, 7]);

    assert_eq!(
        M::from_memory(memory, 1, 2, 3, 0).unwrap_err(),
        Error::AreaMismatch {
            area: 6,
            available: 4
        }
    );

    let empty = M::<i32>::from_memory(crate::Memory::new(), 0, 1, 0, 0).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_from_array2() {
    let array = crate::Array2::from([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);

    let whole = M::from(array.clone());
    assert_eq!((whole.height(), whole.width(), whole.pitch()), (3, 3, 0));
    assert_eq!(whole.to_vec(), array.as_slice());

    let m = M::from_array2_rect(array.clone(), 1, 1, 2, 2).unwrap();
    assert_eq!(m.offset(), 4);
    assert_eq!(m.pitch(), 1);
    assert_eq!(m.to_vec(), [5, 6, 8, 9]);

    assert_eq!(
        M::from_array2_rect(array.clone(), 3, 0, 0, 0).unwrap_err(),
        Error::out_of_range(Param::Row, 3, 3)
    );
    assert_eq!(
        M::from_array2_rect(array.clone(), 0, 3, 0, 0).unwrap_err(),
        Error::out_of_range(Param::Column, 3, 3)
    );
    assert_eq!(
        M::from_array2_rect(array.clone(), 1, 0, 3, 1).unwrap_err(),
        Error::out_of_range(Param::Height, 3, 3)
    );
    assert_eq!(
        M::from_array2_rect(array.clone(), 0, 2, 1, 2).unwrap_err(),
        Error::out_of_range(Param::Width, 2, 2)
    );
    assert!(M::from_array2_rect(array, 2, 2, 0, 1).unwrap().is_empty());

    assert!(M::from(crate::Array2::<u8>::default()).is_empty());
}

#[test]
fn test_from_array3() {
    let array = crate::Array3::from_fn(2, 3, 3, |d, r, c| d * 100 + r * 10 + c);

    let layer = M::from_array3(array.clone(), 1).unwrap();
    assert_eq!(layer.offset(), 9);
    assert_eq!(layer.to_vec(), array.layer(1).unwrap());

    let m = M::from_array3_rect(array.clone(), 1, 1, 0, 2, 2).unwrap();
    assert_eq!(m.offset(), (3 + 1) * 3);
    assert_eq!(m.pitch(), 1);
    assert_eq!(m.to_vec(), [110, 111, 120, 121]);

    assert_eq!(
        M::from_array3(array.clone(), 2).unwrap_err(),
        Error::out_of_range(Param::Depth, 2, 2)
    );
    assert_eq!(
        M::from_array3_rect(array, 0, 1, 1, 1, 3).unwrap_err(),
        Error::out_of_range(Param::Width, 3, 3)
    );
}

#[test]
fn test_from_raw_parts() {
    let m = unsafe { M::from_raw_parts(Backing::Buffer(eight()), 4, 2, 2, 0) }.unwrap();
    assert_eq!(m.to_vec(), [5, 6, 7, 8]);

    let text = Backing::<u32, crate::ThreadSafe>::Text(crate::Text::from("abcd"));
    assert_eq!(
        unsafe { M::from_raw_parts(text, 0, 1, 1, 0) }.unwrap_err(),
        Error::type_mismatch::<u32, u8>()
    );

    assert_eq!(
        unsafe { M::from_raw_parts(Backing::Buffer(eight()), 0, 3, 1, usize::MAX) }.unwrap_err(),
        Error::overflow(Param::Pitch, usize::MAX)
    );

    let empty = unsafe { M::from_raw_parts(Backing::Buffer(eight()), 99, 0, 3, 0) }.unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_slice() {
    let array = crate::Array2::from_fn(4, 5, |r, c| r * 10 + c);
    let m = M::from(array);

    let s = m.slice(1, 2, 2, 3).unwrap();
    assert_eq!(s.offset(), 7);
    assert_eq!(s.pitch(), 2);
    assert_eq!(s.to_vec(), [12, 13, 14, 22, 23, 24]);

    // slicing a slice
    let ss = s.slice(1, 1, 1, 2).unwrap();
    assert_eq!(ss.to_vec(), [23, 24]);
    assert_eq!(ss, m.slice(2, 3, 1, 2).unwrap());

    assert_eq!(m.slice(0, 0, 4, 5).unwrap(), m);
    assert!(m.slice(3, 4, 0, 1).unwrap().is_empty());

    assert_eq!(
        m.slice(4, 0, 0, 0).unwrap_err(),
        Error::out_of_range(Param::Row, 4, 4)
    );
    assert_eq!(
        m.slice(0, 5, 0, 0).unwrap_err(),
        Error::out_of_range(Param::Column, 5, 5)
    );
    assert_eq!(
        m.slice(1, 0, 4, 1).unwrap_err(),
        Error::out_of_range(Param::Height, 4, 4)
    );
    assert_eq!(
        m.slice(0, 3, 1, 3).unwrap_err(),
        Error::out_of_range(Param::Width, 3, 3)
    );

    assert!(M::<u8>::new().slice(0, 0, 0, 0).is_err());
}

#[test]
fn test_copy_to() {
    let m = M::from_buffer(eight(), 0, 2, 3, 1).unwrap();

    let mut out = [0; 7];
    m.copy_to(&mut out).unwrap();
    assert_eq!(out, [1, 2, 3, 5, 6, 7, 0]);

    let mut short = [0; 5];
    assert!(!m.try_copy_to(&mut short));
    assert_eq!(short, [0; 5]);

    let mut nothing: [i32; 0] = [];
    assert!(M::<i32>::new().try_copy_to(&mut nothing));
}

#[test]
fn test_copy_to_2d() {
    let m = M::from_buffer(eight(), 0, 2, 3, 1).unwrap();

    let mut target = MM::<i32>::new(2, 3);
    m.copy_to_2d(&mut target).unwrap();
    assert_eq!(target.span().to_vec(), [1, 2, 3, 5, 6, 7]);

    let mut strided = MM::<i32>::from_vec(vec![0; 9], 1, 2, 3, 1).unwrap();
    assert!(m.try_copy_to_2d(&mut strided));
    let flat = M::from(strided).try_flatten();
    assert!(flat.is_none());

    let mut wrong = MM::<i32>::new(3, 2);
    assert_eq!(
        m.copy_to_2d(&mut wrong).unwrap_err(),
        Error::ShapeMismatch {
            required: (2, 3),
            available: (3, 2)
        }
    );

    // destinations may use another backend
    let mut local = crate::LocalMemory2DMut::<i32>::new(2, 3);
    assert!(m.try_copy_to_2d(&mut local));
    assert_eq!(local.span(), target.span());
}

#[test]
fn test_try_flatten() {
    let buffer = eight();

    let packed = M::from_buffer(buffer.clone(), 2, 2, 3, 0).unwrap();
    let flat = packed.try_flatten().unwrap();
    assert_eq!(flat.as_slice(), &[3, 4, 5, 6, 7, 8]);
    assert_eq!(flat, crate::Memory::from(buffer.clone()).slice(2..));

    assert!(M::from_buffer(buffer, 0, 2, 3, 1).unwrap().try_flatten().is_none());

    let empty = M::<i32>::new().try_flatten().unwrap();
    assert!(empty.is_empty());

    let memory = crate::Memory::from(eight()).slice(1..);
    let over = M::from_memory(memory.clone(), 2, 1, 4, 0).unwrap();
    assert_eq!(over.try_flatten().unwrap(), memory.slice(2..6));

    let text = M::<u8>::from_text_shape(crate::Text::from("xyz"), 1, 3).unwrap();
    assert_eq!(text.try_flatten().unwrap().as_slice(), b"xyz");

    let array = crate::Array3::from_fn(2, 2, 2, |d, r, c| d * 4 + r * 2 + c);
    let layer = M::from_array3(array, 1).unwrap();
    assert_eq!(layer.try_flatten().unwrap().as_slice(), &[4, 5, 6, 7]);
}

#[test]
fn test_to_array() {
    let m = M::from_buffer(eight(), 1, 2, 2, 2).unwrap();
    let array = m.to_array();
    assert_eq!(array.rows(), 2);
    assert_eq!(array.columns(), 2);
    assert_eq!(array, crate::Array2::from([[2, 3], [6, 7]]));

    let empty = M::<i32>::new().to_array();
    assert!(empty.is_empty());
}

#[test]
fn test_pin() {
    let buffer = eight();
    let m = M::from_buffer(buffer.clone(), 2, 2, 2, 1).unwrap();
    let guard = m.pin().unwrap();
    assert!(guard.is_pinned());
    assert_eq!(unsafe { *guard.as_ptr() }, 3);
    assert_eq!(buffer.pin_count(), 1);

    // nested pins compose, the guard outlives the view
    let again = m.slice(1, 0, 1, 1).unwrap().pin().unwrap();
    assert_eq!(unsafe { *again.as_ptr() }, 6);
    assert_eq!(buffer.pin_count(), 2);
    drop(m);
    drop(guard);
    assert_eq!(buffer.pin_count(), 1);
    drop(again);
    assert!(!buffer.is_pinned());

    let empty = M::<i32>::new().pin().unwrap();
    assert!(!empty.is_pinned());
    assert!(empty.as_ptr().is_null());
}

#[test]
fn test_pin_memory_backing() {
    let buffer = eight();
    let memory = crate::Memory::from(buffer.clone()).slice(3..);
    let m = M::from_memory(memory, 1, 2, 2, 0).unwrap();
    let guard = m.pin().unwrap();
    assert_eq!(unsafe { *guard.as_ptr() }, 5);
    assert_eq!(buffer.pin_count(), 1);
    drop(guard);
    assert_eq!(buffer.pin_count(), 0);
}

#[test]
fn test_pin_storage_backings() {
    let array = crate::Array2::from_fn(3, 3, |r, c| r * 10 + c);
    let m = M::from_array2_rect(array.clone(), 1, 1, 2, 2).unwrap();
    let guard = m.pin().unwrap();
    assert_eq!(guard.as_ptr(), &raw const array.as_slice()[4]);
    assert_eq!(unsafe { *guard.as_ptr() }, 11);
    assert_eq!(array.pin_count(), 1);
    drop(guard);
    assert!(!array.is_pinned());

    let cube = crate::Array3::from_fn(2, 2, 3, |d, r, c| d * 100 + r * 10 + c);
    let m = M::from_array3_rect(cube.clone(), 1, 0, 1, 2, 2).unwrap();
    let guard = m.pin().unwrap();
    assert_eq!(guard.as_ptr(), &raw const cube.as_slice()[7]);
    assert_eq!(unsafe { *guard.as_ptr() }, 101);
    let whole = M::from_array3(cube.clone(), 0).unwrap().pin().unwrap();
    assert_eq!(unsafe { *whole.as_ptr() }, 0);
    assert_eq!(cube.pin_count(), 2);
    drop((guard, whole));
    assert!(!cube.is_pinned());

    let text = crate::Text::from("abcdef");
    let m = M::<u8>::from_text(text.clone(), 1, 2, 2, 1).unwrap();
    let guard = m.pin().unwrap();
    assert_eq!(guard.as_ptr(), &raw const text.as_bytes()[1]);
    assert_eq!(unsafe { *guard.as_ptr() }, b'b');
    assert_eq!(text.pin_count(), 1);
    drop(m);
    assert!(text.is_pinned());
    drop(guard);
    assert_eq!(text.pin_count(), 0);
}

#[test]
fn test_pin_refused() {
    let strings = Buf::from(vec![String::from("a"), String::from("b")]);
    let m = M::from_buffer_shape(strings.clone(), 1, 2).unwrap();
    assert_eq!(
        m.pin().unwrap_err(),
        Error::UnsupportedPin {
            element: core::any::type_name::<String>()
        }
    );
    assert!(!strings.is_pinned());

    let memory = crate::Memory::from(strings);
    let m = M::from_memory(memory, 0, 1, 1, 0).unwrap();
    assert!(matches!(m.pin(), Err(Error::UnsupportedPin { .. })));
}

#[test]
fn test_identity() {
    let buffer = eight();
    let a = M::from_buffer(buffer.clone(), 0, 2, 2, 2).unwrap();
    let b = M::from_buffer(buffer, 0, 2, 2, 2).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, a.clone());

    // same content, other buffer
    let c = M::from_buffer(eight(), 0, 2, 2, 2).unwrap();
    assert_ne!(a, c);

    // same buffer, other region
    assert_ne!(a, a.slice(0, 0, 2, 1).unwrap());

    // same elements through another backing kind
    let memory = crate::Memory::from(eight());
    let d = M::from_memory(memory.clone(), 0, 2, 2, 2).unwrap();
    let e = M::from_memory(memory.slice(0..), 0, 2, 2, 2).unwrap();
    assert_eq!(d, e);
    let f = M::from_memory(memory.slice(0..7), 0, 2, 2, 2).unwrap();
    assert_ne!(d, f);
}

#[test]
#[cfg(feature = "std")]
fn test_hash() {
    let buffer = eight();
    let mut set = HashSet::new();
    set.insert(M::from_buffer(buffer.clone(), 0, 2, 2, 2).unwrap());
    set.insert(M::from_buffer(buffer.clone(), 0, 2, 2, 2).unwrap());
    set.insert(M::from_buffer(buffer, 1, 2, 2, 2).unwrap());
    set.insert(M::from_buffer(eight(), 0, 2, 2, 2).unwrap());
    set.insert(M::new());
    set.insert(M::default());
    assert_eq!(set.len(), 4);
}

#[test]
fn test_local() {
    let buffer = LocalBuffer::from(vec![1, 2, 3, 4]);
    let m = LocalMemory2D::from_buffer(buffer, 0, 2, 2, 0).unwrap();
    assert_eq!(m.slice(1, 0, 1, 2).unwrap().to_vec(), [3, 4]);
}

#[test]
fn test_fmt() {
    let m = M::from_buffer(eight(), 0, 2, 3, 1).unwrap();
    assert_eq!(format!("{m}"), "Memory2D<i32>[2, 3]");
    assert_eq!(format!("{}", M::<u8>::new()), "Memory2D<u8>[0, 0]");

    let debug = format!("{m:?}");
    assert!(debug.starts_with("Memory2D { backing: Some(Buffer("));
    assert!(debug.ends_with("rows: [[1, 2, 3], [5, 6, 7]] }"));

    let kind = |m: &M<u8>| {
        let backing = format!("{:?}", m.backing().unwrap());
        String::from(&backing[..backing.find('(').unwrap()])
    };
    let bytes = crate::Buffer::from(vec![1_u8, 2, 3, 4]);
    let memory = crate::Memory::from(bytes.clone()).slice(1..);
    assert_eq!(kind(&M::from_buffer_shape(bytes, 2, 2).unwrap()), "Buffer");
    assert_eq!(kind(&M::from(crate::Array2::from([[1_u8]]))), "Array2");
    let cube = crate::Array3::from_fn(1, 1, 1, |_, _, _| 0_u8);
    assert_eq!(kind(&M::from_array3(cube, 0).unwrap()), "Array3");
    let text = crate::Text::from("ab");
    assert_eq!(kind(&M::from_text_shape(text, 1, 2).unwrap()), "Text");
    let sliced = M::from_memory(memory, 0, 1, 3, 0).unwrap();
    assert!(format!("{:?}", sliced.backing().unwrap()).ends_with(", 1..4)"));
    assert_eq!(kind(&sliced), "Memory");
}

#[test]
fn test_layout() {
    assert_eq!(
        core::mem::size_of::<M<u64>>(),
        core::mem::size_of::<MM<u64>>()
    );
    assert_eq!(
        core::mem::align_of::<M<u8>>(),
        core::mem::align_of::<MM<u8>>()
    );
}
