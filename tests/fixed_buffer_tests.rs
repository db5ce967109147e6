use core::mem::MaybeUninit;

use growvec::{GrowVec, GrowVecError};

#[test]
fn test_push_beyond_fixed_capacity_fails() {
    let mut buffer = [MaybeUninit::<u32>::uninit(); 2];
    let mut vec = GrowVec::from_buffer(&mut buffer).unwrap();

    vec.push(1).unwrap();
    vec.push(2).unwrap();

    assert_eq!(
        vec.push(3).err(),
        Some(GrowVecError::InsufficientBufferSize {
            requested: 3,
            capacity: 2
        })
    );
    assert_eq!(vec.len(), 2);
    assert_eq!(vec.capacity(), 2);
    assert_eq!(*vec.get(0).unwrap(), 1);
    assert_eq!(*vec.get(1).unwrap(), 2);
}

#[test]
fn test_buffer_address_never_changes() {
    let mut buffer = [MaybeUninit::<u32>::uninit(); 8];
    let mut vec = GrowVec::from_buffer(&mut buffer).unwrap();
    let address = vec.as_ptr() as usize;

    for i in 0..8 {
        vec.push(i).unwrap();
    }
    vec.delete_range(1, 3).unwrap();
    vec.pop().unwrap();
    vec.insert(0, 99).unwrap();

    assert_eq!(vec.as_ptr() as usize, address);
}

#[test]
fn test_reserve_within_fixed_capacity_succeeds() {
    let mut buffer = [MaybeUninit::<u32>::uninit(); 8];
    let mut vec = GrowVec::from_buffer(&mut buffer).unwrap();

    vec.reserve(8).unwrap();
    assert_eq!(vec.capacity(), 8);
}

#[test]
fn test_reserve_beyond_fixed_capacity_fails() {
    let mut buffer = [MaybeUninit::<u32>::uninit(); 4];
    let mut vec = GrowVec::from_buffer(&mut buffer).unwrap();
    vec.push(1).unwrap();

    assert_eq!(
        vec.reserve(16).err(),
        Some(GrowVecError::InsufficientBufferSize {
            requested: 16,
            capacity: 4
        })
    );
    assert_eq!(vec.len(), 1);
    assert_eq!(vec.capacity(), 4);
}

#[test]
fn test_resize_beyond_fixed_capacity_fails() {
    let mut buffer = [MaybeUninit::<u32>::uninit(); 4];
    let mut vec = GrowVec::from_buffer(&mut buffer).unwrap();

    assert!(vec.resize(8).is_err());
    assert_eq!(vec.len(), 0);
}

#[test]
fn test_resize_within_fixed_capacity_succeeds() {
    let mut buffer = [MaybeUninit::<u32>::uninit(); 4];
    let mut vec = GrowVec::from_buffer(&mut buffer).unwrap();

    vec.resize(4).unwrap();
    assert_eq!(vec.len(), 4);
    assert_eq!(vec.capacity(), 4);
}

#[test]
fn test_insert_slice_beyond_fixed_capacity_fails() {
    let mut buffer = [MaybeUninit::<u32>::uninit(); 4];
    let mut vec = GrowVec::from_buffer(&mut buffer).unwrap();
    vec.insert_slice(0, &[1, 2, 3]).unwrap();

    assert!(vec.insert_slice(1, &[8, 9]).is_err());

    // Failed growth aborts before any shift.
    assert_eq!(vec.len(), 3);
    assert_eq!(*vec.get(0).unwrap(), 1);
    assert_eq!(*vec.get(1).unwrap(), 2);
    assert_eq!(*vec.get(2).unwrap(), 3);
}

#[test]
fn test_deletion_never_shrinks_a_fixed_buffer() {
    let mut buffer = [MaybeUninit::<u32>::uninit(); 8];
    let mut vec = GrowVec::from_buffer(&mut buffer).unwrap();
    for i in 0..8 {
        vec.push(i).unwrap();
    }

    while !vec.is_empty() {
        vec.pop().unwrap();
    }

    assert_eq!(vec.capacity(), 8);
}

#[test]
fn test_full_cycle_on_fixed_buffer() {
    let mut buffer = [MaybeUninit::<i32>::uninit(); 4];
    let mut vec = GrowVec::from_buffer(&mut buffer).unwrap();

    vec.push(1).unwrap();
    vec.push(3).unwrap();
    vec.insert(1, 2).unwrap();
    assert_eq!(*vec.get(1).unwrap(), 2);

    vec.delete(0).unwrap();
    assert_eq!(*vec.get(0).unwrap(), 2);
    assert_eq!(vec.pop().unwrap(), 3);
    assert_eq!(vec.len(), 1);

    vec.clear().unwrap();
    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), 4);
}
