use growvec::{GrowVec, GrowVecError};

fn contents(vec: &GrowVec<'_, i32>) -> Vec<i32> {
    (0..vec.len()).map(|i| *vec.get(i).unwrap()).collect()
}

#[test]
fn test_push_grows_past_initial_capacity() {
    let mut vec: GrowVec<i32> = GrowVec::with_capacity(2).unwrap();

    for value in [1, 2, 3, 4] {
        vec.push(value).unwrap();
    }

    assert_eq!(vec.len(), 4);
    assert!(vec.capacity() >= 4);
    assert_eq!(contents(&vec), vec![1, 2, 3, 4]);
}

#[test]
fn test_push_growth_uses_the_default_formula() {
    let mut vec: GrowVec<i32> = GrowVec::with_capacity(2).unwrap();

    vec.push(1).unwrap();
    vec.push(2).unwrap();
    assert_eq!(vec.capacity(), 2);

    // Third push: desired size 3, growth factor 2.0 -> capacity 6.
    vec.push(3).unwrap();
    assert_eq!(vec.capacity(), 6);
}

#[test]
fn test_insert_at_end_appends() {
    let mut vec: GrowVec<i32> = GrowVec::with_capacity(4).unwrap();
    vec.push(1).unwrap();

    vec.insert(1, 2).unwrap();

    assert_eq!(contents(&vec), vec![1, 2]);
}

#[test]
fn test_insert_interior_shifts_tail_right() {
    let mut vec: GrowVec<i32> = GrowVec::with_capacity(8).unwrap();
    vec.insert_slice(0, &[1, 2, 3, 4, 5]).unwrap();

    vec.insert(2, 99).unwrap();

    assert_eq!(contents(&vec), vec![1, 2, 99, 3, 4, 5]);
}

#[test]
fn test_insert_slice_interior() {
    let mut vec: GrowVec<i32> = GrowVec::with_capacity(8).unwrap();
    vec.insert_slice(0, &[1, 2, 3, 4, 5]).unwrap();

    vec.insert_slice(2, &[10, 11]).unwrap();

    assert_eq!(contents(&vec), vec![1, 2, 10, 11, 3, 4, 5]);
}

#[test]
fn test_insert_preserves_prefix_and_shifts_suffix() {
    let mut vec: GrowVec<i32> = GrowVec::with_capacity(16).unwrap();
    vec.insert_slice(0, &[1, 2, 3, 4]).unwrap();

    vec.insert_slice(1, &[7, 8, 9]).unwrap();

    // Elements before the index never move; elements after shift by count.
    assert_eq!(*vec.get(0).unwrap(), 1);
    assert_eq!(*vec.get(1 + 3).unwrap(), 2);
    assert_eq!(*vec.get(2 + 3).unwrap(), 3);
    assert_eq!(*vec.get(3 + 3).unwrap(), 4);
}

#[test]
fn test_insert_slice_triggers_growth() {
    let mut vec: GrowVec<i32> = GrowVec::with_capacity(2).unwrap();
    vec.push(1).unwrap();
    vec.push(2).unwrap();

    // Desired size 5, growth factor 2.0 -> capacity 10.
    vec.insert_slice(1, &[10, 11, 12]).unwrap();

    assert_eq!(vec.capacity(), 10);
    assert_eq!(contents(&vec), vec![1, 10, 11, 12, 2]);
}

#[test]
fn test_insert_empty_slice_is_invalid() {
    let mut vec: GrowVec<i32> = GrowVec::with_capacity(4).unwrap();

    assert_eq!(
        vec.insert_slice(0, &[]).err(),
        Some(GrowVecError::InvalidArgument {
            parameter: "elements"
        })
    );
}

#[test]
fn test_insert_past_size_is_out_of_range() {
    let mut vec: GrowVec<i32> = GrowVec::with_capacity(4).unwrap();
    vec.push(1).unwrap();

    assert_eq!(
        vec.insert(2, 9).err(),
        Some(GrowVecError::OutOfRange { index: 2, size: 1 })
    );
    assert_eq!(vec.len(), 1);
}

#[test]
fn test_push_pop_net_size() {
    let mut vec: GrowVec<i32> = GrowVec::with_capacity(1).unwrap();

    for i in 0..100 {
        vec.push(i).unwrap();
        assert!(vec.capacity() >= vec.len());
    }
    for _ in 0..40 {
        vec.pop().unwrap();
        assert!(vec.capacity() >= vec.len());
    }

    assert_eq!(vec.len(), 60);
}
