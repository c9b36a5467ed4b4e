//! Integration tests for the owning Matrix wrapper and its row/column views.

use anyhow::Result;
use ndarray::array;
use raiigraph::sys::{self, fault};
use raiigraph::{BoolMatrix, IntMatrix, RealMatrix};

fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 10 x 20 matrix filled column-major with `0..200`.
fn iota_matrix() -> Result<IntMatrix> {
    let mut m = IntMatrix::new(10, 20)?;
    for (i, x) in m.iter_mut().enumerate() {
        *x = i as i64;
    }
    Ok(m)
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn matrix_default_is_empty() {
    setup();
    let empty = IntMatrix::default();
    assert!(empty.is_empty());
    assert_eq!(empty.shape(), (0, 0));
    assert_eq!(empty.len(), 0);
    assert!(!empty.raw_ptr().is_null());
}

#[test]
fn matrix_new_sets_dimensions() -> Result<()> {
    setup();
    let m = IntMatrix::new(50, 20)?;
    assert!(!m.is_empty());
    assert_eq!(m.len(), 1000);
    assert_eq!(m.nrow(), 50);
    assert_eq!(m.ncol(), 20);
    assert!(m.iter().all(|&x| x == 0));
    Ok(())
}

#[test]
fn matrix_clone_is_deep() -> Result<()> {
    setup();
    let original = IntMatrix::new(50, 20)?;

    let mut copy = original.clone();
    assert_eq!(copy.len(), 1000);
    assert_ne!(copy.as_ptr(), original.as_ptr());
    copy[(0, 0)] = 10;
    assert_eq!(copy[(0, 0)], 10);
    assert_eq!(original[(0, 0)], 0);

    let mut assigned = IntMatrix::default();
    assigned.clone_from(&copy);
    assert_eq!(assigned.shape(), (50, 20));
    assigned[(0, 0)] = 20;
    assert_eq!(copy[(0, 0)], 10);
    Ok(())
}

#[test]
fn matrix_take_leaves_empty_matrix() -> Result<()> {
    setup();
    let mut source = IntMatrix::new(50, 20)?;
    let moved = source.take();
    assert_eq!(moved.len(), 1000);
    assert_eq!(source.shape(), (0, 0));
    source.resize(2, 2, 1)?;
    assert_eq!(source.as_slice(), &[1, 1, 1, 1]);
    Ok(())
}

#[test]
fn matrix_adopts_foreign_handle() -> Result<()> {
    setup();
    let mut raw = std::mem::MaybeUninit::uninit();
    raiigraph::check_code(
        unsafe { sys::igraph_matrix_int_init(raw.as_mut_ptr(), 100, 10) },
        "init",
    )?;
    let owner = unsafe { IntMatrix::from_raw(raw.assume_init()) };
    assert_eq!(owner.len(), 1000);
    assert_eq!(unsafe { sys::igraph_matrix_int_nrow(owner.raw_ptr()) }, 100);
    Ok(())
}

// ---------------------------------------------------------------------------
// Element access
// ---------------------------------------------------------------------------

#[test]
fn matrix_linear_access() -> Result<()> {
    setup();
    let mut contents = iota_matrix()?;
    for (i, x) in contents.iter().enumerate() {
        assert_eq!(*x, i as i64);
    }
    let reversed: Vec<i64> = contents.iter().rev().copied().collect();
    assert_eq!(reversed, (0..200).rev().collect::<Vec<_>>());
    assert_eq!(contents.first(), Some(&0));
    assert_eq!(contents.last(), Some(&199));

    contents.as_mut_slice()[0] = 100;
    assert_eq!(contents.as_slice()[0], 100);
    Ok(())
}

#[test]
fn matrix_two_dimensional_access() -> Result<()> {
    setup();
    let mut contents = iota_matrix()?;
    for j in 0..20 {
        for i in 0..10 {
            assert_eq!(contents[(i, j)], (i + 10 * j) as i64);
            assert_eq!(contents.get(i, j), Some(&((i + 10 * j) as i64)));
        }
    }
    assert_eq!(contents.get(10, 0), None);
    assert!(contents.at(0, 20).is_err());

    for j in 0..20 {
        for i in 0..10 {
            contents[(i, j)] = 0;
        }
    }
    assert!(contents.iter().all(|&x| x == 0));
    Ok(())
}

#[test]
#[should_panic(expected = "out of bounds")]
fn matrix_index_past_rows_panics() {
    let m = IntMatrix::new(2, 3).unwrap();
    let _ = m[(2, 0)];
}

// ---------------------------------------------------------------------------
// Rows and columns
// ---------------------------------------------------------------------------

#[test]
fn matrix_row_views() -> Result<()> {
    setup();
    let mut contents = iota_matrix()?;

    for i in 0..10_usize {
        let base = i as i64;

        let copy = contents.row_copy(i)?;
        assert_eq!(copy.front(), Some(&base));
        assert_eq!(copy.back(), Some(&(base + 190)));

        let row = contents.row(i);
        assert_eq!(row.len(), 20);
        assert!(!row.is_empty());
        assert_eq!(row.front(), Some(&base));
        assert_eq!(row.back(), Some(&(base + 190)));

        for (j, x) in row.iter().enumerate() {
            assert_eq!(*x, base + 10 * j as i64);
            assert_eq!(row[j], *x);
        }
        for (j, x) in row.iter().rev().enumerate() {
            assert_eq!(*x, base + 10 * (19 - j as i64));
        }

        // Cursor arithmetic.
        let mut it = row.begin();
        assert_eq!(it.get(), Some(&base));
        it += 1;
        assert_eq!(it.get(), Some(&(base + 10)));
        it += 1;
        assert_eq!(it.get(), Some(&(base + 20)));
        it += 2;
        assert_eq!(it.get(), Some(&(base + 40)));

        let mut it2 = row.end();
        it2 -= 1;
        assert_eq!(it2.get(), Some(&(base + 190)));
        it2 -= 1;
        assert_eq!(it2.get(), Some(&(base + 180)));
        it2 -= 2;
        assert_eq!(it2.get(), Some(&(base + 160)));

        assert_eq!((row.begin() + 5).get(), Some(&(base + 50)));
        assert_eq!((10 + row.begin()).get(), Some(&(base + 100)));
        assert_eq!((row.end() - 5).get(), Some(&(base + 150)));
        assert_eq!(row.end() - row.begin(), 20);

        // Comparisons.
        let it = row.begin();
        assert!(it < row.end());
        assert!(it != row.end());
        assert!(!(it < row.begin()));
        assert!(it <= row.begin());
        assert!(!(it > row.end()));
        assert!(!(it > row.begin()));
        assert!(it >= row.begin());

        // Writing through a mutable row.
        let mut row = contents.row_mut(i);
        *row.front_mut().unwrap() = -1;
        *row.back_mut().unwrap() = -1;
        assert_eq!(contents[(i, 0)], -1);
        assert_eq!(contents[(i, 19)], -1);

        let mut row = contents.row_mut(i);
        if let Some(last) = row.iter_mut().next_back() {
            *last = 20;
        }
        assert_eq!(contents[(i, 19)], 20);
    }
    Ok(())
}

#[test]
fn matrix_column_views() -> Result<()> {
    setup();
    let contents = iota_matrix()?;

    for j in 0..20_usize {
        let base = 10 * j as i64;

        let copy = contents.column_copy(j)?;
        assert_eq!(copy.front(), Some(&base));
        assert_eq!(copy.back(), Some(&(base + 9)));

        let column = contents.column(j);
        assert_eq!(column.len(), 10);
        assert_eq!(column.step(), 1);
        assert_eq!(column.front(), Some(&base));
        assert_eq!(column.back(), Some(&(base + 9)));
        for (i, x) in column.iter().enumerate() {
            assert_eq!(*x, base + i as i64);
        }
    }
    Ok(())
}

#[test]
fn matrix_rows_and_columns_agree() -> Result<()> {
    setup();
    let contents = iota_matrix()?;
    for r in 0..10 {
        for c in 0..20 {
            let expected = (r + c * 10) as i64;
            assert_eq!(contents.row(r)[c], expected);
            assert_eq!(contents.column(c)[r], expected);
        }
    }
    Ok(())
}

#[test]
fn matrix_column_fill_through_view() -> Result<()> {
    setup();
    let mut m = RealMatrix::new(3, 2)?;
    m.column_mut(1).fill(2.5);
    assert_eq!(m.as_slice(), &[0.0, 0.0, 0.0, 2.5, 2.5, 2.5]);
    Ok(())
}

#[test]
fn matrix_rows_of_zero_column_matrix_are_empty() -> Result<()> {
    setup();
    let m = IntMatrix::new(3, 0)?;
    let row = m.row(2);
    assert!(row.is_empty());
    assert_eq!(row.iter().count(), 0);
    assert_eq!(row.end() - row.begin(), 0);
    Ok(())
}

// ---------------------------------------------------------------------------
// Resizing and swapping
// ---------------------------------------------------------------------------

#[test]
fn matrix_resize_is_linear() -> Result<()> {
    setup();
    let mut m = IntMatrix::new(2, 2)?;
    m.copy_from_slice(&[1, 2, 3, 4]);
    m.resize(3, 2, 9)?;
    assert_eq!(m.shape(), (3, 2));
    // Values keep their linear offset.
    assert_eq!(m.as_slice(), &[1, 2, 3, 4, 9, 9]);
    assert_eq!(m[(0, 1)], 4);

    m.resize(1, 1, 0)?;
    assert_eq!(m.as_slice(), &[1]);
    Ok(())
}

#[test]
fn matrix_clear_and_capacity() -> Result<()> {
    setup();
    let mut m = IntMatrix::new(4, 5)?;
    m.clear();
    assert_eq!(m.shape(), (0, 0));
    assert_eq!(m.capacity(), 20);

    m.reserve(50)?;
    assert_eq!(m.capacity(), 50);
    m.shrink_to_fit();
    assert_eq!(m.capacity(), 0);
    Ok(())
}

#[test]
fn matrix_swap_exchanges_handles() -> Result<()> {
    setup();
    let mut contents = IntMatrix::new(10, 10)?;
    let mut contents2 = IntMatrix::filled(5, 5, 1)?;

    contents.swap_with(&mut contents2);
    assert_eq!(contents.len(), 25);
    assert_eq!(contents.as_slice()[0], 1);
    assert_eq!(contents2.len(), 100);
    assert_eq!(contents2.as_slice()[0], 0);
    Ok(())
}

#[test]
fn matrix_other_element_types() -> Result<()> {
    setup();
    let bools = BoolMatrix::filled(1, 1, false)?;
    assert_eq!(bools.first(), Some(&false));

    let reals = RealMatrix::filled(1, 1, 10.5)?;
    assert_eq!(reals.first(), Some(&10.5));
    Ok(())
}

// ---------------------------------------------------------------------------
// ndarray interop and failures
// ---------------------------------------------------------------------------

#[test]
fn matrix_ndarray_round_trip_keeps_positions() -> Result<()> {
    setup();
    let array = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let m = RealMatrix::from_ndarray(&array)?;
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m[(1, 0)], 4.0);
    assert_eq!(m.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    assert_eq!(m.to_ndarray(), array);

    // Transposed (Fortran-order) input goes through the same path.
    let transposed = RealMatrix::from_ndarray(&array.t())?;
    assert_eq!(transposed.shape(), (3, 2));
    assert_eq!(transposed[(2, 1)], 6.0);
    Ok(())
}

#[test]
fn matrix_failed_operations_leave_prior_state() -> Result<()> {
    let mut m = IntMatrix::filled(2, 2, 7)?;
    let big = IntMatrix::new(10, 10)?;
    let _guard = fault::fail_after(0);

    assert!(IntMatrix::new(3, 3).unwrap_err().is_allocation_failure());
    assert!(m.resize(4, 4, 0).is_err());
    assert!(m.assign(&big).is_err());
    assert!(m.try_clone().is_err());
    assert!(m.row_copy(0).is_err());
    assert_eq!(m.shape(), (2, 2));
    assert_eq!(m.as_slice(), &[7, 7, 7, 7]);
    Ok(())
}

#[test]
fn matrix_dimension_overflow_is_reported() {
    let err = IntMatrix::new(usize::MAX / 2, 4).unwrap_err();
    assert_eq!(err.code(), Some(sys::IGRAPH_EOVERFLOW));
}
