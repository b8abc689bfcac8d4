//! Property tests for grid primitives.
use proptest::prelude::*;
use rf_core::{Direction, GridDims};

proptest! {
    #[test]
    fn neighbors_are_adjacent_and_never_wrap(
        width in 1usize..40,
        height in 1usize..40,
        seed in any::<usize>(),
    ) {
        let dims = GridDims::new(width, height).unwrap();
        let index = seed % dims.len();
        let (x, y) = dims.coords(index);
        for dir in Direction::CANONICAL {
            if let Some(n) = dims.neighbor(index, dir) {
                prop_assert!(n < dims.len());
                let (nx, ny) = dims.coords(n);
                let distance = nx.abs_diff(x) + ny.abs_diff(y);
                prop_assert_eq!(distance, 1);
            }
        }
    }

    #[test]
    fn moore_neighbors_stay_within_one_step(
        width in 1usize..30,
        height in 1usize..30,
        seed in any::<usize>(),
    ) {
        let dims = GridDims::new(width, height).unwrap();
        let (x, y) = dims.coords(seed % dims.len());
        let mut count = 0;
        for n in dims.moore_neighbors(x, y) {
            let (nx, ny) = dims.coords(n);
            prop_assert!(nx.abs_diff(x) <= 1 && ny.abs_diff(y) <= 1);
            prop_assert!((nx, ny) != (x, y));
            count += 1;
        }
        prop_assert!(count <= 8);
    }
}
