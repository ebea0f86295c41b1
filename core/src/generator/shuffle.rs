use alloc::vec::Vec;

use crate::*;

/// Returns a permutation of `items` driven by `seed`.
///
/// Every item gets one draw from the generator, in input order, as its sort key. The sort is
/// stable, so equal keys keep their original relative order.
pub fn shuffle<T: Clone>(items: &[T], seed: u32) -> Vec<T> {
    let mut keyed: Vec<(f64, &T)> = items
        .iter()
        .zip(Lcg::new(seed))
        .map(|(item, key)| (key, item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    keyed.into_iter().map(|(_, item)| item.clone()).collect()
}

/// Draws `n` distinct elements of `items` in draw order.
///
/// Each draw picks `floor(value * pool_len)` out of what is left of the pool. Asking for more
/// elements than `items` holds is rejected with [`GameError::InvalidArgument`].
pub fn pick_random<T: Clone>(items: &[T], n: usize, seed: u32) -> Result<Vec<T>> {
    if n > items.len() {
        log::warn!(
            "Cannot pick {} items out of a pool of {}",
            n,
            items.len()
        );
        return Err(GameError::InvalidArgument);
    }

    let mut pool: Vec<&T> = items.iter().collect();
    let mut rng = Lcg::new(seed);
    let mut picked = Vec::with_capacity(n);
    while picked.len() < n {
        // value < 1 so the truncating cast is a floor and stays below pool.len()
        let index = (rng.next_value() * pool.len() as f64) as usize;
        picked.push(pool.remove(index).clone());
    }
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sorted(mut items: Vec<u32>) -> Vec<u32> {
        items.sort_unstable();
        items
    }

    #[test]
    fn shuffle_is_a_permutation_for_many_seeds() {
        let items: Vec<u32> = (0..24).collect();
        for seed in (0..2000).map(|s| s * 7919) {
            assert_eq!(sorted(shuffle(&items, seed)), items);
        }
    }

    #[test]
    fn shuffle_is_deterministic() {
        let items = ["a", "b", "c", "d", "e", "f"];
        let first = shuffle(&items, 1234);
        assert_eq!(first, shuffle(&items, 1234));
        assert_eq!(items, ["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn shuffle_orders_by_drawn_keys() {
        // seed 1 draws 0.236, 0.369, 0.504, 0.705: already ascending
        assert_eq!(shuffle(&["x", "y", "x", "y"], 1), ["x", "y", "x", "y"]);
        let keys: Vec<f64> = Lcg::new(3).take(3).collect();
        let mut expected = vec![(keys[0], 'a'), (keys[1], 'b'), (keys[2], 'c')];
        expected.sort_by(|a, b| a.0.total_cmp(&b.0));
        let expected: Vec<char> = expected.into_iter().map(|(_, c)| c).collect();
        assert_eq!(shuffle(&['a', 'b', 'c'], 3), expected);
    }

    #[test]
    fn shuffle_of_empty_is_empty() {
        assert!(shuffle::<u8>(&[], 9).is_empty());
    }

    #[test]
    fn pick_random_returns_distinct_items() {
        let items: Vec<u32> = (0..12).collect();
        let picked = pick_random(&items, 6, 99).unwrap();
        assert_eq!(picked.len(), 6);
        let mut unique = picked.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 6);
        assert!(picked.iter().all(|item| items.contains(item)));
    }

    #[test]
    fn pick_random_first_draw_uses_floor_of_scaled_value() {
        // seed 1 first draws 0.236..., floor(0.236 * 4) == 0
        assert_eq!(pick_random(&[10, 20, 30, 40], 1, 1).unwrap(), [10]);
        // second draw 0.369... over the remaining three: floor(1.1) == 1 -> 30
        assert_eq!(pick_random(&[10, 20, 30, 40], 2, 1).unwrap(), [10, 30]);
    }

    #[test]
    fn pick_random_whole_pool_is_a_permutation() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(sorted(pick_random(&items, 10, 5).unwrap()), items);
    }

    #[test]
    fn pick_random_rejects_oversized_requests() {
        assert_eq!(
            pick_random(&[1, 2, 3], 4, 0),
            Err(GameError::InvalidArgument)
        );
        assert_eq!(pick_random::<u8>(&[], 0, 0), Ok(vec![]));
    }
}
