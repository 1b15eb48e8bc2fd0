use rand::Rng;

/// In-place Fisher–Yates: for `i` from the last index down to 1, swap `i` with a
/// uniformly drawn `j` in `0..=i`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Returns a shuffled copy of `items` using a fresh thread-local random source.
/// The input is left untouched.
#[must_use]
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    shuffled_with(items, &mut rand::rng())
}

/// Like [`shuffled`] but with a caller-provided random source.
#[must_use]
pub fn shuffled_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    fisher_yates(&mut out, rng);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn short_inputs_are_unchanged() {
        let empty: Vec<u8> = Vec::new();
        assert!(shuffled(&empty).is_empty());
        assert_eq!(shuffled(&[7]), vec![7]);
    }

    #[test]
    fn input_is_not_mutated() {
        let input = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let mut rng = StdRng::seed_from_u64(7);
        let out = shuffled_with(&input, &mut rng);
        assert_eq!(input, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        let mut sorted = out.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, input);
    }

    #[test]
    fn same_seed_gives_same_order() {
        let input: Vec<u32> = (0..20).collect();
        let a = shuffled_with(&input, &mut StdRng::seed_from_u64(42));
        let b = shuffled_with(&input, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn every_position_is_reachable() {
        // Element 0 should land in each slot of a 3-element deck at least once.
        let mut seen = [false; 3];
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let out = shuffled_with(&[0, 1, 2], &mut rng);
            let pos = out.iter().position(|&x| x == 0).unwrap();
            seen[pos] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }
}
