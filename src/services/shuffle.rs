use rand::Rng;

/// Returns a uniformly random permutation of `items`, leaving the input untouched.
///
/// Fisher-Yates walking right to left: each unplaced slot is swapped with an
/// index drawn uniformly from the unplaced prefix, itself included.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    let mut unplaced = shuffled.len();

    while unplaced > 1 {
        let pick = rng.gen_range(0..unplaced);
        unplaced -= 1;
        shuffled.swap(unplaced, pick);
    }

    shuffled
}
