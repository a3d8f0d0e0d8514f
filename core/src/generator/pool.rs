use alloc::vec::Vec;

use super::*;

/// Coordinates that may still receive a bomb.
///
/// Built in scan order (x outer, y inner), trimmed around the first click, shuffled, and finally consumed from the
/// front.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidatePool {
    size: Coord2,
    coords: Vec<Coord2>,
}

impl CandidatePool {
    pub fn new(size: Coord2) -> Self {
        let (cols, rows) = size;
        let coords = (0..cols)
            .flat_map(|x| (0..rows).map(move |y| (x, y)))
            .collect();
        Self { size, coords }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.coords.contains(&coords)
    }

    /// Drops the clamped 3x3 block around `start`.
    pub fn remove_safe_zone(&mut self, start: Coord2) {
        let (x, y) = start;
        self.coords
            .retain(|&(cx, cy)| cx.abs_diff(x) > 1 || cy.abs_diff(y) > 1);
        log::trace!(
            "Safe zone around {:?} leaves {} of {} candidates",
            start,
            self.coords.len(),
            mult(self.size.0, self.size.1)
        );
    }

    pub fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        use rand::seq::SliceRandom;

        self.coords.shuffle(rng);
    }

    /// Consumes the pool, yielding its first `bombs` entries.
    pub fn take_bombs(mut self, bombs: CellCount) -> Vec<Coord2> {
        let wanted = usize::from(bombs);
        if wanted > self.coords.len() {
            log::warn!(
                "Candidate pool too small, requested {} bombs but only {} candidates",
                bombs,
                self.coords.len()
            );
        }
        self.coords.truncate(wanted);
        self.coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn new_pool_lists_every_cell_in_scan_order() {
        let pool = CandidatePool::new((5, 6));

        assert_eq!(pool.len(), 30);
        assert_eq!(pool.coords[0], (0, 0));
        assert_eq!(pool.coords[1], (0, 1));
        assert_eq!(pool.coords[6], (1, 0));
    }

    #[test]
    fn safe_zone_removes_nine_in_the_middle() {
        let mut pool = CandidatePool::new((9, 9));

        pool.remove_safe_zone((4, 4));

        assert_eq!(pool.len(), 72);
        for coords in iter_block((4, 4), (9, 9)) {
            assert!(!pool.contains(coords));
        }
        assert!(pool.contains((2, 4)));
    }

    #[test]
    fn safe_zone_is_clamped_at_corner_and_edge() {
        let mut corner = CandidatePool::new((9, 9));
        corner.remove_safe_zone((0, 0));
        assert_eq!(corner.len(), 77);

        let mut edge = CandidatePool::new((9, 9));
        edge.remove_safe_zone((8, 4));
        assert_eq!(edge.len(), 75);
    }

    #[test]
    fn take_bombs_returns_exact_count_without_duplicates() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut pool = CandidatePool::new((9, 9));
        pool.remove_safe_zone((0, 0));
        pool.shuffle(&mut rng);

        let mut bombs = pool.take_bombs(15);
        assert_eq!(bombs.len(), 15);

        bombs.sort_unstable();
        bombs.dedup();
        assert_eq!(bombs.len(), 15);
    }

    #[test]
    fn shuffle_is_reproducible_for_a_seed() {
        let shuffled = |seed| {
            let mut pool = CandidatePool::new((10, 10));
            pool.shuffle(&mut SmallRng::seed_from_u64(seed));
            pool
        };

        assert_eq!(shuffled(42), shuffled(42));
        assert_ne!(shuffled(42), shuffled(43));
    }
}
