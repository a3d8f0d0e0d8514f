use crate::*;
pub use pool::*;

mod pool;

/// Picks bomb positions for a fresh game once the first click is known.
pub fn place_bombs<R: rand::Rng + ?Sized>(
    config: GameConfig,
    start: Coord2,
    rng: &mut R,
) -> alloc::vec::Vec<Coord2> {
    let mut pool = CandidatePool::new(config.size());
    pool.remove_safe_zone(start);
    pool.shuffle(rng);
    pool.take_bombs(config.bombs)
}
