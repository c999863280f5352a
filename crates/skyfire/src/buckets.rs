//! Fixed bucket layout for the playfield.
//!
//! The engine's bucket table is open-ended; the game pins down which index
//! means what so spawning and collision code agree.

/// Entity buckets, in update order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Backdrop and terrain blocks
    Scenery,
    /// The player ship
    Player,
    /// Player-fired shots
    Shots,
    /// Short-lived visual effects
    Effects,
}

impl Bucket {
    /// Number of buckets the game uses
    pub const COUNT: usize = 4;

    /// The bucket's index in the entity manager's table
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense_and_ordered() {
        assert_eq!(Bucket::Scenery.index(), 0);
        assert_eq!(Bucket::Player.index(), 1);
        assert_eq!(Bucket::Shots.index(), 2);
        assert_eq!(Bucket::Effects.index(), 3);
        assert_eq!(Bucket::COUNT, 4);
    }
}
