//! Overlap tests on the player's page.

use crate::{
    obstacles::{
        Obstacle,
        ObstacleField,
    },
    player::{
        PLAYER_PAGE,
        Player,
    },
    track::{
        CORRIDOR_WIDTH,
        CorridorTrack,
    },
};

/// What the car hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Collision {
    /// Part of the car left the corridor.
    Boundary,
    /// The car overlaps an obstacle on its page.
    Obstacle,
}

/// True unless the whole car sits within the rails at `left_rail`.
///
/// Either edge of the car may share a column with a rail.
pub const fn hits_boundary(left_rail: u8, player: &Player) -> bool {
    player.x() < left_rail || player.right() as u16 > left_rail as u16 + CORRIDOR_WIDTH as u16
}

/// Closed-interval overlap between the car and one obstacle.
pub const fn hits_obstacle(player: &Player, obstacle: &Obstacle) -> bool {
    player.right() >= obstacle.x && player.x() <= obstacle.right()
}

/// Check the corridor first, then every obstacle on the player's page.
pub fn check<const N: usize>(
    track: &CorridorTrack,
    obstacles: &ObstacleField<N>,
    player: &Player,
) -> Option<Collision> {
    if hits_boundary(track.left(PLAYER_PAGE), player) {
        return Some(Collision::Boundary);
    }
    obstacles
        .on_page(PLAYER_PAGE)
        .any(|obstacle| hits_obstacle(player, obstacle))
        .then_some(Collision::Obstacle)
}
