//! Oncoming cars: a fixed pool of slots that fall one page per tick.

use rand_core::RngCore;

use crate::{
    display::{
        HEIGHT_PAGES,
        VirtualDisplay,
    },
    glcd::GlcdBus,
    sprites,
    track::{
        CORRIDOR_WIDTH,
        CorridorTrack,
    },
};

/// Columns covered by an obstacle sprite.
pub const OBSTACLE_WIDTH: u8 = sprites::OBSTACLE.len() as u8;

/// Distance from the left rail to the first column an obstacle may spawn at.
pub const SPAWN_MARGIN: u8 = 2;

// Spawn columns available inside the corridor, counted from the left margin.
const SPAWN_RANGE: u32 = (CORRIDOR_WIDTH - OBSTACLE_WIDTH - 2 * SPAWN_MARGIN) as u32;

/// An active obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Obstacle {
    pub x: u8,
    pub page: u8,
}

impl Obstacle {
    /// Right-most column covered.
    pub const fn right(&self) -> u8 {
        self.x.saturating_add(OBSTACLE_WIDTH - 1)
    }
}

/// `N` obstacle slots; an empty slot is free for the next spawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObstacleField<const N: usize = 1> {
    slots: [Option<Obstacle>; N],
    spawn_one_in: u32,
}

impl<const N: usize> ObstacleField<N> {
    /// An empty pool that tries to spawn on one tick in `spawn_one_in`.
    pub const fn new(spawn_one_in: u32) -> Self {
        Self {
            slots: [None; N],
            spawn_one_in,
        }
    }

    /// Deactivate every slot.
    pub fn clear(&mut self) {
        self.slots = [None; N];
    }

    pub fn active(&self) -> impl Iterator<Item = &Obstacle> {
        self.slots.iter().flatten()
    }

    /// Obstacles occupying exactly `page`.
    pub fn on_page(&self, page: u8) -> impl Iterator<Item = &Obstacle> {
        self.active().filter(move |o| o.page == page)
    }

    /// Drop every obstacle one page; those leaving the screen free their slot.
    pub fn advance(&mut self) {
        for slot in &mut self.slots {
            if let Some(obstacle) = slot {
                obstacle.page += 1;
                if obstacle.page >= HEIGHT_PAGES {
                    *slot = None;
                }
            }
        }
    }

    /// Roll for a spawn this tick and, on success, spawn under the top of the
    /// corridor. Returns the new obstacle, if any.
    pub fn maybe_spawn<R: RngCore>(&mut self, rng: &mut R, track: &CorridorTrack) -> Option<Obstacle> {
        if rng.next_u32() % self.spawn_one_in.max(1) != 0 {
            return None;
        }
        self.spawn(rng, track)
    }

    /// Put an obstacle in the first free slot at page 0, strictly between the
    /// rails. A full pool skips the spawn.
    pub fn spawn<R: RngCore>(&mut self, rng: &mut R, track: &CorridorTrack) -> Option<Obstacle> {
        let slot = self.slots.iter_mut().find(|slot| slot.is_none())?;
        let offset = (rng.next_u32() % SPAWN_RANGE) as u8;
        let obstacle = Obstacle {
            x: track.left(0) + SPAWN_MARGIN + offset,
            page: 0,
        };
        *slot = Some(obstacle);
        debug!("obstacle spawned at column {=u8}", obstacle.x);
        Some(obstacle)
    }

    pub fn render<B: GlcdBus>(&self, display: &mut VirtualDisplay<B>) -> Result<(), B::Error> {
        for obstacle in self.active() {
            display.draw_sprite(obstacle.x, obstacle.page, &sprites::OBSTACLE)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        glcd::SimulatedPanel,
        rng::XorShift32,
        testing::Scripted,
        track::MAX_OFFSET,
    };

    #[test]
    fn advance_moves_down_and_recycles() {
        let mut field = ObstacleField::<1>::new(1);
        let track = CorridorTrack::new();
        field.spawn(&mut Scripted::new(&[0]), &track).unwrap();

        for page in 1..HEIGHT_PAGES {
            field.advance();
            assert_eq!(field.active().next().map(|o| o.page), Some(page));
        }
        field.advance();
        assert_eq!(field.active().count(), 0);
    }

    #[test]
    fn spawn_is_skipped_when_pool_is_full() {
        let mut field = ObstacleField::<1>::new(1);
        let track = CorridorTrack::new();
        assert!(field.spawn(&mut Scripted::new(&[3]), &track).is_some());
        assert!(field.spawn(&mut Scripted::new(&[3]), &track).is_none());
        assert_eq!(field.active().count(), 1);
    }

    #[test]
    fn larger_pool_fills_free_slots_in_order() {
        let mut field = ObstacleField::<3>::new(1);
        let track = CorridorTrack::new();
        let mut rng = Scripted::new(&[0]);
        field.spawn(&mut rng, &track);
        field.advance();
        field.spawn(&mut rng, &track);

        let pages: [u8; 2] = {
            let mut it = field.active().map(|o| o.page);
            [it.next().unwrap(), it.next().unwrap()]
        };
        assert_eq!(pages, [1, 0]);
    }

    #[test]
    fn maybe_spawn_rolls_one_in_n() {
        let track = CorridorTrack::new();

        let mut field = ObstacleField::<1>::new(5);
        assert!(field.maybe_spawn(&mut Scripted::new(&[4, 0]), &track).is_none());
        assert_eq!(field.active().count(), 0);

        assert!(field.maybe_spawn(&mut Scripted::new(&[10, 0]), &track).is_some());
    }

    #[test]
    fn spawn_column_range_hugs_the_margins() {
        let track = CorridorTrack::from_offsets([40; 8]);

        let mut field = ObstacleField::<1>::new(1);
        let first = field.spawn(&mut Scripted::new(&[0]), &track).unwrap();
        assert_eq!(first.x, 42);

        let mut field = ObstacleField::<1>::new(1);
        let last = field.spawn(&mut Scripted::new(&[SPAWN_RANGE - 1]), &track).unwrap();
        // Three free columns before the right rail at 88.
        assert_eq!(last.x, 78);
        assert_eq!(last.right(), 84);
    }

    #[test]
    fn spawns_always_fit_between_rails() {
        let mut rng = XorShift32::new(7);
        for left in [1, 20, 39, MAX_OFFSET] {
            let track = CorridorTrack::from_offsets([left; 8]);
            for _ in 0..500 {
                let mut field = ObstacleField::<1>::new(1);
                let obstacle = field.spawn(&mut rng, &track).unwrap();
                assert!(obstacle.x > track.left(0));
                assert!(obstacle.right() < track.right(0));
            }
        }
    }

    #[test]
    fn obstacle_near_the_edge_is_clipped() {
        let obstacle = Obstacle { x: 250, page: 2 };
        assert_eq!(obstacle.right(), 255);

        let mut display = VirtualDisplay::new(SimulatedPanel::new());
        let mut field = ObstacleField::<1>::new(1);
        field.slots[0] = Some(Obstacle { x: 124, page: 2 });
        field.render(&mut display).unwrap();

        assert_eq!(&display.bus().row(2)[124..], &sprites::OBSTACLE[..4]);
    }

    #[test]
    fn renders_each_active_obstacle() {
        let mut display = VirtualDisplay::new(SimulatedPanel::new());
        let mut field = ObstacleField::<1>::new(1);
        let track = CorridorTrack::from_offsets([40; 8]);
        let obstacle = field.spawn(&mut Scripted::new(&[20]), &track).unwrap();
        field.render(&mut display).unwrap();

        let row = display.bus().row(0);
        let x = usize::from(obstacle.x);
        assert_eq!(&row[x..x + usize::from(OBSTACLE_WIDTH)], &sprites::OBSTACLE);
    }
}
