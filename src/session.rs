//! The game loop: tick order, speed ramp and the crash/restart cycle.

use core::{
    convert::Infallible,
    fmt,
};

use embedded_hal_async::delay::DelayNs;
use fugit::MillisDurationU32;
use rand_core::RngCore;

use crate::{
    buttons::Controls,
    collision::{
        self,
        Collision,
    },
    config::GameConfig,
    countdown,
    difficulty::Difficulty,
    display::VirtualDisplay,
    glcd::GlcdBus,
    obstacles::ObstacleField,
    player::Player,
    track::CorridorTrack,
};

/// Where the session is in its start/run/restart cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Countdown still to play.
    Starting,
    /// Ticking.
    Running,
    /// Crashed; the next step blanks the screen and starts over.
    Resetting,
}

/// Result of one running tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Frame drawn; wait this long before the next one.
    Continue(MillisDurationU32),
    /// The car hit something.
    Crashed(Collision),
}

/// A hardware fault while running the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<D, I> {
    /// The display bus failed.
    Display(D),
    /// Reading the buttons failed.
    Input(I),
}

impl<D: fmt::Debug, I: fmt::Debug> fmt::Display for Error<D, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display(e) => write!(f, "display bus error: {e:?}"),
            Self::Input(e) => write!(f, "input error: {e:?}"),
        }
    }
}

impl<D: fmt::Debug, I: fmt::Debug> core::error::Error for Error<D, I> {}

/// The error type of a session driving bus `B` with controls `C`.
pub type SessionError<B, C> = Error<<B as GlcdBus>::Error, <C as Controls>::Error>;

/// All game state, owned in one place.
///
/// `N` is the number of obstacle slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession<R, const N: usize = 1> {
    state: State,
    config: GameConfig,
    track: CorridorTrack,
    obstacles: ObstacleField<N>,
    player: Player,
    difficulty: Difficulty,
    rng: R,
}

impl<R: RngCore, const N: usize> GameSession<R, N> {
    pub const fn new(config: GameConfig, rng: R) -> Self {
        Self {
            state: State::Starting,
            track: CorridorTrack::new(),
            obstacles: ObstacleField::new(config.spawn_one_in),
            player: Player::new(),
            difficulty: Difficulty::new(&config),
            config,
            rng,
        }
    }

    pub const fn state(&self) -> State {
        self.state
    }

    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    pub const fn track(&self) -> &CorridorTrack {
        &self.track
    }

    pub const fn obstacles(&self) -> &ObstacleField<N> {
        &self.obstacles
    }

    pub const fn player(&self) -> &Player {
        &self.player
    }

    pub const fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    /// Put track, obstacles, car and speed back to their start values and
    /// resume running.
    pub fn reset(&mut self) {
        self.track = CorridorTrack::new();
        self.obstacles.clear();
        self.player = Player::new();
        self.difficulty = Difficulty::new(&self.config);
        self.state = State::Running;
    }

    /// Advance the world by one frame and redraw it from scratch.
    ///
    /// On a crash the session moves to [`State::Resetting`].
    pub fn tick<B: GlcdBus, C: Controls>(
        &mut self,
        display: &mut VirtualDisplay<B>,
        controls: &mut C,
    ) -> Result<Tick, SessionError<B, C>> {
        display.clear().map_err(SessionError::<B, C>::Display)?;

        self.track.scroll(&mut self.rng);
        self.obstacles.advance();
        self.obstacles.maybe_spawn(&mut self.rng, &self.track);

        self.track.render_edges(display).map_err(SessionError::<B, C>::Display)?;
        self.obstacles.render(display).map_err(SessionError::<B, C>::Display)?;

        let steer = controls.poll().map_err(SessionError::<B, C>::Input)?;
        self.player.steer(steer);
        self.player.render(display).map_err(SessionError::<B, C>::Display)?;

        match collision::check(&self.track, &self.obstacles, &self.player) {
            Some(hit) => {
                info!("crashed: {} at column {=u8}", hit, self.player.x());
                self.state = State::Resetting;
                Ok(Tick::Crashed(hit))
            }
            None => Ok(Tick::Continue(self.difficulty.tick_delay())),
        }
    }

    /// Run whatever the current state calls for, once: the countdown, one
    /// tick plus its pause, or the restart after a crash.
    pub async fn step<B: GlcdBus, C: Controls, D: DelayNs>(
        &mut self,
        display: &mut VirtualDisplay<B>,
        controls: &mut C,
        delay: &mut D,
    ) -> Result<State, SessionError<B, C>> {
        match self.state {
            State::Starting => {
                countdown::play(display, delay, self.config.countdown_step)
                    .await
                    .map_err(SessionError::<B, C>::Display)?;
                self.state = State::Running;
            }
            State::Running => {
                if let Tick::Continue(pause) = self.tick(display, controls)? {
                    delay.delay_ms(pause.ticks()).await;
                    self.difficulty.frame_done();
                }
            }
            State::Resetting => {
                display.clear().map_err(SessionError::<B, C>::Display)?;
                delay.delay_ms(self.config.reset_pause.ticks()).await;
                self.reset();
                info!("restarting");
            }
        }
        Ok(self.state)
    }

    /// Play forever. Only a hardware fault ends the loop.
    pub async fn run<B: GlcdBus, C: Controls, D: DelayNs>(
        &mut self,
        display: &mut VirtualDisplay<B>,
        controls: &mut C,
        delay: &mut D,
    ) -> Result<Infallible, SessionError<B, C>> {
        loop {
            self.step(display, controls, delay).await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;
    use crate::{
        buttons::Steer,
        glcd::SimulatedPanel,
        obstacles::Obstacle,
        player::PLAYER_PAGE,
        testing::{
            RecordingDelay,
            Scripted,
        },
    };

    // Corridor wobbles 39 <-> 40 and no spawn roll ever succeeds.
    const CALM: &[u32] = &[1, 1, 0, 1];

    fn display() -> VirtualDisplay<SimulatedPanel> {
        VirtualDisplay::new(SimulatedPanel::new())
    }

    fn running(rng: Scripted<'_>) -> GameSession<Scripted<'_>> {
        let mut session = GameSession::new(GameConfig::default(), rng);
        session.reset();
        session
    }

    #[test]
    fn new_session_starts_with_countdown() {
        let mut session: GameSession<_> = GameSession::new(GameConfig::default(), Scripted::new(CALM));
        let mut delay = RecordingDelay::default();

        let state = block_on(session.step(&mut display(), &mut Steer::default(), &mut delay)).unwrap();

        assert_eq!(state, State::Running);
        assert_eq!(delay.waits_ms, [200; 4]);
    }

    #[test]
    fn tick_draws_track_and_car() {
        let mut session = running(Scripted::new(CALM));
        let mut display = display();

        let tick = session.tick(&mut display, &mut Steer::default()).unwrap();
        assert_eq!(tick, Tick::Continue(MillisDurationU32::from_ticks(160)));

        let panel = display.bus();
        let bottom = panel.row(PLAYER_PAGE);
        assert_eq!(&bottom[61..67], &crate::sprites::PLAYER);
        assert_eq!(bottom[39], crate::sprites::RAIL);
        assert_eq!(bottom[39 + 48], crate::sprites::RAIL);
        // The new top page moved right.
        assert_eq!(panel.row(0)[40], crate::sprites::RAIL);
    }

    #[test]
    fn steering_applies_before_collision_check() {
        let mut session = running(Scripted::new(CALM));
        let mut right = Steer {
            left: false,
            right: true,
        };
        session.tick(&mut display(), &mut right).unwrap();
        assert_eq!(session.player().x(), 62);
    }

    #[test]
    fn leaving_the_corridor_crashes() {
        let mut session = running(Scripted::new(CALM));
        session.track = CorridorTrack::from_offsets([70; 8]);

        let tick = session.tick(&mut display(), &mut Steer::default()).unwrap();

        assert_eq!(tick, Tick::Crashed(Collision::Boundary));
        assert_eq!(session.state(), State::Resetting);
    }

    #[test]
    fn obstacle_reaching_the_car_crashes() {
        let mut session = running(Scripted::new(CALM));
        // One page above the car, overlapping its columns.
        session
            .obstacles
            .spawn(&mut Scripted::new(&[17]), &session.track)
            .unwrap();
        for _ in 0..PLAYER_PAGE - 1 {
            session.obstacles.advance();
        }
        assert_eq!(
            session.obstacles().active().next(),
            Some(&Obstacle {
                x: 58,
                page: PLAYER_PAGE - 1
            })
        );

        let tick = session.tick(&mut display(), &mut Steer::default()).unwrap();
        assert_eq!(tick, Tick::Crashed(Collision::Obstacle));
    }

    #[test]
    fn hundred_clean_ticks_speed_up_once() {
        let mut session = running(Scripted::new(CALM));
        let mut display = display();
        let mut delay = RecordingDelay::default();

        for _ in 0..100 {
            let state = block_on(session.step(&mut display, &mut Steer::default(), &mut delay)).unwrap();
            assert_eq!(state, State::Running);
        }

        assert_eq!(delay.waits_ms.len(), 100);
        assert!(delay.waits_ms.iter().all(|&ms| ms == 160));
        assert_eq!(session.difficulty().tick_delay(), MillisDurationU32::from_ticks(150));
        assert_eq!(session.difficulty().frames(), 0);
    }

    #[test]
    fn crash_then_restart_restores_start_values() {
        let mut session = running(Scripted::new(CALM));
        let mut display = display();
        let mut delay = RecordingDelay::default();
        for _ in 0..150 {
            block_on(session.step(&mut display, &mut Steer::default(), &mut delay)).unwrap();
        }
        assert_ne!(session.difficulty(), &Difficulty::new(session.config()));

        session.track = CorridorTrack::from_offsets([1; 8]);
        let state = block_on(session.step(&mut display, &mut Steer::default(), &mut delay)).unwrap();
        assert_eq!(state, State::Resetting);

        delay.waits_ms.clear();
        let state = block_on(session.step(&mut display, &mut Steer::default(), &mut delay)).unwrap();
        assert_eq!(state, State::Running);
        assert_eq!(delay.waits_ms, [120]);
        assert!(display.bus().is_blank());
        assert_eq!(session.track(), &CorridorTrack::new());
        assert_eq!(session.player(), &Player::new());
        assert_eq!(session.obstacles().active().count(), 0);
        assert_eq!(session.difficulty(), &Difficulty::new(session.config()));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut once = running(Scripted::new(CALM));
        for _ in 0..20 {
            once.tick(&mut display(), &mut Steer::default()).unwrap();
        }
        let mut twice = once.clone();

        once.reset();
        twice.reset();
        twice.reset();

        assert_eq!(once, twice);
    }

    #[test]
    fn display_errors_are_reported() {
        struct Dead;

        impl GlcdBus for Dead {
            type Error = ();

            fn select_half(&mut self, _: crate::glcd::Half) -> Result<(), ()> {
                Err(())
            }

            fn send_command(&mut self, _: u8) -> Result<(), ()> {
                Err(())
            }

            fn send_data(&mut self, _: u8) -> Result<(), ()> {
                Err(())
            }
        }

        let mut session = running(Scripted::new(CALM));
        let err = session
            .tick(&mut VirtualDisplay::new(Dead), &mut Steer::default())
            .unwrap_err();
        assert_eq!(err, Error::Display(()));
    }
}
