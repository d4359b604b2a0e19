//! KS0108-style graphic LCD: two 64×64 controllers behind chip-select lines.
//!
//! [`GlcdBus`] is the raw primitive the rest of the crate draws through.
//! [`ParallelBus`] drives a real panel over GPIO, [`SimulatedPanel`] keeps
//! both controllers' display RAM in memory.

use core::convert::Infallible;

use embedded_hal::{
    delay::DelayNs,
    digital::{
        OutputPin,
        PinState,
    },
};

/// Columns addressed by one controller.
pub const HALF_COLUMNS: u8 = 64;

/// 8-pixel pages per controller.
pub const PAGES: u8 = 8;

/// Controller command bytes.
pub mod command {
    pub const DISPLAY_ON: u8 = 0x3F;
    pub const DISPLAY_OFF: u8 = 0x3E;
    /// OR'd with the column (0..64).
    pub const SET_COLUMN: u8 = 0x40;
    /// OR'd with the page (0..8).
    pub const SET_PAGE: u8 = 0xB8;
    /// OR'd with the RAM row shown at the top of the screen.
    pub const START_LINE: u8 = 0xC0;
}

/// One of the two half-screen controllers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Half {
    /// Columns 0..64, chip select 1.
    Left,
    /// Columns 64..128, chip select 2.
    Right,
}

impl Half {
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Command/data strobes to the two controllers.
pub trait GlcdBus {
    type Error: core::fmt::Debug;

    /// Route the following commands and data to `half`.
    fn select_half(&mut self, half: Half) -> Result<(), Self::Error>;

    /// Write an instruction byte (RS low).
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Write a display RAM byte (RS high) at the current page/column.
    /// The controller advances its column afterwards.
    fn send_data(&mut self, data: u8) -> Result<(), Self::Error>;
}

impl<T: GlcdBus + ?Sized> GlcdBus for &mut T {
    type Error = T::Error;

    fn select_half(&mut self, half: Half) -> Result<(), Self::Error> {
        (**self).select_half(half)
    }

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        (**self).send_command(command)
    }

    fn send_data(&mut self, data: u8) -> Result<(), Self::Error> {
        (**self).send_data(data)
    }
}

// ── Parallel GPIO bus ───────────────────────────────────────────────────────

/// E must stay high at least this long.
const ENABLE_PULSE_NS: u32 = 500;
/// Minimum E cycle, low half.
const ENABLE_RECOVERY_NS: u32 = 500;
const RESET_PULSE_US: u32 = 10;
const RESET_SETTLE_US: u32 = 1_000;

/// Every line the panel needs, all as push-pull outputs.
pub struct ParallelPins<P> {
    /// DB0..DB7, least significant bit first.
    pub data: [P; 8],
    pub rs: P,
    pub rw: P,
    pub en: P,
    pub cs1: P,
    pub cs2: P,
    pub rst: P,
}

/// Bit-banged 8-bit parallel interface.
pub struct ParallelBus<P, D> {
    data: [P; 8],
    rs: P,
    rw: P,
    en: P,
    cs1: P,
    cs2: P,
    // Held high for as long as the bus lives.
    _rst: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> ParallelBus<P, D> {
    /// Take ownership of the pins and pulse the controllers' reset line.
    pub fn new(pins: ParallelPins<P>, mut delay: D) -> Result<Self, P::Error> {
        let ParallelPins {
            data,
            rs,
            mut rw,
            mut en,
            cs1,
            cs2,
            mut rst,
        } = pins;

        en.set_low()?;
        rw.set_low()?;
        rst.set_low()?;
        delay.delay_us(RESET_PULSE_US);
        rst.set_high()?;
        delay.delay_us(RESET_SETTLE_US);
        debug!("GLCD controllers reset");

        Ok(Self {
            data,
            rs,
            rw,
            en,
            cs1,
            cs2,
            _rst: rst,
            delay,
        })
    }

    fn strobe(&mut self, register: PinState, byte: u8) -> Result<(), P::Error> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(PinState::from((byte >> bit) & 1 != 0))?;
        }
        self.rs.set_state(register)?;
        self.rw.set_low()?;
        self.en.set_high()?;
        self.delay.delay_ns(ENABLE_PULSE_NS);
        self.en.set_low()?;
        self.delay.delay_ns(ENABLE_RECOVERY_NS);
        Ok(())
    }
}

impl<P: OutputPin, D: DelayNs> GlcdBus for ParallelBus<P, D> {
    type Error = P::Error;

    fn select_half(&mut self, half: Half) -> Result<(), Self::Error> {
        // Chip selects are active low.
        let (cs1, cs2) = match half {
            Half::Left => (PinState::Low, PinState::High),
            Half::Right => (PinState::High, PinState::Low),
        };
        self.cs1.set_state(cs1)?;
        self.cs2.set_state(cs2)
    }

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.strobe(PinState::Low, command)
    }

    fn send_data(&mut self, data: u8) -> Result<(), Self::Error> {
        self.strobe(PinState::High, data)
    }
}

// ── In-memory panel ─────────────────────────────────────────────────────────

/// Both controllers' display RAM and address registers, updated the way the
/// silicon does on each strobe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulatedPanel {
    ram: [[[u8; HALF_COLUMNS as usize]; PAGES as usize]; 2],
    page: [u8; 2],
    column: [u8; 2],
    on: [bool; 2],
    selected: Half,
    half_switches: usize,
}

impl Default for SimulatedPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPanel {
    pub const fn new() -> Self {
        Self {
            ram: [[[0; HALF_COLUMNS as usize]; PAGES as usize]; 2],
            page: [0; 2],
            column: [0; 2],
            on: [false; 2],
            selected: Half::Left,
            half_switches: 0,
        }
    }

    /// Byte shown at a screen column (0..128) and page.
    pub fn cell(&self, column: u8, page: u8) -> u8 {
        let half = if column < HALF_COLUMNS { Half::Left } else { Half::Right };
        self.ram[half.index()][usize::from(page)][usize::from(column % HALF_COLUMNS)]
    }

    /// One page across both halves.
    pub fn row(&self, page: u8) -> [u8; 2 * HALF_COLUMNS as usize] {
        let mut row = [0; 2 * HALF_COLUMNS as usize];
        let page = usize::from(page);
        let (left, right) = row.split_at_mut(HALF_COLUMNS as usize);
        left.copy_from_slice(&self.ram[0][page]);
        right.copy_from_slice(&self.ram[1][page]);
        row
    }

    pub fn is_blank(&self) -> bool {
        self.ram.iter().flatten().flatten().all(|&b| b == 0)
    }

    pub const fn is_on(&self, half: Half) -> bool {
        self.on[half.index()]
    }

    /// How many times the selected controller actually changed.
    pub const fn half_switches(&self) -> usize {
        self.half_switches
    }
}

impl GlcdBus for SimulatedPanel {
    type Error = Infallible;

    fn select_half(&mut self, half: Half) -> Result<(), Self::Error> {
        if half != self.selected {
            self.half_switches += 1;
        }
        self.selected = half;
        Ok(())
    }

    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        let chip = self.selected.index();
        match cmd {
            command::DISPLAY_ON => self.on[chip] = true,
            command::DISPLAY_OFF => self.on[chip] = false,
            c if c & 0xF8 == command::SET_PAGE => self.page[chip] = c & 0x07,
            c if c & 0xC0 == command::START_LINE => {}
            c if c & 0xC0 == command::SET_COLUMN => self.column[chip] = c & 0x3F,
            other => warn!("ignoring unknown GLCD command {=u8:#x}", other),
        }
        Ok(())
    }

    fn send_data(&mut self, data: u8) -> Result<(), Self::Error> {
        let chip = self.selected.index();
        let (page, column) = (usize::from(self.page[chip]), usize::from(self.column[chip]));
        self.ram[chip][page][column] = data;
        self.column[chip] = (self.column[chip] + 1) % HALF_COLUMNS;
        Ok(())
    }
}

// ── Board wiring ────────────────────────────────────────────────────────────

#[cfg(feature = "board")]
mod board {
    use esp_hal::{
        delay::Delay,
        gpio::{
            Level,
            Output,
            OutputConfig,
        },
    };

    use super::{
        ParallelBus,
        ParallelPins,
    };
    use crate::GlcdResources;

    fn out<'a>(pin: impl esp_hal::gpio::OutputPin + 'a, level: Level) -> Output<'a> {
        Output::new(pin, level, OutputConfig::default())
    }

    impl<'a> From<GlcdResources<'a>> for ParallelBus<Output<'a>, Delay> {
        fn from(res: GlcdResources<'a>) -> Self {
            let pins = ParallelPins {
                data: [
                    out(res.d0, Level::Low),
                    out(res.d1, Level::Low),
                    out(res.d2, Level::Low),
                    out(res.d3, Level::Low),
                    out(res.d4, Level::Low),
                    out(res.d5, Level::Low),
                    out(res.d6, Level::Low),
                    out(res.d7, Level::Low),
                ],
                rs: out(res.rs, Level::Low),
                rw: out(res.rw, Level::Low),
                en: out(res.en, Level::Low),
                cs1: out(res.cs1, Level::High),
                cs2: out(res.cs2, Level::High),
                rst: out(res.rst, Level::High),
            };
            ParallelBus::new(pins, Delay::new()).unwrap()
        }
    }
}
