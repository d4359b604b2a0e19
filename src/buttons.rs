//! Two steering buttons, active low, sampled once per tick.

use embedded_hal::digital::InputPin;

/// Which steering buttons are held right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Steer {
    pub left: bool,
    pub right: bool,
}

/// Anything the game can poll for steering input.
pub trait Controls {
    type Error: core::fmt::Debug;

    fn poll(&mut self) -> Result<Steer, Self::Error>;
}

impl<T: Controls + ?Sized> Controls for &mut T {
    type Error = T::Error;

    fn poll(&mut self) -> Result<Steer, Self::Error> {
        (**self).poll()
    }
}

/// A fixed steering state, e.g. for replaying input.
impl Controls for Steer {
    type Error = core::convert::Infallible;

    fn poll(&mut self) -> Result<Steer, Self::Error> {
        Ok(*self)
    }
}

/// A pair of push buttons pulling their lines to ground when pressed.
pub struct SteerButtons<P> {
    pub left: P,
    pub right: P,
}

impl<P: InputPin> Controls for SteerButtons<P> {
    type Error = P::Error;

    fn poll(&mut self) -> Result<Steer, Self::Error> {
        Ok(Steer {
            left: self.left.is_low()?,
            right: self.right.is_low()?,
        })
    }
}

#[cfg(feature = "board")]
mod board {
    use esp_hal::gpio::{
        Input,
        InputConfig,
        Pull,
    };

    use super::SteerButtons;
    use crate::ButtonResources;

    impl From<ButtonResources<'static>> for SteerButtons<Input<'static>> {
        fn from(res: ButtonResources<'static>) -> Self {
            let pull_up = InputConfig::default().with_pull(Pull::Up);
            Self {
                left: Input::new(res.left, pull_up),
                right: Input::new(res.right, pull_up),
            }
        }
    }
}
