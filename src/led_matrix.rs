//! The host loop's view of one matrix: frame buffer, settings and the running animation.
//!
//! A host calls [`LedMatrix::tick`] with the current time as often as it likes, then
//! [`LedMatrix::flush`] to push the frame to the LED driver. Adapters (a serial console,
//! an HTTP handler, a button menu) send [`Command`]s through a [`CommandChannel`] that the
//! host drains between ticks.
//!
//! ```rust
//! use embassy_time::Instant;
//! use panel_life::animation::AnimationKind;
//! use panel_life::led_matrix::LedMatrix;
//! use panel_life::settings::{Command, CommandChannel, Reply};
//!
//! static COMMANDS: CommandChannel = CommandChannel::new();
//!
//! let mut matrix = LedMatrix::<32, 8, 4>::new(1);
//! matrix.select(AnimationKind::RainbowWave, Instant::from_millis(0))?;
//!
//! COMMANDS.try_send(Command::SetBrightness(80)).ok();
//! COMMANDS.try_send(Command::SetBrightness(900)).ok(); // rejected, keeps 80
//! let mut replies = Vec::new();
//! matrix.drain_commands(&COMMANDS, Instant::from_millis(5), |reply| replies.push(reply));
//! assert!(matches!(replies[0], Ok(Reply::Brightness(80))));
//! assert!(replies[1].is_err());
//! assert_eq!(matrix.settings().brightness(), 80);
//!
//! assert!(matrix.tick(Instant::from_millis(10)));
//! # Ok::<(), panel_life::Error>(())
//! ```

use embassy_time::Instant;
use smart_leds::SmartLedsWrite;

use crate::Result;
use crate::animation::{AnimationKind, Player, PlayerState};
use crate::led_strip::{Frame1d, Gamma, Rgb};
use crate::led2d::Led2d;
use crate::settings::{Command, CommandChannel, Reply, Settings};

/// Frame buffer, settings and animation player for an `N`-LED, `W × H` matrix.
#[derive(Debug)]
pub struct LedMatrix<const N: usize, const W: usize, const H: usize> {
    frame: Frame1d<N>,
    settings: Settings,
    player: Player<N, W, H>,
}

impl<const N: usize, const W: usize, const H: usize> LedMatrix<N, W, H> {
    /// A dark matrix with default settings and no animation.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_settings(Settings::new::<N, W, H>(), seed)
    }

    /// A dark matrix using previously saved settings.
    #[must_use]
    pub fn with_settings(settings: Settings, seed: u64) -> Self {
        Self {
            frame: Frame1d::new(),
            settings,
            player: Player::new(seed),
        }
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable settings, for hosts that change them directly rather than by command.
    pub const fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// The frame as last drawn, in physical strip order.
    #[must_use]
    pub const fn frame(&self) -> &Frame1d<N> {
        &self.frame
    }

    /// Lifecycle state of the animation player.
    #[must_use]
    pub const fn state(&self) -> PlayerState {
        self.player.state()
    }

    /// The running animation, if one began successfully.
    #[must_use]
    pub const fn animation(&self) -> Option<AnimationKind> {
        self.player.kind()
    }

    /// Clear the frame and switch to `kind`.
    ///
    /// # Errors
    ///
    /// The animation's `begin` error; the matrix then stays dark.
    pub fn select(&mut self, kind: AnimationKind, now: Instant) -> Result<()> {
        self.settings.set_animation(kind);
        self.frame.clear();
        self.player.select(kind, now, &self.settings)
    }

    /// Stop the running animation and clear the frame.
    pub fn stop(&mut self) {
        self.player.end();
        self.frame.clear();
    }

    /// Advance the running animation. Returns `true` when the frame changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut canvas = Led2d::new(&mut self.frame, self.settings.panels());
        self.player.update(now, &mut canvas, &self.settings)
    }

    /// Apply one command. Animation commands switch the running animation; panel wiring
    /// changes clear the frame so no pixel is left at its old physical position.
    ///
    /// # Errors
    ///
    /// The setter's rejection, or the new animation's `begin` error.
    pub fn handle(&mut self, command: Command, now: Instant) -> Result<Reply> {
        let reply = self.settings.apply(command)?;
        match reply {
            Reply::Animation(kind) => self.select(kind, now)?,
            Reply::PanelOrder(_) | Reply::Rotation { .. } => self.frame.clear(),
            _ => {}
        }
        Ok(reply)
    }

    /// Apply every queued command without waiting, passing each outcome to `on_reply`.
    /// Returns how many commands were handled.
    pub fn drain_commands(
        &mut self,
        channel: &CommandChannel,
        now: Instant,
        mut on_reply: impl FnMut(Result<Reply>),
    ) -> usize {
        let mut handled = 0;
        while let Ok(command) = channel.try_receive() {
            debug!("command {}", command);
            on_reply(self.handle(command, now));
            handled += 1;
        }
        handled
    }

    /// Write the frame to `driver` with gamma correction and the configured brightness.
    ///
    /// # Errors
    ///
    /// [`crate::Error::LedWrite`] if the driver fails.
    pub fn flush<D>(&self, driver: &mut D, gamma: Gamma) -> Result<()>
    where
        D: SmartLedsWrite,
        Rgb: Into<D::Color>,
    {
        self.frame.flush(driver, gamma, self.settings.brightness())
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;
    use crate::Error;
    use crate::led2d::layout::{PanelOrder, Rotation};
    use crate::led_strip::colors;

    type Matrix = LedMatrix<32, 8, 4>;

    struct Recorder(Vec<Rgb>);

    impl SmartLedsWrite for Recorder {
        type Error = Infallible;
        type Color = Rgb;

        fn write<T, I>(&mut self, iterator: T) -> core::result::Result<(), Infallible>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            self.0 = iterator.into_iter().map(Into::into).collect();
            Ok(())
        }
    }

    #[test]
    fn ticks_nothing_until_selected() {
        let mut matrix = Matrix::new(0);
        assert!(!matrix.tick(Instant::from_millis(0)));
        assert_eq!(matrix.state(), PlayerState::Uninitialized);
        assert!(matrix.frame().iter().all(|&pixel| pixel == colors::BLACK));
    }

    #[test]
    fn select_command_switches_animation() {
        let mut matrix = Matrix::new(0);
        let now = Instant::from_millis(0);
        matrix.select(AnimationKind::Blink, now).expect("begins");

        let reply = matrix
            .handle(Command::NextAnimation, now)
            .expect("cycles");
        assert_eq!(reply, Reply::Animation(AnimationKind::Snow));
        assert_eq!(matrix.animation(), Some(AnimationKind::Snow));
        assert_eq!(matrix.settings().animation(), AnimationKind::Snow);
    }

    #[test]
    fn rejected_command_keeps_settings() {
        let mut matrix = Matrix::new(0);
        let before = *matrix.settings();
        assert!(matches!(
            matrix.handle(Command::SetRotation { panel: 5, degrees: 90 }, Instant::from_millis(0)),
            Err(Error::InvalidPanel { panel: 5 })
        ));
        assert_eq!(*matrix.settings(), before);
    }

    #[test]
    fn wiring_change_clears_frame() {
        let mut matrix = Matrix::new(0);
        let now = Instant::from_millis(0);
        matrix.select(AnimationKind::Blink, now).expect("begins");
        assert!(matrix.tick(now));
        assert!(matrix.frame().iter().all(|&pixel| pixel == colors::WHITE));

        let reply = matrix.handle(Command::SwapPanels, now).expect("always valid");
        assert_eq!(reply, Reply::PanelOrder(PanelOrder::RightFirst));
        assert!(matrix.frame().iter().all(|&pixel| pixel == colors::BLACK));

        let reply = matrix
            .handle(Command::SetRotation { panel: 1, degrees: 270 }, now)
            .expect("valid panel");
        assert_eq!(
            reply,
            Reply::Rotation {
                panel: 1,
                rotation: Rotation::Deg270
            }
        );
    }

    #[test]
    fn drain_handles_every_queued_command() {
        let channel = CommandChannel::new();
        let mut matrix = Matrix::new(0);
        channel.try_send(Command::SetPalette(3)).expect("room");
        channel.try_send(Command::SetDensity(101)).expect("room");
        channel.try_send(Command::SetColumnSkip(0)).expect("room");

        let mut replies = Vec::new();
        let handled = matrix.drain_commands(&channel, Instant::from_millis(0), |reply| {
            replies.push(reply);
        });
        assert_eq!(handled, 3);
        assert!(matches!(replies[0], Ok(Reply::Palette(3))));
        assert!(replies[1].is_err());
        assert!(matches!(replies[2], Ok(Reply::ColumnSkip(1))));
        assert_eq!(matrix.drain_commands(&channel, Instant::from_millis(1), |_| {}), 0);
    }

    #[test]
    fn flush_applies_configured_brightness() {
        let mut matrix = Matrix::new(0);
        let now = Instant::from_millis(0);
        matrix.select(AnimationKind::Blink, now).expect("begins");
        matrix.tick(now);
        matrix.settings_mut().set_brightness(51).expect("in range");

        let mut driver = Recorder(Vec::new());
        matrix.flush(&mut driver, Gamma::Linear).expect("recorder never fails");
        assert_eq!(driver.0.len(), 32);
        assert!(driver.0.iter().all(|&pixel| pixel == Rgb::new(51, 51, 51)));
        assert!(matrix.frame().iter().all(|&pixel| pixel == colors::WHITE));
    }
}
