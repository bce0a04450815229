//! Buzzer plus a row of feedback LEDs.

use embedded_hal::{delay::DelayNs, digital::OutputPin};
use log::trace;

use morse_core::{
    codebook::Symbol,
    judge::Outcome,
    output::{INDICATOR_COUNT, OutputSink},
    settings::PlaybackTiming,
};

#[derive(Debug, Clone, Copy)]
pub struct PanelConfig {
    /// Buzzer sounds while its pin is driven low.
    buzzer_active_low: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            buzzer_active_low: true,
        }
    }
}

impl PanelConfig {
    pub const fn with_buzzer_active_low(mut self, buzzer_active_low: bool) -> Self {
        self.buzzer_active_low = buzzer_active_low;
        self
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PanelError<BzErr, LedErr> {
    Buzzer(BzErr),
    Led(LedErr),
}

pub type PanelResult<BzErr, LedErr> = Result<(), PanelError<BzErr, LedErr>>;

/// Blocking output sink: every call returns once the sound or light pattern
/// has finished.
#[derive(Debug)]
pub struct IndicatorPanel<BZ, LED, D> {
    buzzer: BZ,
    leds: [LED; INDICATOR_COUNT],
    delay: D,
    config: PanelConfig,
}

impl<BZ, LED, D> IndicatorPanel<BZ, LED, D>
where
    BZ: OutputPin,
    LED: OutputPin,
    D: DelayNs,
{
    /// Takes ownership of the pins and silences everything.
    pub fn new(
        buzzer: BZ,
        leds: [LED; INDICATOR_COUNT],
        delay: D,
        config: PanelConfig,
    ) -> Result<Self, PanelError<BZ::Error, LED::Error>> {
        let mut panel = Self {
            buzzer,
            leds,
            delay,
            config,
        };
        panel.set_buzzer(false)?;
        panel.all_off()?;
        Ok(panel)
    }

    pub fn all_off(&mut self) -> PanelResult<BZ::Error, LED::Error> {
        self.set_all(false)
    }

    pub fn release(self) -> (BZ, [LED; INDICATOR_COUNT], D) {
        (self.buzzer, self.leds, self.delay)
    }

    fn set_buzzer(&mut self, sounding: bool) -> PanelResult<BZ::Error, LED::Error> {
        let low = sounding == self.config.buzzer_active_low;
        let result = if low {
            self.buzzer.set_low()
        } else {
            self.buzzer.set_high()
        };
        result.map_err(PanelError::Buzzer)
    }

    fn set_led(&mut self, index: usize, on: bool) -> PanelResult<BZ::Error, LED::Error> {
        let Some(led) = self.leds.get_mut(index) else {
            return Ok(());
        };
        let result = if on { led.set_high() } else { led.set_low() };
        result.map_err(PanelError::Led)
    }

    fn set_all(&mut self, on: bool) -> PanelResult<BZ::Error, LED::Error> {
        for index in 0..INDICATOR_COUNT {
            self.set_led(index, on)?;
        }
        Ok(())
    }

    fn chase(&mut self, step_ms: u32) -> PanelResult<BZ::Error, LED::Error> {
        for index in 0..INDICATOR_COUNT {
            self.set_led(index, true)?;
            self.delay.delay_ms(step_ms);
        }
        for index in (0..INDICATOR_COUNT).rev() {
            self.set_led(index, false)?;
            self.delay.delay_ms(step_ms);
        }
        Ok(())
    }

    fn blink_all(&mut self, times: u8, step_ms: u32) -> PanelResult<BZ::Error, LED::Error> {
        for _ in 0..times {
            self.set_all(true)?;
            self.delay.delay_ms(step_ms);
            self.set_all(false)?;
            self.delay.delay_ms(step_ms);
        }
        Ok(())
    }
}

impl<BZ, LED, D> OutputSink for IndicatorPanel<BZ, LED, D>
where
    BZ: OutputPin,
    LED: OutputPin,
    D: DelayNs,
{
    type Error = PanelError<BZ::Error, LED::Error>;

    fn transmit(&mut self, symbols: &[Symbol], timing: &PlaybackTiming) -> Result<(), Self::Error> {
        for symbol in symbols {
            trace!("buzzer {}", symbol.as_char());
            self.set_buzzer(true)?;
            self.delay.delay_ms(timing.symbol_ms(*symbol));
            self.set_buzzer(false)?;
            self.delay.delay_ms(timing.symbol_gap_ms);
        }
        self.delay.delay_ms(timing.letter_gap_ms);
        Ok(())
    }

    fn signal_outcome(
        &mut self,
        outcome: Outcome,
        timing: &PlaybackTiming,
    ) -> Result<(), Self::Error> {
        match outcome {
            Outcome::Success => self.chase(timing.feedback_step_ms),
            Outcome::Wrong { index } => self.set_led(index as usize, true),
            Outcome::Reset => {
                self.blink_all(timing.reset_blinks, timing.feedback_step_ms)?;
                self.all_off()
            }
        }
    }
}
