//! Piezo buzzer on PWM0.
//!
//! A tone runs until its deadline; the control loop calls
//! [`Buzzer::update`] every pass to stop it.

use chessterm::ui::Tone;
use embassy_nrf::peripherals::{P1_10, PWM0};
use embassy_nrf::pwm::{Prescaler, SimplePwm};

/// PWM counter clock after the /16 prescaler.
const PWM_CLOCK_HZ: u32 = 1_000_000;

pub struct Buzzer {
    pwm: SimplePwm<'static, PWM0>,
    stop_at_ms: Option<u64>,
}

impl Buzzer {
    pub fn new(pwm: PWM0, pin: P1_10) -> Self {
        let mut pwm = SimplePwm::new_1ch(pwm, pin);
        pwm.set_prescaler(Prescaler::Div16);
        pwm.disable();
        Self {
            pwm,
            stop_at_ms: None,
        }
    }

    /// Start `tone`, replacing whatever was playing.
    pub fn play(&mut self, tone: Tone, now_ms: u64) {
        if tone.freq_hz == 0 || tone.duration_ms == 0 {
            return;
        }
        let top = (PWM_CLOCK_HZ / tone.freq_hz).clamp(2, 0x7FFF) as u16;
        self.pwm.enable();
        self.pwm.set_max_duty(top);
        self.pwm.set_duty(0, top / 2);
        self.stop_at_ms = Some(now_ms + u64::from(tone.duration_ms));
    }

    pub fn update(&mut self, now_ms: u64) {
        if let Some(stop) = self.stop_at_ms {
            if now_ms >= stop {
                self.pwm.set_duty(0, 0);
                self.pwm.disable();
                self.stop_at_ms = None;
            }
        }
    }
}
