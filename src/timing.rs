/// Leading-edge throttle. The first call fires and opens a cooldown window;
/// calls inside the window are dropped, not queued.
#[derive(Clone, Debug)]
pub struct Throttle {
    cooldown_ms: f64,
    window_opened_at: Option<f64>,
}

impl Throttle {
    pub fn new(cooldown_ms: u32) -> Self {
        Self {
            cooldown_ms: f64::from(cooldown_ms),
            window_opened_at: None,
        }
    }

    /// Returns `true` when the call at `now_ms` should run.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.window_opened_at {
            Some(opened_at) if now_ms - opened_at < self.cooldown_ms => false,
            _ => {
                self.window_opened_at = Some(now_ms);
                true
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypingStep {
    /// Text to display after committing one more character.
    Typed(String),
    Finished,
}

/// Character-by-character reveal of a captured label.
#[derive(Clone, Debug)]
pub struct TypingAnimation {
    chars: Vec<char>,
    revealed: usize,
}

impl TypingAnimation {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            revealed: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn advance(&mut self) -> TypingStep {
        if self.revealed >= self.chars.len() {
            return TypingStep::Finished;
        }

        self.revealed += 1;
        TypingStep::Typed(self.chars[..self.revealed].iter().collect())
    }

    /// Milliseconds after start at which the full text is shown.
    pub fn total_duration_ms(&self, interval_ms: u32) -> u64 {
        self.chars.len() as u64 * u64::from(interval_ms)
    }
}

/// Delay before the label is blanked and shows its caret.
pub const TYPING_BOOTSTRAP_MS: u32 = 500;

/// The start delay split into its two stages: blank the label and show the
/// caret, then begin typing. Both are relative to the previous stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingPhases {
    pub clear_after_ms: u32,
    pub type_after_ms: u32,
}

impl TypingPhases {
    pub fn split(start_delay_ms: u32) -> Self {
        let clear_after_ms = start_delay_ms.min(TYPING_BOOTSTRAP_MS);

        Self {
            clear_after_ms,
            type_after_ms: start_delay_ms - clear_after_ms,
        }
    }
}

/// Reveal delay for each entry of one intersection batch. The stagger index is
/// the entry's position in the batch, counting entries that are not
/// intersecting; those get `None`.
pub fn reveal_delays(intersecting: &[bool], stagger_ms: u32) -> Vec<Option<u32>> {
    intersecting
        .iter()
        .enumerate()
        .map(|(index, visible)| {
            visible.then(|| (index as u32).saturating_mul(stagger_ms))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn throttle_admits_one_call_per_burst() {
        let mut throttle = Throttle::new(16);
        let burst = [1_000.0, 1_002.5, 1_008.0, 1_015.9];

        let admitted = burst.iter().filter(|&&at| throttle.admit(at)).count();
        assert_eq!(admitted, 1);

        assert!(throttle.admit(1_016.0));
        assert!(!throttle.admit(1_020.0));
    }

    #[test]
    fn throttle_drops_instead_of_replaying() {
        let mut throttle = Throttle::new(16);
        assert!(throttle.admit(0.0));
        assert!(!throttle.admit(10.0));

        // The dropped call at 10ms must not shift the window.
        assert!(throttle.admit(16.0));
        assert!(!throttle.admit(31.0));
        assert!(throttle.admit(32.0));
    }

    #[test]
    fn throttle_first_call_always_fires() {
        let mut throttle = Throttle::new(1_000);
        assert!(throttle.admit(0.0));
    }

    #[test]
    fn typing_grows_one_character_per_step() {
        let mut typing = TypingAnimation::new("Ada Lovelace");
        let mut shown = Vec::new();

        while let TypingStep::Typed(text) = typing.advance() {
            shown.push(text);
        }

        assert_eq!(shown.len(), typing.len());
        for (step, text) in shown.iter().enumerate() {
            assert_eq!(text.chars().count(), step + 1);
            assert!("Ada Lovelace".starts_with(text.as_str()));
        }
        assert_eq!(shown.last().map(String::as_str), Some("Ada Lovelace"));
        assert_eq!(typing.advance(), TypingStep::Finished);
    }

    #[test]
    fn typing_handles_multibyte_text() {
        let mut typing = TypingAnimation::new("Zoë");
        assert_eq!(typing.advance(), TypingStep::Typed("Z".to_string()));
        assert_eq!(typing.advance(), TypingStep::Typed("Zo".to_string()));
        assert_eq!(typing.advance(), TypingStep::Typed("Zoë".to_string()));
        assert_eq!(typing.advance(), TypingStep::Finished);
    }

    #[test]
    fn typing_duration_is_length_times_interval() {
        let typing = TypingAnimation::new("Portfolio");
        assert_eq!(typing.total_duration_ms(120), 9 * 120);
        assert!(TypingAnimation::new("").is_empty());
        assert_eq!(TypingAnimation::new("").advance(), TypingStep::Finished);
    }

    #[test]
    fn default_start_blanks_label_long_before_typing() {
        let phases = TypingPhases::split(2_000);
        assert_eq!(
            phases,
            TypingPhases {
                clear_after_ms: 500,
                type_after_ms: 1_500,
            }
        );
    }

    #[test]
    fn short_start_delay_clears_then_types_immediately() {
        assert_eq!(
            TypingPhases::split(300),
            TypingPhases {
                clear_after_ms: 300,
                type_after_ms: 0,
            }
        );
        assert_eq!(TypingPhases::split(0), TypingPhases { clear_after_ms: 0, type_after_ms: 0 });
    }

    #[test]
    fn typing_phases_add_up_to_start_delay() {
        for start in [0, 120, 500, 501, 2_000, 20_000] {
            let phases = TypingPhases::split(start);
            assert_eq!(phases.clear_after_ms + phases.type_after_ms, start);
        }
    }

    #[test]
    fn reveal_delay_follows_batch_position() {
        let delays = reveal_delays(&[true, false, true, true], 200);
        assert_eq!(delays, vec![Some(0), None, Some(400), Some(600)]);
    }

    #[test]
    fn reveal_delay_restarts_for_each_batch() {
        let first = reveal_delays(&[true, true], 200);
        let second = reveal_delays(&[true], 200);
        assert_eq!(first, vec![Some(0), Some(200)]);
        assert_eq!(second, vec![Some(0)]);
    }
}
