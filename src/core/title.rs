//! # Title Animator
//!
//! Typewriter reveal for conversation titles. The header and each sidebar
//! entry own an independent [`AnimatedTitle`]; starting both from the same
//! call site is the only coordination between them.
//!
//! Frame-driven rather than timer-driven: the displayed prefix is derived from
//! the elapsed time, so a late frame never skips the final state.

use std::time::{Duration, Instant};

/// Delay between two revealed characters.
pub const TYPING_SPEED: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
struct Reveal {
    target: String,
    started_at: Instant,
    interval: Duration,
}

impl Reveal {
    fn revealed_chars(&self, now: Instant) -> usize {
        let elapsed = now.saturating_duration_since(self.started_at);
        if self.interval.is_zero() {
            return usize::MAX;
        }
        (elapsed.as_millis() / self.interval.as_millis()) as usize
    }

    fn is_finished(&self, now: Instant) -> bool {
        self.revealed_chars(now) >= self.target.chars().count()
    }

    fn prefix(&self, now: Instant) -> &str {
        let n = self.revealed_chars(now);
        match self.target.char_indices().nth(n) {
            Some((byte, _)) => &self.target[..byte],
            None => &self.target,
        }
    }
}

/// A title that can be set instantly or revealed one character at a time.
#[derive(Debug, Clone, Default)]
pub struct AnimatedTitle {
    text: String,
    reveal: Option<Reveal>,
}

impl AnimatedTitle {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reveal: None,
        }
    }

    /// Replace the title immediately, cancelling any running reveal.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.reveal = None;
    }

    /// Clear the title and reveal `text` starting at `now`.
    pub fn reveal(&mut self, text: impl Into<String>, now: Instant, interval: Duration) {
        let target = text.into();
        self.text = target.clone();
        self.reveal = Some(Reveal {
            target,
            started_at: now,
            interval,
        });
    }

    /// The final title, regardless of animation progress.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_animating(&self) -> bool {
        self.reveal.is_some()
    }

    /// What should be on screen at `now`.
    pub fn display(&self, now: Instant) -> &str {
        match &self.reveal {
            Some(reveal) => reveal.prefix(now),
            None => &self.text,
        }
    }

    /// Drop the reveal once every character is visible.
    pub fn tick(&mut self, now: Instant) {
        if self.reveal.as_ref().is_some_and(|r| r.is_finished(now)) {
            self.reveal = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_reveal_starts_empty() {
        let t0 = Instant::now();
        let mut title = AnimatedTitle::new("Nueva conversación");
        title.reveal("Saludo", t0, TYPING_SPEED);
        assert_eq!(title.display(t0), "");
        assert_eq!(title.text(), "Saludo");
    }

    #[test]
    fn test_reveal_one_char_per_interval() {
        let t0 = Instant::now();
        let mut title = AnimatedTitle::default();
        title.reveal("Saludo", t0, TYPING_SPEED);
        assert_eq!(title.display(t0 + ms(50)), "S");
        assert_eq!(title.display(t0 + ms(120)), "Sa");
        assert_eq!(title.display(t0 + ms(250)), "Salud");
        assert_eq!(title.display(t0 + ms(300)), "Saludo");
    }

    #[test]
    fn test_tick_finishes_animation() {
        let t0 = Instant::now();
        let mut title = AnimatedTitle::default();
        title.reveal("Hola", t0, TYPING_SPEED);

        title.tick(t0 + ms(100));
        assert!(title.is_animating());

        title.tick(t0 + ms(200));
        assert!(!title.is_animating());
        assert_eq!(title.display(t0 + ms(200)), "Hola");
    }

    #[test]
    fn test_reveal_handles_multibyte_chars() {
        let t0 = Instant::now();
        let mut title = AnimatedTitle::default();
        title.reveal("¿Qué?", t0, TYPING_SPEED);
        assert_eq!(title.display(t0 + ms(50)), "¿");
        assert_eq!(title.display(t0 + ms(150)), "¿Qu");
    }

    #[test]
    fn test_set_cancels_reveal() {
        let t0 = Instant::now();
        let mut title = AnimatedTitle::default();
        title.reveal("Largo título", t0, TYPING_SPEED);
        title.set("Otro");
        assert!(!title.is_animating());
        assert_eq!(title.display(t0), "Otro");
    }
}
