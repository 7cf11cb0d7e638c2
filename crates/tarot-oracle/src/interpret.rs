//! Generated interpretation with fallback to the baseline.

use std::time::Duration;

use tarot_core::{Reading, TarotResult};

use crate::error::InterpretationError;
use crate::prompt::build_prompt;
use crate::provider::InterpretationProvider;

/// The outcome of asking a provider to interpret a reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// Text produced by the provider.
    Generated(String),
    /// The provider failed; `text` is the reading's baseline.
    Fallback {
        /// The baseline interpretation, verbatim.
        text: String,
        /// Why generation failed.
        reason: String,
    },
}

impl Interpretation {
    /// Text to show, whichever way it was obtained.
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) | Self::Fallback { text, .. } => text,
        }
    }

    /// Whether the provider produced this text.
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }

    /// Baseline substitute for a failed request.
    pub fn fallback(reading: &Reading, err: &InterpretationError) -> Self {
        log::warn!("{err}, using baseline interpretation");
        Self::Fallback {
            text: reading.baseline_interpretation().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Ask `provider` to interpret `reading`. Never fails.
pub fn interpret(
    reading: &Reading,
    provider: &dyn InterpretationProvider,
    timeout: Duration,
) -> Interpretation {
    let prompt = build_prompt(reading);
    log::info!("requesting interpretation from {}", provider.name());
    match provider.generate(&prompt, timeout) {
        Ok(text) => Interpretation::Generated(text),
        Err(err) => Interpretation::fallback(reading, &err),
    }
}

/// Store a generated interpretation on `reading`.
///
/// Fallbacks are not stored: the baseline already lives on the reading.
pub fn apply_interpretation(reading: &mut Reading, outcome: &Interpretation) -> TarotResult<()> {
    match outcome {
        Interpretation::Generated(text) => reading.set_interpretation(text.as_str()),
        Interpretation::Fallback { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use tarot_core::{Catalog, Deck, FocusArea, get_spread};

    use super::*;
    use crate::error::InterpretationResult;

    struct Scripted {
        reply: fn() -> InterpretationResult<String>,
        prompts: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(reply: fn() -> InterpretationResult<String>) -> Self {
            Self {
                reply,
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl InterpretationProvider for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn generate(&self, prompt: &str, _timeout: Duration) -> InterpretationResult<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            (self.reply)()
        }
    }

    fn reading() -> Reading {
        let layout = get_spread("three").unwrap();
        let mut deck = Deck::with_seed(Catalog::bundled().unwrap(), 1);
        deck.shuffle(None);
        layout
            .create_reading(
                deck.draw(3).unwrap(),
                FocusArea::Career,
                Some("What next?".into()),
            )
            .unwrap()
    }

    #[test]
    fn generated_text_is_stored() {
        let provider = Scripted::new(|| Ok("A bright path.".into()));
        let mut r = reading();
        let outcome = interpret(&r, &provider, Duration::from_secs(1));
        assert_eq!(outcome, Interpretation::Generated("A bright path.".into()));
        apply_interpretation(&mut r, &outcome).unwrap();
        assert_eq!(r.display_text(), "A bright path.");
        assert!(provider.prompts.borrow()[0].contains("What next?"));
    }

    #[test]
    fn every_failure_falls_back_to_baseline() {
        let failures: [fn() -> InterpretationResult<String>; 6] = [
            || Err(InterpretationError::MissingApiKey("claude".into())),
            || Err(InterpretationError::Timeout(Duration::from_secs(30))),
            || Err(InterpretationError::Http("connection refused".into())),
            || {
                Err(InterpretationError::Status {
                    code: 500,
                    body: "boom".into(),
                })
            },
            || Err(InterpretationError::EmptyResponse),
            || Err(InterpretationError::Decode("bad json".into())),
        ];

        for reply in failures {
            let mut r = reading();
            let outcome = interpret(&r, &Scripted::new(reply), Duration::from_secs(1));
            assert!(!outcome.is_generated());
            assert_eq!(outcome.text(), r.baseline_interpretation());
            apply_interpretation(&mut r, &outcome).unwrap();
            assert!(r.interpretation().is_none());
            assert_eq!(r.display_text(), r.baseline_interpretation());
        }
    }

    #[test]
    fn fallback_records_reason() {
        let outcome = interpret(
            &reading(),
            &Scripted::new(|| Err(InterpretationError::Timeout(Duration::from_secs(5)))),
            Duration::from_secs(5),
        );
        match outcome {
            Interpretation::Fallback { reason, .. } => assert!(reason.contains("timed out")),
            other => panic!("expected fallback, got {other:?}"),
        }
    }
}
