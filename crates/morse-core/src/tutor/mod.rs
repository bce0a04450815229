//! Tutor state machine: classifies key events, collects the attempt and
//! runs the judge when it is complete.
//!
//! The host calls [`MorseTutor::on_press`] / [`MorseTutor::on_release`] (or
//! drains an [`InputProvider`] through [`MorseTutor::process_inputs`]) with a
//! millisecond timestamp. Playback and feedback block inside the output sink;
//! the tutor tracks when that output ends and, under
//! [`BusyInputPolicy::Drop`], ignores presses stamped before then.
//!
//! A judgement is committed only once its feedback was signalled. When the
//! sink fails there, the keyed answer is discarded and the round keeps its
//! target and failure count. A failed question or replay playback leaves the
//! round waiting for an answer to a target the learner may not have heard;
//! callers usually treat any [`TutorError::Output`] as fatal.

use core::fmt;

use log::{debug, info, warn};

use crate::{
    classifier::{PressState, PressTracker, classify},
    codebook::{self, Pattern, Symbol, UnknownCharacter},
    input::{InputEvent, InputProvider},
    judge::{NextStep, Outcome, Round},
    output::OutputSink,
    question::QuestionSource,
    settings::{BusyInputPolicy, TutorConfig},
};

/// In-memory session counters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Tally {
    pub questions: u32,
    pub successes: u32,
    pub wrong: u32,
    pub resets: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TutorError<E> {
    /// Output sink failed while playing or signalling.
    Output(E),
    /// Question source produced a letter outside the codebook.
    Codebook(UnknownCharacter),
}

impl<E> From<UnknownCharacter> for TutorError<E> {
    fn from(err: UnknownCharacter) -> Self {
        Self::Codebook(err)
    }
}

impl<E: fmt::Debug> fmt::Display for TutorError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output(err) => write!(f, "output sink failed: {err:?}"),
            Self::Codebook(err) => write!(f, "question source misconfigured: {err}"),
        }
    }
}

pub type TutorResult<T, E> = Result<T, TutorError<E>>;

pub struct MorseTutor<Q, O>
where
    Q: QuestionSource,
    O: OutputSink,
{
    questions: Q,
    output: O,
    config: TutorConfig,
    tracker: PressTracker,
    round: Option<Round>,
    busy_until_ms: u64,
    tally: Tally,
}

impl<Q, O> MorseTutor<Q, O>
where
    Q: QuestionSource,
    O: OutputSink,
{
    pub fn new(questions: Q, output: O, config: TutorConfig) -> Self {
        Self {
            questions,
            output,
            tracker: PressTracker::new(config.dash_threshold_ms),
            config,
            round: None,
            busy_until_ms: 0,
            tally: Tally::default(),
        }
    }

    /// Draws the first question and plays it. Events before this are ignored.
    pub fn start(&mut self, now_ms: u64) -> TutorResult<(), O::Error> {
        self.tracker.discard();
        self.busy_until_ms = self.busy_until_ms.max(now_ms);
        self.ask_new_question()
    }

    pub fn on_press(&mut self, now_ms: u64) {
        if self.round.is_none() {
            debug!("press at {now_ms} before start, ignored");
            return;
        }
        if self.drops_input_at(now_ms) {
            debug!(
                "press at {now_ms} dropped, output busy until {}",
                self.busy_until_ms
            );
            return;
        }

        self.tracker.on_press(now_ms);
    }

    /// Returns the judge's outcome when this release completed the attempt.
    pub fn on_release(&mut self, now_ms: u64) -> TutorResult<Option<Outcome>, O::Error> {
        if self.round.is_none() {
            return Ok(None);
        }
        if self.drops_input_at(now_ms) {
            self.tracker.discard();
            debug!("release at {now_ms} dropped, output busy");
            return Ok(None);
        }

        match self.tracker.on_release(now_ms) {
            Some(symbol) => self.accept_symbol(symbol, now_ms),
            None => Ok(None),
        }
    }

    /// Feeds an interval the host already measured, released at `now_ms`.
    pub fn on_interval(
        &mut self,
        duration_ms: u64,
        now_ms: u64,
    ) -> TutorResult<Option<Outcome>, O::Error> {
        if self.round.is_none() {
            return Ok(None);
        }
        let pressed_at = now_ms.saturating_sub(duration_ms);
        if self.drops_input_at(pressed_at) {
            debug!("interval pressed at {pressed_at} dropped, output busy");
            return Ok(None);
        }

        self.tracker.discard();
        let symbol = classify(duration_ms, self.config.dash_threshold_ms);
        self.accept_symbol(symbol, now_ms)
    }

    pub fn handle_event(
        &mut self,
        event: InputEvent,
        now_ms: u64,
    ) -> TutorResult<Option<Outcome>, O::Error> {
        match event {
            InputEvent::Press => {
                self.on_press(now_ms);
                Ok(None)
            }
            InputEvent::Release => self.on_release(now_ms),
        }
    }

    /// Drains `input`, stamping every event with `now_ms`. A provider error
    /// ends the pass. Returns the last outcome produced.
    pub fn process_inputs<IN>(
        &mut self,
        input: &mut IN,
        now_ms: u64,
    ) -> TutorResult<Option<Outcome>, O::Error>
    where
        IN: InputProvider,
        IN::Error: fmt::Debug,
    {
        let mut last = None;
        loop {
            match input.poll_event() {
                Ok(Some(event)) => {
                    if let Some(outcome) = self.handle_event(event, now_ms)? {
                        last = Some(outcome);
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    warn!("input provider error: {err:?}");
                    break;
                }
            }
        }
        Ok(last)
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub const fn tally(&self) -> Tally {
        self.tally
    }

    pub const fn config(&self) -> &TutorConfig {
        &self.config
    }

    pub const fn press_state(&self) -> PressState {
        self.tracker.state()
    }

    /// End of the last blocking output, in the caller's clock.
    pub const fn busy_until_ms(&self) -> u64 {
        self.busy_until_ms
    }

    pub fn is_accepting_input(&self, now_ms: u64) -> bool {
        self.round.is_some() && !self.drops_input_at(now_ms)
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Stops the session. Any open press is discarded.
    pub fn into_parts(self) -> (Q, O, Tally) {
        (self.questions, self.output, self.tally)
    }

    fn drops_input_at(&self, now_ms: u64) -> bool {
        matches!(self.config.busy_input, BusyInputPolicy::Drop) && now_ms < self.busy_until_ms
    }

    fn accept_symbol(
        &mut self,
        symbol: Symbol,
        now_ms: u64,
    ) -> TutorResult<Option<Outcome>, O::Error> {
        let Some(round) = self.round.as_mut() else {
            return Ok(None);
        };

        debug!("keyed {}", symbol.as_char());
        if !round.record(symbol) {
            return Ok(None);
        }

        let keyed = round.attempt().as_slice();
        info!(
            "answer {} ({}) for {}",
            Pattern(keyed),
            codebook::decode(keyed).unwrap_or('?'),
            round.question().character
        );

        let judgement = round.assess();
        let question = *round.question();

        self.tracker.discard();
        self.busy_until_ms = self.busy_until_ms.max(now_ms);

        let signalled = self
            .output
            .signal_outcome(judgement.outcome, &self.config.playback);
        let Some(round) = self.round.as_mut() else {
            return Ok(None);
        };
        if let Err(err) = signalled {
            round.discard_attempt();
            warn!("feedback failed, answer for {} discarded", question.character);
            return Err(TutorError::Output(err));
        }
        round.commit(judgement);
        let failures = round.failures();

        match judgement.outcome {
            Outcome::Success => {
                info!("correct");
                self.tally.successes += 1;
            }
            Outcome::Wrong { .. } => {
                info!("wrong, {failures} failure(s) on {}", question.character);
                self.tally.wrong += 1;
            }
            Outcome::Reset => {
                info!("too many failures on {}, resetting", question.character);
                self.tally.wrong += 1;
                self.tally.resets += 1;
            }
        }
        self.busy_until_ms += self.config.playback.feedback_ms(judgement.outcome);

        match judgement.next {
            NextStep::Advance => self.ask_new_question()?,
            NextStep::Repeat => {
                info!("replaying {}", Pattern(question.symbols));
                self.play(question.symbols)?;
            }
        }

        Ok(Some(judgement.outcome))
    }

    fn ask_new_question(&mut self) -> TutorResult<(), O::Error> {
        let question = self.questions.next_question()?;
        info!(
            "question {}: {} {}",
            self.tally.questions + 1,
            question.character,
            Pattern(question.symbols)
        );

        self.round = Some(Round::new(question));
        self.tally.questions += 1;
        self.play(question.symbols)
    }

    fn play(&mut self, symbols: &[Symbol]) -> TutorResult<(), O::Error> {
        self.output
            .transmit(symbols, &self.config.playback)
            .map_err(TutorError::Output)?;
        self.busy_until_ms += self.config.playback.transmit_ms(symbols);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
