use super::*;
use crate::{
    codebook::Symbol::{Dash, Dot},
    input::mock::{IdleInput, ScriptedInput},
    question::ScriptedQuestions,
    settings::PlaybackTiming,
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum SinkCall {
    Transmit(std::vec::Vec<Symbol>),
    Signal(Outcome),
}

#[derive(Default)]
struct RecordingSink {
    calls: std::vec::Vec<SinkCall>,
    fail: bool,
    fail_feedback: bool,
}

impl RecordingSink {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl OutputSink for RecordingSink {
    type Error = &'static str;

    fn transmit(
        &mut self,
        symbols: &[Symbol],
        _timing: &PlaybackTiming,
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err("buzzer offline");
        }
        self.calls.push(SinkCall::Transmit(symbols.to_vec()));
        Ok(())
    }

    fn signal_outcome(
        &mut self,
        outcome: Outcome,
        _timing: &PlaybackTiming,
    ) -> Result<(), Self::Error> {
        if self.fail_feedback {
            return Err("indicators offline");
        }
        self.calls.push(SinkCall::Signal(outcome));
        Ok(())
    }
}

/// Provider whose script can contain read failures.
struct FlakyInput<'a> {
    events: &'a [Result<InputEvent, ()>],
    cursor: usize,
}

impl<'a> FlakyInput<'a> {
    const fn new(events: &'a [Result<InputEvent, ()>]) -> Self {
        Self { events, cursor: 0 }
    }
}

impl InputProvider for FlakyInput<'_> {
    type Error = ();

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        let Some(event) = self.events.get(self.cursor).copied() else {
            return Ok(None);
        };
        self.cursor = self.cursor.saturating_add(1);
        event.map(Some)
    }
}

type Tutor<'a> = MorseTutor<ScriptedQuestions<'a>, RecordingSink>;

fn started(letters: &[char], config: TutorConfig) -> Tutor<'_> {
    let questions = ScriptedQuestions::new(letters).unwrap();
    let mut tutor = MorseTutor::new(questions, RecordingSink::default(), config);
    tutor.start(0).unwrap();
    tutor
}

/// Learner who presses as soon as input is accepted, with a pause between
/// presses.
struct Learner {
    clock_ms: u64,
}

impl Learner {
    const PAUSE_MS: u64 = 150;

    const fn new() -> Self {
        Self { clock_ms: 0 }
    }

    fn key(&mut self, tutor: &mut Tutor<'_>, held_ms: u64) -> Option<Outcome> {
        let at = self.clock_ms.max(tutor.busy_until_ms());
        tutor.on_press(at);
        let outcome = tutor.on_release(at + held_ms).unwrap();
        self.clock_ms = at + held_ms + Self::PAUSE_MS;
        outcome
    }
}

fn calls<'a>(tutor: &'a Tutor<'_>) -> &'a [SinkCall] {
    &tutor.output().calls
}

#[test]
fn start_plays_first_question() {
    let tutor = started(&['A'], TutorConfig::new());

    assert_eq!(calls(&tutor), &[SinkCall::Transmit(vec![Dot, Dash])]);
    assert_eq!(tutor.round().unwrap().question().character, 'A');
    assert_eq!(tutor.busy_until_ms(), 1_600);
    assert_eq!(tutor.tally().questions, 1);
}

#[test]
fn three_short_presses_answer_s() {
    let mut tutor = started(&['S', 'E'], TutorConfig::new());
    let mut learner = Learner::new();

    assert_eq!(learner.key(&mut tutor, 120), None);
    assert_eq!(learner.key(&mut tutor, 90), None);
    assert_eq!(learner.key(&mut tutor, 399), Some(Outcome::Success));

    assert_eq!(
        calls(&tutor),
        &[
            SinkCall::Transmit(vec![Dot, Dot, Dot]),
            SinkCall::Signal(Outcome::Success),
            SinkCall::Transmit(vec![Dot]),
        ]
    );
    let round = tutor.round().unwrap();
    assert_eq!(round.question().character, 'E');
    assert_eq!(round.failures(), 0);
    assert!(round.attempt().is_empty());
    assert_eq!(
        tutor.tally(),
        Tally {
            questions: 2,
            successes: 1,
            wrong: 0,
            resets: 0
        }
    );
}

#[test]
fn long_press_on_e_is_wrong_and_replays() {
    let mut tutor = started(&['E'], TutorConfig::new());
    let mut learner = Learner::new();

    assert_eq!(learner.key(&mut tutor, 600), Some(Outcome::Wrong { index: 0 }));

    assert_eq!(
        calls(&tutor),
        &[
            SinkCall::Transmit(vec![Dot]),
            SinkCall::Signal(Outcome::Wrong { index: 0 }),
            SinkCall::Transmit(vec![Dot]),
        ]
    );
    let round = tutor.round().unwrap();
    assert_eq!(round.failures(), 1);
    assert!(round.attempt().is_empty());
    assert_eq!(tutor.tally().questions, 1);
}

#[test]
fn fourth_failure_resets_with_new_question() {
    let mut tutor = started(&['E', 'T'], TutorConfig::new());
    let mut learner = Learner::new();

    for index in 0..3 {
        assert_eq!(learner.key(&mut tutor, 700), Some(Outcome::Wrong { index }));
        assert_eq!(tutor.round().unwrap().failures(), index + 1);
        assert_eq!(tutor.round().unwrap().question().character, 'E');
    }
    assert_eq!(learner.key(&mut tutor, 700), Some(Outcome::Reset));

    let round = tutor.round().unwrap();
    assert_eq!(round.question().character, 'T');
    assert_eq!(round.failures(), 0);
    assert_eq!(
        calls(&tutor).last(),
        Some(&SinkCall::Transmit(vec![Dash]))
    );
    assert_eq!(
        calls(&tutor)
            .iter()
            .filter(|call| matches!(call, SinkCall::Transmit(_)))
            .count(),
        5
    );
    assert_eq!(tutor.tally().resets, 1);
    assert_eq!(tutor.tally().wrong, 4);
}

#[test]
fn attempt_is_judged_at_target_length_even_after_early_mismatch() {
    let mut tutor = started(&['S'], TutorConfig::new());
    let mut learner = Learner::new();

    assert_eq!(learner.key(&mut tutor, 500), None);
    assert_eq!(tutor.round().unwrap().attempt().len(), 1);
    assert_eq!(learner.key(&mut tutor, 500), None);
    assert_eq!(learner.key(&mut tutor, 500), Some(Outcome::Wrong { index: 0 }));
}

#[test]
fn presses_during_playback_are_dropped() {
    let mut tutor = started(&['E'], TutorConfig::new());
    let mut learner = Learner::new();
    let busy_until = tutor.busy_until_ms();
    assert!(!tutor.is_accepting_input(busy_until - 1));

    tutor.on_press(busy_until - 100);
    assert_eq!(tutor.press_state(), PressState::Idle);
    assert_eq!(tutor.on_release(busy_until + 50).unwrap(), None);
    assert!(tutor.round().unwrap().attempt().is_empty());

    assert!(tutor.is_accepting_input(busy_until));
    assert_eq!(learner.key(&mut tutor, 100), Some(Outcome::Success));
}

#[test]
fn busy_window_covers_feedback_and_replay() {
    let mut tutor = started(&['E'], TutorConfig::new());
    let mut learner = Learner::new();
    let released_at = tutor.busy_until_ms() + 600;

    learner.key(&mut tutor, 600);

    let timing = PlaybackTiming::new();
    let expected = released_at
        + timing.feedback_ms(Outcome::Wrong { index: 0 })
        + timing.transmit_ms(&[Dot]);
    assert_eq!(tutor.busy_until_ms(), expected);
}

#[test]
fn accept_policy_classifies_during_playback() {
    let config = TutorConfig::new().with_busy_input(BusyInputPolicy::Accept);
    let mut tutor = started(&['E'], config);

    tutor.on_press(10);
    assert_eq!(tutor.on_release(60).unwrap(), Some(Outcome::Success));
}

#[test]
fn bouncing_press_yields_one_symbol() {
    let mut tutor = started(&['I'], TutorConfig::new());
    let at = tutor.busy_until_ms();

    tutor.on_press(at);
    tutor.on_press(at + 5);
    assert_eq!(tutor.on_release(at + 100).unwrap(), None);
    assert_eq!(tutor.on_release(at + 110).unwrap(), None);
    assert_eq!(tutor.round().unwrap().attempt().as_slice(), &[Dot]);
}

#[test]
fn events_before_start_are_ignored() {
    let questions = ScriptedQuestions::new(&['E']).unwrap();
    let mut tutor = MorseTutor::new(questions, RecordingSink::default(), TutorConfig::new());

    tutor.on_press(0);
    assert_eq!(tutor.on_release(100).unwrap(), None);
    assert_eq!(tutor.on_interval(100, 200).unwrap(), None);
    assert!(tutor.round().is_none());
    assert!(calls(&tutor).is_empty());
}

#[test]
fn measured_intervals_use_the_threshold() {
    let config = TutorConfig::new().with_dash_threshold_ms(250);
    let mut tutor = started(&['A'], config);
    let at = tutor.busy_until_ms();

    assert_eq!(tutor.on_interval(249, at + 249).unwrap(), None);
    assert_eq!(
        tutor.on_interval(250, at + 1_000).unwrap(),
        Some(Outcome::Success)
    );
}

#[test]
fn interval_started_during_playback_is_dropped() {
    let mut tutor = started(&['E'], TutorConfig::new());
    let at = tutor.busy_until_ms();

    assert_eq!(tutor.on_interval(100, at + 50).unwrap(), None);
    assert!(tutor.round().unwrap().attempt().is_empty());
}

#[test]
fn process_inputs_drains_provider() {
    let mut tutor = started(&['E'], TutorConfig::new());
    let events = [InputEvent::Press, InputEvent::Release];
    let mut input = ScriptedInput::new(&events);

    let outcome = tutor.process_inputs(&mut input, 5_000).unwrap();
    assert_eq!(outcome, Some(Outcome::Success));
    assert_eq!(input.remaining(), 0);

    assert_eq!(tutor.process_inputs(&mut IdleInput, 6_000).unwrap(), None);
}

#[test]
fn input_errors_end_the_pass() {
    let mut tutor = started(&['E'], TutorConfig::new());
    let events = [Ok(InputEvent::Press), Err(()), Ok(InputEvent::Release)];
    let mut input = FlakyInput::new(&events);

    assert_eq!(tutor.process_inputs(&mut input, 5_000).unwrap(), None);
    assert_eq!(tutor.press_state(), PressState::Pressed { since_ms: 5_000 });

    assert_eq!(
        tutor.process_inputs(&mut input, 5_100).unwrap(),
        Some(Outcome::Success)
    );
}

#[test]
fn output_failure_is_reported() {
    let questions = ScriptedQuestions::new(&['E']).unwrap();
    let mut tutor = MorseTutor::new(questions, RecordingSink::failing(), TutorConfig::new());

    assert_eq!(tutor.start(0), Err(TutorError::Output("buzzer offline")));
}

#[test]
fn failed_feedback_keeps_the_round() {
    let mut tutor = started(&['E', 'T'], TutorConfig::new());
    let mut learner = Learner::new();
    learner.key(&mut tutor, 600);
    assert_eq!(tutor.round().unwrap().failures(), 1);

    tutor.output.fail_feedback = true;
    let at = tutor.busy_until_ms();
    tutor.on_press(at);
    assert_eq!(
        tutor.on_release(at + 600),
        Err(TutorError::Output("indicators offline"))
    );

    let round = tutor.round().unwrap();
    assert_eq!(round.question().character, 'E');
    assert_eq!(round.failures(), 1);
    assert!(round.attempt().is_empty());
    assert_eq!(tutor.tally().wrong, 1);

    tutor.output.fail_feedback = false;
    learner.clock_ms = at + 1_000;
    assert_eq!(
        learner.key(&mut tutor, 600),
        Some(Outcome::Wrong { index: 1 })
    );
}

#[test]
fn into_parts_returns_tally() {
    let mut tutor = started(&['E'], TutorConfig::new());
    let mut learner = Learner::new();
    learner.key(&mut tutor, 50);

    let (_, sink, tally) = tutor.into_parts();
    assert_eq!(sink.calls.len(), 3);
    assert_eq!(tally.successes, 1);
}
