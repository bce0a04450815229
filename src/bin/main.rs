//! Host build of the Morse tutor.
//!
//! The key is scripted on stdin (see `main/console.rs` for the format) and the
//! buzzer/LED panel runs on logging host pins, so a whole session can be
//! played or replayed without a board.

use std::{
    error::Error,
    io::{self, BufRead},
};

use clap::Parser;
use log::{LevelFilter, info, warn};
use morse_core::{
    codebook::Pattern,
    judge::Outcome,
    output::{INDICATOR_COUNT, OutputSink},
    question::{QuestionSource, RandomQuestions, ScriptedQuestions},
    settings::{BusyInputPolicy, PlaybackTiming, TutorConfig},
    tutor::{MorseTutor, TutorResult},
};
use morse_hal::output::panel::{IndicatorPanel, PanelConfig};
use rand::{SeedableRng, rngs::StdRng};

use console::{ScriptLine, VirtualKey};
use host_pins::{HostDelay, HostPin};

#[path = "main/console.rs"]
mod console;
#[path = "main/host_pins.rs"]
mod host_pins;

const LED_NAMES: [&str; INDICATOR_COUNT] = ["led0", "led1", "led2", "led3"];

#[derive(Parser, Debug)]
#[command(name = "morse-tutor")]
#[command(about = "Morse code tutor driven by a scripted key on stdin")]
struct Args {
    /// Seed for question choice (fresh entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Drill these letters in order instead of random questions, e.g. "SOS"
    #[arg(long)]
    letters: Option<String>,

    /// Presses at least this long read as a dash
    #[arg(long, default_value_t = 400)]
    threshold_ms: u32,

    /// Playback length of a dot
    #[arg(long, default_value_t = 200)]
    dot_ms: u32,

    /// Playback length of a dash
    #[arg(long, default_value_t = 600)]
    dash_ms: u32,

    /// Sleep through playback and feedback like the board does
    #[arg(long)]
    realtime: bool,

    /// Classify presses even while a question is still playing
    #[arg(long)]
    accept_while_busy: bool,

    #[arg(long, short, default_value = "info")]
    log_level: String,
}

impl Args {
    fn tutor_config(&self) -> TutorConfig {
        let busy_input = if self.accept_while_busy {
            BusyInputPolicy::Accept
        } else {
            BusyInputPolicy::Drop
        };

        TutorConfig::new()
            .with_dash_threshold_ms(self.threshold_ms)
            .with_playback(
                PlaybackTiming::new()
                    .with_dot_ms(self.dot_ms)
                    .with_dash_ms(self.dash_ms),
            )
            .with_busy_input(busy_input)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.parse().unwrap_or(LevelFilter::Info))
        .parse_default_env()
        .init();

    match &args.letters {
        Some(letters) => {
            let letters: Vec<char> = letters
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .map(|ch| ch.to_ascii_uppercase())
                .collect();
            let questions = ScriptedQuestions::new(&letters)
                .map_err(|err| format!("invalid --letters: {err}"))?;
            run(questions, &args)
        }
        None => {
            let rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            run(RandomQuestions::new(rng), &args)
        }
    }
}

fn run<Q: QuestionSource>(questions: Q, args: &Args) -> Result<(), Box<dyn Error>> {
    let panel = IndicatorPanel::new(
        HostPin::new("buzzer"),
        LED_NAMES.map(HostPin::new),
        HostDelay::new(args.realtime),
        PanelConfig::default(),
    )
    .map_err(|err| format!("panel setup failed: {err:?}"))?;

    let mut tutor = MorseTutor::new(questions, panel, args.tutor_config());
    tutor.start(0).map_err(|err| err.to_string())?;

    let mut key = VirtualKey::new();
    for (number, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        let entry = match console::parse_line(&line) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("line {}: {err}", number + 1);
                continue;
            }
        };

        let result = match entry {
            ScriptLine::Blank => continue,
            ScriptLine::Quit => break,
            ScriptLine::Hold(held_ms) => hold(&mut tutor, &mut key, held_ms),
            ScriptLine::Keys(pattern) => {
                info!("keying {}", Pattern(&pattern));
                let mut result = Ok(None);
                for symbol in pattern {
                    let held_ms = console::hold_for(symbol, args.threshold_ms);
                    result = hold(&mut tutor, &mut key, held_ms);
                    if result.is_err() {
                        break;
                    }
                }
                result
            }
            ScriptLine::Down(at_ms) => {
                tutor.on_press(key.stamp(at_ms));
                Ok(None)
            }
            ScriptLine::Up(at_ms) => tutor.on_release(key.stamp(at_ms)),
        };
        result.map_err(|err| err.to_string())?;
    }

    let (_, mut panel, tally) = tutor.into_parts();
    panel
        .all_off()
        .map_err(|err| format!("panel shutdown failed: {err:?}"))?;

    info!(
        "session over: {} question(s), {} correct, {} wrong, {} reset(s)",
        tally.questions, tally.successes, tally.wrong, tally.resets
    );
    Ok(())
}

fn hold<Q, O>(
    tutor: &mut MorseTutor<Q, O>,
    key: &mut VirtualKey,
    held_ms: u64,
) -> TutorResult<Option<Outcome>, O::Error>
where
    Q: QuestionSource,
    O: OutputSink,
{
    let (pressed_at, released_at) = key.hold(held_ms, tutor.busy_until_ms());
    tutor.on_press(pressed_at);
    tutor.on_release(released_at)
}
