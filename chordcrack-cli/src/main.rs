mod render;
mod repl;

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use chordcrack_audio::{wav, AudioHandle};
use chordcrack_core::action::IoFeedback;
use chordcrack_core::dispatch::{self, AudioSideEffect};
use chordcrack_core::history::RoundLog;
use chordcrack_core::{config, state::AppState};
use chordcrack_types::{
    Action, Chord, ChordCategory, GameAction, HintTier, PracticeAction, SessionAction,
};

use repl::Command;

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chordcrack")
        .join("chordcrack.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::File::create(&log_path).unwrap_or_else(|_| {
        std::fs::File::create("/tmp/chordcrack.log").expect("Cannot create log file")
    });

    WriteLogger::init(log_level, Config::default(), log_file)
        .expect("Failed to initialize logger");

    log::info!("chordcrack starting (log level: {:?})", log_level);
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    init_logging(verbose);

    // Offline render mode: write a chord to WAV and exit
    if let Some(i) = args.iter().position(|a| a == "--export-wav") {
        let (Some(name), Some(path)) = (args.get(i + 1), args.get(i + 2)) else {
            eprintln!("usage: chordcrack --export-wav <chord> <path>");
            std::process::exit(2);
        };
        let Some(chord) = Chord::by_name(name) else {
            eprintln!("unknown chord {:?}", name);
            std::process::exit(2);
        };
        match wav::export_chord(chord, HintTier::FullStrum, std::path::Path::new(path)) {
            Ok(()) => println!("wrote {} to {}", chord.name, path),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let no_audio = args.iter().any(|a| a == "--no-audio");

    // Optional session to start straight away
    let startup = if args.iter().any(|a| a == "--daily") {
        Some(Action::Game(GameAction::StartDaily))
    } else if let Some(i) = args.iter().position(|a| a == "--practice") {
        match args.get(i + 1).and_then(|s| ChordCategory::parse(s)) {
            Some(category) => Some(Action::Practice(PracticeAction::Start(category))),
            None => {
                eprintln!("usage: chordcrack --practice <category>");
                std::process::exit(2);
            }
        }
    } else if args.iter().any(|a| a == "--mixed") {
        Some(Action::Practice(PracticeAction::StartMixed))
    } else {
        None
    };

    run(no_audio, startup);
}

/// Apply the audio side effects dispatch collected. Ids that no longer
/// resolve are dropped.
fn apply_effects(effects: &mut Vec<AudioSideEffect>, audio: Option<&AudioHandle>) {
    for effect in effects.drain(..) {
        let Some(audio) = audio else { continue };
        match effect {
            AudioSideEffect::PlayChord { chord, tier } => {
                if let Some(c) = Chord::get(chord) {
                    audio.play_chord(*c, tier);
                }
            }
            AudioSideEffect::PlayCandidates { chords } => {
                let chords: Vec<Chord> = chords
                    .iter()
                    .filter_map(|id| Chord::get(*id).copied())
                    .collect();
                if !chords.is_empty() {
                    audio.play_candidates(chords);
                }
            }
            AudioSideEffect::Stop => audio.stop(),
            AudioSideEffect::SetVolume(v) => audio.set_volume(v),
        }
    }
}

fn prompt() {
    print!("chordcrack> ");
    let _ = std::io::stdout().flush();
}

fn run(no_audio: bool, startup: Option<Action>) {
    let (io_tx, io_rx) = std::sync::mpsc::channel::<IoFeedback>();
    let config = config::Config::load();
    let mut state = AppState::new_with_defaults(&config);
    state.round_log = match RoundLog::open_default() {
        Ok(log) => Some(log),
        Err(e) => {
            log::warn!(target: "io", "round log disabled: {}", e);
            None
        }
    };

    let mut audio = if no_audio { None } else { Some(AudioHandle::new()) };
    if let Some(audio) = &audio {
        audio.set_volume(state.volume);
    }

    let mut effects: Vec<AudioSideEffect> = Vec::new();

    // Pick up the saved profile if one exists
    if dispatch::default_profile_path().exists() {
        let r = dispatch::dispatch_action(
            &Action::Session(SessionAction::Load),
            &mut state,
            &mut effects,
            &io_tx,
        );
        for event in &r.status {
            println!("{}", render::status(event));
        }
    }

    println!(
        "ChordCrack — guess the chord by ear. `help` lists commands."
    );

    // Blocking stdin reads happen on their own thread so the main loop can
    // keep draining audio and I/O feedback.
    let (line_tx, line_rx) = std::sync::mpsc::channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut quit = false;

    if let Some(action) = startup {
        dispatch_and_report(&action, &mut state, &mut effects, &io_tx, audio.as_ref(), &mut quit);
    }
    prompt();

    while !quit {
        match line_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(line) => {
                handle_line(&line, &mut state, &mut effects, &io_tx, audio.as_ref(), &mut quit);
                if !quit {
                    prompt();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => quit = true,
        }

        // Async save/load completions
        while let Ok(feedback) = io_rx.try_recv() {
            let r = dispatch::apply_io_feedback(feedback, &mut state);
            for event in &r.status {
                println!("{}", render::status(event));
            }
        }

        // Audio thread feedback folds back through dispatch
        if let Some(handle) = audio.as_mut() {
            for feedback in handle.drain_feedback() {
                let action = Action::AudioFeedback(feedback);
                dispatch_and_report(&action, &mut state, &mut effects, &io_tx, None, &mut quit);
            }
        }
    }

    // Save on exit, waiting briefly for the write to land
    if state.dirty && state.autosave {
        let r = dispatch::dispatch_action(
            &Action::Session(SessionAction::Save),
            &mut state,
            &mut effects,
            &io_tx,
        );
        for event in &r.status {
            println!("{}", render::status(event));
        }
        while state.io.save_in_progress {
            match io_rx.recv_timeout(Duration::from_secs(5)) {
                Ok(feedback) => {
                    let r = dispatch::apply_io_feedback(feedback, &mut state);
                    for event in &r.status {
                        println!("{}", render::status(event));
                    }
                }
                Err(_) => break,
            }
        }
    }
}

fn handle_line(
    line: &str,
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
    io_tx: &std::sync::mpsc::Sender<IoFeedback>,
    audio: Option<&AudioHandle>,
    quit: &mut bool,
) {
    let Some(command) = repl::parse(line, &state.session) else {
        return;
    };
    match command {
        Command::Act(action) => {
            dispatch_and_report(&action, state, effects, io_tx, audio, quit);
        }
        Command::Show(show) => {
            let text = match show {
                repl::Show::Score => render::score(state),
                repl::Show::Stats => render::stats(state),
                repl::Show::Chords => render::chords(state),
                repl::Show::Choices => render::choices(state),
                repl::Show::Diagram(name) => render::diagram(&name),
            };
            println!("{}", text);
        }
        Command::Help => println!("{}", repl::HELP),
        Command::Unknown(msg) => println!("{}", msg),
    }
}

fn dispatch_and_report(
    action: &Action,
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
    io_tx: &std::sync::mpsc::Sender<IoFeedback>,
    audio: Option<&AudioHandle>,
    quit: &mut bool,
) {
    let result = dispatch::dispatch_action(action, state, effects, io_tx);
    apply_effects(effects, audio);
    for event in &result.status {
        println!("{}", render::status(event));
    }
    if result.profile_dirty && state.autosave {
        let r = dispatch::dispatch_action(
            &Action::Session(SessionAction::Save),
            state,
            effects,
            io_tx,
        );
        for event in &r.status {
            println!("{}", render::status(event));
        }
    }
    if result.quit {
        *quit = true;
    }
}
