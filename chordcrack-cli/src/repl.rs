//! Line-to-command parsing for the interactive prompt.

use std::path::PathBuf;

use chordcrack_core::state::SessionKind;
use chordcrack_types::{
    Action, Chord, ChordCategory, GameAction, PracticeAction, SessionAction,
};

/// What a line of input asks for: an action to dispatch, a local render, or
/// the help text.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Act(Action),
    Show(Show),
    Help,
    Unknown(String),
}

/// Read-only displays that never touch dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Show {
    Score,
    Stats,
    Chords,
    Choices,
    Diagram(String),
}

/// Parse one input line. Session-generic commands (`play`, `guess`, `next`,
/// `stop`) route to the game or practice action tree based on what is live.
pub fn parse(line: &str, session: &SessionKind) -> Option<Command> {
    let mut words = line.split_whitespace();
    let cmd = words.next()?;
    let rest: Vec<&str> = words.collect();

    let command = match cmd.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Act(Action::Quit),

        "start" => Command::Act(Action::Game(GameAction::Start)),
        "daily" => Command::Act(Action::Game(GameAction::StartDaily)),
        "mixed" => Command::Act(Action::Practice(PracticeAction::StartMixed)),
        "practice" => match rest.first().and_then(|s| ChordCategory::parse(s)) {
            Some(category) => Command::Act(Action::Practice(PracticeAction::Start(category))),
            None => Command::Unknown(format!(
                "usage: practice <{}>",
                ChordCategory::ALL.map(|c| c.name().to_ascii_lowercase()).join("|")
            )),
        },

        "play" | "replay" => match session {
            SessionKind::Idle => Command::Unknown("no session — try `start`".to_string()),
            SessionKind::Game(_) => Command::Act(Action::Game(GameAction::ReplayAudio)),
            _ => Command::Act(Action::Practice(PracticeAction::ReplayAudio)),
        },
        "guess" | "g" => {
            if rest.is_empty() {
                return Some(Command::Unknown("usage: guess <chord name>".to_string()));
            }
            let name = rest.join(" ");
            let Some(chord) = Chord::by_name(&name) else {
                return Some(Command::Unknown(format!(
                    "unknown chord {:?} — `chords` lists them",
                    name
                )));
            };
            match session {
                SessionKind::Idle => Command::Unknown("no session — try `start`".to_string()),
                SessionKind::Game(_) => Command::Act(Action::Game(GameAction::Guess(chord.id))),
                _ => Command::Act(Action::Practice(PracticeAction::Guess(chord.id))),
            }
        }
        "next" | "n" => match session {
            SessionKind::Idle => Command::Unknown("no session — try `start`".to_string()),
            SessionKind::Game(_) => Command::Act(Action::Game(GameAction::Advance)),
            _ => Command::Act(Action::Practice(PracticeAction::Advance)),
        },
        "stop" | "abandon" => match session {
            SessionKind::Idle => Command::Unknown("no session".to_string()),
            SessionKind::Game(_) => Command::Act(Action::Game(GameAction::Abandon)),
            _ => Command::Act(Action::Practice(PracticeAction::Stop)),
        },

        "score" => Command::Show(Show::Score),
        "stats" => Command::Show(Show::Stats),
        "chords" => Command::Show(Show::Chords),
        "choices" => Command::Show(Show::Choices),
        "diagram" => {
            if rest.is_empty() {
                Command::Unknown("usage: diagram <chord name>".to_string())
            } else {
                Command::Show(Show::Diagram(rest.join(" ")))
            }
        }

        "name" => match rest.first() {
            Some(name) => Command::Act(Action::Session(SessionAction::SetUsername(
                name.to_string(),
            ))),
            None => Command::Unknown("usage: name <username>".to_string()),
        },
        "volume" | "vol" => match rest.first().and_then(|s| s.parse::<f32>().ok()) {
            Some(v) => Command::Act(Action::Session(SessionAction::SetVolume(v))),
            None => Command::Unknown("usage: volume <0.0-1.0>".to_string()),
        },
        "save" => match rest.first() {
            Some(path) => Command::Act(Action::Session(SessionAction::SaveTo(PathBuf::from(
                path,
            )))),
            None => Command::Act(Action::Session(SessionAction::Save)),
        },
        "load" => match rest.first() {
            Some(path) => Command::Act(Action::Session(SessionAction::LoadFrom(PathBuf::from(
                path,
            )))),
            None => Command::Act(Action::Session(SessionAction::Load)),
        },
        "reset" => Command::Act(Action::Session(SessionAction::ResetStats)),

        other => Command::Unknown(format!("unknown command {:?} — `help` lists them", other)),
    };
    Some(command)
}

pub const HELP: &str = "\
Commands:
  start                 new game (5 rounds, categories by level)
  daily                 today's daily challenge
  practice <category>   endless practice in one category
  mixed                 endless practice across unlocked categories
  play                  replay the round's audio at the current hint
  guess <chord>         guess the chord (e.g. `guess Am7`)
  choices               show the candidate list (audio-choice hint)
  next                  advance to the next round
  stop                  end the session
  score                 session score and profile summary
  stats                 per-category accuracy and achievements
  chords                list the chord catalog
  diagram <chord>       fretboard diagram for a chord
  name <username>       set the profile name
  volume <0.0-1.0>      playback volume
  save [path]           save the profile (default path without argument)
  load [path]           load a profile
  reset                 clear per-category statistics
  quit                  exit";

#[cfg(test)]
mod tests {
    use super::*;
    use chordcrack_types::GameState;

    fn game() -> SessionKind {
        SessionKind::Game(GameState::new(5))
    }

    #[test]
    fn guess_resolves_chord_names_case_insensitively() {
        let cmd = parse("guess am7", &game());
        let Some(Command::Act(Action::Game(GameAction::Guess(id)))) = cmd else {
            panic!("unexpected parse: {:?}", cmd);
        };
        assert_eq!(Chord::get(id).map(|c| c.name), Some("Am7"));
    }

    #[test]
    fn session_generic_commands_route_by_session() {
        assert_eq!(
            parse("play", &game()),
            Some(Command::Act(Action::Game(GameAction::ReplayAudio)))
        );
        assert_eq!(
            parse("play", &SessionKind::Practice(chordcrack_types::PracticeState::new(
                ChordCategory::Open
            ))),
            Some(Command::Act(Action::Practice(PracticeAction::ReplayAudio)))
        );
        assert!(matches!(
            parse("play", &SessionKind::Idle),
            Some(Command::Unknown(_))
        ));
    }

    #[test]
    fn empty_line_parses_to_nothing() {
        assert_eq!(parse("   ", &SessionKind::Idle), None);
    }

    #[test]
    fn unknown_chord_is_reported_not_dispatched() {
        let cmd = parse("guess Zmaj13", &game());
        assert!(matches!(cmd, Some(Command::Unknown(_))));
    }
}
