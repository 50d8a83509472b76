use std::io::{self, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, terminal,
};
use rand::thread_rng;

use skydart::audio::Audio;
use skydart::game::Game;
use skydart::phase::Phase;
use skydart::pixel::PixelBuf;
use skydart::render;
use skydart::tuning::Tuning;

const FRAME: Duration = Duration::from_millis(33); // ~30 fps

fn main() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    )?;

    let result = run(&mut out);

    // Always restore the terminal, even when the loop errored.
    execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()?;
    result
}

fn run(out: &mut io::Stdout) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut buf = PixelBuf::new(cols as usize, rows as usize * 2);
    let mut game = Game::new(Tuning::quest());
    let mut rng = thread_rng();
    let mut audio = Audio::open();

    loop {
        let frame_start = Instant::now();

        // Drain pending input; the last flap wins.
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                // Ignore key-release events on terminals that report them.
                Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                        // First gesture doubles as permission to play audio.
                        if let Some(a) = audio.as_mut() {
                            a.start_music();
                        }
                        game.primary_action().map_err(io::Error::other)?;
                    }
                    KeyCode::Char('1') => game.switch_tuning(Tuning::classic()),
                    KeyCode::Char('2') => game.switch_tuning(Tuning::quest()),
                    _ => {}
                },
                Event::Resize(c, r) => {
                    buf.resize(c as usize, r as usize * 2);
                }
                _ => {}
            }
        }

        let coins_before = game.coins;
        let phase_before = game.phase;
        game.update(&mut rng).map_err(io::Error::other)?;

        if let Some(a) = audio.as_ref() {
            if game.coins > coins_before {
                a.catch();
            }
            if phase_before == Phase::Playing {
                match game.phase {
                    Phase::GameOver => a.lose(),
                    Phase::Win => a.win(),
                    _ => {}
                }
            }
        }

        render::draw(&game, &mut buf);
        buf.render(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}
