use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyEventKind};

use asciicam::camera::{self, CaptureSession, FrameSource};
use asciicam::config::Config;
use asciicam::session::{DisplaySink, Session, SessionState};
use asciicam::ui::{self, Tui, TuiDisplay, UiAction};

/// How often the UI thread polls for key events between draws.
const UI_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// asciicam: live webcam feed as ASCII art in your terminal
#[derive(Parser)]
#[command(name = "asciicam")]
#[command(version, about = "Live webcam feed as ASCII art in your terminal")]
#[command(long_about = "Captures MJPEG frames from a webcam, decodes each one, \
    and renders it as a fixed-size ASCII character grid at ~30Hz. \
    Press space to start or stop capturing, q to quit.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the viewer (default when no command is given)
    Run {
        /// Custom config file path (default: ~/.config/asciicam/config.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// List available camera devices
    ListCameras,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::ListCameras) => run_list_cameras(),
        Some(Commands::Run { config }) => run_viewer(config),
        None => run_viewer(None),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print enumerated camera devices and exit.
fn run_list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    let devices = camera::list_devices()?;
    if devices.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }
    for device in &devices {
        println!("{}", device);
    }
    Ok(())
}

/// Run the interactive viewer until the user quits.
fn run_viewer(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(config_path.as_deref())?;
    let device = config.camera.device;
    let invert = config.render.invert;

    let display = TuiDisplay::new();
    let mut session = Session::new();
    let mut tui = Tui::new()?;
    let mut error: Option<String> = None;

    loop {
        if event::poll(UI_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // A pending error popup swallows the next key press.
                if error.take().is_some() {
                    continue;
                }

                match ui::handle_key_event(key) {
                    UiAction::Quit => break,
                    UiAction::Toggle => match session.state() {
                        SessionState::Idle => {
                            let sink: Arc<dyn DisplaySink> = display.clone();
                            let start_result = session.start(
                                move || {
                                    CaptureSession::open(device)
                                        .map(|s| Box::new(s) as Box<dyn FrameSource>)
                                },
                                sink,
                                invert,
                            );
                            if let Err(e) = start_result {
                                log::error!("failed to start session: {}", e);
                                error = Some(e.to_string());
                            }
                        }
                        SessionState::Capturing => session.stop(display.as_ref()),
                        // start/stop block until the transition finishes, so
                        // these states are never observed here; ignore.
                        SessionState::Starting | SessionState::Stopping => {}
                    },
                    UiAction::None => {}
                }
            }
        }

        let state = display.view_state();
        tui.terminal()
            .draw(|frame| ui::view::draw(frame, &state, error.as_deref()))?;
    }

    // Window teardown: stop any active session before the terminal is
    // restored.
    session.stop(display.as_ref());
    tui.restore()?;
    Ok(())
}
