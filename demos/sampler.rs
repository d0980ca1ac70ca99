//! Widget sampler
//!
//! Rows of buttons, a slider whose value shows in the label beside it, and a
//! text field, driven from the terminal. Arrow keys move, Enter selects or
//! focuses, Esc finishes and prints the result.
//!
//! Run with: cargo run --example sampler -- --log sampler.log

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use padkit::render::TerminalDevice;
use padkit::style::palette::default_sheet;
use padkit::widgets::{Label, Slider, TextField};
use padkit::{CellValue, Grid, Session, SessionConfig, Widget};

#[derive(Parser)]
#[command(name = "sampler")]
#[command(about = "Try the padkit widgets in a terminal")]
struct Cli {
    /// Session configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file (the screen is taken by the widgets)
    #[arg(long, default_value = "sampler.log")]
    log: PathBuf,

    /// How long a key counts as held when the terminal reports no releases
    #[arg(long, default_value_t = 120)]
    hold_window_ms: u64,
}

fn layout() -> Vec<Vec<Widget>> {
    let reading = Label::new("XX");
    let text = reading.handle();
    vec![
        vec![Widget::button("Az"), Widget::button("By"), Widget::button("Cx")],
        vec![
            Widget::new(Slider::new(0, 91, 1)).on_value(move |value| {
                if let CellValue::Number(n) = value {
                    *text.borrow_mut() = format!("{n:2}");
                }
            }),
            Widget::new(reading),
        ],
        vec![
            Widget::button("Truc").on_change(|| tracing::info!("Truc selected")),
            Widget::button("Machin").on_change(|| tracing::info!("Machin selected")),
        ],
        vec![Widget::new(TextField::new(8))],
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let log_file = std::fs::OpenOptions::new().create(true).append(true).open(&cli.log)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("padkit=debug")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let config = match &cli.config {
        Some(path) => SessionConfig::from_file(path)?,
        None => SessionConfig::default(),
    };
    let mut session = Session::new(Grid::new(layout())?, default_sheet()?, config)?;

    let mut device = TerminalDevice::new().with_hold_window(Duration::from_millis(cli.hold_window_ms));
    device.enter()?;
    if !device.reports_releases() {
        tracing::warn!(window_ms = cli.hold_window_ms, "terminal reports no key releases, using hold window");
    }
    let outcome = session.run(&mut device);
    if let Err(err) = device.leave() {
        tracing::error!(%err, "terminal error during session");
        return Err(err.into());
    }

    println!("{}", outcome?);
    Ok(())
}
