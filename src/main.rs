mod catalog;
mod config;
mod observer;
mod orbital;
mod pointing;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};

use catalog::SatelliteCatalog;
use config::Config;
use pointing::{azimuth_to_cardinal, compute, compute_from_input, PointingResult};

const INVALID_INPUT: &str = "Please enter valid coordinates and select a satellite";

#[derive(Parser, Debug)]
#[command(version, about = "Geostationary antenna pointing calculator")]
struct Opts {
    /// Configuration toml file.
    ///
    /// Defaults to dishaim/config.toml in the user config directory, if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Satellite name, as shown by --list. Prints one result and exits.
    #[arg(short, long)]
    satellite: Option<String>,

    /// Station latitude in degrees (north positive)
    #[arg(long, allow_hyphen_values = true, requires = "satellite")]
    lat: Option<String>,

    /// Station longitude in degrees (east positive)
    #[arg(long, allow_hyphen_values = true, requires = "satellite")]
    lon: Option<String>,

    /// List the satellite catalog and exit
    #[arg(long, conflicts_with = "satellite")]
    list: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputField {
    Latitude,
    Longitude,
}

impl InputField {
    pub fn label(&self) -> &'static str {
        match self {
            InputField::Latitude => "Station Latitude",
            InputField::Longitude => "Station Longitude",
        }
    }

    fn next(&self) -> Self {
        match self {
            InputField::Latitude => InputField::Longitude,
            InputField::Longitude => InputField::Latitude,
        }
    }
}

struct AppState {
    catalog: SatelliteCatalog,
    config: Config,
    station_name: String,
    selected_satellite: usize,
    latitude_input: String,
    longitude_input: String,
    focused_field: InputField,
    result: Option<PointingResult>,
}

impl AppState {
    fn new(config: Config) -> Self {
        let catalog = config.catalog();
        let mut app_state = AppState {
            catalog,
            station_name: config.station.name.clone(),
            selected_satellite: 0,
            latitude_input: format!("{:.2}", config.station.latitude),
            longitude_input: format!("{:.2}", config.station.longitude),
            focused_field: InputField::Latitude,
            result: None,
            config,
        };
        app_state.recompute();
        app_state
    }

    fn selected_name(&self) -> Option<&str> {
        self.catalog
            .entries()
            .get(self.selected_satellite)
            .map(|entry| entry.name.as_str())
    }

    fn recompute(&mut self) {
        self.result = compute_from_input(
            &self.catalog,
            self.selected_name(),
            &self.latitude_input,
            &self.longitude_input,
        );
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focused_field {
            InputField::Latitude => &mut self.latitude_input,
            InputField::Longitude => &mut self.longitude_input,
        }
    }

    /// Apply a key press. Returns false when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_satellite = self.selected_satellite.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_satellite + 1 < self.catalog.len() {
                    self.selected_satellite += 1;
                }
            }
            KeyCode::Home => {
                self.selected_satellite = 0;
            }
            KeyCode::End => {
                if !self.catalog.is_empty() {
                    self.selected_satellite = self.catalog.len() - 1;
                }
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused_field = self.focused_field.next();
            }
            KeyCode::Backspace => {
                self.focused_input().pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                self.focused_input().push(c);
            }
            _ => return true,
        }

        self.recompute();
        true
    }
}

fn main() -> Result<ExitCode> {
    let opts = Opts::parse();

    let level = match opts.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load_or_default(opts.config.as_deref())?;

    if opts.list {
        for line in catalog_listing(&config.catalog()) {
            println!("{}", line);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if opts.satellite.is_some() {
        return match run_once(&opts, &config) {
            Some(result) => {
                print_result(&result);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("{}", INVALID_INPUT);
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let mut app_state = AppState::new(config);
    debug!("Starting TUI with {} satellites", app_state.catalog.len());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run TUI
    let res = run_app(&mut terminal, &mut app_state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")?;
    Ok(ExitCode::SUCCESS)
}

/// One-shot computation for `--satellite`. Coordinates not given on the
/// command line come from the configured station.
fn run_once(opts: &Opts, config: &Config) -> Option<PointingResult> {
    let catalog = config.catalog();
    let satellite = opts.satellite.as_deref();
    match (opts.lat.as_deref(), opts.lon.as_deref()) {
        (None, None) => compute(
            &catalog,
            satellite,
            config.station.latitude,
            config.station.longitude,
        ),
        (lat, lon) => {
            let lat = lat.map_or_else(|| config.station.latitude.to_string(), str::to_string);
            let lon = lon.map_or_else(|| config.station.longitude.to_string(), str::to_string);
            compute_from_input(&catalog, satellite, &lat, &lon)
        }
    }
}

fn catalog_listing(catalog: &SatelliteCatalog) -> Vec<String> {
    catalog
        .entries()
        .iter()
        .map(|entry| format!("{:<36} {}", entry.name, entry.descriptor))
        .collect()
}

fn print_result(result: &PointingResult) {
    println!("Satellite:          {}", result.satellite);
    println!("Orbital Longitude:  {}", result.orbital_longitude);
    println!("Elevation Angle:    {}", result.elevation);
    println!(
        "Azimuth Angle:      {} ({})",
        result.azimuth,
        azimuth_to_cardinal(result.azimuth_value)
    );
    println!("Polarization Angle: {}", result.polarization);
    println!("Slant Range:        {:.0} km", result.slant_range_km);
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app_state: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::draw_ui(f, app_state);
        })?;

        if event::poll(app_state.config.display.poll_interval())? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app_state.handle_key(key.code) {
                    return Ok(());
                }
            }
        }
    }
}
