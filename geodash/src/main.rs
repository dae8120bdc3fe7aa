//! geodash: venue map, weather and news around you
//!
//! ```bash
//! geodash --weather-key KEY --news-key KEY --places-client-id ID --places-client-secret SECRET
//! geodash --lat 43.07 --lon -89.38
//! geodash --geoip --log-file geodash.log
//! ```
//!
//! Credentials given here only pre-fill the setup page; nothing is fetched
//! until the page is submitted.

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use geodash::ui::App;
use geodash::{DashboardState, Runtime, Services};
use geodash_core::{
    AnyGeolocator, Coordinate, Credentials, Endpoints, FixedGeolocator, IpGeolocator,
    ReqwestTransport,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(name = "geodash")]
#[command(about = "Terminal dashboard with a venue map, local weather and news")]
struct Args {
    /// Places (venue explore) client id
    #[arg(long, env = "GEODASH_PLACES_CLIENT_ID", default_value = "", hide_env_values = true)]
    places_client_id: String,

    /// Places (venue explore) client secret
    #[arg(long, env = "GEODASH_PLACES_CLIENT_SECRET", default_value = "", hide_env_values = true)]
    places_client_secret: String,

    /// Weather API key
    #[arg(long, env = "GEODASH_WEATHER_KEY", default_value = "", hide_env_values = true)]
    weather_key: String,

    /// News search API key
    #[arg(long, env = "GEODASH_NEWS_KEY", default_value = "", hide_env_values = true)]
    news_key: String,

    /// Fixed latitude (requires --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Fixed longitude (requires --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Look the position up by IP address
    #[arg(long, conflicts_with = "lat")]
    geoip: bool,

    /// Quiet period after the last map move before venues are refreshed
    #[arg(long, default_value_t = 500)]
    debounce_ms: u64,

    #[arg(long)]
    venues_url: Option<String>,

    #[arg(long)]
    weather_url: Option<String>,

    #[arg(long)]
    news_url: Option<String>,

    #[arg(long)]
    geoip_url: Option<String>,

    /// Write logs here (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn credentials(&self) -> Credentials {
        Credentials {
            places_client_id: self.places_client_id.clone(),
            places_client_secret: self.places_client_secret.clone(),
            weather_key: self.weather_key.clone(),
            news_key: self.news_key.clone(),
        }
    }

    fn endpoints(&self) -> Endpoints {
        let defaults = Endpoints::default();
        Endpoints {
            venues: self.venues_url.clone().unwrap_or(defaults.venues),
            weather: self.weather_url.clone().unwrap_or(defaults.weather),
            news: self.news_url.clone().unwrap_or(defaults.news),
            geoip: self.geoip_url.clone().unwrap_or(defaults.geoip),
        }
    }

    fn geolocator(
        &self,
        transport: ReqwestTransport,
        endpoints: Endpoints,
    ) -> AnyGeolocator<ReqwestTransport> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                AnyGeolocator::Fixed(FixedGeolocator::at(Coordinate::new(lat, lon)))
            }
            _ if self.geoip => AnyGeolocator::Ip(IpGeolocator::new(transport, endpoints)),
            _ => AnyGeolocator::Fixed(FixedGeolocator::unsupported()),
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("geodash=debug,geodash_core=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(io::Error::other)?;
    let transport = ReqwestTransport::new(client);
    let endpoints = args.endpoints();
    let geolocator = args.geolocator(transport.clone(), endpoints.clone());
    let services = Services::new(transport, endpoints, geolocator)
        .with_venue_debounce(Duration::from_millis(args.debounce_ms));
    let state = DashboardState::new(args.credentials());

    tracing::info!(geoip = args.geoip, debounce_ms = args.debounce_ms, "starting");

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runtime = Runtime::new(state, services);
    let ui = RefCell::new(App::new());
    let result = runtime
        .run(
            &mut terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
        )
        .await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    result
}
