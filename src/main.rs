use clap::Parser;
use std::time::Duration;

use chrono_tz::Tz;
use passwatch::config::PredictorConfig;
use passwatch::pipeline::{Coordinates, Prediction, Predictor};
use passwatch::report::{self, RenderZone};

/// Passwatch — upcoming ISS overhead passes for your location.
///
/// With no arguments, works out where you are from your public IP and
/// prints the next visible passes.
///
/// Examples:
///   passwatch
///   passwatch --lat 51.477 --lon -0.0015
///   passwatch --ip 162.245.144.188 --tz Europe/London
///   passwatch --json
///   passwatch --serve --port 3310
#[derive(Parser)]
#[command(name = "passwatch", version, about, long_about = None)]
struct Cli {
    /// Skip the IP lookup and geolocate this address instead.
    #[arg(long)]
    ip: Option<String>,

    /// Latitude (-90 to 90). With --lon, skips IP lookup and geolocation.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude (-180 to 180). With --lat, skips IP lookup and geolocation.
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// IANA timezone for rendering risetimes (e.g. Europe/Oslo).
    /// Defaults to system local time.
    #[arg(long)]
    tz: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Emit the prediction as pretty JSON instead of lines.
    #[arg(long)]
    json: bool,

    /// Start the HTTP API server instead of printing passes.
    #[arg(long)]
    serve: bool,

    /// Server port (with --serve).
    #[arg(long, default_value_t = 3310)]
    port: u16,
}

fn main() {
    let cli = Cli::parse();

    let mut config = PredictorConfig::load();
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs);
    }

    // ── Server mode ─────────────────────────────────────────────

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start async runtime: {}", e);
            std::process::exit(1);
        });
        runtime.block_on(passwatch::server::start("127.0.0.1", cli.port, config));
        return;
    }

    // ── Validate rendering timezone ─────────────────────────────

    let zone = match &cli.tz {
        Some(tz_str) => {
            let tz: Tz = tz_str.parse().unwrap_or_else(|_| {
                eprintln!(
                    "Error: Unknown timezone '{}'. Use IANA format (e.g. Europe/Oslo).",
                    tz_str
                );
                std::process::exit(1);
            });
            RenderZone::Named(tz)
        }
        None => RenderZone::Local,
    };

    // ── Run the pipeline ────────────────────────────────────────

    let predictor = Predictor::new(config);
    let prediction = run_pipeline(&cli, &predictor);

    eprintln!("  \u{1F4CD} {}", report::location_banner(&prediction));

    // ── Print ───────────────────────────────────────────────────

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&prediction).unwrap());
        return;
    }

    if prediction.passes.is_empty() {
        println!("No upcoming passes reported.");
        return;
    }
    for pass in &prediction.passes {
        println!("{}", report::format_pass(pass, zone));
    }
}

fn run_pipeline(cli: &Cli, predictor: &Predictor) -> Prediction {
    // Priority: --lat/--lon > --ip > full chain

    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            eprintln!("Error: Invalid coordinates. Lat: -90..90, Lon: -180..180");
            std::process::exit(1);
        }
        return predictor
            .predict_for_coords(Coordinates { lat, lon })
            .unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
    }

    if cli.lat.is_some() != cli.lon.is_some() {
        eprintln!("Error: --lat and --lon must be given together.");
        std::process::exit(1);
    }

    if let Some(ref ip) = cli.ip {
        return predictor.predict_for_ip(ip).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    }

    predictor.predict().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}
