use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::rpc::RpcConfig;
use services::{
    AppServices, ChecklistService, Clock, Coordinates, DailyAuditService, LanguageService,
    RestaurantService, ScheduleService,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidNumber { flag: &'static str, raw: String },
    HalfPosition,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::HalfPosition => write!(f, "--lat and --lon must be given together"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(raw: String, flag: &'static str) -> Result<T, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

struct DesktopApp {
    services: AppServices,
    position: Option<Coordinates>,
}

impl UiApp for DesktopApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn position(&self) -> Option<Coordinates> {
        self.position
    }

    fn checklists(&self) -> Arc<ChecklistService> {
        self.services.checklists()
    }

    fn restaurants(&self) -> Arc<RestaurantService> {
        self.services.restaurants()
    }

    fn schedule(&self) -> Arc<ScheduleService> {
        self.services.schedule()
    }

    fn daily_audits(&self) -> Arc<DailyAuditService> {
        self.services.daily_audits()
    }

    fn language(&self) -> Arc<LanguageService> {
        self.services.language()
    }
}

struct Args {
    db_url: String,
    base_url: Option<String>,
    session_id: Option<String>,
    timeout_secs: Option<u64>,
    position: Option<Coordinates>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--base-url <url>] [--sid <cookie>] [--timeout <secs>] [--db <sqlite_url>]"
    );
    eprintln!("                     [--lat <degrees> --lon <degrees>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --base-url http://localhost:8000");
    eprintln!("  --db sqlite:audit.sqlite3");
    eprintln!("  --timeout 30");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  AUDIT_BASE_URL, AUDIT_SID, AUDIT_RPC_TIMEOUT_SECS, AUDIT_DB_URL,");
    eprintln!("  AUDIT_LATITUDE, AUDIT_LONGITUDE, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("AUDIT_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://audit.sqlite3".into(), normalize_sqlite_url);
        let mut base_url = None;
        let mut session_id = None;
        let mut timeout_secs = None;
        let mut latitude = env_number("AUDIT_LATITUDE");
        let mut longitude = env_number("AUDIT_LONGITUDE");

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--base-url" => base_url = Some(require_value(args, "--base-url")?),
                "--sid" => session_id = Some(require_value(args, "--sid")?),
                "--timeout" => {
                    let value = require_value(args, "--timeout")?;
                    timeout_secs = Some(parse_number(value, "--timeout")?);
                }
                "--lat" => {
                    let value = require_value(args, "--lat")?;
                    latitude = Some(parse_number(value, "--lat")?);
                }
                "--lon" => {
                    let value = require_value(args, "--lon")?;
                    longitude = Some(parse_number(value, "--lon")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let position = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            (None, None) => None,
            _ => return Err(ArgsError::HalfPosition),
        };

        Ok(Self {
            db_url,
            base_url,
            session_id,
            timeout_secs,
            position,
        })
    }

    /// Environment settings with the command line layered on top.
    fn rpc_config(&self) -> Result<RpcConfig, Box<dyn std::error::Error>> {
        let mut config = match self.base_url.as_deref() {
            Some(raw) => {
                let mut config = RpcConfig::parse(raw)?;
                let env = RpcConfig::from_env()?;
                config.session_id = env.session_id;
                config.timeout_secs = env.timeout_secs;
                config
            }
            None => RpcConfig::from_env()?,
        };
        if let Some(sid) = &self.session_id {
            config = config.with_session_id(sid.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout_secs(secs);
        }
        Ok(config)
    }
}

fn env_number(name: &str) -> Option<f64> {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let config = parsed.rpc_config()?;

    prepare_sqlite_file(&parsed.db_url)?;
    info!(
        base_url = %config.base_url,
        db = %parsed.db_url,
        logged_in = config.session_id.is_some(),
        "starting restaurant audit"
    );
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::default_clock(), config).await?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        position: parsed.position,
    });
    let context = build_app_context(&app);

    // Some dev setups open tao windows always-on-top unless told otherwise.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Restaurant Audit")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
