use clap::Parser;
use station_compass::api::{JsonFormatter, SnapshotFormatter, TextFormatter};
use station_compass::sensors::{ManualHeadingSource, ManualPositionSource};
use station_compass::utils::init_logging;
use station_compass::{CompassConfig, CompassError, CompassSession, SessionBinding};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::info;

#[derive(Parser)]
#[command(name = "station-compass")]
#[command(about = "Distance and bearing to the nearest station")]
struct Args {
    /// Current latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,

    /// Current longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,

    /// Device heading in degrees from North, if the device reports one
    #[arg(long, allow_negative_numbers = true)]
    heading: Option<f64>,

    /// JSON configuration file
    #[arg(short, long, env = "STATION_COMPASS_CONFIG")]
    config: Option<PathBuf>,

    /// Station catalog to use instead of the configured one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Point the compass at this station instead of the nearest one
    #[arg(long)]
    select: Option<String>,

    /// Line of the selected station, when the name is served by several lines
    #[arg(long, requires = "select")]
    line: Option<String>,

    /// List stations whose name contains this text and exit
    #[arg(long)]
    search: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CompassConfig::from_file(path)?,
        None => CompassConfig::default(),
    };
    if let Some(catalog) = &args.catalog {
        config.catalog_path = Some(catalog.clone());
    }
    init_logging(&config.log_filter);

    let catalog = config.load_catalog()?;
    let session = Rc::new(RefCell::new(CompassSession::new(catalog, config)));

    if let Some(term) = &args.search {
        for point in session.borrow().search(term) {
            println!("{} ({})", point.name, point.group);
        }
        return Ok(());
    }

    if let Some(name) = &args.select {
        let point = session
            .borrow()
            .catalog()
            .iter()
            .find(|p| &p.name == name && args.line.as_ref().map_or(true, |l| &p.group == l))
            .cloned()
            .ok_or_else(|| CompassError::UnknownPoint {
                name: name.clone(),
                group: args.line.clone().unwrap_or_default(),
            })?;
        session.borrow_mut().select(&point)?;
    }

    let mut positions = ManualPositionSource::new();
    let mut headings = ManualHeadingSource::new();
    let binding = SessionBinding::attach(&session, &mut positions, Some(&mut headings));

    positions.emit_position(args.lat, args.lon);
    if let Some(heading) = args.heading {
        headings.emit(heading);
    }

    let snapshot = session.borrow().snapshot();
    let output = if args.json {
        JsonFormatter { pretty: true }.format(&snapshot)?
    } else {
        TextFormatter::new().format(&snapshot)?
    };
    println!("{}", output);

    binding.release(&mut positions, Some(&mut headings));
    info!(sequence = snapshot.sequence_number, "done");
    Ok(())
}
