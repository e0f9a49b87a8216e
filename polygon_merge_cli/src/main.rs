//! polygon-merge - Merge nearby polygons of a GeoJSON feature into concave hulls
//!
//! Reads a GeoJSON `Feature` with a `MultiPolygon` geometry, groups polygons that lie within the
//! max distance of each other (directly or through a chain of polygons) and writes one concave
//! hull per group, keeping the feature properties.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{LevelFilter, info};
use polygon_merge::{
    CoordinateFrame, MergeConfig, Units,
    geojson::{read_feature, write_feature},
    merge_polygons_by_distance,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

const DEFAULT_MAX_DISTANCE: f64 = 4.0;
const DEFAULT_MAX_EDGE: f64 = 5.0;

#[derive(Parser, Debug)]
#[command(name = "polygon-merge")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input GeoJSON feature with a MultiPolygon geometry
    #[arg(short, long)]
    input: PathBuf,

    /// Path the merged feature is written to
    #[arg(short, long, default_value = "output.geojson")]
    output: PathBuf,

    /// Polygons within this distance of each other are merged [default: 4]
    #[arg(short = 'd', long)]
    max_distance: Option<f64>,

    /// Max concave hull edge length, raised to max distance + 1 when not larger [default: 5]
    #[arg(short = 'e', long)]
    max_edge: Option<f64>,

    /// Unit of distances: degrees, radians, miles or kilometers [default: kilometers]
    #[arg(short, long)]
    units: Option<Units>,

    /// Coordinate frame: planar (coordinates in units) or geographic (longitude, latitude)
    /// [default: planar]
    #[arg(long)]
    frame: Option<CoordinateFrame>,

    /// JSON merge config (maxDistance, units, maxEdge, frame), flags given override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug), RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn flag_config(&self) -> MergeConfig {
        MergeConfig {
            max_distance: self.max_distance,
            units: self.units,
            max_edge: self.max_edge,
            frame: self.frame,
        }
    }
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_config(path: &Path) -> Result<MergeConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let defaults = MergeConfig {
        max_distance: Some(DEFAULT_MAX_DISTANCE),
        units: Some(Units::default()),
        max_edge: Some(DEFAULT_MAX_EDGE),
        frame: Some(CoordinateFrame::default()),
    };
    let file_config = match args.config.as_deref() {
        Some(path) => read_config(path)?,
        None => MergeConfig::default(),
    };
    let options = defaults
        .overlay(file_config)
        .overlay(args.flag_config())
        .into_options()
        .context("Invalid merge options")?;
    info!(
        "max distance {} {}, effective max edge {}, {} frame",
        options.max_distance,
        options.units,
        options.effective_max_edge(),
        options.frame
    );

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input {}", args.input.display()))?;
    let feature = read_feature(&text)
        .with_context(|| format!("Failed to parse input {}", args.input.display()))?;
    let input_count = feature.geometry.len();

    let start = Instant::now();
    let merged = merge_polygons_by_distance(feature, &options).context("Failed to merge polygons")?;
    info!(
        "merged {} polygons into {} in {:.2?}",
        input_count,
        merged.geometry.len(),
        start.elapsed()
    );

    let out = write_feature(&merged).context("Failed to encode output")?;
    fs::write(&args.output, out)
        .with_context(|| format!("Failed to write output {}", args.output.display()))?;
    info!("wrote {}", args.output.display());

    Ok(())
}
