use anyhow::{anyhow, Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{info, warn};

/// Where the ward boundary collection comes from. The server only ever sees
/// this trait, so tests can hand it fixtures without touching the filesystem.
pub trait WardSource {
    fn load(&self) -> Result<FeatureCollection>;
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        FileSource { path }
    }
}

impl WardSource for FileSource {
    fn load(&self) -> Result<FeatureCollection> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open ward GeoJSON: {:?}", self.path))?;
        let reader = BufReader::new(file);
        // Parse the GeoJSON. warning: this loads the whole file into memory.
        let geojson = GeoJson::from_reader(reader).context("Failed to parse ward GeoJSON")?;

        match geojson {
            GeoJson::FeatureCollection(fc) => Ok(fc),
            _ => Err(anyhow!("Ward GeoJSON must be a FeatureCollection")),
        }
    }
}

/// Load the ward collection, degrading to an empty one if the source fails.
/// A missing or broken file means the page renders with no overlay, not a
/// startup failure.
pub fn load_or_empty(source: &dyn WardSource) -> FeatureCollection {
    match source.load() {
        Ok(collection) => {
            let sanitised = sanitize(collection);
            info!("Loaded {} ward features", sanitised.features.len());
            sanitised
        }
        Err(e) => {
            warn!("Ward data unavailable, overlay will be empty: {:#}", e);
            empty_collection()
        }
    }
}

pub fn empty_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: None,
    }
}

/// Keep only features whose geometry converts to a polygon or multipolygon.
/// Points, lines, missing geometry and unconvertible coordinates are dropped
/// with a warning rather than failing the load.
pub fn sanitize(collection: FeatureCollection) -> FeatureCollection {
    let total = collection.features.len();
    let features: Vec<Feature> = collection
        .features
        .into_iter()
        .filter(is_polygon_feature)
        .collect();

    if features.len() < total {
        warn!(
            "Dropped {} non-polygon ward features ({} kept)",
            total - features.len(),
            features.len()
        );
    }

    FeatureCollection {
        bbox: collection.bbox,
        features,
        foreign_members: collection.foreign_members,
    }
}

fn is_polygon_feature(feature: &Feature) -> bool {
    let Some(geometry) = &feature.geometry else {
        return false;
    };
    let converted: Result<geo::Geometry<f64>, _> = geometry.value.clone().try_into();
    matches!(
        converted,
        Ok(geo::Geometry::Polygon(_)) | Ok(geo::Geometry::MultiPolygon(_))
    )
}
