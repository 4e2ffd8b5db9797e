//! Base map layers offered by the layer switcher

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One tile source inside a layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSource {
    /// `{s}`/`{z}`/`{x}`/`{y}` URL template
    pub url_template: &'static str,
    /// Values substituted for `{s}`
    pub subdomains: &'static [&'static str],
    /// Attribution text shown in the map corner
    pub attribution: &'static str,
    /// Opacity in [0, 1]
    pub opacity: f64,
}

/// Selectable base map layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapLayer {
    /// OpenStreetMap street tiles
    Street,
    /// Satellite imagery
    Satellite,
    /// Satellite imagery with street labels on top
    #[default]
    Hybrid,
    /// OpenTopoMap terrain tiles
    Terrain,
}

const OSM_STREET: TileSource = TileSource {
    url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
    subdomains: &["a", "b", "c"],
    attribution: "&copy; OpenStreetMap contributors",
    opacity: 1.0,
};

const SATELLITE: TileSource = TileSource {
    url_template: "https://{s}.google.com/vt/lyrs=s&x={x}&y={y}&z={z}",
    subdomains: &["mt0", "mt1", "mt2", "mt3"],
    attribution: "&copy; Google Maps contributors",
    opacity: 1.0,
};

const LABEL_OVERLAY: TileSource = TileSource {
    opacity: 0.6,
    ..OSM_STREET
};

const TERRAIN: TileSource = TileSource {
    url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
    subdomains: &["a", "b", "c"],
    attribution: "&copy; OpenTopo contributors",
    opacity: 1.0,
};

impl MapLayer {
    /// All layers in switcher order
    pub const ALL: [Self; 4] = [Self::Street, Self::Satellite, Self::Hybrid, Self::Terrain];

    /// Label shown in the layer switcher
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Street => "Street View",
            Self::Satellite => "Satellite View",
            Self::Hybrid => "Hybrid View (Satellite + Labels)",
            Self::Terrain => "Terrain View",
        }
    }

    /// Tile sources stacked bottom to top
    #[must_use]
    pub fn sources(&self) -> Vec<TileSource> {
        match self {
            Self::Street => vec![OSM_STREET],
            Self::Satellite => vec![SATELLITE],
            Self::Hybrid => vec![SATELLITE, LABEL_OVERLAY],
            Self::Terrain => vec![TERRAIN],
        }
    }

    /// Identifier used in configuration and JSON
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::Satellite => "satellite",
            Self::Hybrid => "hybrid",
            Self::Terrain => "terrain",
        }
    }
}

impl fmt::Display for MapLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for MapLayer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "street" => Ok(Self::Street),
            "satellite" => Ok(Self::Satellite),
            "hybrid" => Ok(Self::Hybrid),
            "terrain" => Ok(Self::Terrain),
            _ => Err(format!(
                "Invalid map layer: {s}. Use 'street', 'satellite', 'hybrid' or 'terrain'"
            )),
        }
    }
}
