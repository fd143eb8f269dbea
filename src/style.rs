use geojson::Feature;
use serde::Serialize;

/// Visual attributes for one overlay shape. Field names serialise to the
/// option names Leaflet's path styling expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerStyle {
    #[serde(rename = "fillColor")]
    pub fill_color: String,
    pub weight: u32,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
}

/// Pure feature-to-style strategy. Injected into the overlay layer so it can
/// be swapped (e.g. for a choropleth) and unit tested without a map.
pub type StyleRule = fn(&Feature) -> LayerStyle;

/// Current ward styling: every ward gets the same red fill regardless of its
/// attributes. Attribute-independent on purpose.
pub fn ward_style(_feature: &Feature) -> LayerStyle {
    LayerStyle {
        fill_color: "#f03".to_string(),
        weight: 1,
        fill_opacity: 0.6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::JsonObject;

    fn feature_with_property(key: &str, value: i64) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert(key.to_string(), value.into());
        Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    #[test]
    fn style_is_deterministic_for_the_same_feature() {
        let feature = feature_with_property("burglaries", 42);
        assert_eq!(ward_style(&feature), ward_style(&feature));
    }

    #[test]
    fn style_ignores_feature_attributes() {
        let low = feature_with_property("burglaries", 1);
        let high = feature_with_property("burglaries", 9000);
        assert_eq!(ward_style(&low), ward_style(&high));
    }

    #[test]
    fn style_serialises_with_leaflet_option_names() {
        let feature = feature_with_property("ward", 1);
        let json = serde_json::to_value(ward_style(&feature)).unwrap();
        assert_eq!(json["fillColor"], "#f03");
        assert_eq!(json["weight"], 1);
        assert_eq!(json["fillOpacity"], 0.6);
    }
}
