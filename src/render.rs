use geojson::FeatureCollection;

use crate::style::StyleRule;
use crate::types::{MapViewState, SafetyRating};

/// One entry in the map's render pipeline. Layers render in declaration
/// order, so the tile layer goes first and the overlay sits on top of it.
pub enum Layer<'a> {
    Tiles { url_template: &'a str },
    WardOverlay {
        collection: &'a FeatureCollection,
        style: StyleRule,
    },
}

/// Render the map panel: the container div plus the Leaflet bootstrap
/// script. The view is applied verbatim; nothing here re-centers or re-zooms
/// before the user interacts.
pub fn render_map(view: &MapViewState, layers: &[Layer]) -> String {
    let mut script = String::new();
    script.push_str(&format!(
        "var map = L.map('map').setView([{}, {}], {});\n",
        view.center.0, view.center.1, view.zoom
    ));

    for layer in layers {
        match layer {
            Layer::Tiles { url_template } => {
                script.push_str(&format!("L.tileLayer('{}').addTo(map);\n", url_template));
            }
            Layer::WardOverlay { collection, style } => {
                script.push_str("var wards = [\n");
                for feature in &collection.features {
                    let geometry = serde_json::to_string(feature).unwrap_or_default();
                    let styling = serde_json::to_string(&style(feature)).unwrap_or_default();
                    script.push_str(&format!(
                        "  [{}, {}],\n",
                        escape_for_script(&geometry),
                        styling
                    ));
                }
                script.push_str("];\n");
                script.push_str(
                    "wards.forEach(function (entry) {\n  \
                     L.geoJSON(entry[0], { style: function () { return entry[1]; } }).addTo(map);\n\
                     });\n",
                );
            }
        }
    }

    format!(
        "<div id=\"map\" class=\"map-panel\"></div>\n<script>\n{}</script>",
        script
    )
}

/// Render the survey form. Submission is a plain form POST; the safety
/// selector is constrained to the five ratings and the first option is the
/// browser default, so an untouched form still submits a valid rating.
/// Required-field semantics are deliberately not enforced.
pub fn render_survey_form(action: &str) -> String {
    let mut options = String::new();
    for rating in SafetyRating::ALL {
        options.push_str(&format!(
            "        <option value=\"{}\">{}</option>\n",
            rating.value(),
            rating.label()
        ));
    }

    format!(
        r#"<form method="post" action="{action}" class="survey-form">
  <div>
    <label for="safety">How safe do you feel in your area?</label>
    <select id="safety" name="safety">
{options}    </select>
  </div>
  <div>
    <label for="concerns">What concerns you most?</label>
    <textarea id="concerns" name="concerns" rows="3"></textarea>
  </div>
  <button type="submit">Submit</button>
</form>"#
    )
}

/// Compose the full page: survey panel on the left, ward map on the right.
/// The two panels share nothing; submitting the form never touches the map.
pub fn render_page(
    view: &MapViewState,
    tile_url: &str,
    collection: &FeatureCollection,
    style: StyleRule,
) -> String {
    let layers = [
        Layer::Tiles {
            url_template: tile_url,
        },
        Layer::WardOverlay { collection, style },
    ];
    let map = render_map(view, &layers);
    let form = render_survey_form("/api/survey");

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Community Safety Feedback</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>
    body {{ margin: 0; font-family: sans-serif; display: flex; flex-direction: column; min-height: 100vh; }}
    header {{ background: #1e40af; color: #fff; padding: 1rem; font-size: 1.25rem; }}
    main {{ flex: 1; display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; padding: 1.5rem; }}
    .map-panel {{ height: 24rem; width: 100%; }}
    .survey-form div {{ margin-bottom: 1rem; }}
    .survey-form label {{ display: block; font-weight: 600; }}
    .survey-form select, .survey-form textarea {{ width: 100%; margin-top: 0.25rem; }}
    footer {{ background: #e5e7eb; text-align: center; padding: 0.5rem; }}
  </style>
</head>
<body>
  <header>Community Safety Feedback</header>
  <main>
    <section>
      <h2>Your Feedback</h2>
      {form}
    </section>
    <section>
      <h2>Burglaries in Your Ward</h2>
      {map}
    </section>
  </main>
  <footer>&copy; Met Police Data Demo</footer>
</body>
</html>"#
    )
}

/// Thanks page returned after a submission.
pub fn render_thanks() -> String {
    r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8" /><title>Thanks</title></head>
<body>
  <p>Thanks for your feedback.</p>
  <p><a href="/">Back to the feedback page</a></p>
</body>
</html>"#
        .to_string()
}

// Inline JSON inside a <script> block must not contain a closing tag from
// feature properties.
fn escape_for_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::empty_collection;
    use crate::style::ward_style;
    use geojson::GeoJson;

    fn two_ward_collection() -> FeatureCollection {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[-0.1, 51.5], [-0.2, 51.5], [-0.2, 51.6], [-0.1, 51.5]]]
                    },
                    "properties": {"ward": "E05000001", "burglaries": 12}
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[-0.3, 51.4], [-0.4, 51.4], [-0.4, 51.5], [-0.3, 51.4]]]
                    },
                    "properties": {"ward": "E05000002", "burglaries": 3}
                }
            ]
        }"#;
        match raw.parse::<GeoJson>().unwrap() {
            GeoJson::FeatureCollection(fc) => fc,
            _ => panic!("fixture must be a FeatureCollection"),
        }
    }

    fn view() -> MapViewState {
        MapViewState {
            center: (51.5074, -0.1278),
            zoom: 10,
        }
    }

    #[test]
    fn map_uses_exact_initial_view() {
        let html = render_map(&view(), &[]);
        assert!(html.contains("setView([51.5074, -0.1278], 10)"));
    }

    #[test]
    fn tile_layer_renders_before_overlay() {
        let collection = two_ward_collection();
        let layers = [
            Layer::Tiles {
                url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            },
            Layer::WardOverlay {
                collection: &collection,
                style: ward_style,
            },
        ];
        let html = render_map(&view(), &layers);
        let tiles_at = html.find("L.tileLayer").unwrap();
        let overlay_at = html.find("var wards").unwrap();
        assert!(tiles_at < overlay_at);
        assert!(html.contains("{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"));
    }

    #[test]
    fn overlay_renders_one_styled_shape_per_feature() {
        let collection = two_ward_collection();
        let layers = [Layer::WardOverlay {
            collection: &collection,
            style: ward_style,
        }];
        let html = render_map(&view(), &layers);
        assert_eq!(html.matches("\"fillColor\":\"#f03\"").count(), 2);
        assert_eq!(html.matches("E05000001").count(), 1);
        assert_eq!(html.matches("E05000002").count(), 1);
    }

    #[test]
    fn empty_collection_renders_no_shapes() {
        let collection = empty_collection();
        let layers = [Layer::WardOverlay {
            collection: &collection,
            style: ward_style,
        }];
        let html = render_map(&view(), &layers);
        assert!(html.contains("var wards = [\n];"));
        assert!(!html.contains("fillColor"));
    }

    #[test]
    fn markup_in_feature_properties_cannot_close_the_script() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                    },
                    "properties": {"name": "</script><b>bad</b>"}
                }
            ]
        }"#;
        let collection = match raw.parse::<GeoJson>().unwrap() {
            GeoJson::FeatureCollection(fc) => fc,
            _ => unreachable!(),
        };
        let layers = [Layer::WardOverlay {
            collection: &collection,
            style: ward_style,
        }];
        let html = render_map(&view(), &layers);
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("<\\/script>"));
    }

    #[test]
    fn form_lists_all_five_ratings_in_order() {
        let html = render_survey_form("/api/survey");
        let expected = [
            "very_safe",
            "safe",
            "neutral",
            "unsafe",
            "very_unsafe",
        ];
        let mut last = 0;
        for value in expected {
            let needle = format!("value=\"{}\"", value);
            let at = html.find(&needle).unwrap();
            assert!(at >= last, "options out of order at {}", value);
            last = at;
        }
        assert!(html.contains("name=\"concerns\""));
        assert!(html.contains("action=\"/api/survey\""));
    }

    #[test]
    fn page_composes_both_panels() {
        let collection = two_ward_collection();
        let html = render_page(
            &view(),
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            &collection,
            ward_style,
        );
        assert!(html.contains("Your Feedback"));
        assert!(html.contains("Burglaries in Your Ward"));
        assert!(html.contains("id=\"map\""));
        assert!(html.contains("name=\"safety\""));
    }
}
