//! View model and server-side HTML for the query page.
//!
//! A successful [`PlaceCard`] is first reduced to a [`PlaceView`] (facts
//! rows, nearby line, map points) and then rendered. Every dynamic string
//! goes through [`escape_html`].

use std::fmt::{Display, Write as _};

use serde::Serialize;
use serde_json::Number;

use crate::frontend::Outcome;
use crate::place::{PlaceCard, Presence, SourceData};

/// Shown in place of a missing, empty or zero fact.
pub const PLACEHOLDER: &str = "—";

/// Name of the first map point when the backend sends no `display_name`.
pub const MAIN_LOCATION: &str = "Main Location";

/// Initial map zoom level.
pub const MAP_ZOOM: u8 = 6;

/// One row of the "Key facts" table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRow {
    pub field: &'static str,
    pub value: String,
}

/// A location plotted on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub name: String,
    pub lat: Number,
    pub lon: Number,
}

/// Everything the results section shows for one answered query.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceView {
    pub answer: String,
    pub facts: Vec<FactRow>,
    /// Comma-joined nearby city names; `None` omits the section.
    pub nearby: Option<String>,
    /// Plotted points, main location first; `None` omits the map and its table.
    pub map: Option<Vec<MapPoint>>,
}

impl PlaceView {
    /// Build the view for a decoded place card.
    #[must_use]
    pub fn from_card(card: PlaceCard) -> Self {
        let source = &card.source_data;
        Self {
            facts: facts_table(source),
            nearby: nearby_line(source),
            map: map_points(source),
            answer: card.answer,
        }
    }
}

fn fact_value<T: Presence + Display>(value: Option<&T>) -> String {
    match value {
        Some(v) if v.is_present() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Key facts in fixed order: Latitude, Longitude, Population, Region, Timezone.
#[must_use]
pub fn facts_table(source: &SourceData) -> Vec<FactRow> {
    vec![
        FactRow {
            field: "Latitude",
            value: fact_value(source.lat.as_ref()),
        },
        FactRow {
            field: "Longitude",
            value: fact_value(source.lon.as_ref()),
        },
        FactRow {
            field: "Population",
            value: fact_value(source.population.as_ref()),
        },
        FactRow {
            field: "Region",
            value: fact_value(source.region.as_ref()),
        },
        FactRow {
            field: "Timezone",
            value: fact_value(source.timezone.as_ref()),
        },
    ]
}

/// Nearby city names joined with `", "`, or `None` when there are none.
#[must_use]
pub fn nearby_line(source: &SourceData) -> Option<String> {
    (!source.nearby.is_empty()).then(|| source.nearby.join(", "))
}

/// Map points for the main location followed by every plottable nearby city.
///
/// Returns `None` unless the main location has both coordinates.
#[must_use]
pub fn map_points(source: &SourceData) -> Option<Vec<MapPoint>> {
    let (Some(lat), Some(lon)) = (&source.lat, &source.lon) else {
        return None;
    };
    if !(lat.is_present() && lon.is_present()) {
        return None;
    }

    let main = MapPoint {
        name: source
            .display_name
            .as_ref()
            .map_or_else(|| MAIN_LOCATION.to_string(), ToString::to_string),
        lat: lat.clone(),
        lon: lon.clone(),
    };

    let nearby = source
        .nearby_data
        .iter()
        .filter_map(|city| match (&city.lat, &city.lon) {
            (Some(lat), Some(lon)) if lat.is_present() && lon.is_present() => Some(MapPoint {
                name: city.name.clone(),
                lat: lat.clone(),
                lon: lon.clone(),
            }),
            _ => None,
        });

    Some(std::iter::once(main).chain(nearby).collect())
}

/// Escape text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML
// ─────────────────────────────────────────────────────────────────────────────

/// Full page with the query input pre-filled with `query` and the results
/// section rendered from `outcome`.
#[must_use]
pub fn page(query: &str, outcome: &Outcome) -> String {
    html_shell(&query_panel(query, &results(outcome)))
}

/// The `#results` fragment swapped in by HTMX.
#[must_use]
pub fn results(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Idle => String::new(),
        Outcome::Failed(message) => format!(
            r#"<div class="alert alert-error" role="alert">❌ {}</div>"#,
            escape_html(message)
        ),
        Outcome::Answered(view) => answered(view),
    }
}

fn answered(view: &PlaceView) -> String {
    let mut html = String::new();
    html.push_str(r#"<div class="alert alert-success" role="status">Here you go!</div>"#);
    let _ = write!(
        html,
        r#"<div class="answer"><span class="answer-avatar">🧑‍🎤</span> {}</div>"#,
        escape_html(&view.answer)
    );

    html.push_str(r#"<h3>Key facts</h3><table class="facts"><thead><tr><th>Field</th><th>Value</th></tr></thead><tbody>"#);
    for row in &view.facts {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            row.field,
            escape_html(&row.value)
        );
    }
    html.push_str("</tbody></table>");

    if let Some(nearby) = &view.nearby {
        let _ = write!(
            html,
            r#"<h3>Nearby cities (≈100 km)</h3><p class="nearby">{}</p>"#,
            escape_html(nearby)
        );
    }

    if let Some(points) = &view.map {
        html.push_str(&map_section(points));
    }
    html
}

fn map_section(points: &[MapPoint]) -> String {
    let data = serde_json::to_string(points).unwrap_or_else(|_| "[]".to_string());
    let mut html = format!(
        r#"<h3>Map</h3><div id="place-map" class="place-map" data-zoom="{MAP_ZOOM}" data-points="{}"></div>"#,
        escape_html(&data)
    );

    html.push_str(r#"<h3>Nearby Locations Table</h3><div class="locations-scroll"><table class="locations"><thead><tr><th>name</th><th>lat</th><th>lon</th></tr></thead><tbody>"#);
    for point in points {
        let _ = write!(
            html,
            r#"<tr><th scope="row">{}</th><td>{}</td><td>{}</td></tr>"#,
            escape_html(&point.name),
            point.lat,
            point.lon
        );
    }
    html.push_str("</tbody></table></div>");
    html
}

fn query_panel(query: &str, results: &str) -> String {
    format!(
        r##"
    <h2 class="page-heading">Ask about any city or country ✈️</h2>
    <div class="columns">
        <section class="column-main">
            <form method="post" action="/ask" hx-post="/ask" hx-target="#results" hx-swap="innerHTML"
                  hx-indicator="#thinking" class="query-form">
                <label for="q">Where to?</label>
                <input id="q" name="q" type="text" value="{}" placeholder="e.g. Best time to visit Kyoto" autocomplete="off">
                <button type="submit">Tell me about it</button>
            </form>
            <p id="thinking" class="htmx-indicator">GeoGuide is thinking…</p>
            <div id="results">{results}</div>
        </section>
        <aside class="column-side">
            <figure>
                <img src="/static/img.jpg" alt="Travel Vibe">
                <figcaption>Travel Vibe</figcaption>
            </figure>
        </aside>
    </div>
    "##,
        escape_html(query)
    )
}

/// Generate the HTML shell for the application.
fn html_shell(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Chat with an AI tour guide about any place on Earth.">
    <title>GeoChatBot</title>
    <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🌍</text></svg>">

    <!-- Local assets only -->
    <script src="/static/vendor/htmx-2.0.8.min.js"></script>
    <link rel="stylesheet" href="/static/vendor/leaflet.css">
    <script src="/static/vendor/leaflet.js"></script>
    <script defer src="/static/map.js"></script>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body>
    <div id="app-shell">
        <aside class="sidebar">
            <h1>🌍 GeoChatBot</h1>
            <p>Chat with an AI tour guide about any place on Earth.</p>
            <hr>
        </aside>
        <main id="app">
            {content}
        </main>
    </div>
    <footer>
        <hr>
        <p class="caption">©️ 2025 GeoChatBot 🛠️</p>
    </footer>
</body>
</html>"#
    )
}
