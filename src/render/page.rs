use std::fmt::Write;

use chrono::NaiveDate;

use crate::{
    data_types::day::{ChallengeStatus, DayView},
    error::AppResult,
    logln,
    util::DateTimeUtils,
    App,
};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

pub struct RenderedPage {
    pub status: u16,
    pub html: String,
}

pub struct PageRenderer;

impl PageRenderer {
    const CC: &str = "PageRenderer";

    /// Full HTML page for `requested` (day-first date) or today.
    ///
    /// Failures become an error block in the page with a matching status.
    pub fn render(app: &App, requested: Option<&str>) -> RenderedPage {
        let selected = match requested {
            Some(value) if !value.trim().is_empty() => DateTimeUtils::parse_date(value),
            _ => Ok(app.today()),
        };

        let mut body = String::new();
        let status = match PageRenderer::body(app, selected, &mut body) {
            Ok(()) => 200,
            Err(err) => {
                logln!("Rendering failed: {}", err);
                let _ = write!(
                    body,
                    "<div class=\"error\">{}</div>",
                    escape_html(&err.to_string())
                );
                err.http_status()
            }
        };

        RenderedPage {
            status,
            html: PageRenderer::layout(app, &body),
        }
    }

    fn body(app: &App, selected: AppResult<NaiveDate>, out: &mut String) -> AppResult<()> {
        let challenge = &app.settings().challenge;

        // Intro failures are logged, never fatal
        let intro = app.settings().intro_text().unwrap_or_else(|err| {
            logln!("Intro text unavailable: {}", err);
            String::new()
        });
        for paragraph in intro.split("\n\n").filter(|p| !p.trim().is_empty()) {
            let _ = write!(out, "<p>{}</p>", escape_html(paragraph.trim()));
        }

        if !challenge.info_url.is_empty() {
            let _ = write!(
                out,
                "<p><a href=\"{}\">{}</a></p>",
                escape_html(&challenge.info_url),
                escape_html(&challenge.info_link_text)
            );
        }

        let selected = selected?;
        PageRenderer::date_selector(app, &app.available_dates()?, selected, out);

        let view = app.day_view(selected)?;
        PageRenderer::day(app, &view, out)
    }

    fn date_selector(app: &App, dates: &[NaiveDate], selected: NaiveDate, out: &mut String) {
        let _ = write!(
            out,
            "<form method=\"get\" action=\"/\"><label>{} \
             <select name=\"date\" onchange=\"this.form.submit()\">",
            escape_html(&app.settings().challenge.date_prompt)
        );

        for date in dates.iter().rev() {
            let label = DateTimeUtils::format_date(*date);
            let _ = write!(
                out,
                "<option value=\"{0}\"{1}>{0}</option>",
                label,
                if *date == selected { " selected" } else { "" }
            );
        }

        out.push_str("</select></label></form>");
    }

    fn day(app: &App, view: &DayView, out: &mut String) -> AppResult<()> {
        let challenge = &app.settings().challenge;

        let summary = challenge
            .summary
            .replace("{date}", &DateTimeUtils::format_date(view.date))
            .replace("{overall}", &view.overall_m.to_string())
            .replace("{segment}", &(view.segment_index + 1).to_string())
            .replace("{count}", &view.segment_count.to_string());
        let _ = write!(out, "<p class=\"summary\">{}</p>", escape_html(&summary));

        if view.status == ChallengeStatus::Finished {
            let _ = write!(
                out,
                "<p class=\"finished\">{}</p>",
                escape_html(&challenge.finished_text)
            );
        }

        if !view.description.is_empty() {
            let _ = write!(out, "<p>{}</p>", escape_html(&view.description));
        }

        // `</` must not close the script element early
        let map_json = serde_json::to_string(&*view.map)?.replace("</", "<\\/");

        let _ = write!(
            out,
            "<div id=\"map\"></div><script>const view = {};\n{}</script>",
            map_json, MAP_SCRIPT
        );

        Ok(())
    }

    fn layout(app: &App, body: &str) -> String {
        let challenge = &app.settings().challenge;

        let title = if challenge.club_url.is_empty() {
            escape_html(&challenge.title)
        } else {
            format!(
                "<a href=\"{}\">{}</a>",
                escape_html(&challenge.club_url),
                escape_html(&challenge.title)
            )
        };

        format!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\
             <title>{plain_title}</title>\
             <link rel=\"stylesheet\" href=\"{css}\">\
             <script src=\"{js}\"></script>\
             <style>#map {{ width: 600px; height: 450px; }} .error {{ color: #b00; }}</style>\
             </head><body><h1>{title}</h1>{body}</body></html>",
            plain_title = escape_html(&challenge.title),
            css = LEAFLET_CSS,
            js = LEAFLET_JS,
            title = title,
            body = body
        )
    }
}

const MAP_SCRIPT: &str = r#"
const map = L.map('map', { attributionControl: false }).setView(view.center, view.zoom);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png').addTo(map);
const text = (s) => { const e = document.createElement('span'); e.textContent = s; return e; };
for (const marker of view.markers) {
  L.circleMarker(marker.coord, { radius: 7, fill: true, color: 'red' })
    .bindPopup(text(marker.caption)).addTo(map);
}
const line = (l) => L.polyline(l.points, {
  color: l.style.color, weight: l.style.weight, opacity: l.style.opacity,
  dashArray: l.style.dash_array
}).bindTooltip(text(l.tooltip)).addTo(map);
line(view.travelled);
line(view.route);
const icon = L.icon({ iconUrl: '/static/swimmer_' + view.position.icon + '.svg', iconSize: [50, 50] });
L.marker(view.position.coord, { icon }).bindPopup(text(view.position.popup), { maxWidth: 100 }).addTo(map);
"#;

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
