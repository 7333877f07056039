//! Server-side HTML for the seat map and booking form.
//!
//! Plain string building; the views are small enough that a template engine
//! would be more machinery than markup.

use std::collections::HashSet;

use crate::seat_plan::SeatPlan;
use crate::store::Coord;

const SEAT_PLAN_CSS: &str = r#"
table.seat-plan {
  border-collapse: collapse;
}
.seat-plan .seat {
  border: 1px solid black;
  font-size: 2rem;
  width: 3rem;
  height: 3rem;
  display: flex;
  justify-content: center;
  align-items: center;
  text-decoration: none;
}
.seat.available {
  background-color: green;
  color: white;
}
.seat.occupied {
  background-color: red;
  color: white;
}
.d-flex {
  display: flex;
}
.flex-grow {
  flex-grow: 1;
}
"#;

// Applies ServerMessage frames to the DOM and submits forms over the socket.
const CLIENT_SCRIPT: &str = r#"
var ws;
function connect() {
  var scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  ws = new WebSocket(scheme + location.host + '/ws?url=' + encodeURIComponent(location.pathname));
  ws.onmessage = function (event) {
    apply(JSON.parse(event.data));
  };
}
function apply(message) {
  var kind = message[0];
  if (kind === 'batch') {
    message[1].forEach(apply);
  } else if (kind === 'update-attrs') {
    document.querySelectorAll(message[1]).forEach(function (el) {
      Object.keys(message[2]).forEach(function (name) {
        el.setAttribute(name, message[2][name]);
      });
    });
  } else if (kind === 'update-text') {
    document.querySelectorAll(message[1]).forEach(function (el) {
      el.textContent = message[2];
    });
  } else if (kind === 'append') {
    var template = document.createElement('template');
    template.innerHTML = message[2];
    var node = template.content.firstElementChild;
    document.querySelector(message[1]).appendChild(node);
    if (node && node.dataset.href) {
      location.assign(node.dataset.href);
    }
  }
}
function emitForm(event) {
  if (!ws || ws.readyState !== WebSocket.OPEN) {
    return;
  }
  event.preventDefault();
  var form = event.target;
  var body = new URLSearchParams(new FormData(form)).toString();
  ws.send(JSON.stringify(['submit', form.getAttribute('action'), body]));
}
connect();
"#;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full page shell around a body fragment.
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{SEAT_PLAN_CSS}</style>\n</head>\n\
         <body>\n{body}\n<script>{CLIENT_SCRIPT}</script>\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// The seat-map table. Each seat is an anchor tagged with its coordinate so
/// live updates can target it by selector.
pub fn seat_map_table(plan: &SeatPlan, booked: &HashSet<Coord>) -> String {
    let mut html = String::from("<table class=\"seat-plan\">\n<tbody>\n");
    for row in &plan.rows {
        html.push_str("<tr>\n");
        for col in &row.cols {
            let coord = (row.label.clone(), col.clone());
            let status = if booked.contains(&coord) {
                "occupied"
            } else {
                "available"
            };
            let r = escape(&row.label);
            let c = escape(col);
            html.push_str(&format!(
                "<td><a href=\"/seat-plan/{r}/{c}\" data-row=\"{r}\" data-col=\"{c}\" \
                 class=\"seat {status}\">{r}{c}</a></td>\n"
            ));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

/// Booking form for one seat. Submits over the socket when live, falls back to
/// a plain POST otherwise.
pub fn seat_form(row: &str, col: &str, is_booked: bool) -> String {
    let r = escape(row);
    let c = escape(col);
    let status = if is_booked { "occupied" } else { "available" };
    let disabled = if is_booked { " disabled" } else { "" };
    format!(
        "<form method=\"POST\" action=\"/seat-plan/book\" onsubmit=\"emitForm(event)\">\n\
         <h2>Seat {r}{c}</h2>\n\
         <div id=\"book-seat-container\">\n\
         <p>Status: {status}</p>\n\
         <input name=\"row\" value=\"{r}\" hidden>\n\
         <input name=\"col\" value=\"{c}\" hidden>\n\
         <input type=\"submit\" value=\"Book this seat\"{disabled}>\n\
         </div>\n\
         </form>\n"
    )
}

pub fn seat_form_hint() -> String {
    "<p>Hint: click the green seat to make a booking.</p>\n".to_string()
}

/// The seat-map view: table on the left, form (or hint) on the right.
pub fn seat_map_page(title: &str, plan: &SeatPlan, booked: &HashSet<Coord>, form: &str) -> String {
    let table = seat_map_table(plan, booked);
    let body = format!(
        "<div id=\"home\">\n<h2>Seat Plan</h2>\n\
         <div class=\"d-flex\">\n\
         <div class=\"flex-grow\">\n{table}</div>\n\
         <div class=\"flex-grow\">\n{form}</div>\n\
         </div>\n</div>"
    );
    page(title, &body)
}

/// Confirmation fragment returned to a stateless booking caller.
pub fn booking_confirmed(label: &str) -> String {
    format!(
        "<div>\n<p>Booked seat {label}</p>\n<a href=\"/\">Check more seats</a>\n</div>\n",
        label = escape(label),
    )
}

/// Node appended to the originating session's page to send it back to the map.
pub fn redirect_node(href: &str) -> String {
    format!(
        "<div class=\"live-redirect\" data-href=\"{href}\"></div>",
        href = escape(href),
    )
}
