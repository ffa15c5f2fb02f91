// In crates/web-server/src/page.rs

use std::fmt::Write;

use strategies::Assessment;

use crate::types::Market;

/// The values currently shown in the two input fields.
#[derive(Debug, Clone, Copy)]
pub struct Inputs<'a> {
    pub forex_pair: &'a str,
    pub coin_id: &'a str,
}

/// An analysis to display under the section that requested it.
#[derive(Debug, Clone, Copy)]
pub struct Outcome<'a> {
    pub market: Market,
    pub assessment: &'a Assessment,
}

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:36rem;margin:0 auto;padding:1rem;}\
h1{text-align:center;}\
form{display:flex;flex-direction:column;gap:.5rem;}\
input{padding:.5rem;font-size:1rem;}\
button{padding:.6rem;font-size:1rem;}\
.success{background:#e6f4ea;color:#1e4620;padding:.75rem;margin-top:.75rem;border-radius:.4rem;}\
.info{background:#e8f0fe;color:#174ea6;padding:.75rem;margin-top:.5rem;border-radius:.4rem;}\
.caption{color:#666;font-size:.85rem;}";

/// Renders the whole page.
pub fn render(inputs: Inputs<'_>, outcome: Option<Outcome<'_>>) -> String {
    let result_for = |market: Market| {
        outcome
            .filter(|o| o.market == market)
            .map(|o| render_result(o.assessment))
            .unwrap_or_default()
    };

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Forex &amp; Crypto Signals</title>\n");
    let _ = writeln!(html, "<style>{STYLE}</style>\n</head>\n<body>");
    html.push_str("<h1>📈 Forex &amp; Crypto Signals</h1>\n");
    html.push_str(
        "<p>Get simple <strong>BUY</strong>, <strong>SELL</strong>, or <strong>HOLD</strong> \
         signals for Forex &amp; Crypto. Optimized for mobile.</p>\n",
    );

    let _ = writeln!(
        html,
        "<section>\n<h2>💱 Forex Analysis</h2>\n\
         <form action=\"/analyze/forex\" method=\"get\">\n\
         <label for=\"pair\">Enter Forex Pair (e.g. EUR/USD)</label>\n\
         <input id=\"pair\" name=\"pair\" value=\"{}\">\n\
         <button type=\"submit\">Analyze Forex</button>\n</form>\n{}</section>",
        escape_html(inputs.forex_pair),
        result_for(Market::Forex),
    );

    let _ = writeln!(
        html,
        "<section>\n<h2>💹 Crypto Analysis</h2>\n\
         <form action=\"/analyze/crypto\" method=\"get\">\n\
         <label for=\"coin\">Enter CoinGecko coin id (e.g. bitcoin, ethereum)</label>\n\
         <input id=\"coin\" name=\"coin\" value=\"{}\">\n\
         <button type=\"submit\">Analyze Crypto</button>\n</form>\n{}</section>",
        escape_html(inputs.coin_id),
        result_for(Market::Crypto),
    );

    html.push_str("<hr>\n<p class=\"caption\">Signals are for educational purposes only — trade responsibly.</p>\n");
    html.push_str("</body>\n</html>\n");
    html
}

fn render_result(assessment: &Assessment) -> String {
    format!(
        "<div class=\"success\">Signal: {}</div>\n<div class=\"info\">{}</div>\n",
        escape_html(assessment.signal.label()),
        escape_html(assessment.rationale.as_str()),
    )
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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
