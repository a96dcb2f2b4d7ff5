//! Identity page
//!
//! Shows who the edge authenticated, when, and from which country.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::flags;

const UNKNOWN_USER: &str = "unknown user";
const LOGO_URL: &str = "https://wisecloud.stream/wp-content/uploads/2024/05/cloudflare_icon_146206.png";
const TAGLINE: &str = "...And we don't just meet expectations, we exceed them.";

/// Render the identity page
///
/// `email` and `country` come straight from request headers set by the edge.
/// The email is escaped; a missing or malformed country renders the page
/// without a flag.
pub fn render_identity_page(
    email: Option<&str>,
    country: Option<&str>,
    flag_base_url: &str,
    now: DateTime<Utc>,
) -> String {
    let email = email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map_or_else(|| UNKNOWN_USER.to_string(), escape_html);
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    let location = match country.map(str::trim).filter(|c| flags::is_valid_country(c)) {
        Some(code) => format!(
            r#"<img src="{}" alt="Flag of {}" class="flag">"#,
            flags::flag_url(flag_base_url, code),
            code.to_ascii_uppercase()
        ),
        None => "<p>an unknown location</p>".to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Secure area</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            text-align: center;
            margin-top: 50px;
        }}
        .container {{
            display: flex;
            flex-direction: column;
            align-items: center;
        }}
        .flag {{
            margin-top: 20px;
            width: 50px;
            height: 50px;
        }}
    </style>
</head>
<body>
    <div class="container">
        <div>
            <img src="{LOGO_URL}" alt="Logo" width="120" height="120">
        </div>
        <div>
            <p>{TAGLINE}</p>
            <p><a href="/">Home</a></p>
        </div>
        <div>
            <p>{email} authenticated at {timestamp} from</p>
            {location}
        </div>
    </div>
</body>
</html>
"#
    )
}

/// Escape text for use inside an HTML element
///
/// Quotes are left alone; the result must not be placed in an attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
