use notification_services::NotificationError;

use crate::scan_types::FilteredCenter;

/// Turns eligible centers into the notification document
pub trait Renderer: Send + Sync {
    /// Render the document sent to the recipient.
    fn render(&self, centers: &[FilteredCenter]) -> Result<String, NotificationError>;
}

/// Renders centers as a self-contained HTML email
pub struct HtmlRenderer {
    title: String,
}

impl HtmlRenderer {
    /// Renderer with a custom heading
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new("Vaccine Available")
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, centers: &[FilteredCenter]) -> Result<String, NotificationError> {
        let cards: String = centers.iter().map(render_center).collect();

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
</head>
<body style="font-family: Arial, sans-serif; max-width: 640px; margin: 0 auto;">
    <div style="background: #1f4e79; padding: 20px; text-align: center;">
        <h1 style="color: white; margin: 0;">💉 {title}</h1>
    </div>
    <div style="padding: 20px; background: white;">
        <p style="font-size: 16px; color: #374151;">{count} center(s) have open slots.</p>
{cards}    </div>
</body>
</html>
"#,
            title = escape_html(&self.title),
            count = centers.len(),
            cards = cards,
        ))
    }
}

fn render_center(center: &FilteredCenter) -> String {
    let mut details = Vec::new();
    if let Some(address) = center.address.as_deref().filter(|a| !a.trim().is_empty()) {
        details.push(escape_html(address));
    }
    if let Some(pincode) = center.pincode {
        details.push(pincode.to_string());
    }
    if let Some(fee_type) = &center.fee_type {
        details.push(escape_html(fee_type));
    }

    let rows: String = center
        .sessions
        .iter()
        .map(|session| {
            format!(
                "                <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&session.date),
                escape_html(&session.vaccine),
                session.available_capacity
            )
        })
        .collect();

    let fees = if center.vaccine_fees.is_empty() {
        String::new()
    } else {
        let items = center
            .vaccine_fees
            .iter()
            .map(|fee| format!("{} ₹{}", escape_html(&fee.vaccine), escape_html(&fee.fee)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("            <p style=\"color: #6b7280;\">Fees: {}</p>\n", items)
    };

    format!(
        r#"        <div style="border: 1px solid #e5e7eb; border-radius: 8px; padding: 12px; margin-bottom: 16px;">
            <h2 style="margin: 0;"><a href="{location}">{name}</a></h2>
            <p style="color: #6b7280;">{details}</p>
{fees}            <table style="width: 100%; border-collapse: collapse;">
                <tr><th align="left">Date</th><th align="left">Vaccine</th><th align="left">Available</th></tr>
{rows}            </table>
        </div>
"#,
        location = escape_html(&center.location),
        name = escape_html(&center.name),
        details = details.join(" · "),
        fees = fees,
        rows = rows,
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
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
