//! Helpers the templates call to present rows.

use pulldown_cmark::{CowStr, Event, Parser, Tag};
use time::OffsetDateTime;

use crate::db::{MessageRow, RoomRow, User, UserSummary};

const DEFAULT_AVATAR: &str = "/res/avatar.svg";

/// Renders a message body as Markdown. Raw HTML is shown as text and
/// `javascript:` links lose their target.
pub fn markdown(source: &str) -> String {
    let parser = Parser::new(source).map(|event| match event {
        Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        _ => event,
    });

    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, parser);
    html_output
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let scheme = url.trim_start().to_ascii_lowercase();
    if scheme.starts_with("javascript:") || scheme.starts_with("vbscript:") || scheme.starts_with("data:") {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

/// "3 hours ago", "just now", etc.
pub fn time_since(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let secs = (now - then).whole_seconds().max(0);

    let (count, unit) = match secs {
        0..60 => return "just now".to_owned(),
        60..3_600 => (secs / 60, "minute"),
        3_600..86_400 => (secs / 3_600, "hour"),
        86_400..604_800 => (secs / 86_400, "day"),
        604_800..2_592_000 => (secs / 604_800, "week"),
        2_592_000..31_536_000 => (secs / 2_592_000, "month"),
        _ => (secs / 31_536_000, "year"),
    };

    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

fn avatar_or_default(avatar: &str) -> &str {
    if avatar.is_empty() { DEFAULT_AVATAR } else { avatar }
}

impl MessageRow {
    pub fn body_html(&self) -> String {
        markdown(&self.body)
    }

    pub fn created_ago(&self) -> String {
        time_since(self.created, OffsetDateTime::now_utc())
    }

    pub fn avatar_url(&self) -> &str {
        avatar_or_default(&self.avatar)
    }
}

impl RoomRow {
    pub fn created_ago(&self) -> String {
        time_since(self.created, OffsetDateTime::now_utc())
    }

    pub fn host_avatar_url(&self) -> &str {
        avatar_or_default(&self.host_avatar)
    }
}

impl User {
    pub fn avatar_url(&self) -> &str {
        avatar_or_default(&self.avatar)
    }
}

impl UserSummary {
    pub fn avatar_url(&self) -> &str {
        avatar_or_default(&self.avatar)
    }
}

#[cfg(test)]
mod tests {
    use time::Duration;

    use super::*;

    #[test]
    fn markdown_escapes_raw_html() {
        let html = markdown("hi <script>alert(1)</script> **there**");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<strong>there</strong>"));
    }

    #[test]
    fn markdown_drops_script_links() {
        let html = markdown("[click](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("href=\"#\""));

        let html = markdown("[docs](https://docs.rs)");
        assert!(html.contains("href=\"https://docs.rs\""));
    }

    #[test]
    fn time_since_buckets() {
        let now = OffsetDateTime::UNIX_EPOCH + Duration::days(1_000);
        assert_eq!(time_since(now, now), "just now");
        assert_eq!(time_since(now + Duration::minutes(5), now), "just now");
        assert_eq!(time_since(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(time_since(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(time_since(now - Duration::days(2), now), "2 days ago");
        assert_eq!(time_since(now - Duration::days(400), now), "1 year ago");
    }
}
