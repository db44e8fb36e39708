//! Text output formatting with captions and colors.

use thumbbot_core::{ClipStream, MediaItem, PostResult, ProviderKind, ResolvedContent};
use thumbbot_providers::{ProviderDescriptor, Resolution};

use super::json::ClassifyOutput;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Longest video description kept in a caption, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

// ============================================================================
// Captions
// ============================================================================

/// Builds the chat caption for a resolution.
pub fn caption(resolution: &Resolution) -> String {
    match &resolution.content {
        ResolvedContent::Post(post) => post_caption(resolution.provider, post),
        ResolvedContent::Clip(clip) => format!("{}\n\n{}", clip.source_url, clip.label),
    }
}

fn post_caption(provider: ProviderKind, post: &PostResult) -> String {
    match provider {
        ProviderKind::FxTwitter | ProviderKind::VxTwitter => {
            let base = format!("{}\n\n{}: {}", post.source_url, post.author_handle, post.body_text);
            if post.has_media() {
                format!("{base}\n\n💟 {} 🔁 {}", post.like_count, post.repost_count)
            } else {
                base
            }
        }
        ProviderKind::Instagram => {
            if post.body_text.is_empty() {
                format!("{}\n\n{}", post.source_url, post.author_handle)
            } else {
                format!("{}\n\n{}: {}", post.source_url, post.author_handle, post.body_text)
            }
        }
        ProviderKind::YouTube | ProviderKind::Vocaroo => {
            let title = post.title.as_deref().unwrap_or_default();
            let mut text = if post.author_handle.is_empty() {
                format!("{}\n\n{title}", post.source_url)
            } else {
                format!("{}\n\n{}: {title}", post.source_url, post.author_handle)
            };
            if !post.body_text.is_empty() {
                text.push_str("\n\n");
                text.push_str(&truncate_chars(&post.body_text, MAX_DESCRIPTION_CHARS));
            }
            text
        }
    }
}

/// Cuts `text` to `max` characters, marking the cut with `...`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

// ============================================================================
// Text Formatter
// ============================================================================

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a resolution: caption, media list, then the strategy used.
    pub fn format_resolution(&self, resolution: &Resolution) -> String {
        let mut lines = vec![caption(resolution)];

        match &resolution.content {
            ResolvedContent::Post(post) if post.has_media() => {
                lines.push(String::new());
                lines.extend(post.media.iter().map(|item| self.format_media(item)));
            }
            ResolvedContent::Post(_) => {}
            ResolvedContent::Clip(clip) => {
                lines.push(String::new());
                lines.push(self.format_clip(clip));
            }
        }

        lines.push(String::new());
        lines.push(self.dim(&format!(
            "via {} ({})",
            resolution.provider.display_name(),
            resolution.strategy_id
        )));

        lines.join("\n")
    }

    fn format_media(&self, item: &MediaItem) -> String {
        let mut line = format!("  {:<6} {}", self.cyan(item.kind.as_str()), item.url);
        if let Some(views) = item.view_count {
            line.push_str(&self.dim(&format!(" ({} views)", format_count(views))));
        }
        line
    }

    fn format_clip(&self, clip: &ClipStream) -> String {
        format!(
            "  {:<6} {} {}",
            self.cyan("audio"),
            format_bytes(clip.len()),
            self.dim(clip.content_type.as_deref().unwrap_or("unknown type"))
        )
    }

    /// Formats a classification result.
    pub fn format_classified(&self, output: &ClassifyOutput) -> String {
        match (&output.provider, &output.url) {
            (Some(kind), Some(url)) => format!(
                "{} {}\n  {}",
                self.green("✓"),
                self.bold(kind.display_name()),
                url
            ),
            _ => format!("{} none", self.yellow("−")),
        }
    }

    /// Formats the provider list header.
    pub fn format_providers_header(&self) -> String {
        format!(
            "{:<15} {:<12} {}",
            self.bold("Group"),
            self.bold("CLI"),
            self.bold("Hosts")
        )
    }

    /// Formats a provider line.
    pub fn format_provider_line(&self, desc: &ProviderDescriptor) -> String {
        let kinds = desc
            .kinds
            .iter()
            .map(ProviderKind::cli_name)
            .collect::<Vec<_>>()
            .join(" → ");

        format!(
            "{:<15} {:<12} {}\n{:<28} {}",
            desc.display_name(),
            desc.cli_name(),
            desc.hosts.join(", "),
            "",
            self.dim(&kinds)
        )
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Formats a count with K/M suffixes.
fn format_count(n: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let value = n as f64;
    if n >= 1_000_000 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Formats a byte length with binary units.
fn format_bytes(len: usize) -> String {
    #[allow(clippy::cast_precision_loss)]
    let value = len as f64;
    if len >= 1024 * 1024 {
        format!("{:.1} MiB", value / (1024.0 * 1024.0))
    } else if len >= 1024 {
        format!("{:.1} KiB", value / 1024.0)
    } else {
        format!("{len} B")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("äöüß", 2), "äö...");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_500), "1.5K");
        assert_eq!(format_count(2_300_000), "2.3M");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }

    #[test]
    fn test_paint_respects_colors() {
        assert_eq!(TextFormatter::new(false).bold("x"), "x");
        assert_eq!(TextFormatter::new(true).bold("x"), "\x1b[1mx\x1b[0m");
    }
}
