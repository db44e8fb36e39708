//! CLI output formatting tests.
//!
//! Captions must match what the chat front end posts, so the expected
//! strings here are exact.

#[cfg(test)]
mod caption_tests {
    use super::super::text::{MAX_DESCRIPTION_CHARS, caption};
    use thumbbot_core::{ClipStream, MediaItem, PostResult, ProviderKind, ResolvedContent};
    use thumbbot_providers::Resolution;

    fn resolution(provider: ProviderKind, content: ResolvedContent) -> Resolution {
        Resolution {
            provider,
            content,
            strategy_id: "test".to_string(),
        }
    }

    fn microblog_post(with_media: bool) -> PostResult {
        let mut post = PostResult::new("https://x.com/jack/status/20", "jack");
        post.body_text = "just setting up my twttr".to_string();
        post.like_count = 300;
        post.repost_count = 120;
        if with_media {
            post.media.push(MediaItem::photo("https://pbs.twimg.com/media/a.jpg"));
        }
        post
    }

    #[test]
    fn test_microblog_with_media() {
        let r = resolution(ProviderKind::FxTwitter, ResolvedContent::Post(microblog_post(true)));
        assert_eq!(
            caption(&r),
            "https://x.com/jack/status/20\n\njack: just setting up my twttr\n\n💟 300 🔁 120"
        );
    }

    #[test]
    fn test_microblog_text_only() {
        let r = resolution(ProviderKind::VxTwitter, ResolvedContent::Post(microblog_post(false)));
        assert_eq!(caption(&r), "https://x.com/jack/status/20\n\njack: just setting up my twttr");
    }

    #[test]
    fn test_instagram_with_and_without_caption() {
        let mut post = PostResult::new("https://www.instagram.com/p/ABC/", "cat");
        let r = resolution(ProviderKind::Instagram, ResolvedContent::Post(post.clone()));
        assert_eq!(caption(&r), "https://www.instagram.com/p/ABC/\n\ncat");

        post.body_text = "meow".to_string();
        let r = resolution(ProviderKind::Instagram, ResolvedContent::Post(post));
        assert_eq!(caption(&r), "https://www.instagram.com/p/ABC/\n\ncat: meow");
    }

    #[test]
    fn test_youtube_truncates_description() {
        let mut post = PostResult::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "Rick Astley");
        post.title = Some("Never Gonna Give You Up".to_string());
        post.body_text = "x".repeat(MAX_DESCRIPTION_CHARS + 20);

        let r = resolution(ProviderKind::YouTube, ResolvedContent::Post(post));
        let text = caption(&r);
        assert!(text.starts_with(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ\n\nRick Astley: Never Gonna Give You Up\n\n"
        ));
        assert!(text.ends_with(&format!("{}...", "x".repeat(MAX_DESCRIPTION_CHARS))));
    }

    #[test]
    fn test_youtube_without_author_or_description() {
        let mut post = PostResult::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "");
        post.title = Some("Untitled".to_string());

        let r = resolution(ProviderKind::YouTube, ResolvedContent::Post(post));
        assert_eq!(caption(&r), "https://www.youtube.com/watch?v=dQw4w9WgXcQ\n\nUntitled");
    }

    #[test]
    fn test_clip_caption() {
        let clip = ClipStream {
            clip_id: "abc123".to_string(),
            label: "Vocaroo abc123".to_string(),
            source_url: "https://voca.ro/abc123".to_string(),
            content_type: Some("audio/mpeg".to_string()),
            bytes: vec![0; 16],
        };
        let r = resolution(ProviderKind::Vocaroo, ResolvedContent::Clip(clip));
        assert_eq!(caption(&r), "https://voca.ro/abc123\n\nVocaroo abc123");
    }
}

#[cfg(test)]
mod text_formatter_tests {
    use super::super::json::ClassifyOutput;
    use super::super::text::TextFormatter;
    use thumbbot_core::{MediaItem, PostResult, ProviderKind, ResolvedContent};
    use thumbbot_providers::{ProviderRegistry, Resolution};

    #[test]
    fn test_resolution_lists_media_and_strategy() {
        let mut post = PostResult::new("https://x.com/a/status/1", "a");
        post.media.push(MediaItem::video("https://video.example/v.mp4").with_view_count(Some(1_500)));
        let r = Resolution {
            provider: ProviderKind::FxTwitter,
            content: ResolvedContent::Post(post),
            strategy_id: "fxtwitter.api".to_string(),
        };

        let output = TextFormatter::new(false).format_resolution(&r);
        assert!(output.contains("video  https://video.example/v.mp4 (1.5K views)"));
        assert!(output.ends_with("via FxTwitter (fxtwitter.api)"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_classified_lines() {
        let formatter = TextFormatter::new(false);
        let supported = ClassifyOutput {
            input: "https://voca.ro/abc".to_string(),
            url: Some("https://voca.ro/abc".to_string()),
            provider: Some(ProviderKind::Vocaroo),
            group: Some("vocaroo".to_string()),
        };
        assert_eq!(formatter.format_classified(&supported), "✓ Vocaroo\n  https://voca.ro/abc");

        let unsupported = ClassifyOutput {
            input: "https://example.com".to_string(),
            url: None,
            provider: None,
            group: None,
        };
        assert_eq!(formatter.format_classified(&unsupported), "− none");
    }

    #[test]
    fn test_provider_line_lists_hosts_and_fallback() {
        let formatter = TextFormatter::new(false);
        let desc = ProviderRegistry::get(ProviderKind::FxTwitter).unwrap();
        let line = formatter.format_provider_line(desc);
        assert!(line.contains("x.com"));
        assert!(line.contains("fxtwitter → vxtwitter"));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::{JsonFormatter, ResolutionOutput};
    use thumbbot_core::{ClipStream, ProviderKind, ResolvedContent};
    use thumbbot_providers::{ProviderRegistry, Resolution};

    #[test]
    fn test_clip_resolution_omits_bytes() {
        let r = Resolution {
            provider: ProviderKind::Vocaroo,
            content: ResolvedContent::Clip(ClipStream {
                clip_id: "abc".to_string(),
                label: "Vocaroo abc".to_string(),
                source_url: "https://voca.ro/abc".to_string(),
                content_type: None,
                bytes: vec![1, 2, 3],
            }),
            strategy_id: "vocaroo.download".to_string(),
        };

        let json = JsonFormatter::new(false).format(&ResolutionOutput::from(&r)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["provider"], "vocaroo");
        assert_eq!(value["strategy"], "vocaroo.download");
        assert_eq!(value["clipBytes"], 3);
        assert_eq!(value["content"]["type"], "clip");
        assert!(value["content"].get("bytes").is_none());
        assert_eq!(value["caption"], "https://voca.ro/abc\n\nVocaroo abc");
    }

    #[test]
    fn test_providers_json() {
        let json = JsonFormatter::new(false)
            .format_providers(ProviderRegistry::all())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let groups = value.as_array().unwrap();
        assert_eq!(groups.len(), ProviderRegistry::count());
        assert_eq!(groups[0]["cliName"], "twitter");
        assert_eq!(groups[0]["kinds"][1], "vxtwitter");
    }
}
