/// A group of name keywords that share one canonical sample value.
#[derive(Debug, Clone, Copy)]
pub struct SampleCategory {
    pub keywords: &'static [&'static str],
    pub value: &'static str,
}

/// Sample categories in priority order. The first category with a keyword
/// contained in the lowercased placeholder name wins, so `imageUrl` resolves
/// to an image rather than `#`.
pub const SAMPLE_CATEGORIES: &[SampleCategory] = &[
    SampleCategory {
        keywords: &["image", "img", "photo", "picture", "thumbnail", "banner"],
        value: "https://placehold.co/600x400?text=Sample+Image",
    },
    SampleCategory {
        keywords: &["url", "link", "href"],
        value: "#",
    },
    SampleCategory {
        keywords: &["title", "heading", "headline"],
        value: "サンプルタイトル",
    },
    SampleCategory {
        keywords: &["description", "desc", "text", "summary"],
        value: "これはサンプルの説明文です。実際のコンテンツに置き換えてください。",
    },
    SampleCategory {
        keywords: &["price", "cost", "fee"],
        value: "¥9,800",
    },
    SampleCategory {
        keywords: &["button", "btn", "cta"],
        value: "詳しく見る",
    },
    SampleCategory {
        keywords: &["date", "deadline"],
        value: "2024年1月1日",
    },
    SampleCategory {
        keywords: &["name"],
        value: "サンプル名",
    },
    SampleCategory {
        keywords: &["icon"],
        value: "https://placehold.co/64x64?text=Icon",
    },
    SampleCategory {
        keywords: &["service"],
        value: "サンプルサービス",
    },
    SampleCategory {
        keywords: &["job", "position", "occupation"],
        value: "Webエンジニア",
    },
    SampleCategory {
        keywords: &["industry"],
        value: "IT・通信",
    },
    SampleCategory {
        keywords: &["benefit", "merit", "feature"],
        value: "未経験歓迎・リモート可",
    },
    SampleCategory {
        keywords: &["rating", "score", "review"],
        value: "4.5",
    },
    SampleCategory {
        keywords: &["logo"],
        value: "https://placehold.co/200x80?text=Logo",
    },
    SampleCategory {
        keywords: &["category", "tag", "label", "genre"],
        value: "カテゴリ",
    },
];

/// Maps a placeholder name to a human-readable sample value for previews.
///
/// Matching is case-insensitive; the fallback echoes the name with its
/// original casing.
pub fn get_sample_value(token: &str) -> String {
    let lowered = token.to_lowercase();
    SAMPLE_CATEGORIES
        .iter()
        .find(|category| {
            category
                .keywords
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
        .map(|category| category.value.to_string())
        .unwrap_or_else(|| format!("サンプル{token}"))
}
