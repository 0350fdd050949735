//! Pure aggregation over an article collection.
//!
//! Every function here is deterministic for a given input and leaves
//! the input untouched; callers recompute when the collection changes
//! and hold on to the result. Ties sort by label so output order never
//! depends on hash iteration.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::Article;

pub const TOP_WORDS: usize = 100;
pub const TOP_SOURCES: usize = 8;
pub const MIN_WORD_LEN: usize = 4;
pub const OTHER_SOURCES_LABEL: &str = "Other Sources";
pub const TIMESERIES_DAYS: usize = 7;

/// Common words excluded from frequency analysis. Sorted, so lookup
/// is a binary search.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "according", "after", "all", "also", "among", "an", "and", "any",
    "are", "around", "article", "as", "at", "back", "be", "been", "before", "below", "between",
    "but", "by", "can", "could", "day", "did", "do", "down", "find", "first", "for", "from",
    "get", "go", "had", "has", "have", "he", "her", "his", "how", "i", "if", "in", "into", "is",
    "it", "its", "just", "know", "last", "like", "make", "many", "may", "more", "most", "much",
    "must", "my", "new", "news", "next", "no", "not", "of", "off", "on", "one", "only", "onto",
    "or", "our", "out", "over", "people", "post", "read", "report", "said", "say", "second",
    "she", "show", "since", "so", "some", "source", "story", "such", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "third", "this", "through", "time", "to",
    "two", "under", "until", "up", "upon", "us", "use", "using", "very", "was", "we", "week",
    "what", "when", "where", "which", "while", "who", "whom", "whose", "why", "will", "with",
    "would", "year", "you", "your",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

fn sort_descending(entries: &mut [LabelCount]) {
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
}

fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|w| w.len() >= MIN_WORD_LEN && !is_stop_word(w))
        .map(str::to_string)
        .collect()
}

/// Word-frequency summary over titles and descriptions: lowercase,
/// non-alphabetic characters stripped to whitespace, tokens shorter
/// than four characters or in the stop-word set discarded, top 100 by
/// count.
pub fn word_frequencies(articles: &[Article]) -> Vec<LabelCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for article in articles {
        let text = format!(
            "{} {}",
            article.title,
            article.description.as_deref().unwrap_or("")
        );
        for token in tokenize(&text) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect();
    sort_descending(&mut entries);
    entries.truncate(TOP_WORDS);
    entries
}

/// Articles per source, top 8 kept individually, everything else
/// folded into a single "Other Sources" entry. The synthetic entry is
/// omitted when there are 8 or fewer distinct sources.
pub fn source_distribution(articles: &[Article]) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for article in articles {
        *counts.entry(article.source_name()).or_insert(0) += 1;
    }

    let mut entries: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    sort_descending(&mut entries);

    if entries.len() > TOP_SOURCES {
        let folded: usize = entries[TOP_SOURCES..].iter().map(|e| e.count).sum();
        entries.truncate(TOP_SOURCES);
        entries.push(LabelCount {
            label: OTHER_SOURCES_LABEL.to_string(),
            count: folded,
        });
    }
    entries
}

/// Articles per category, absent categories grouped under "General".
pub fn category_distribution(articles: &[Article]) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for article in articles {
        *counts.entry(article.category_label()).or_insert(0) += 1;
    }

    let mut entries: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    sort_descending(&mut entries);
    entries
}

/// Articles per UTC calendar day over the 7 most recent days ending at
/// `today` inclusive, zero-filled, oldest first. The reference date is
/// an argument so the function stays pure.
pub fn daily_counts(articles: &[Article], today: NaiveDate) -> Vec<DayCount> {
    let mut buckets: Vec<DayCount> = (0..TIMESERIES_DAYS)
        .rev()
        .map(|back| DayCount {
            date: today - chrono::Duration::days(back as i64),
            count: 0,
        })
        .collect();

    for article in articles {
        if let Some(published) = article.published_at {
            let date = published.date_naive();
            if let Some(bucket) = buckets.iter_mut().find(|b| b.date == date) {
                bucket.count += 1;
            }
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn titled(title: &str) -> Article {
        Article {
            url: format!("https://example.com/{}", title.len()),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn sourced(url: &str, source_name: Option<&str>) -> Article {
        Article {
            url: url.to_string(),
            title: "T".to_string(),
            source: source_name.map(|name| crate::domain::Source {
                id: None,
                name: Some(name.to_string()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_stop_words_are_sorted_for_binary_search() {
        for pair in STOP_WORDS.windows(2) {
            assert!(pair[0] < pair[1], "{:?} >= {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_only_stop_words_and_short_tokens_yield_nothing() {
        let articles = vec![titled("the cat is in a box")];
        assert!(word_frequencies(&articles).is_empty());
    }

    #[test]
    fn test_word_frequencies_count_and_order() {
        let mut a = titled("Market rally continues");
        a.description = Some("Another market rally".to_string());
        let b = titled("Rally fatigue?");

        let frequencies = word_frequencies(&[a, b]);
        assert_eq!(frequencies[0].label, "rally");
        assert_eq!(frequencies[0].count, 3);
        assert_eq!(frequencies[1].label, "market");
        assert_eq!(frequencies[1].count, 2);
    }

    #[test]
    fn test_word_frequencies_strip_punctuation_and_case() {
        let articles = vec![titled("Breaking: RECORD-breaking Heatwave!")];
        let frequencies = word_frequencies(&articles);
        let breaking = frequencies.iter().find(|e| e.label == "breaking").unwrap();
        assert_eq!(breaking.count, 2);
        assert!(frequencies.iter().any(|e| e.label == "record"));
        assert!(frequencies.iter().any(|e| e.label == "heatwave"));
    }

    #[test]
    fn test_tie_break_is_alphabetical() {
        let articles = vec![titled("zebra apple zebra apple")];
        let frequencies = word_frequencies(&articles);
        assert_eq!(frequencies[0].label, "apple");
        assert_eq!(frequencies[1].label, "zebra");
    }

    #[test]
    fn test_source_folding_beyond_top_eight() {
        let mut articles = Vec::new();
        for (i, count) in [10, 9, 8, 7, 6, 5, 4, 3, 2, 1].iter().enumerate() {
            for j in 0..*count {
                articles.push(sourced(
                    &format!("https://example.com/{}/{}", i, j),
                    Some(&format!("Source {}", i)),
                ));
            }
        }

        let distribution = source_distribution(&articles);
        assert_eq!(distribution.len(), TOP_SOURCES + 1);
        assert_eq!(distribution[0].count, 10);
        assert_eq!(distribution[7].count, 3);
        let other = distribution.last().unwrap();
        assert_eq!(other.label, OTHER_SOURCES_LABEL);
        assert_eq!(other.count, 3);
    }

    #[test]
    fn test_no_folding_at_eight_or_fewer_sources() {
        let articles: Vec<Article> = (0..8)
            .map(|i| {
                sourced(
                    &format!("https://example.com/{}", i),
                    Some(&format!("Source {}", i)),
                )
            })
            .collect();

        let distribution = source_distribution(&articles);
        assert_eq!(distribution.len(), 8);
        assert!(distribution.iter().all(|e| e.label != OTHER_SOURCES_LABEL));
    }

    #[test]
    fn test_missing_source_is_unknown() {
        let articles = vec![sourced("https://example.com/a", None)];
        let distribution = source_distribution(&articles);
        assert_eq!(distribution[0].label, "Unknown");
        assert_eq!(distribution[0].count, 1);
    }

    #[test]
    fn test_category_defaults_to_general() {
        let mut a = titled("one");
        a.category = Some("business".to_string());
        let b = titled("two");
        let c = titled("three");

        let distribution = category_distribution(&[a, b, c]);
        assert_eq!(distribution[0].label, "General");
        assert_eq!(distribution[0].count, 2);
        assert_eq!(distribution[1].label, "business");
    }

    #[test]
    fn test_daily_counts_zero_filled_oldest_first() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();
        let mut a = titled("one");
        a.published_at = Some(Utc.with_ymd_and_hms(2025, 11, 10, 8, 0, 0).unwrap());
        let mut b = titled("two");
        b.published_at = Some(Utc.with_ymd_and_hms(2025, 11, 8, 23, 59, 0).unwrap());
        let mut c = titled("three");
        // Outside the window: ignored
        c.published_at = Some(Utc.with_ymd_and_hms(2025, 11, 1, 12, 0, 0).unwrap());

        let series = daily_counts(&[a, b, c], today);
        assert_eq!(series.len(), TIMESERIES_DAYS);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 11, 4).unwrap());
        assert_eq!(series[6].date, today);
        assert_eq!(series[6].count, 1);
        assert_eq!(series[4].count, 1);
        assert_eq!(series.iter().map(|d| d.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_aggregations_leave_input_untouched() {
        let articles = vec![titled("Market rally continues unchecked")];
        let before = articles[0].title.clone();
        let _ = word_frequencies(&articles);
        let _ = source_distribution(&articles);
        let _ = category_distribution(&articles);
        assert_eq!(articles[0].title, before);
    }
}
