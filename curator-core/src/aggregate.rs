//! Cluster aggregation over the three input streams
//!
//! Streams are merged in a fixed order (social, then catalog, then
//! generated) because that order decides which item becomes a
//! cluster's headline.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::catalog::CatalogRepository;
use crate::cluster::{time_ago, Cluster, ClusterKey};
use crate::item::{GeneratedArticle, RawSourceItem, SocialPost};
use crate::rank::rank;
use crate::relevance::is_relevant;
use crate::summary::synthesize;
use crate::topic::classify;

/// Inputs for one aggregation run
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateInput<'a> {
    /// Free-text description of what the user wants to read about
    pub prompt: &'a str,
    /// Social posts, already filtered for relevance upstream
    pub social_posts: &'a [SocialPost],
    /// Requested catalog feed names
    pub catalog_sources: &'a [String],
    /// Items from the generative provider, assumed relevant
    pub generated: &'a [GeneratedArticle],
}

impl AggregateInput<'_> {
    /// Neither social posts nor catalog feeds are present, so every
    /// generated item gets a cluster of its own
    pub fn is_generated_only(&self) -> bool {
        self.social_posts.is_empty() && self.catalog_sources.is_empty()
    }
}

/// Builds ranked clusters from one request's inputs
pub struct Aggregator<'c> {
    catalog: &'c CatalogRepository,
    now: DateTime<Utc>,
}

impl<'c> Aggregator<'c> {
    /// `now` stands in for every missing timestamp in this run
    pub fn new(catalog: &'c CatalogRepository, now: DateTime<Utc>) -> Self {
        Self { catalog, now }
    }

    /// Run the full pipeline: bucket, summarize, rank
    pub fn aggregate(&self, input: AggregateInput<'_>) -> Vec<Cluster> {
        let mut run = Run::new(self.now);

        for post in input.social_posts {
            let item = RawSourceItem::Social(post).normalize(self.now);
            let key = ClusterKey::Topic(classify(&item.content));
            run.cluster_for(key, None, item.timestamp).push(item);
        }

        for source_name in input.catalog_sources {
            let articles = self.catalog.lookup(source_name);
            if articles.is_empty() {
                debug!("No catalog articles for source '{}'", source_name);
            }

            for article in articles {
                let text = format!("{} {}", article.title, article.summary);
                if !is_relevant(&text, input.prompt) {
                    continue;
                }

                let item = RawSourceItem::Catalog(article).normalize(self.now);
                let key = ClusterKey::Topic(classify(&text));
                let cluster = run.cluster_for(key, item.image_url.as_deref(), item.timestamp);
                if cluster.accepts_headline() {
                    cluster.promote(&item);
                }
                cluster.push(item);
            }
        }

        let generated_only = input.is_generated_only();
        for (index, article) in input.generated.iter().enumerate() {
            let item = RawSourceItem::Generated(article).normalize(self.now);

            if generated_only {
                let cluster = run.cluster_for(ClusterKey::Generated(index), None, item.timestamp);
                cluster.topic_label = item.source_label.clone();
                cluster.promote(&item);
                cluster.push(item);
                continue;
            }

            let key = ClusterKey::Topic(classify(&format!("{} {}", item.title, item.content)));
            let cluster = run.cluster_for(key, None, item.timestamp);
            if cluster.accepts_headline() {
                cluster.promote(&item);
            }
            cluster.push(item);
        }

        let clusters = run.finish();
        info!(
            "Aggregated {} social, {} catalog feeds, {} generated into {} clusters",
            input.social_posts.len(),
            input.catalog_sources.len(),
            input.generated.len(),
            clusters.len()
        );
        clusters
    }
}

/// Mutable state of a single aggregation run
struct Run {
    now: DateTime<Utc>,
    clusters: IndexMap<ClusterKey, Cluster>,
}

impl Run {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            clusters: IndexMap::new(),
        }
    }

    /// Get or create the cluster for `key`
    fn cluster_for(
        &mut self,
        key: ClusterKey,
        image: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> &mut Cluster {
        let ordinal = self.clusters.len();
        let run_millis = self.now.timestamp_millis();
        self.clusters.entry(key).or_insert_with(|| {
            let label = match key {
                ClusterKey::Topic(topic) => topic.label(),
                ClusterKey::Generated(_) => "",
            };
            let id = format!("cluster-{}-{}-{}", key, run_millis, ordinal);
            Cluster::open(id, key, label, image, timestamp)
        })
    }

    /// Drop empty clusters, fill in summaries, and rank
    fn finish(self) -> Vec<Cluster> {
        let now = self.now;
        let clusters = self
            .clusters
            .into_values()
            .filter(|cluster| !cluster.is_empty())
            .map(|mut cluster| {
                // clusters made only of social posts fall back to their first post
                if cluster.headline.is_empty() {
                    cluster.headline = cluster.items[0].title.clone();
                }
                if cluster.main_summary.is_empty() {
                    cluster.main_summary = cluster.items[0].content.clone();
                }
                cluster.combined_summary = synthesize(&cluster.items);
                cluster.time_ago = Some(time_ago(cluster.most_recent_timestamp, now));
                cluster
            })
            .collect();

        rank(clusters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogArticle;
    use crate::item::SourceKind;
    use crate::topic::Topic;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 16, 12, 0, 0).unwrap()
    }

    fn social(text: &str, handle: &str, posted_at: &str) -> SocialPost {
        SocialPost {
            text: text.to_string(),
            author_handle: handle.to_string(),
            posted_at: Some(posted_at.to_string()),
            ..Default::default()
        }
    }

    fn generated(title: &str, summary: &str, source: &str) -> GeneratedArticle {
        GeneratedArticle {
            title: Some(title.to_string()),
            summary: Some(summary.to_string()),
            source_name: Some(source.to_string()),
            published_at: Some("2026-01-16T09:00:00Z".to_string()),
            url: Some("https://example.com/a".to_string()),
            ..Default::default()
        }
    }

    fn sports_catalog() -> CatalogRepository {
        CatalogRepository::new().with_feed(
            "SportsFeed",
            vec![CatalogArticle {
                id: "s1".to_string(),
                title: "Century at the Ground".to_string(),
                summary: "A patient innings ended with a late wicket before stumps.".to_string(),
                published_at: Some("2026-01-15T10:00:00Z".to_string()),
                image_url: Some("https://img.example.com/ground.jpg".to_string()),
                ..Default::default()
            }],
        )
    }

    #[test]
    fn test_social_only_cluster_uses_first_post_as_headline() {
        let catalog = CatalogRepository::new();
        let posts = vec![social(
            "Kohli's century and a late wicket turned the innings around today",
            "@fan",
            "2026-01-15T08:00:00Z",
        )];
        let clusters = Aggregator::new(&catalog, now()).aggregate(AggregateInput {
            prompt: "cricket",
            social_posts: &posts,
            ..Default::default()
        });

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].topic_key, ClusterKey::Topic(Topic::Cricket));
        assert!(clusters[0].headline.ends_with("..."));
        assert!(clusters[0].representative_image.contains("picsum.photos"));
    }

    #[test]
    fn test_catalog_headline_beats_social() {
        let catalog = sports_catalog();
        let posts = vec![social(
            "What a wicket! The innings is slipping away from the visitors",
            "@fan",
            "2026-01-15T12:00:00Z",
        )];
        let sources = vec!["SportsFeed".to_string()];
        let clusters = Aggregator::new(&catalog, now()).aggregate(AggregateInput {
            prompt: "cricket",
            social_posts: &posts,
            catalog_sources: &sources,
            generated: &[],
        });

        assert_eq!(clusters.len(), 1);
        let cluster = &clusters[0];
        assert_eq!(cluster.headline, "Century at the Ground");
        assert_eq!(cluster.representative_image, "https://img.example.com/ground.jpg");
        assert_eq!(cluster.item_count, 2);
        assert_eq!(cluster.items[0].kind, SourceKind::Social);
        assert_eq!(cluster.items[1].kind, SourceKind::Catalog);
        // the social post is newer than the article
        assert_eq!(
            cluster.most_recent_timestamp,
            Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_irrelevant_catalog_articles_skipped() {
        let catalog = sports_catalog();
        let sources = vec!["SportsFeed".to_string()];
        let clusters = Aggregator::new(&catalog, now()).aggregate(AggregateInput {
            prompt: "vaccine rollout",
            catalog_sources: &sources,
            ..Default::default()
        });
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_generated_only_mode_makes_singletons() {
        let catalog = CatalogRepository::new();
        let articles: Vec<GeneratedArticle> = (0..5)
            .map(|i| generated(&format!("Story {}", i), "OpenAI ships a new model", "Wire"))
            .collect();
        let clusters = Aggregator::new(&catalog, now()).aggregate(AggregateInput {
            prompt: "ai",
            generated: &articles,
            ..Default::default()
        });

        assert_eq!(clusters.len(), 5);
        assert!(clusters.iter().all(|c| c.item_count == 1));
        assert!(clusters.iter().all(|c| c.topic_label == "Wire"));
        assert!(matches!(clusters[0].topic_key, ClusterKey::Generated(0)));
        assert_eq!(clusters[0].combined_summary, "OpenAI ships a new model");
    }

    #[test]
    fn test_mixed_mode_generated_joins_taxonomy() {
        let catalog = sports_catalog();
        let sources = vec!["SportsFeed".to_string()];
        let articles = vec![generated(
            "Test match report",
            "Another wicket fell as the innings collapsed",
            "Wire",
        )];
        let clusters = Aggregator::new(&catalog, now()).aggregate(AggregateInput {
            prompt: "cricket",
            catalog_sources: &sources,
            generated: &articles,
            ..Default::default()
        });

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].item_count, 2);
        // the catalog article got there first
        assert_eq!(clusters[0].headline, "Century at the Ground");
        let labels: Vec<&str> = clusters[0].sources.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["SportsFeed", "Wire"]);
    }

    #[test]
    fn test_generated_headline_beats_social_in_mixed_mode() {
        let catalog = CatalogRepository::new();
        let posts = vec![social(
            "Huge innings today, what a wicket to end the session",
            "@fan",
            "2026-01-16T10:00:00Z",
        )];
        let articles = vec![generated(
            "Century seals the Test",
            "A patient innings and a late wicket decided the match",
            "Wire",
        )];
        let clusters = Aggregator::new(&catalog, now()).aggregate(AggregateInput {
            prompt: "cricket",
            social_posts: &posts,
            generated: &articles,
            ..Default::default()
        });

        assert_eq!(clusters.len(), 1);
        let cluster = &clusters[0];
        assert_eq!(cluster.topic_key, ClusterKey::Topic(Topic::Cricket));
        assert_eq!(cluster.headline, "Century seals the Test");
        assert_eq!(
            cluster.main_summary,
            "A patient innings and a late wicket decided the match"
        );
        assert_eq!(cluster.items[0].kind, SourceKind::Social);
        assert_eq!(cluster.items[1].kind, SourceKind::Generated);
    }

    #[test]
    fn test_spelled_out_dates_rank_by_their_value() {
        let catalog = CatalogRepository::new();
        let mut older = generated("Older story", "Summary", "Wire");
        older.published_at = Some("January 10, 2026".to_string());
        let mut newer = generated("Newer story", "Summary", "Wire");
        newer.published_at = Some("2026-01-15".to_string());

        let articles = vec![older, newer];
        let clusters = Aggregator::new(&catalog, now()).aggregate(AggregateInput {
            generated: &articles,
            ..Default::default()
        });

        let headlines: Vec<&str> = clusters.iter().map(|c| c.headline.as_str()).collect();
        assert_eq!(headlines, vec!["Newer story", "Older story"]);
        assert_eq!(
            clusters[1].most_recent_timestamp,
            Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_empty_input() {
        let catalog = CatalogRepository::new();
        let clusters = Aggregator::new(&catalog, now()).aggregate(AggregateInput::default());
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_cluster_ids_unique() {
        let catalog = CatalogRepository::new();
        let articles: Vec<GeneratedArticle> = (0..3)
            .map(|i| generated(&format!("Story {}", i), "Summary", "Wire"))
            .collect();
        let clusters = Aggregator::new(&catalog, now()).aggregate(AggregateInput {
            generated: &articles,
            ..Default::default()
        });
        let mut ids: Vec<&str> = clusters.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
