//! Recency ordering for finished clusters

use crate::cluster::Cluster;

/// Sort clusters newest first. Ties keep their aggregation order.
pub fn rank(mut clusters: Vec<Cluster>) -> Vec<Cluster> {
    // sort_by is stable
    clusters.sort_by(|a, b| b.most_recent_timestamp.cmp(&a.most_recent_timestamp));
    clusters
}
