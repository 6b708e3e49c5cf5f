//! View-state derivations.
//!
//! Pure and synchronous: recomputed on every input change, no I/O, no
//! side effects.

use serde::Serialize;

use crate::domain::{FoodPost, FoodStatus};

/// Filter a feed by a free-text query.
///
/// A post matches when its name, description, or location contains the
/// query as a case-insensitive substring. A blank query matches all.
pub fn filter_posts<'a>(posts: &'a [FoodPost], query: &str) -> Vec<&'a FoodPost> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return posts.iter().collect();
    }

    posts
        .iter()
        .filter(|p| {
            p.food_name.to_lowercase().contains(&query)
                || p.description.to_lowercase().contains(&query)
                || p.location.to_lowercase().contains(&query)
        })
        .collect()
}

/// Dashboard counts over a user's own posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub total: usize,
    /// Posts that have left the available state.
    pub claimed: usize,
    /// Posts still up for grabs.
    pub open: usize,
}

impl DashboardCounts {
    pub fn from_posts(posts: &[FoodPost]) -> Self {
        let total = posts.len();
        let open = posts
            .iter()
            .filter(|p| p.status == FoodStatus::Available)
            .count();
        Self {
            total,
            claimed: total - open,
            open,
        }
    }
}
