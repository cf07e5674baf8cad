// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryLimits {
    pub page_size: usize,
    pub summary_top_n: usize,
    pub pareto_top_n: usize,
    pub recent_thumbnails: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            summary_top_n: 3,
            pareto_top_n: 5,
            recent_thumbnails: 3,
        }
    }
}

impl QueryLimits {
    /// Page size never drops below one item.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}
