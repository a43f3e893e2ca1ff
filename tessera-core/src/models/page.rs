//! The shared pagination envelope.
//!
//! Every list endpoint returns its items alongside a [`Page`] describing
//! where the returned slice sits in the full result set.

use serde::{Deserialize, Serialize};

/// Pagination metadata the server attaches to every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Offset of the first returned item, as the server reports it.
    pub offset: u64,
    /// The limit the server applied.
    pub limit: u32,
    /// Total matching items, when the server knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Whether more items exist past this slice.
    ///
    /// This flag is authoritative. Consumers must not infer "more data"
    /// from `returned_count == limit`; a full page can still be the last.
    pub has_more: bool,
}

impl Page {
    /// Offset for the next request: the *server-reported* offset plus the
    /// number of items actually returned.
    ///
    /// Reusing the server's offset rather than a locally computed one keeps
    /// the cursor consistent under server-side reordering (e.g. the server
    /// answering `offset=0, limit=20` with 18 items reports 0, and the next
    /// request asks for offset 18, not 20).
    pub fn next_offset(&self, returned: usize) -> u64 {
        self.offset + returned as u64
    }
}

/// A page of items plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    /// The returned slice, in server order.
    pub items: Vec<T>,
    /// Where this slice sits in the full result set.
    pub pagination: Page,
}

impl<T> Paged<T> {
    /// Offset for the request that would follow this page.
    pub fn next_offset(&self) -> u64 {
        self.pagination.next_offset(self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_offset_uses_server_reported_offset() {
        // Server answered offset=0 with 18 items even though 20 were asked
        // for; the follow-up must start at 18.
        let page = Page {
            offset: 0,
            limit: 20,
            total: None,
            has_more: true,
        };
        assert_eq!(page.next_offset(18), 18);
    }

    #[test]
    fn test_next_offset_composes_across_pages() {
        let page = Page {
            offset: 18,
            limit: 20,
            total: Some(40),
            has_more: true,
        };
        assert_eq!(page.next_offset(20), 38);
    }

    #[test]
    fn test_paged_next_offset_counts_items() {
        let paged = Paged {
            items: vec![1, 2, 3],
            pagination: Page {
                offset: 10,
                limit: 3,
                total: None,
                has_more: false,
            },
        };
        assert_eq!(paged.next_offset(), 13);
    }
}
