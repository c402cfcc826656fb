/// Number of pages needed for `total_count` records, `page_size` per page
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// What the pagination controls need: current 1-based page and page total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u32,
    pub total: u32,
}

impl Pagination {
    pub fn new(offset: u32, total_count: u64, page_size: u32) -> Self {
        Self {
            offset,
            total: total_pages(total_count, page_size),
        }
    }
}
