use std::ops::RangeInclusive;

/// How many page numbers the pager shows at once
pub const PAGE_RANGE_DISPLAYED: u32 = 10;

/// Pagination control: maps the active page and total page count to
/// page-selected events. Pages are 1-indexed and every emitted page lies
/// in `[1, total]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub active: u32,
    pub total: u32,
}

impl Pager {
    pub fn new(active: u32, total: u32) -> Self {
        Self { active, total }
    }

    pub fn next(&self) -> Option<u32> {
        self.select(self.active.saturating_add(1))
    }

    pub fn prev(&self) -> Option<u32> {
        self.select(self.active.saturating_sub(1))
    }

    pub fn first(&self) -> Option<u32> {
        self.select(1)
    }

    pub fn last(&self) -> Option<u32> {
        self.select(self.total)
    }

    /// Page-selected event for `page`, or None when it is out of range
    pub fn select(&self, page: u32) -> Option<u32> {
        (page >= 1 && page <= self.total).then_some(page)
    }

    /// Page numbers to display, centred on the active page where possible
    pub fn window(&self, range: u32) -> RangeInclusive<u32> {
        if self.total == 0 {
            return 1..=0;
        }
        let range = range.clamp(1, self.total);
        let mut start = self.active.saturating_sub(range / 2).max(1);
        let mut end = start + range - 1;
        if end > self.total {
            end = self.total;
            start = end + 1 - range;
        }
        start..=end
    }
}
