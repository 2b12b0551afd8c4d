//! Default query parameters and who owns them
//!
//! With a crowd simulator the context reads and writes the simulator's own
//! extents and filter. Without one it keeps private copies. The tags below
//! make the difference explicit so nothing releases or overwrites storage it
//! only borrows.

use crate::Vec3;

use crate::crowd::CrowdRef;
use crate::query_filter::QueryFilter;

/// Where the default search extents live
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultExtents {
    /// Borrowed from the crowd simulator
    Crowd,
    /// Independent copy of the configured extents
    Owned(Vec3),
}

/// Where the default query filter lives
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultFilter {
    /// Borrowed from the crowd simulator
    Crowd,
    /// Filter owned by the context
    Owned(QueryFilter),
}

/// Default extents and filter of an active context
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultParameters {
    pub extents: DefaultExtents,
    pub filter: DefaultFilter,
}

impl DefaultParameters {
    /// Defaults backed by a crowd simulator
    pub fn borrowed() -> Self {
        Self {
            extents: DefaultExtents::Crowd,
            filter: DefaultFilter::Crowd,
        }
    }

    /// Defaults owned by the context
    pub fn owned(extents: Vec3) -> Self {
        Self {
            extents: DefaultExtents::Owned(extents),
            filter: DefaultFilter::Owned(QueryFilter::default()),
        }
    }

    pub fn extents(&self, crowd: Option<&CrowdRef>) -> Option<Vec3> {
        match (&self.extents, crowd) {
            (DefaultExtents::Owned(extents), _) => Some(*extents),
            (DefaultExtents::Crowd, Some(crowd)) => Some(crowd.borrow().query_extents()),
            (DefaultExtents::Crowd, None) => None,
        }
    }

    pub fn set_extents(&mut self, extents: Vec3, crowd: Option<&CrowdRef>) {
        match (&mut self.extents, crowd) {
            (DefaultExtents::Crowd, Some(crowd)) => crowd.borrow_mut().set_query_extents(extents),
            (slot, _) => *slot = DefaultExtents::Owned(extents),
        }
    }

    pub fn filter(&self, crowd: Option<&CrowdRef>) -> Option<QueryFilter> {
        match (&self.filter, crowd) {
            (DefaultFilter::Owned(filter), _) => Some(filter.clone()),
            (DefaultFilter::Crowd, Some(crowd)) => Some(crowd.borrow().query_filter().clone()),
            (DefaultFilter::Crowd, None) => None,
        }
    }

    /// Replaces the filter slot with an owned filter. A borrowed crowd filter
    /// is left untouched.
    pub fn set_filter(&mut self, filter: QueryFilter) {
        self.filter = DefaultFilter::Owned(filter);
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self.extents, DefaultExtents::Crowd) || matches!(self.filter, DefaultFilter::Crowd)
    }
}
