use super::orders::{Order, Priority};
use super::response::OrdersResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page: u32,
    pub has_more: bool,
    pub loading: bool,
    pub total: u32,
    /// Last load of this bucket failed; cleared by the next success or reset
    pub error: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            has_more: true,
            loading: false,
            total: 0,
            error: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBucket {
    pub orders: Vec<Order>,
    pub pagination: PaginationState,
}

/// Issued when a page load starts; must be handed back with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub priority: Priority,
    pub page: u32,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { appended: usize },
    Failed,
    /// Filters changed while the request was in flight; result dropped
    Stale,
}

/// Urgent and routine buckets, paginated independently.
///
/// Every reset starts a new generation. Tickets from an older generation
/// are ignored when they come back, so a slow response for abandoned
/// filters can never land in the fresh lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBuckets {
    urgent: OrderBucket,
    routine: OrderBucket,
    generation: u64,
}

impl OrderBuckets {
    pub fn bucket(&self, priority: Priority) -> &OrderBucket {
        match priority {
            Priority::Urgent => &self.urgent,
            Priority::Routine => &self.routine,
        }
    }

    fn bucket_mut(&mut self, priority: Priority) -> &mut OrderBucket {
        match priority {
            Priority::Urgent => &mut self.urgent,
            Priority::Routine => &mut self.routine,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Clear both buckets back to page 1
    pub fn reset(&mut self) {
        self.generation += 1;
        self.urgent = OrderBucket::default();
        self.routine = OrderBucket::default();
    }

    /// Start loading the next page of `priority`. `None` while that bucket
    /// is already loading or has nothing more to load.
    pub fn begin_fetch(&mut self, priority: Priority) -> Option<FetchTicket> {
        let generation = self.generation;
        let bucket = self.bucket_mut(priority);
        if bucket.pagination.loading || !bucket.pagination.has_more {
            return None;
        }
        bucket.pagination.loading = true;
        Some(FetchTicket {
            priority,
            page: bucket.pagination.page,
            generation,
        })
    }

    pub fn complete_fetch(&mut self, ticket: FetchTicket, response: OrdersResponse) -> FetchOutcome {
        if ticket.generation != self.generation {
            return FetchOutcome::Stale;
        }
        let total = match ticket.priority {
            Priority::Urgent => response.count.urgent,
            Priority::Routine => response.count.routine,
        };
        let orders: Vec<Order> = response
            .orders
            .into_iter()
            .map(|raw| Order::from_raw(raw, ticket.priority))
            .collect();
        let appended = orders.len();

        let bucket = self.bucket_mut(ticket.priority);
        bucket.orders.extend(orders);
        bucket.pagination.total = total;
        bucket.pagination.page += 1;
        bucket.pagination.has_more = response.pagination.has_next;
        bucket.pagination.loading = false;
        bucket.pagination.error = false;
        FetchOutcome::Applied { appended }
    }

    /// Page and has_more stay as they were so "Load More" can retry
    pub fn fail_fetch(&mut self, ticket: FetchTicket) -> FetchOutcome {
        if ticket.generation != self.generation {
            return FetchOutcome::Stale;
        }
        let pagination = &mut self.bucket_mut(ticket.priority).pagination;
        pagination.loading = false;
        pagination.error = true;
        FetchOutcome::Failed
    }

    pub fn is_empty(&self) -> bool {
        self.urgent.orders.is_empty() && self.routine.orders.is_empty()
    }

    pub fn has_error(&self) -> bool {
        self.urgent.pagination.error || self.routine.pagination.error
    }

    pub fn find_order(&self, order_id: &str) -> Option<&Order> {
        self.urgent
            .orders
            .iter()
            .chain(self.routine.orders.iter())
            .find(|o| o.id == order_id)
    }
}
