//! Request bodies sent to the order tracking plugin API.
//! `POST filter` takes a [`SavedFilter`](super::saved_filters::SavedFilter) as is.

use super::orders::{Order, OrderType};
use crate::error::{OrderTrackingError, Result};
use serde::Serialize;

/// `POST task-comments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddCommentRequest {
    pub patient_id: String,
    pub task_id: Option<String>,
    pub comment: String,
    pub order_type: OrderType,
    pub order_id: String,
}

impl AddCommentRequest {
    pub fn new(order: &Order, task_id: Option<&str>, comment: &str) -> Result<Self> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(OrderTrackingError::validation("comment is empty"));
        }
        Ok(Self {
            patient_id: order.patient_id.clone(),
            task_id: task_id.map(str::to_string),
            comment: comment.to_string(),
            order_type: order.order_type,
            order_id: order.id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order_tracking::orders::{Priority, RawOrder};

    fn imaging_order() -> Order {
        let raw: RawOrder = serde_json::from_value(serde_json::json!({
            "id": "i-3", "type": "Imaging", "patient_id": "p-1"
        }))
        .unwrap();
        Order::from_raw(raw, Priority::Routine)
    }

    #[test]
    fn test_body_shape() {
        let request = AddCommentRequest::new(&imaging_order(), Some("t-1"), " faxed again ").unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "patient_id": "p-1",
                "task_id": "t-1",
                "comment": "faxed again",
                "order_type": "Imaging",
                "order_id": "i-3"
            })
        );
    }

    #[test]
    fn test_blank_comment_rejected() {
        assert!(AddCommentRequest::new(&imaging_order(), None, "  ")
            .unwrap_err()
            .is_validation());
    }
}
