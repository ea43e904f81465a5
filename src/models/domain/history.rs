use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed quiz, as kept in the local history list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryItem {
    pub date: DateTime<Utc>,
    pub category: String,
    pub score: u32,
    pub total: u32,
}

impl HistoryItem {
    pub fn new(category: impl Into<String>, score: u32, total: u32) -> Self {
        Self {
            date: Utc::now(),
            category: category.into(),
            score,
            total,
        }
    }

    pub fn percentage(&self) -> u32 {
        percentage(self.score, self.total)
    }
}

/// `round(score / total * 100)`, zero for an empty quiz.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(score) / f64::from(total) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds_to_nearest() {
        assert_eq!(percentage(3, 5), 60);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_history_item_serializes_date_as_rfc3339() {
        let item = HistoryItem::new("Analogy", 4, 5);

        let json = serde_json::to_value(&item).unwrap();
        let date = json["date"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(date).is_ok());
        assert_eq!(json["score"], 4);
        assert_eq!(item.percentage(), 80);
    }
}
