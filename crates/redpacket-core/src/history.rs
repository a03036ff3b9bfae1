//! Append-only, newest-first redemption history.

use serde::Serialize;

use crate::format::Amount;

/// One credited red packet. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedemptionRecord {
    pub id: u64,
    pub code: String,
    #[serde(rename = "amount_cents")]
    pub amount: Amount,
    pub timestamp_ms: u64,
}

/// Sample entries shown on a fresh screen, oldest first.
const SEED: [(&str, u64, u64); 3] = [
    ("H6Y2W8JQ4MUS", 966, 1_791_619_500_000),
    ("Z3R7T1VB9NCE", 5200, 1_791_808_800_000),
    ("8KD2M4QX7PLA", 1888, 1_791_922_500_000),
];

/// In-memory history. Index 0 is always the newest record.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<RedemptionRecord>,
}

impl History {
    pub fn empty() -> Self {
        Self::default()
    }

    /// History pre-filled with the three sample entries.
    pub fn seeded() -> Self {
        let mut history = Self::empty();
        for (code, cents, ts) in SEED {
            history.record(code, Amount::from_cents(cents), ts);
        }
        history
    }

    /// Prepend a new record; its id is the previous length plus one.
    pub fn record(&mut self, code: &str, amount: Amount, timestamp_ms: u64) -> &RedemptionRecord {
        let record = RedemptionRecord {
            id: self.records.len() as u64 + 1,
            code: code.to_string(),
            amount,
            timestamp_ms,
        };
        self.records.insert(0, record);
        &self.records[0]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&RedemptionRecord> {
        self.records.first()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &RedemptionRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[RedemptionRecord] {
        &self.records
    }

    /// Sum of every credited amount.
    pub fn total(&self) -> Amount {
        Amount::from_cents(self.records.iter().map(|r| r.amount.cents()).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_has_three_newest_first() {
        let h = History::seeded();
        assert_eq!(h.len(), 3);
        let ids: Vec<u64> = h.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(h.latest().unwrap().code, "8KD2M4QX7PLA");
        let ts: Vec<u64> = h.iter().map(|r| r.timestamp_ms).collect();
        assert!(ts.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn record_prepends_with_next_id() {
        let mut h = History::seeded();
        let id = h.record("Q9TM8H4W2ZL5", Amount::from_cents(4242), 42).id;
        assert_eq!(id, 4);
        assert_eq!(h.len(), 4);
        assert_eq!(h.as_slice()[0].code, "Q9TM8H4W2ZL5");
        assert_eq!(h.as_slice()[1].id, 3);
    }

    #[test]
    fn same_code_can_be_recorded_twice() {
        let mut h = History::empty();
        h.record("AAAAAAAAAAAA", Amount::from_cents(800), 1);
        h.record("AAAAAAAAAAAA", Amount::from_cents(900), 2);
        assert_eq!(h.len(), 2);
        assert_eq!(h.total(), Amount::from_cents(1700));
    }

    #[test]
    fn serializes_as_array() {
        let mut h = History::empty();
        h.record("AAAAAAAAAAAA", Amount::from_cents(1234), 7);
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["amount_cents"], 1234);
        assert_eq!(json[0]["timestamp_ms"], 7);
    }
}
