//! Life events: bounded-duration cash flows outside the recurring rules

use serde::{Deserialize, Serialize};

/// A one-off or recurring cash flow (tuition, home purchase, inheritance).
///
/// Amounts are stored signed: positive is income, negative is expense. The
/// event applies to `duration` consecutive years starting with `year`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    /// First calendar year the event applies
    pub year: i32,

    /// Annual amount, signed (positive = income, negative = expense)
    pub amount: f64,

    /// Number of consecutive years the event applies, inclusive of `year`.
    /// A zero duration makes the event inert rather than invalid.
    #[serde(default = "default_duration")]
    pub duration: u32,

    /// Free-text label shown in tables and charts
    #[serde(default)]
    pub note: String,
}

fn default_duration() -> u32 {
    1
}

impl LifeEvent {
    pub fn new(year: i32, amount: f64, duration: u32, note: &str) -> Self {
        Self {
            year,
            amount,
            duration,
            note: note.to_string(),
        }
    }

    /// Whether this event contributes a cash flow in the given year.
    pub fn is_active(&self, year: i32) -> bool {
        year >= self.year && year < self.year + self.duration as i32
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}

/// The stock event list used when no plan file is supplied: international
/// schooling, a suburban home purchase, inheritance, and side income.
pub fn default_life_events() -> Vec<LifeEvent> {
    vec![
        // Education
        LifeEvent::new(2025, -1_800_000.0, 1, "国際幼稚園"),
        LifeEvent::new(2026, -5_000_000.0, 6, "国際学校学費（小学校）"),
        LifeEvent::new(2033, -5_000_000.0, 3, "中学校補習費/留学準備"),
        LifeEvent::new(2035, -5_000_000.0, 3, "高校留学学費"),
        LifeEvent::new(2042, -8_000_000.0, 4, "海外大学学費"),
        // Large purchases and family support
        LifeEvent::new(2036, -40_000_000.0, 1, "郊外住宅購入"),
        LifeEvent::new(2036, -5_000_000.0, 1, "自動車購入"),
        LifeEvent::new(2040, -3_000_000.0, 1, "親への一時支援"),
        LifeEvent::new(2049, -3_000_000.0, 1, "子供結婚祝い金"),
        // Windfalls
        LifeEvent::new(2055, 10_000_000.0, 1, "遺産相続"),
        LifeEvent::new(2060, 16_000_000.0, 1, "不動産売却"),
        // Side income
        LifeEvent::new(2030, 1_200_000.0, 15, "本人副業収入"),
        LifeEvent::new(2035, 600_000.0, 15, "配偶者副業収入"),
    ]
}
