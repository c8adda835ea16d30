use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayStatus {
    Present,
    Partial,
    Absent,
    Future,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Present => "present",
            DayStatus::Partial => "partial",
            DayStatus::Absent => "absent",
            DayStatus::Future => "future",
        }
    }
}

/// Derived per-month attendance statistics. Computed on demand from the
/// session range; never stored as a source of truth.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    pub manager_id: String,
    pub year: i32,
    pub month: u32,
    pub present_days: u32,
    pub partial_days: u32,
    pub absent_days: u32,
    pub total_hours: f64,
    pub average_hours_per_present_day: f64,
}

impl MonthlySummary {
    pub fn month_str(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}
