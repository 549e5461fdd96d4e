/// Per-day totals, all in minutes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub worked: i64,
    pub lunch: i64,
    pub internal: i64,
    pub open_intervals: usize,
}

impl DaySummary {
    /// Clocked time plus internal company time.
    pub fn total(&self) -> i64 {
        self.worked + self.internal
    }
}
