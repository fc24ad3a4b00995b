/// Aggregate counters shown on the dashboard.
#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub users      : u64,
    pub transports : u64,
    pub stations   : u64,
    pub events     : u64,
    pub zones      : u64,
    pub trips      : u64,
}
