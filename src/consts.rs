pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains the fixed values the dashboard runs with,
    //! organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of event buffer size for worker tasks
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    pub mod ui {
        use std::time::Duration;

        /// How long the key poll blocks before the next redraw (milliseconds)
        pub const TICK_RATE_MS: u64 = 100;

        /// Default splash screen duration (milliseconds)
        pub const SPLASH_DURATION_MS: u64 = 2_000;

        pub const fn tick_rate() -> Duration {
            Duration::from_millis(TICK_RATE_MS)
        }
    }

    // =============================================================================
    // APPROVALS
    // =============================================================================

    pub mod approvals {
        use std::time::Duration;

        /// Simulated round-trip for an approval decision (milliseconds)
        pub const DECISION_LATENCY_MS: u64 = 1_000;

        /// Number of settled requests listed under "Recently Processed"
        pub const RECENTLY_PROCESSED_LIMIT: usize = 5;

        pub const fn decision_latency() -> Duration {
            Duration::from_millis(DECISION_LATENCY_MS)
        }
    }

    // =============================================================================
    // ATTENDANCE
    // =============================================================================

    pub mod attendance {
        /// Lowest percentage shown in the "high" tier
        pub const HIGH_TIER_MIN: u8 = 90;

        /// Lowest percentage shown in the "mid" tier
        pub const MID_TIER_MIN: u8 = 75;
    }

    // =============================================================================
    // FILTER OPTIONS
    // =============================================================================

    pub mod filters {
        /// Departments offered by the department selector
        pub const DEPARTMENTS: [&str; 4] =
            ["Computer Science", "Electronics", "Mechanical", "Electrical"];

        /// Years offered by the year selector
        pub const YEARS: [&str; 4] = ["1st Year", "2nd Year", "3rd Year", "4th Year"];

        /// Sentinel labels, one per selector
        pub const ALL_DEPARTMENTS: &str = "All Departments";
        pub const ALL_YEARS: &str = "All Years";
        pub const ALL_STATUS: &str = "All Status";
        pub const ALL_LEVELS: &str = "All Levels";
    }
}
