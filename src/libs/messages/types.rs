#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleMonitor,
    ConfigLoadFailed(String), // error
    ConfigThresholdUpdated(u64),

    // === ACTIVITY MESSAGES ===
    ActivityStarted {
        kind: String,
        start: String,
    },
    ActivityStopped {
        id: i64,
        end: String,
    },
    ActivityStartFailed(String), // error
    ActivityCloseFailed(String), // error
    ActivityNotFound(i64),
    ActivitiesLoaded(usize),
    UnfinishedActivitiesCleaned(usize),
    UnknownActivityKind(String),
    InvalidActivityTimestamp(i64),

    // === MONITOR MESSAGES ===
    MonitorStarted {
        idle_threshold: u64,
        poll_interval: u64,
    },
    MonitorExitedNormally,
    MonitorShuttingDown,
    MonitorError(String),
    MonitorTaskPanicked(String),
    MonitorStatus {
        active: bool,
        last_input: String,
        today_total: String,
    },
    ErrorInRdevListener(String), // error

    // === WATCHER MESSAGES ===
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String), // error
    WatcherSignalHandlingNotSupported,
    FailedToCreateSigtermHandler,
    FailedToCreateSigintHandler,

    // === REPORT MESSAGES ===
    StatsTitle,
    TodayTitle(String), // date
    TimelineTitle,
    NoActivityRecorded,

    // === DATABASE MESSAGES ===
    DbConnectionFailed(String), // error

    // === PROMPTS ===
    PromptIdleThreshold,
    PromptPollInterval,
    PromptRefreshInterval,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    MigrationsUpToDate(u32),       // version
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
}
