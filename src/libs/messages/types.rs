#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === PIPELINE MESSAGES ===
    HandlingMessage(String),       // raw message
    NotACandidate,
    ShortcutExpanded(String),      // expanded message
    UnknownTable(String),          // target
    UnclassifiedCommand,
    AuthenticationRejected(String), // phone number
    MessageRejected(String),       // reason
    RowInserted(String, i64),      // table, row id
    QueryResponded(String, usize), // table, row count
    FreeSlotResponded(String),     // table
    FreeSlotSearch(String, String), // column, min duration
    SkippedStoredRange(String),    // raw value

    // === MALFORMED COMMAND REASONS ===
    MalformedAddSegment,
    UnknownColumn(String),                // label
    InvalidValue(String, String),         // column, value
    MissingOperand(String),               // column
    RangeExactInstant(String),            // column
    RangeInstantInequality(String),       // column
    FreeSlotAlreadySet,
    FreeSlotNotRange(String),             // column
    InvalidDuration(String),              // value
    NoProjection,

    // === SMS RESPONSES ===
    NoRowsFound,
    Anytime,
    NoFreeSlots,

    // === TRANSPORT MESSAGES ===
    OutgoingSms { phone: String, text: String },
    WebhookDelivered(String),   // phone number
    DeliveryFailed(String),     // status or error
    MessageNotHandled(String),  // raw message
    ListenStarted,
    InvalidListenLine(String),  // line

    // === TABLE MESSAGES ===
    TableCreated(String),
    TableDropped(String),
    TableNotFound(String),
    TableAlreadyExists(String),
    ColumnAdded(String, String), // table, column key
    ColumnAlreadyExists(String, String),
    AccessControlSet(String, String), // table, access table
    AccessControlCleared(String),
    NoTablesFound,
    NoRowsInTable(String),
    InvalidIdentifier(String),
    TablesHeader,
    ColumnsHeader(String),
    RowsHeader(String),

    // === SHORTCUT MESSAGES ===
    ShortcutCreated(String),
    ShortcutDeleted(i64),
    ShortcutNotFound(i64),
    NoShortcutsFound,
    ShortcutsHeader,

    // === PASSWORD MESSAGES ===
    PasswordAdded(String, String), // access table, phone
    PasswordRevoked(i64),
    PasswordNotFound(i64),
    NoPasswordsFound(String),
    PasswordsHeader(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleSms,
    ConfigModuleTransport,
    InvalidSentinel(char),
    InvalidRowLimit,
    InvalidDateFormat(String),

    // === PROMPTS ===
    PromptSelectModules,
    PromptSentinel,
    PromptRowLimit,
    PromptDateFormat,
    PromptMaxLength,
    PromptWebhookUrl,
    PromptWebhookToken,
    PromptShortcutName,
    PromptShortcutInput,
    PromptShortcutOutput,
    PromptPassword,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseUpToDate,
}
