/// Every user-facing text of the application.
///
/// Variants carry the dynamic parts; the wording lives in the `Display`
/// implementation in `display.rs`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated { title: String, id: String },
    TasksCompleted(u64),
    NoTaskMatched(String), // task reference
    TasksHeader(String),   // filter description
    NoTasksFound(String),  // filter description
    RelatedTasksHeader,
    AnswerHeader,
    ShowingLastKnownTasks,
    NothingToComplete,

    // === FAILURE MESSAGES ===
    TaskListFailed(String),
    TaskCreateFailed(String),
    TaskCompleteFailed(String),
    AskFailed(String),
    AudioReadFailed(String), // path
    InvalidDate(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleServer,
    UsingBackend(String),

    // === BOARD MESSAGES ===
    BoardTitle(String), // filter description
    BoardActionRefresh,
    BoardActionFilter,
    BoardActionAdd,
    BoardActionAddAudio,
    BoardActionComplete,
    BoardActionAsk,
    BoardActionQuit,
    BoardClosed,

    // === PROMPTS ===
    PromptApiUrl,
    PromptTimeout,
    PromptAction,
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskCategory,
    PromptTaskPriority,
    PromptTaskDue,
    PromptAudioPath,
    PromptQuestion,
    PromptStatus,
    PromptDue,
    PromptSearch,
    PromptCategory,
    PromptSelectTask,

    // === FILTER CHOICES ===
    FilterAny,
}
