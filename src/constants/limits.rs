/// Uploads larger than this are rejected before any generation work starts.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const MIN_QUESTION_COUNT: i32 = 1;
pub const MAX_QUESTION_COUNT: i32 = 50;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Seconds. Large documents routinely take minutes in the generation flow.
pub const GENERATION_TIMEOUT_SECS: u64 = 300;

/// Number of attempts plotted in the history chart.
pub const HISTORY_CHART_POINTS: usize = 10;

/// Storage prefix for uploaded source documents.
pub const DOCUMENT_PREFIX: &str = "quizzes_pdfs";
