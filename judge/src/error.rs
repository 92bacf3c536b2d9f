use tak::{ReplayError, TranscriptError};

#[derive(Debug)]
/// Why an input could not be judged. I/O failures are reported separately.
pub enum RejectedInput {
    Transcript(TranscriptError),
    MoveLog(ReplayError),
}

impl From<TranscriptError> for RejectedInput {
    fn from(err: TranscriptError) -> Self {
        RejectedInput::Transcript(err)
    }
}

impl From<ReplayError> for RejectedInput {
    fn from(err: ReplayError) -> Self {
        RejectedInput::MoveLog(err)
    }
}

impl std::error::Error for RejectedInput {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RejectedInput::Transcript(err) => Some(err),
            RejectedInput::MoveLog(err) => Some(err),
        }
    }
}

impl std::fmt::Display for RejectedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectedInput::Transcript(_) => write!(f, "The transcript could not be replayed"),
            RejectedInput::MoveLog(_) => write!(f, "The move log could not be replayed"),
        }
    }
}
