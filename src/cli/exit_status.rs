use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): the command ran; findings, if any, were not requested to fail the run
/// - `Failure` (1): findings were made and an error flag (e.g. `--error-on-problems`) was set
/// - `Error` (2): configuration error, unreadable master dictionary or other internal error
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
