use super::{commands::CommandResult, exit_status::ExitStatus};

pub fn exit_status_from_result(result: &CommandResult) -> ExitStatus {
    if result.exit_on_errors && result.error_count > 0 {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{CommandSummary, InitSummary};

    fn result(error_count: usize, exit_on_errors: bool) -> CommandResult {
        CommandResult {
            summary: CommandSummary::Init(InitSummary { created: true }),
            error_count,
            exit_on_errors,
        }
    }

    #[test]
    fn test_errors_fail_only_when_requested() {
        assert_eq!(exit_status_from_result(&result(0, true)), ExitStatus::Success);
        assert_eq!(exit_status_from_result(&result(3, false)), ExitStatus::Success);
        assert_eq!(exit_status_from_result(&result(3, true)), ExitStatus::Failure);
    }
}
