use std::process::ExitCode;

fn main() -> ExitCode {
    headlamp::cli::run()
}
