use std::process::ExitCode;

fn main() -> ExitCode {
    claimdesk_lib::run()
}
