use std::process::ExitCode;

use plzero::processor::CodeGenError;

fn main() -> ExitCode {
    match plzero::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            // A generator failure exits with its error code.
            let status = e
                .downcast_ref::<CodeGenError>()
                .map_or(1, |err| err.code() as u8);
            ExitCode::from(status)
        }
    }
}
