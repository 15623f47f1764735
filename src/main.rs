use std::process::ExitCode;

fn main() -> ExitCode {
    match yearshelf::runtime::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("yearshelf: {e}");
            ExitCode::FAILURE
        }
    }
}
