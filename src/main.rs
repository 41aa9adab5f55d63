use std::process::ExitCode;

use fdb_symlink::SymlinkError;
use fdb_symlink::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = fdb_symlink::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            let code = e.downcast_ref::<SymlinkError>().map(SymlinkError::code).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
