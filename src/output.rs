//! User-facing console messages.
//! Colored prefixes only when the stream is a TTY; plain text otherwise so that
//! scripts capturing output see stable strings.

use owo_colors::{OwoColorize, Style};
use std::path::Path;

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

fn is_tty(stream: Stream) -> bool {
    match stream {
        Stream::Stdout => atty::is(atty::Stream::Stdout),
        Stream::Stderr => atty::is(atty::Stream::Stderr),
    }
}

fn emit(stream: Stream, label: &str, style: Style, msg: &str) {
    let line = if is_tty(stream) {
        format!("{} {}", label.style(style), msg)
    } else {
        format!("{label} {msg}")
    };
    match stream {
        Stream::Stdout => println!("{line}"),
        Stream::Stderr => eprintln!("{line}"),
    }
}

pub fn print_info(msg: &str) {
    emit(Stream::Stdout, "info:", Style::new().cyan().bold(), msg);
}

pub fn print_warn(msg: &str) {
    emit(Stream::Stderr, "warn:", Style::new().yellow().bold(), msg);
}

pub fn print_error(msg: &str) {
    emit(Stream::Stderr, "error:", Style::new().red().bold(), msg);
}

pub fn print_success(msg: &str) {
    emit(Stream::Stdout, "ok:", Style::new().green().bold(), msg);
}

/// Print a bare path on stdout (no prefix, no color). This is the line scripts
/// capture, e.g. `tmp=$(fdb_symlink v3 --dir /srv/live)`.
pub fn print_path(path: &Path) {
    println!("{}", path.display());
}
