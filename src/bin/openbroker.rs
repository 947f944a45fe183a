use std::io::Write;

fn main() {
    if let Err(e) = openbroker::cmd::run() {
        eprintln!("Error: {e}");
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
        std::process::exit(1);
    }
}
