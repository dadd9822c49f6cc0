//! rAccessLog main entrypoint.

use raccesslog::run;

fn main() {
    if let Err(e) = run() {
        raccesslog::ui::messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
