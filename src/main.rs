// Tue Feb 03 2026 - Alex

use charge_host::ui::{cli, ErrorDisplay};

fn main() {
    if let Err(e) = cli::run() {
        ErrorDisplay::new().print(&e);
        std::process::exit(1);
    }
}
