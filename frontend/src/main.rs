use log::{error, info};

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(aroma::config::log_level()).expect("error initializing log");

    info!("Starting page interactions");
    if let Err(e) = aroma::run() {
        error!("Page interactions unavailable: {}", e);
    }
}
