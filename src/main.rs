fn main() {
    if let Err(e) = rxrisk_lib::run() {
        tracing::error!("{e}");
        eprintln!("rxrisk: {e}");
        std::process::exit(1);
    }
}
