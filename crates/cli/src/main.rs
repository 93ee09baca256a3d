fn main() {
    if let Err(e) = djset_cli::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
