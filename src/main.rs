fn main() {
    if let Err(err) = csv_fit::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
