fn main() {
    if let Err(err) = covergrid::run() {
        eprintln!("{}", covergrid::format_error(&err));
        std::process::exit(1);
    }
}
